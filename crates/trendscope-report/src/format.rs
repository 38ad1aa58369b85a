//! Human-readable count formatting for dashboard output.

use serde_json::Value;

/// Renders a raw count for display: `1500 → "1.5K"`, `2_300_000 → "2.3M"`.
///
/// - missing or falsy (`null`, `0`, `""`, `false`) → `"0"`
/// - strings pass through unchanged (the actor sometimes pre-formats counts)
/// - numbers ≥ 1e9 / 1e6 / 1e3 → one decimal place (halves up) plus
///   `B` / `M` / `K`
/// - smaller numbers → plain integer text; non-integral floats keep their
///   fraction
/// - any other JSON type → `"0"`
#[must_use]
pub fn format_number(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|f| *f != 0.0 && f.is_finite())
            .map_or_else(|| "0".to_string(), |f| format_count(f, n)),
        _ => "0".to_string(),
    }
}

fn format_count(value: f64, raw: &serde_json::Number) -> String {
    if value >= 1e9 {
        format!("{:.1}B", round_tenths(value / 1e9))
    } else if value >= 1e6 {
        format!("{:.1}M", round_tenths(value / 1e6))
    } else if value >= 1e3 {
        format!("{:.1}K", round_tenths(value / 1e3))
    } else if raw.is_f64() && value.fract() == 0.0 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = value as i64;
        whole.to_string()
    } else {
        raw.to_string()
    }
}

/// Rounds to one decimal with halves going up (`1.25 → 1.3`). `{:.1}` alone
/// rounds ties to even.
fn round_tenths(scaled: f64) -> f64 {
    (scaled * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fmt(value: &Value) -> String {
        format_number(Some(value))
    }

    #[test]
    fn small_numbers_render_as_integers() {
        assert_eq!(fmt(&json!(999)), "999");
        assert_eq!(fmt(&json!(7)), "7");
        assert_eq!(fmt(&json!(42.0)), "42");
    }

    #[test]
    fn thousands_get_k_suffix() {
        assert_eq!(fmt(&json!(1500)), "1.5K");
        assert_eq!(fmt(&json!(1000)), "1.0K");
    }

    #[test]
    fn ties_round_half_up() {
        assert_eq!(fmt(&json!(1250)), "1.3K");
        assert_eq!(fmt(&json!(3250)), "3.3K");
        assert_eq!(fmt(&json!(2_250_000)), "2.3M");
    }

    #[test]
    fn millions_get_m_suffix() {
        assert_eq!(fmt(&json!(2_300_000)), "2.3M");
    }

    #[test]
    fn billions_get_b_suffix() {
        assert_eq!(fmt(&json!(1_000_000_000)), "1.0B");
        assert_eq!(fmt(&json!(4_700_000_000_u64)), "4.7B");
    }

    #[test]
    fn zero_and_missing_render_as_zero() {
        assert_eq!(fmt(&json!(0)), "0");
        assert_eq!(fmt(&json!(null)), "0");
        assert_eq!(fmt(&json!("")), "0");
        assert_eq!(format_number(None), "0");
    }

    #[test]
    fn strings_pass_through_unchanged() {
        assert_eq!(fmt(&json!("12.4M")), "12.4M");
        assert_eq!(fmt(&json!("n/a")), "n/a");
    }

    #[test]
    fn fractional_small_values_keep_fraction() {
        assert_eq!(fmt(&json!(12.5)), "12.5");
    }

    #[test]
    fn non_scalar_values_render_as_zero() {
        assert_eq!(fmt(&json!({ "count": 5 })), "0");
        assert_eq!(fmt(&json!([1, 2])), "0");
    }
}
