use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("APIFY_TOKEN", "apify_api_test");
    m
}

#[test]
fn build_app_config_fails_without_token() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "APIFY_TOKEN"),
        "expected MissingEnvVar(APIFY_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_token_as_missing() {
    let mut map = HashMap::new();
    map.insert("APIFY_TOKEN", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "APIFY_TOKEN"),
        "expected MissingEnvVar(APIFY_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(cfg.apify_token, "apify_api_test");
    assert_eq!(cfg.apify_base_url, DEFAULT_APIFY_BASE_URL);
    assert_eq!(cfg.clients_dir, PathBuf::from("./config/clients"));
    assert_eq!(cfg.output_root, PathBuf::from("."));
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.wait_timeout_secs, 300);
    assert_eq!(cfg.request_timeout_secs, 90);
    assert_eq!(cfg.poll_interval_ms, 1000);
}

#[test]
fn build_app_config_applies_overrides() {
    let mut map = full_env();
    map.insert("APIFY_BASE_URL", "http://127.0.0.1:9000/v2");
    map.insert("TRENDSCOPE_CLIENTS_DIR", "/etc/trendscope/clients");
    map.insert("TRENDSCOPE_OUTPUT_ROOT", "/srv/dashboard");
    map.insert("TRENDSCOPE_WAIT_TIMEOUT_SECS", "120");
    map.insert("TRENDSCOPE_POLL_INTERVAL_MS", "250");
    let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(cfg.apify_base_url, "http://127.0.0.1:9000/v2");
    assert_eq!(cfg.clients_dir, PathBuf::from("/etc/trendscope/clients"));
    assert_eq!(cfg.output_root, PathBuf::from("/srv/dashboard"));
    assert_eq!(cfg.wait_timeout_secs, 120);
    assert_eq!(cfg.poll_interval_ms, 250);
}

#[test]
fn build_app_config_rejects_non_numeric_wait_timeout() {
    let mut map = full_env();
    map.insert("TRENDSCOPE_WAIT_TIMEOUT_SECS", "five minutes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDSCOPE_WAIT_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TRENDSCOPE_WAIT_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_wait_timeout() {
    let mut map = full_env();
    map.insert("TRENDSCOPE_WAIT_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDSCOPE_WAIT_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TRENDSCOPE_WAIT_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_negative_request_timeout() {
    let mut map = full_env();
    map.insert("TRENDSCOPE_REQUEST_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDSCOPE_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TRENDSCOPE_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_token() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("apify_api_test"), "token leaked: {debug}");
    assert!(debug.contains("[redacted]"));
}
