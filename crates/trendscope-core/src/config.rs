use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_APIFY_BASE_URL: &str = "https://api.apify.com/v2/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    // A blank value is as unusable as an absent one.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let apify_token = require("APIFY_TOKEN")?;
    let apify_base_url = or_default("APIFY_BASE_URL", DEFAULT_APIFY_BASE_URL);
    let clients_dir = PathBuf::from(or_default("TRENDSCOPE_CLIENTS_DIR", "./config/clients"));
    let output_root = PathBuf::from(or_default("TRENDSCOPE_OUTPUT_ROOT", "."));
    let log_level = or_default("TRENDSCOPE_LOG_LEVEL", "info");

    let wait_timeout_secs = parse_u64("TRENDSCOPE_WAIT_TIMEOUT_SECS", "300")?;
    if wait_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRENDSCOPE_WAIT_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let request_timeout_secs = parse_u64("TRENDSCOPE_REQUEST_TIMEOUT_SECS", "90")?;
    let poll_interval_ms = parse_u64("TRENDSCOPE_POLL_INTERVAL_MS", "1000")?;

    Ok(AppConfig {
        apify_token,
        apify_base_url,
        clients_dir,
        output_root,
        log_level,
        wait_timeout_secs,
        request_timeout_secs,
        poll_interval_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
