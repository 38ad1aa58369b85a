use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_category() -> String {
    "Education".to_string()
}

/// One campaign client, loaded from `<clients_dir>/<id>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Client id. Defaults to the id the file was loaded under.
    #[serde(default)]
    pub client: String,
    #[serde(rename = "clientFullName")]
    pub client_full_name: String,
    pub region: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Facebook page URLs scraped by the Meta pipeline.
    #[serde(default)]
    pub facebook_pages: Vec<String>,
    /// Topic keywords for post text matching. Empty means the built-in list.
    #[serde(default)]
    pub topic_keywords: Vec<String>,
}

impl ClientConfig {
    /// Display label used in reports, e.g. `"ucsp - Universidad Católica San Pablo"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.client, self.client_full_name)
    }
}

/// Resolve the JSON file path for a client id.
#[must_use]
pub fn client_config_path(clients_dir: &Path, client_id: &str) -> PathBuf {
    clients_dir.join(format!("{client_id}.json"))
}

/// Load and validate the config record for `client_id`.
///
/// # Errors
///
/// Returns [`ConfigError::ClientNotFound`] when no file exists for the id,
/// [`ConfigError::ClientFileIo`] / [`ConfigError::ClientFileParse`] when it
/// cannot be read or parsed, and [`ConfigError::Validation`] for unusable ids
/// or records.
pub fn load_client_config(clients_dir: &Path, client_id: &str) -> Result<ClientConfig, ConfigError> {
    validate_client_id(client_id)?;

    let path = client_config_path(clients_dir, client_id);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ClientNotFound {
                client: client_id.to_string(),
                path: path.display().to_string(),
            });
        }
        Err(e) => {
            return Err(ConfigError::ClientFileIo {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    let mut config: ClientConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ClientFileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    if config.client.trim().is_empty() {
        config.client = client_id.to_string();
    }

    validate_client(&config)?;

    Ok(config)
}

fn validate_client_id(client_id: &str) -> Result<(), ConfigError> {
    if client_id.trim().is_empty() {
        return Err(ConfigError::Validation(
            "client id must be non-empty".to_string(),
        ));
    }
    if client_id.contains(['/', '\\']) || client_id.contains("..") {
        return Err(ConfigError::Validation(format!(
            "client id '{client_id}' must not contain path separators or '..'"
        )));
    }
    Ok(())
}

fn validate_client(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.client_full_name.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "client '{}' has an empty clientFullName",
            config.client
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "clients_test.rs"]
mod tests;
