//! Shared configuration for the trendscope pipelines.
//!
//! [`AppConfig`] is built once per process from the environment and handed to
//! the Apify client and the result writer. [`ClientConfig`] is the per-client
//! record selected by the `--client` flag.

pub mod app_config;
pub mod clients;
pub mod config;

use thiserror::Error;

pub use app_config::AppConfig;
pub use clients::{load_client_config, ClientConfig};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("client config for '{client}' not found at {path}")]
    ClientNotFound { client: String, path: String },

    #[error("failed to read client config {path}: {source}")]
    ClientFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse client config {path}: {source}")]
    ClientFileParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("config validation error: {0}")]
    Validation(String),
}
