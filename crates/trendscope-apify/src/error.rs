use thiserror::Error;

use crate::types::RunStatus;

/// Errors returned by the Apify API client.
#[derive(Debug, Error)]
pub enum ApifyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Apify API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The run reached a terminal status other than `SUCCEEDED`.
    #[error("actor run {run_id} finished with status {status}")]
    RunFailed { run_id: String, status: RunStatus },

    /// The wait ceiling elapsed before the run reached a terminal status.
    /// The remote run keeps going; it is not aborted.
    #[error("actor run {run_id} still {status} after waiting {waited_secs}s")]
    WaitTimeout {
        run_id: String,
        status: RunStatus,
        waited_secs: u64,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
