//! Apify API envelope and run metadata types.
//!
//! Every `/v2` endpoint that returns an object wraps it as `{"data": {...}}`.
//! Dataset item listings are the exception: they return a bare JSON array,
//! and the item shape is actor-specific, so items stay as
//! [`serde_json::Value`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Lifecycle status of an actor run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RunStatus {
    #[serde(rename = "READY")]
    Ready,
    #[serde(rename = "RUNNING")]
    Running,
    #[serde(rename = "SUCCEEDED")]
    Succeeded,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "TIMING-OUT")]
    TimingOut,
    #[serde(rename = "TIMED-OUT")]
    TimedOut,
    #[serde(rename = "ABORTING")]
    Aborting,
    #[serde(rename = "ABORTED")]
    Aborted,
    /// Any status string this client does not know about. Treated as
    /// non-terminal so the wait ceiling still applies.
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// `true` once the run will not transition any further.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunStatus::Succeeded | RunStatus::Failed | RunStatus::TimedOut | RunStatus::Aborted
        )
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        self == RunStatus::Succeeded
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Ready => "READY",
            RunStatus::Running => "RUNNING",
            RunStatus::Succeeded => "SUCCEEDED",
            RunStatus::Failed => "FAILED",
            RunStatus::TimingOut => "TIMING-OUT",
            RunStatus::TimedOut => "TIMED-OUT",
            RunStatus::Aborting => "ABORTING",
            RunStatus::Aborted => "ABORTED",
            RunStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: RunStatus,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt", default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt", default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunData {
    /// Platform-side run time in whole seconds, once both timestamps are set.
    #[must_use]
    pub fn duration_secs(&self) -> Option<i64> {
        match (self.started_at, self.finished_at) {
            (Some(started), Some(finished)) => Some((finished - started).num_seconds()),
            _ => None,
        }
    }
}

/// Result of a complete start → wait → fetch cycle.
#[derive(Debug, Clone)]
pub struct ActorOutput {
    pub run: RunData,
    pub items: Vec<serde_json::Value>,
}

/// Error body shape: `{"error": {"type": "...", "message": "..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub message: String,
}
