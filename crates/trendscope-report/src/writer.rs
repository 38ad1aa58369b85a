//! Persists reports as pretty-printed JSON.
//!
//! Every successful run writes the same bytes to three places under the
//! output root:
//!
//! - `data/<source>/<source>_<YYYYMMDD>.json` (dated snapshot)
//! - `data/<source>/latest.json`
//! - `public/data/<source>/latest.json` (served by the dashboard)
//!
//! The date stamp comes from the report timestamp, so a second run on the
//! same UTC day overwrites that day's snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ReportError;
use crate::types::Report;

const LATEST_FILE: &str = "latest.json";

/// Paths written by one [`ResultWriter::persist`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub snapshot: PathBuf,
    pub latest: PathBuf,
    pub public_latest: PathBuf,
}

impl WrittenFiles {
    #[must_use]
    pub fn paths(&self) -> [&Path; 3] {
        [&self.snapshot, &self.latest, &self.public_latest]
    }
}

#[derive(Debug, Clone)]
pub struct ResultWriter {
    root: PathBuf,
}

impl ResultWriter {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Serializes `report` once and writes it to all three destinations,
    /// creating directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialize`] if the report cannot be encoded, or
    /// [`ReportError::Io`] naming the first path that could not be created or
    /// written. Files written before the failure are left in place.
    pub fn persist<P: Serialize>(
        &self,
        report: &Report<P>,
        source: &str,
    ) -> Result<WrittenFiles, ReportError> {
        let body = serde_json::to_string_pretty(report)?;
        let stamp = report.timestamp.format("%Y%m%d");

        let data_dir = self.root.join("data").join(source);
        let public_dir = self.root.join("public").join("data").join(source);

        let files = WrittenFiles {
            snapshot: data_dir.join(format!("{source}_{stamp}.json")),
            latest: data_dir.join(LATEST_FILE),
            public_latest: public_dir.join(LATEST_FILE),
        };

        for path in files.paths() {
            write_file(path, &body)?;
            tracing::debug!(path = %path.display(), "wrote report file");
        }

        tracing::info!(
            source,
            snapshot = %files.snapshot.display(),
            "report persisted"
        );

        Ok(files)
    }
}

fn write_file(path: &Path, body: &str) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, body).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
