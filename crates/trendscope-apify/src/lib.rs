//! Minimal client for the Apify platform API.
//!
//! Starts actor runs, waits for them to finish within a ceiling, and fetches
//! the resulting dataset items as raw JSON.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApifyClient;
pub use error::ApifyError;
pub use types::{ActorOutput, RunData, RunStatus};
