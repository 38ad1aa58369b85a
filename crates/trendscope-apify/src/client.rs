//! HTTP client for the Apify REST API (`/v2`).
//!
//! Covers the three calls a batch scrape needs: start an actor run, wait for
//! it to reach a terminal status, and list the items of its default dataset.
//! There is no retry layer; every failure is returned to the caller as-is.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time::Instant;

use crate::error::ApifyError;
use crate::types::{ActorOutput, ApiResponse, ErrorBody, RunData};

const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2/";

/// Upper bound the API accepts for the `waitForFinish` long-poll parameter.
const MAX_WAIT_PER_REQUEST_SECS: u64 = 60;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Client for the Apify REST API.
///
/// Use [`ApifyClient::new`] for production or [`ApifyClient::with_base_url`]
/// to point at a mock server in tests.
pub struct ApifyClient {
    client: Client,
    token: String,
    base_url: Url,
    poll_interval: Duration,
}

impl ApifyClient {
    /// Creates a new client pointed at the production Apify API.
    ///
    /// `timeout_secs` bounds each HTTP request, so it must exceed the 60 s
    /// server-side long poll used by [`ApifyClient::wait_for_finish`].
    ///
    /// # Errors
    ///
    /// Returns [`ApifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self, ApifyError> {
        Self::with_base_url(token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApifyError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(token: &str, timeout_secs: u64, base_url: &str) -> Result<Self, ApifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("trendscope/0.1 (social-trends)")
            .build()?;

        // Exactly one trailing slash, so `Url::join` appends to the path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApifyError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url: parsed,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Sets the pause between status polls that come back non-terminal.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Starts an actor run with the given JSON input. Returns as soon as the
    /// platform has accepted the run.
    ///
    /// `actor_id` may be given as `username/actor-name`; the slash is encoded
    /// as `~` as the API requires.
    ///
    /// # Errors
    ///
    /// - [`ApifyError::Api`] on a non-2xx response (bad token, unknown actor,
    ///   quota exhausted).
    /// - [`ApifyError::Http`] on network failure.
    /// - [`ApifyError::Deserialize`] if the response is not a run envelope.
    pub async fn start_run<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<RunData, ApifyError> {
        let url = self.actor_runs_url(actor_id)?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let envelope: ApiResponse<RunData> =
            Self::read_json(response, &format!("start run of {actor_id}")).await?;
        Ok(envelope.data)
    }

    /// Waits until run `run_id` reaches a terminal status or `timeout` elapses.
    ///
    /// Each request asks the API to hold the connection open for up to 60 s
    /// (`waitForFinish`), never beyond the remaining budget. Non-terminal
    /// answers are followed by a short pause before polling again.
    ///
    /// # Errors
    ///
    /// - [`ApifyError::RunFailed`] if the run ends in any status other than
    ///   `SUCCEEDED`.
    /// - [`ApifyError::WaitTimeout`] if `timeout` elapses first. The remote
    ///   run is left running.
    /// - [`ApifyError::Api`], [`ApifyError::Http`], [`ApifyError::Deserialize`]
    ///   on transport or response failures.
    pub async fn wait_for_finish(&self, run_id: &str, timeout: Duration) -> Result<RunData, ApifyError> {
        let started = Instant::now();

        loop {
            let remaining = timeout.saturating_sub(started.elapsed());
            let wait_secs = remaining.as_secs().min(MAX_WAIT_PER_REQUEST_SECS);
            let run = self.get_run(run_id, wait_secs).await?;

            if run.status.is_terminal() {
                if run.status.is_success() {
                    return Ok(run);
                }
                return Err(ApifyError::RunFailed {
                    run_id: run.id,
                    status: run.status,
                });
            }

            let elapsed = started.elapsed();
            if elapsed >= timeout {
                return Err(ApifyError::WaitTimeout {
                    run_id: run.id,
                    status: run.status,
                    waited_secs: elapsed.as_secs(),
                });
            }

            tracing::debug!(run_id, status = %run.status, "run still in progress");
            tokio::time::sleep(self.poll_interval.min(timeout - elapsed)).await;
        }
    }

    /// Fetches the current state of a run, long-polling for up to `wait_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`ApifyError::Api`], [`ApifyError::Http`] or
    /// [`ApifyError::Deserialize`] on failure.
    pub async fn get_run(&self, run_id: &str, wait_secs: u64) -> Result<RunData, ApifyError> {
        let url = self.run_url(run_id, wait_secs)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let envelope: ApiResponse<RunData> =
            Self::read_json(response, &format!("get run {run_id}")).await?;
        Ok(envelope.data)
    }

    /// Lists every item of a dataset. An empty dataset is a valid result.
    ///
    /// # Errors
    ///
    /// Returns [`ApifyError::Api`], [`ApifyError::Http`] or
    /// [`ApifyError::Deserialize`] (body is not a JSON array) on failure.
    pub async fn dataset_items(&self, dataset_id: &str) -> Result<Vec<serde_json::Value>, ApifyError> {
        let url = self.dataset_items_url(dataset_id)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::read_json(response, &format!("dataset {dataset_id} items")).await
    }

    /// Runs an actor end-to-end: start, wait up to `timeout`, fetch items.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`ApifyClient::start_run`],
    /// [`ApifyClient::wait_for_finish`] or [`ApifyClient::dataset_items`].
    pub async fn run_actor<I: Serialize + ?Sized>(
        &self,
        actor_id: &str,
        input: &I,
        timeout: Duration,
    ) -> Result<ActorOutput, ApifyError> {
        tracing::info!(actor_id, timeout_secs = timeout.as_secs(), "starting Apify actor run");

        let run = self.start_run(actor_id, input).await?;
        tracing::info!(run_id = %run.id, status = %run.status, "actor run started, waiting for completion");

        let run = self.wait_for_finish(&run.id, timeout).await?;
        tracing::info!(
            run_id = %run.id,
            dataset_id = %run.default_dataset_id,
            duration_secs = run.duration_secs(),
            "actor run succeeded, fetching dataset items"
        );

        let items = self.dataset_items(&run.default_dataset_id).await?;
        tracing::info!(count = items.len(), "fetched dataset items");

        Ok(ActorOutput { run, items })
    }

    fn actor_runs_url(&self, actor_id: &str) -> Result<Url, ApifyError> {
        let encoded = actor_id.replace('/', "~");
        self.join(&format!("acts/{encoded}/runs"))
    }

    fn run_url(&self, run_id: &str, wait_secs: u64) -> Result<Url, ApifyError> {
        let mut url = self.join(&format!("actor-runs/{run_id}"))?;
        url.query_pairs_mut()
            .append_pair("waitForFinish", &wait_secs.to_string());
        Ok(url)
    }

    fn dataset_items_url(&self, dataset_id: &str) -> Result<Url, ApifyError> {
        let mut url = self.join(&format!("datasets/{dataset_id}/items"))?;
        url.query_pairs_mut().append_pair("format", "json");
        Ok(url)
    }

    fn join(&self, path: &str) -> Result<Url, ApifyError> {
        self.base_url
            .join(path)
            .map_err(|e| ApifyError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join '{path}': {e}"),
            })
    }

    /// Checks for a 2xx status and decodes the body as `T`.
    ///
    /// Non-2xx bodies are surfaced as [`ApifyError::Api`], using the API's
    /// `error.message` when the body follows the documented error shape.
    async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ApifyError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApifyError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => match parsed.error.kind {
            Some(kind) => format!("{kind}: {}", parsed.error.message),
            None => parsed.error.message,
        },
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> ApifyClient {
        ApifyClient::with_base_url("test-token", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn actor_runs_url_encodes_owner_separator() {
        let client = test_client("https://api.apify.com/v2");
        let url = client
            .actor_runs_url("apify/facebook-posts-scraper")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.apify.com/v2/acts/apify~facebook-posts-scraper/runs"
        );
    }

    #[test]
    fn base_url_with_trailing_slash_is_normalised() {
        let client = test_client("https://api.apify.com/v2///");
        let url = client.dataset_items_url("abc123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.apify.com/v2/datasets/abc123/items?format=json"
        );
    }

    #[test]
    fn run_url_carries_wait_for_finish() {
        let client = test_client("https://api.apify.com/v2/");
        let url = client.run_url("run42", 60).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.apify.com/v2/actor-runs/run42?waitForFinish=60"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ApifyClient::with_base_url("t", 30, "not a url");
        assert!(matches!(result, Err(ApifyError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn api_error_message_prefers_structured_body() {
        let body = r#"{"error":{"type":"record-not-found","message":"Actor was not found"}}"#;
        assert_eq!(
            api_error_message(body),
            "record-not-found: Actor was not found"
        );
    }

    #[test]
    fn api_error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(api_error_message(""), "empty response body");
    }
}
