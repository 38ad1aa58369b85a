//! The two fetch → transform → write pipelines.
//!
//! Each stage runs to completion before the next starts. Any remote failure
//! (API error, failed run, wait timeout) aborts the run before the writer is
//! touched, so a failed run leaves the previous output files in place.

use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use trendscope_apify::ApifyClient;
use trendscope_core::{AppConfig, ClientConfig};
use trendscope_report::facebook::{self, FacebookPostsInput};
use trendscope_report::tiktok::{self, TikTokTrendsInput};
use trendscope_report::{FacebookPayload, Report, ResultWriter, TikTokPayload, WrittenFiles};

/// A persisted report and where it was written.
#[derive(Debug)]
pub struct PipelineOutput<P> {
    pub report: Report<P>,
    pub files: WrittenFiles,
}

pub struct Pipeline {
    apify: ApifyClient,
    writer: ResultWriter,
    wait_timeout: Duration,
}

impl Pipeline {
    #[must_use]
    pub fn new(apify: ApifyClient, writer: ResultWriter, wait_timeout: Duration) -> Self {
        Self {
            apify,
            writer,
            wait_timeout,
        }
    }

    /// Builds the Apify client and writer from process config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the base URL is
    /// invalid.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let apify = ApifyClient::with_base_url(
            &config.apify_token,
            config.request_timeout_secs,
            &config.apify_base_url,
        )
        .context("failed to build Apify client")?
        .with_poll_interval(Duration::from_millis(config.poll_interval_ms));

        Ok(Self::new(
            apify,
            ResultWriter::new(&config.output_root),
            Duration::from_secs(config.wait_timeout_secs),
        ))
    }

    /// Scrapes the client's Facebook pages and writes the `meta` report.
    ///
    /// A client with no pages gets an empty report without any remote call.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor run fails or times out, or if the report
    /// cannot be written. No files are written on remote failure.
    pub async fn run_meta(
        &self,
        client: &ClientConfig,
    ) -> anyhow::Result<PipelineOutput<FacebookPayload>> {
        if client.facebook_pages.is_empty() {
            tracing::warn!(
                client = %client.client,
                "no facebook pages configured, writing empty report"
            );
            let report = facebook::empty_report(client, Utc::now());
            return self.persist(report, facebook::SOURCE_NAME);
        }

        let input = FacebookPostsInput::for_client(client);
        tracing::info!(
            client = %client.client,
            pages = input.start_urls.len(),
            "fetching facebook posts"
        );

        let output = self
            .apify
            .run_actor(facebook::ACTOR_ID, &input, self.wait_timeout)
            .await
            .with_context(|| format!("actor {} did not complete", facebook::ACTOR_ID))?;

        let report = facebook::transform(&output.items, client, Utc::now());
        self.persist(report, facebook::SOURCE_NAME)
    }

    /// Fetches TikTok trends for the client's region and writes the `tiktok`
    /// report.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor run fails or times out, or if the report
    /// cannot be written. No files are written on remote failure.
    pub async fn run_tiktok(
        &self,
        client: &ClientConfig,
    ) -> anyhow::Result<PipelineOutput<TikTokPayload>> {
        let input = TikTokTrendsInput::for_client(client);
        tracing::info!(
            client = %client.client,
            country = %input.country,
            "fetching tiktok trends"
        );

        let output = self
            .apify
            .run_actor(tiktok::ACTOR_ID, &input, self.wait_timeout)
            .await
            .with_context(|| format!("actor {} did not complete", tiktok::ACTOR_ID))?;

        let report = tiktok::transform(&output.items, client, Utc::now());
        self.persist(report, tiktok::SOURCE_NAME)
    }

    fn persist<P: Serialize>(
        &self,
        report: Report<P>,
        source: &str,
    ) -> anyhow::Result<PipelineOutput<P>> {
        let files = self
            .writer
            .persist(&report, source)
            .with_context(|| format!("failed to write {source} report"))?;
        Ok(PipelineOutput { report, files })
    }
}
