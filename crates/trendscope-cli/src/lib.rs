//! Shared entry-point code for the `meta-apify` and `tiktok-apify` binaries.
//!
//! Both binaries parse the same single flag, build the process config once,
//! and hand it to a [`Pipeline`].

pub mod pipeline;
pub mod summary;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use trendscope_core::{AppConfig, ClientConfig};

pub use pipeline::{Pipeline, PipelineOutput};

/// Command-line arguments shared by both pipeline binaries.
#[derive(Debug, Parser)]
#[command(about = "Fetch social trend data from Apify for one client")]
pub struct Cli {
    /// Client id selecting `config/clients/<id>.json`
    #[arg(long, default_value = "ucsp")]
    pub client: String,
}

/// Installs the global `tracing` subscriber. `RUST_LOG` wins over
/// `default_level` when set.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Loads `.env` and the process config, installs logging, then loads the
/// client record named on the command line.
///
/// # Errors
///
/// Returns an error if the environment is incomplete or the client config
/// cannot be found, read, or validated.
pub fn bootstrap(cli: &Cli) -> anyhow::Result<(AppConfig, ClientConfig)> {
    let config = trendscope_core::load_app_config().context("failed to load configuration")?;
    init_tracing(&config.log_level);

    let client = trendscope_core::load_client_config(&config.clients_dir, &cli.client)
        .with_context(|| format!("failed to load client config '{}'", cli.client))?;
    tracing::info!(client = %client.client, region = %client.region, "client config loaded");

    Ok((config, client))
}
