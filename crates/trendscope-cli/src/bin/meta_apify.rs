use clap::Parser;
use trendscope_cli::{bootstrap, summary, Cli, Pipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, client) = bootstrap(&cli)?;

    let pipeline = Pipeline::from_config(&config)?;
    let output = pipeline.run_meta(&client).await?;

    summary::print_meta(&output);
    Ok(())
}
