//! tika-hydrate - extract a document with Apache Tika from the command line.

use anyhow::Context;
use clap::Parser;
use tika_hydrater::TikaHydrater;
use tika_hydrater_cli::{output, Cli};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays pure JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.resolve_config().context("Failed to load configuration")?;
    let mut changes = cli.load_changes().context("Failed to load changes record")?;
    debug!("Resolved configuration: {:?}", config);

    let hydrater = TikaHydrater::from_config(&config)?;

    let result = hydrater.hydrate(&cli.file, &mut changes).await;

    // The record is printed even when hydration failed.
    println!("{}", output::render_changes(&changes, cli.pretty)?);

    result.with_context(|| format!("Failed to hydrate {}", cli.file.display()))
}
