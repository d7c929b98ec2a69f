mod cli;

use anyhow::Result;
use catchup::{ShowConfig, config, download};
use clap::{CommandFactory, Parser};
use cli::Cli;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize logging based on verbosity
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let config_path = match &args.config {
        Some(path) => PathBuf::from(path),
        None => config::default_config_path()?,
    };

    // A missing config file is not recoverable: show usage and bail out
    // before anything touches the network.
    if !config_path.exists() {
        Cli::command().print_help()?;
        process::exit(1);
    }

    let show_config = ShowConfig::load(&config_path)?;
    let summary = download::download_latest(&show_config, args.with_fake_response).await?;

    if !summary.is_success() {
        process::exit(1);
    }

    Ok(())
}
