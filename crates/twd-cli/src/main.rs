use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use twd_cli::commands::{compare, total};
use twd_cli::{Cli, Config, SystemRunner, TimewClient};
use twd_core::Tag;

/// Load config and build the timew adapter from it.
fn build_client(config_path: Option<&Path>) -> Result<TimewClient<SystemRunner>> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    Ok(TimewClient::new(
        SystemRunner,
        config.timew_bin.clone(),
        config.timeout(),
    ))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let client = build_client(cli.config.as_deref())?;
    client.ensure_available()?;

    let now = chrono::Utc::now();
    let mut stdout = std::io::stdout().lock();

    if cli.total {
        total::run(&mut stdout, &client, now, cli.json)?;
    } else {
        let [first, second]: [Tag; 2] = cli
            .tags
            .try_into()
            .map_err(|_| anyhow::anyhow!("exactly two tags are required"))?;
        compare::run(&mut stdout, &client, first, second, now, cli.json)?;
    }

    Ok(())
}
