mod app;
mod cli;

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{prelude::*, EnvFilter};
use trainerdex_core::{
    config::{self, AppConfig},
    ApiClient, Store,
};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    config::ensure_default_config()?;
    let mut config = AppConfig::load()?;
    if let Some(base_url) = cli.base_url.clone() {
        config.api_base_url = base_url;
    }

    init_logging(&config.log_dir())?;
    tracing::debug!("using API at {}", config.api_base_url);

    let client = ApiClient::from_config(&config).context("failed to build API client")?;
    let store = Store::new(Arc::new(client));
    app::run(&store, cli.command).await
}

fn init_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("trainerdex.log");

    let env_filter = EnvFilter::from_default_env();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact()
        .with_ansi(false)
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
