use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod http_api;
mod terminal;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

use cli::Cli;
use config::AppConfig;

/// `RUST_LOG` wins; otherwise the configured level applies to this
/// workspace's crates.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("solarcast={level},compute={level},warn")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    init_tracing(&config.log_level);
    info!("SolarCast client starting up");
    debug!(?config, "Effective configuration");

    let mut stdout = std::io::stdout().lock();
    cli.run(&config, &mut stdout).await
}
