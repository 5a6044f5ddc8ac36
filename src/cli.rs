use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use crate::config::AppConfig;
use crate::http_api::HttpSolarApi;
use commands::{AnalyticsArgs, LocateArgs, PredictArgs, WeatherArgs};

#[derive(Parser, Debug)]
#[command(name = "solarcast")]
#[command(about = "Solar power predictions, weather and generation analytics from the terminal")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML). Defaults to ./solarcast.toml when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the configuration
    #[arg(long, global = true, env = "SOLARCAST_API_URL")]
    pub api_url: Option<String>,

    /// Directory for exported files, overriding the configuration
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a power prediction for a location and panel configuration
    ///
    /// Examples:
    ///   solarcast predict --city Tokyo --area 12 --tilt 35
    ///   solarcast predict --lat 48.85 --lon 2.35 --type weekly --export pdf
    Predict(PredictArgs),
    /// Resolve a location and show its current weather
    Locate(LocateArgs),
    /// Show current weather for a coordinate pair
    Weather(WeatherArgs),
    /// Show the generation analytics dashboard
    Analytics(AnalyticsArgs),
}

impl Cli {
    /// Applies the global flag overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }

    pub async fn run<W: Write>(self, config: &AppConfig, out: &mut W) -> Result<()> {
        let api = || HttpSolarApi::new(&config.api.base_url, config.timeout());
        match self.command {
            Commands::Predict(args) => commands::predict(&api()?, config, &args, out).await?,
            Commands::Locate(args) => commands::locate(&api()?, config, &args, out).await?,
            Commands::Weather(args) => commands::weather(&api()?, config, &args, out).await?,
            Commands::Analytics(args) => commands::analytics(config, &args, out).await?,
        }
        Ok(())
    }
}
