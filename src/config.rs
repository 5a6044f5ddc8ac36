use std::path::{Path, PathBuf};
use std::time::Duration;

use common::LocationQuery;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CONFIG_FILE: &str = "solarcast";
const ENV_PREFIX: &str = "SOLARCAST";

/// Runtime configuration of the terminal client.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub log_level: String,
    /// Where exported reports and CSV files are written.
    pub output_dir: PathBuf,
    /// Stand-in for device geolocation; `locate --device` fails without it.
    #[serde(default)]
    pub device_position: Option<LocationQuery>,
    /// Fixed seed for the analytics data, for reproducible output.
    #[serde(default)]
    pub analytics_seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Layers built-in defaults, then the config file, then `SOLARCAST_*`
    /// environment variables (`__` separates nested keys, e.g.
    /// `SOLARCAST_API__BASE_URL`).
    ///
    /// Without an explicit `path` an optional `solarcast.toml` in the working
    /// directory is picked up.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.timeout_secs", DEFAULT_TIMEOUT_SECS as i64)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("output_dir", ".")?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<AppConfig>()?;

        debug!(base_url = %config.api.base_url, output_dir = %config.output_dir.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            output_dir: PathBuf::from("."),
            device_position: None,
            analytics_seed: None,
        }
    }
}
