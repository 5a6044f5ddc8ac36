use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;
use compute::LocationHelper;
use compute::validation::{parse_field, validate_location};
use tracing::trace;

use crate::config::AppConfig;
use crate::http_api::HttpSolarApi;
use crate::terminal::Terminal;

#[derive(Args, Debug, Clone)]
pub struct WeatherArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: String,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: String,
}

pub async fn weather<W: Write>(api: &HttpSolarApi, config: &AppConfig, args: &WeatherArgs, out: &mut W) -> Result<()> {
    trace!(?args, "Entering weather command");
    let location = validate_location(parse_field(&args.lat), parse_field(&args.lon))?;

    let mut helper = LocationHelper::new(Terminal::new(&mut *out, &config.output_dir));
    helper.set_latitude_text(&args.lat);
    helper.set_longitude_text(&args.lon);

    if helper.refresh_weather(api, location).await.is_none() {
        bail!("Weather data unavailable for {}", location);
    }
    Ok(())
}
