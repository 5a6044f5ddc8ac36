use std::io::Write;

use anyhow::Result;
use clap::{ArgGroup, Args};
use compute::LocationHelper;
use tracing::trace;

use crate::config::AppConfig;
use crate::http_api::HttpSolarApi;
use crate::terminal::Terminal;

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("source").required(true).args(["place", "city", "device", "search"])))]
pub struct LocateArgs {
    /// Geocode a free-text place name
    #[arg(long)]
    pub place: Option<String>,

    /// Pick one of the predefined cities
    #[arg(long)]
    pub city: Option<String>,

    /// Use the configured device position
    #[arg(long)]
    pub device: bool,

    /// List predefined cities whose name or country matches
    #[arg(long)]
    pub search: Option<String>,
}

pub async fn locate<W: Write>(api: &HttpSolarApi, config: &AppConfig, args: &LocateArgs, out: &mut W) -> Result<()> {
    trace!(?args, "Entering locate command");
    let mut helper = LocationHelper::new(Terminal::new(&mut *out, &config.output_dir));

    if let Some(term) = &args.search {
        helper.filter_predefined(term);
    } else if let Some(city) = &args.city {
        helper.choose_city(api, city).await?;
    } else if let Some(place) = &args.place {
        helper.search(api, place).await?;
    } else if args.device {
        helper.use_device_position(api, config.device_position).await?;
    }

    Ok(())
}
