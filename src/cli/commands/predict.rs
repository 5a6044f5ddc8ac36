use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use common::ReportFormat;
use compute::validation::PredictionForm;
use compute::{LocationHelper, PredictionController};
use tracing::{info, trace};

use crate::config::AppConfig;
use crate::http_api::HttpSolarApi;
use crate::terminal::Terminal;

#[derive(Args, Debug, Clone)]
pub struct PredictArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["city", "place"])]
    pub lat: Option<String>,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["city", "place"])]
    pub lon: Option<String>,

    /// Use one of the predefined cities
    #[arg(long, conflicts_with = "place")]
    pub city: Option<String>,

    /// Geocode a free-text place name
    #[arg(long)]
    pub place: Option<String>,

    /// Panel area in m²
    #[arg(long, default_value = "10", allow_hyphen_values = true)]
    pub area: String,

    /// Tilt from horizontal, degrees
    #[arg(long, default_value = "30", allow_hyphen_values = true)]
    pub tilt: String,

    /// Compass azimuth, degrees (180 = south)
    #[arg(long, default_value = "180", allow_hyphen_values = true)]
    pub azimuth: String,

    /// daily, weekly or monthly
    #[arg(long = "type", default_value = "daily")]
    pub prediction_type: String,

    /// Download a report of the prediction (csv or pdf)
    #[arg(long)]
    pub export: Option<ReportFormat>,
}

impl PredictArgs {
    fn form(&self) -> PredictionForm {
        PredictionForm {
            latitude: self.lat.clone().unwrap_or_default(),
            longitude: self.lon.clone().unwrap_or_default(),
            panel_area: self.area.clone(),
            tilt: self.tilt.clone(),
            azimuth: self.azimuth.clone(),
            prediction_type: self.prediction_type.clone(),
        }
    }
}

pub async fn predict<W: Write>(api: &HttpSolarApi, config: &AppConfig, args: &PredictArgs, out: &mut W) -> Result<()> {
    trace!(?args, "Entering predict command");
    let mut form = args.form();

    if args.city.is_some() || args.place.is_some() {
        let mut helper = LocationHelper::new(Terminal::new(&mut *out, &config.output_dir));
        if let Some(city) = &args.city {
            helper.choose_city(api, city).await?;
        } else if let Some(place) = &args.place {
            helper.search(api, place).await?;
        }
        form.latitude = helper.latitude_text().to_string();
        form.longitude = helper.longitude_text().to_string();
    }

    let mut controller = PredictionController::new(Terminal::new(&mut *out, &config.output_dir));
    controller.submit(api, &form).await?;

    if let Some(format) = args.export {
        let download = controller.export(api, format).await?;
        let bytes = api.download(&download.url).await?;
        let path = config.output_dir.join(&download.filename);
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Report saved");
        writeln!(out, "Saved {}", path.display())?;
    }

    Ok(())
}
