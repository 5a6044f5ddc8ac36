use std::io::Write;

use anyhow::Result;
use chrono::Local;
use clap::Args;
use compute::AnalyticsController;
use compute::analytics::ChartPeriod;
use compute::controller::analytics::REFRESH_DELAY;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::config::AppConfig;
use crate::terminal::Terminal;

#[derive(Args, Debug, Clone)]
pub struct AnalyticsArgs {
    /// Trend granularity: daily, weekly or monthly (default: the full 30 days)
    #[arg(long)]
    pub period: Option<ChartPeriod>,

    /// Regenerate the data after the initial render
    #[arg(long)]
    pub refresh: bool,

    /// Write the series to solar_analytics_data.csv in the output directory
    #[arg(long)]
    pub export: bool,

    /// Seed for the generated data, overriding the configuration
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn analytics<W: Write>(config: &AppConfig, args: &AnalyticsArgs, out: &mut W) -> Result<()> {
    trace!(?args, "Entering analytics command");
    let rng = match args.seed.or(config.analytics_seed) {
        Some(seed) => {
            debug!(seed, "Seeding analytics data");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut controller = AnalyticsController::new(
        Terminal::new(&mut *out, &config.output_dir),
        rng,
        Local::now().date_naive(),
    );

    if let Some(period) = args.period {
        controller.set_period(period);
    }

    if args.refresh && controller.begin_refresh() {
        tokio::time::sleep(REFRESH_DELAY).await;
        controller.complete_refresh(Local::now().date_naive());
    }

    if args.export {
        controller.export_all()?;
    }

    Ok(())
}
