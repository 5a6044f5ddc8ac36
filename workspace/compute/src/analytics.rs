//! Synthetic generation history for the analytics dashboard.
//!
//! Nothing here is measured data. The series is drawn from bounded uniform
//! distributions so the dashboard has something plausible to show; the
//! random source and "today" are injected so tests can pin both.

use chrono::{Duration, NaiveDate};
use common::{HistoricalRecord, WeatherCondition};
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Length of the trailing history window, in days.
pub const TRAILING_DAYS: usize = 30;
/// Rows shown in the history table.
pub const TABLE_ROWS: usize = 10;
/// Records shown by the daily period view.
pub const DAILY_VIEW_DAYS: usize = 7;

pub const GENERATION_KWH_RANGE: std::ops::Range<f64> = 15.0..25.0;
pub const PEAK_POWER_KW_RANGE: std::ops::Range<f64> = 3.0..5.0;
pub const EFFICIENCY_PCT_RANGE: std::ops::Range<f64> = 75.0..90.0;

/// Static "current vs optimal" monthly comparison (kWh). Illustrative only,
/// not derived from the series.
pub const COMPARISON_MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
pub const COMPARISON_CURRENT: [f64; 6] = [12.0, 15.0, 18.0, 22.0, 25.0, 28.0];
pub const COMPARISON_OPTIMAL: [f64; 6] = [15.0, 18.0, 22.0, 26.0, 30.0, 33.0];

/// Placeholder figures for the weekly and monthly period views.
pub const WEEKLY_LABELS: [&str; 4] = ["Week 1", "Week 2", "Week 3", "Week 4"];
pub const WEEKLY_AVERAGES: [f64; 4] = [85.0, 92.0, 78.0, 88.0];
pub const MONTHLY_TOTALS: [f64; 6] = [450.0, 520.0, 680.0, 720.0, 850.0, 920.0];

/// A headline figure on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlineMetric {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub percentage: bool,
}

pub const HEADLINE_METRICS: [HeadlineMetric; 4] = [
    HeadlineMetric { label: "Total Generation", value: 1250.0, unit: "kWh", percentage: false },
    HeadlineMetric { label: "Peak Output", value: 4.2, unit: "kW", percentage: false },
    HeadlineMetric { label: "Efficiency", value: 87.3, unit: "%", percentage: true },
    HeadlineMetric { label: "Sun Hours", value: 6.8, unit: "h", percentage: false },
];

/// Granularity of the generation trend view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartPeriod {
    /// The full 30-day series.
    #[default]
    Trailing,
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Trailing => "trailing",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

impl FromStr for ChartPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trailing" | "all" => Ok(Self::Trailing),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!("Unknown chart period: {}", other)),
        }
    }
}

/// Labels and values for the generation trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendView {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Generates `TRAILING_DAYS` records ending on `today`, oldest first.
pub fn generate_series<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Vec<HistoricalRecord> {
    let series: Vec<HistoricalRecord> = (0..TRAILING_DAYS)
        .rev()
        .map(|days_back| HistoricalRecord {
            date: today - Duration::days(days_back as i64),
            generation_kwh: rng.gen_range(GENERATION_KWH_RANGE),
            peak_power_kw: rng.gen_range(PEAK_POWER_KW_RANGE),
            efficiency_pct: rng.gen_range(EFFICIENCY_PCT_RANGE),
            weather: WeatherCondition::ALL[rng.gen_range(0..WeatherCondition::ALL.len())],
        })
        .collect();

    debug!(records = series.len(), %today, "Generated synthetic history");
    series
}

/// Short axis label, e.g. `Oct 3`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Days per weather condition, in `WeatherCondition::ALL` order.
pub fn weather_distribution(series: &[HistoricalRecord]) -> [(WeatherCondition, usize); 4] {
    WeatherCondition::ALL.map(|condition| {
        let count = series.iter().filter(|r| r.weather == condition).count();
        (condition, count)
    })
}

/// The most recent `TABLE_ROWS` records, newest first.
pub fn recent_records(series: &[HistoricalRecord]) -> Vec<&HistoricalRecord> {
    series.iter().rev().take(TABLE_ROWS).collect()
}

/// Re-slices the series (or substitutes placeholders) for a period.
pub fn trend_view(series: &[HistoricalRecord], period: ChartPeriod) -> TrendView {
    match period {
        ChartPeriod::Trailing => TrendView {
            labels: series.iter().map(|r| short_date(r.date)).collect(),
            values: series.iter().map(|r| r.generation_kwh).collect(),
        },
        ChartPeriod::Daily => {
            let start = series.len().saturating_sub(DAILY_VIEW_DAYS);
            let recent = &series[start..];
            TrendView {
                labels: recent.iter().map(|r| short_date(r.date)).collect(),
                values: recent.iter().map(|r| r.generation_kwh).collect(),
            }
        }
        ChartPeriod::Weekly => TrendView {
            labels: WEEKLY_LABELS.iter().map(|l| l.to_string()).collect(),
            values: WEEKLY_AVERAGES.to_vec(),
        },
        ChartPeriod::Monthly => TrendView {
            labels: COMPARISON_MONTHS.iter().map(|l| l.to_string()).collect(),
            values: MONTHLY_TOTALS.to_vec(),
        },
    }
}
