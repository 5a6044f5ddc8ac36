//! Presentation boundary of the controllers.
//!
//! Controllers push fully shaped view models through these traits and never
//! reach into a DOM or a terminal themselves. The browser pages and the CLI
//! each provide an implementation; tests use the recording views in
//! `crate::testing`.

use common::{HistoricalRecord, LocationQuery, PredefinedLocation, PredictionResult, PredictionType, ReportFormat, WeatherSnapshot};

use crate::analytics::{ChartPeriod, HeadlineMetric};
use crate::charts::PlotSpec;
use crate::metrics::{OptimalRecommendation, SummaryMetrics};
use crate::series::PowerSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// A transient message for the analytics page.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Info, message: message.into() }
    }
}

/// One labelled line of the current-weather card.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRow {
    pub label: &'static str,
    pub value: String,
}

pub fn weather_rows(weather: &WeatherSnapshot) -> [WeatherRow; 5] {
    [
        WeatherRow { label: "Temperature", value: format!("{}°C", weather.temperature) },
        WeatherRow { label: "Humidity", value: format!("{}%", weather.humidity) },
        WeatherRow { label: "Wind Speed", value: format!("{} m/s", weather.wind_speed) },
        WeatherRow { label: "Cloud Cover", value: format!("{}%", weather.cloud_cover) },
        WeatherRow { label: "Solar Irradiance", value: format!("{:.1} W/m²", weather.solar_irradiance) },
    ]
}

/// Everything the results section shows after a successful prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsViewModel {
    pub prediction_type: PredictionType,
    pub series: PowerSeries,
    pub chart: PlotSpec,
    pub summary: SummaryMetrics,
    pub recommendation: Option<OptimalRecommendation>,
    pub peak_hour: Option<u32>,
    pub average_daily: Option<f64>,
    pub prediction: PredictionResult,
}

/// A server-generated report ready to be fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDownload {
    pub format: ReportFormat,
    /// URL or server-relative path as returned by the backend.
    pub url: String,
    pub filename: String,
}

pub trait PredictionView {
    /// Show the busy indicator and hide earlier results or errors.
    fn show_loading(&mut self);
    fn show_results(&mut self, results: &ResultsViewModel);
    fn show_error(&mut self, message: &str);
    /// Back to the empty form state.
    fn clear(&mut self);
    /// Export problems are reported without disturbing the results.
    fn show_export_error(&mut self, message: &str);
    fn offer_report(&mut self, download: &ReportDownload);
}

pub trait LocationView {
    /// Fill both coordinate inputs.
    fn set_coordinates(&mut self, location: LocationQuery);
    fn show_weather(&mut self, rows: &[WeatherRow]);
    fn show_location_error(&mut self, message: &str);
    fn set_locating(&mut self, busy: bool);
    fn show_predefined(&mut self, entries: &[&'static PredefinedLocation], selected: Option<&'static str>);
    fn show_address(&mut self, _address: &str) {}
}

pub trait AnalyticsView {
    fn render_trend(&mut self, period: ChartPeriod, chart: &PlotSpec);
    fn render_weather_distribution(&mut self, chart: &PlotSpec);
    fn render_comparison(&mut self, chart: &PlotSpec);
    fn render_table(&mut self, rows: &[&HistoricalRecord]);
    fn render_headline(&mut self, metrics: &[HeadlineMetric]);
    fn set_refreshing(&mut self, busy: bool);
    fn set_exporting(&mut self, busy: bool);
    fn notify(&mut self, notification: Notification);
    /// Hands a generated file to the user. The error is a display string.
    fn offer_file(&mut self, filename: &str, mime: &str, contents: &str) -> Result<(), String>;
}
