//! Scripted API and recording views for controller tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use common::{
    DailyPower, GeocodeResponse, HistoricalRecord, HourlyPower, LocationQuery, PredefinedLocation, PredictResponse,
    PredictionRequest, PredictionResult, ReportRequest, ReportResponse, WeatherResponse, WeatherSnapshot,
};

use crate::analytics::{ChartPeriod, HeadlineMetric};
use crate::api::SolarApi;
use crate::charts::PlotSpec;
use crate::error::ApiError;
use crate::view::{
    AnalyticsView, LocationView, Notification, NotificationLevel, PredictionView, ReportDownload, ResultsViewModel,
    WeatherRow,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

type Script<T> = RefCell<VecDeque<Result<T, ApiError>>>;

/// An in-memory [`SolarApi`] answering from per-endpoint queues and
/// recording what it was asked. An empty queue answers with a transport
/// error.
#[derive(Default)]
pub struct ScriptedApi {
    geocode: Script<GeocodeResponse>,
    weather: Script<WeatherResponse>,
    predict: Script<PredictResponse>,
    report: Script<ReportResponse>,
    geocode_queries: RefCell<Vec<String>>,
    weather_requests: RefCell<Vec<LocationQuery>>,
    predict_requests: RefCell<Vec<PredictionRequest>>,
    report_requests: RefCell<Vec<ReportRequest>>,
}

fn next<T>(script: &Script<T>) -> Result<T, ApiError> {
    script
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
}

impl ScriptedApi {
    pub fn push_geocode(&self, outcome: Result<GeocodeResponse, ApiError>) {
        self.geocode.borrow_mut().push_back(outcome);
    }

    pub fn push_weather(&self, outcome: Result<WeatherResponse, ApiError>) {
        self.weather.borrow_mut().push_back(outcome);
    }

    pub fn push_predict(&self, outcome: Result<PredictResponse, ApiError>) {
        self.predict.borrow_mut().push_back(outcome);
    }

    pub fn push_report(&self, outcome: Result<ReportResponse, ApiError>) {
        self.report.borrow_mut().push_back(outcome);
    }

    pub fn geocode_calls(&self) -> usize {
        self.geocode_queries.borrow().len()
    }

    pub fn geocode_queries(&self) -> Vec<String> {
        self.geocode_queries.borrow().clone()
    }

    pub fn weather_requests(&self) -> Vec<LocationQuery> {
        self.weather_requests.borrow().clone()
    }

    pub fn predict_calls(&self) -> usize {
        self.predict_requests.borrow().len()
    }

    pub fn last_predict_request(&self) -> Option<PredictionRequest> {
        self.predict_requests.borrow().last().cloned()
    }

    pub fn report_calls(&self) -> usize {
        self.report_requests.borrow().len()
    }

    pub fn last_report_request(&self) -> Option<ReportRequest> {
        self.report_requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl SolarApi for ScriptedApi {
    async fn geocode(&self, text: &str) -> Result<GeocodeResponse, ApiError> {
        self.geocode_queries.borrow_mut().push(text.to_string());
        next(&self.geocode)
    }

    async fn weather(&self, location: LocationQuery) -> Result<WeatherResponse, ApiError> {
        self.weather_requests.borrow_mut().push(location);
        next(&self.weather)
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictResponse, ApiError> {
        self.predict_requests.borrow_mut().push(request.clone());
        next(&self.predict)
    }

    async fn report(&self, request: &ReportRequest) -> Result<ReportResponse, ApiError> {
        self.report_requests.borrow_mut().push(request.clone());
        next(&self.report)
    }
}

// ---- fixtures ----

/// A successful daily prediction with `hours` hourly points summing to `total`.
pub fn hourly_response(hours: u32, total: f64) -> PredictResponse {
    let per_hour = total / hours.max(1) as f64;
    PredictResponse {
        success: true,
        prediction: Some(PredictionResult {
            total_power: total,
            peak_power: Some(per_hour * 1.5),
            peak_hour: Some(12),
            hourly_predictions: Some((0..hours).map(|hour| HourlyPower { hour, power: per_hour }).collect()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// A successful weekly-style prediction with `days` per-day points.
pub fn daily_response(days: u32) -> PredictResponse {
    PredictResponse {
        success: true,
        prediction: Some(PredictionResult {
            total_power: days as f64 * 5000.0,
            peak_power: Some(900.0),
            average_daily: Some(5000.0),
            daily_predictions: Some((1..=days).map(|day| DailyPower { day, power: 5000.0 }).collect()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn sunny_weather() -> WeatherResponse {
    WeatherResponse {
        success: true,
        data: Some(WeatherSnapshot {
            temperature: 24.0,
            humidity: 40.0,
            wind_speed: 2.5,
            cloud_cover: 5.0,
            solar_irradiance: 850.0,
            description: Some("clear sky".to_string()),
        }),
        error: None,
    }
}

// ---- recording views ----

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionEvent {
    Loading,
    Results(Box<ResultsViewModel>),
    Error(String),
    Cleared,
    ExportError(String),
    Report(ReportDownload),
}

#[derive(Debug, Default)]
pub struct RecordingPredictionView {
    pub events: Vec<PredictionEvent>,
}

impl RecordingPredictionView {
    pub fn last_results(&self) -> Option<&ResultsViewModel> {
        self.events.iter().rev().find_map(|e| match e {
            PredictionEvent::Results(results) => Some(results.as_ref()),
            _ => None,
        })
    }
}

impl PredictionView for RecordingPredictionView {
    fn show_loading(&mut self) {
        self.events.push(PredictionEvent::Loading);
    }

    fn show_results(&mut self, results: &ResultsViewModel) {
        self.events.push(PredictionEvent::Results(Box::new(results.clone())));
    }

    fn show_error(&mut self, message: &str) {
        self.events.push(PredictionEvent::Error(message.to_string()));
    }

    fn clear(&mut self) {
        self.events.push(PredictionEvent::Cleared);
    }

    fn show_export_error(&mut self, message: &str) {
        self.events.push(PredictionEvent::ExportError(message.to_string()));
    }

    fn offer_report(&mut self, download: &ReportDownload) {
        self.events.push(PredictionEvent::Report(download.clone()));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    Coordinates(LocationQuery),
    Weather(Vec<WeatherRow>),
    Error(String),
    Locating(bool),
    Predefined(usize, Option<&'static str>),
    Address(String),
}

#[derive(Debug, Default)]
pub struct RecordingLocationView {
    pub events: Vec<LocationEvent>,
}

impl LocationView for RecordingLocationView {
    fn set_coordinates(&mut self, location: LocationQuery) {
        self.events.push(LocationEvent::Coordinates(location));
    }

    fn show_weather(&mut self, rows: &[WeatherRow]) {
        self.events.push(LocationEvent::Weather(rows.to_vec()));
    }

    fn show_location_error(&mut self, message: &str) {
        self.events.push(LocationEvent::Error(message.to_string()));
    }

    fn set_locating(&mut self, busy: bool) {
        self.events.push(LocationEvent::Locating(busy));
    }

    fn show_predefined(&mut self, entries: &[&'static PredefinedLocation], selected: Option<&'static str>) {
        self.events.push(LocationEvent::Predefined(entries.len(), selected));
    }

    fn show_address(&mut self, address: &str) {
        self.events.push(LocationEvent::Address(address.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    /// Period and number of plotted points.
    Trend(ChartPeriod, usize),
    WeatherChart,
    Comparison,
    Table(usize),
    Headline(usize),
    Refreshing(bool),
    Exporting(bool),
    Notified(NotificationLevel),
}

#[derive(Debug, Default)]
pub struct RecordingAnalyticsView {
    pub events: Vec<AnalyticsEvent>,
    pub notices: Vec<Notification>,
    /// `(filename, mime, contents)` of every offered file.
    pub files: Vec<(String, String, String)>,
    pub trend_charts: Vec<PlotSpec>,
    pub fail_downloads: bool,
}

impl RecordingAnalyticsView {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notices.clone()
    }

    pub fn last_trend_chart(&self) -> Option<&PlotSpec> {
        self.trend_charts.last()
    }
}

impl AnalyticsView for RecordingAnalyticsView {
    fn render_trend(&mut self, period: ChartPeriod, chart: &PlotSpec) {
        let points = chart.data[0]["x"].as_array().map_or(0, Vec::len);
        self.events.push(AnalyticsEvent::Trend(period, points));
        self.trend_charts.push(chart.clone());
    }

    fn render_weather_distribution(&mut self, _chart: &PlotSpec) {
        self.events.push(AnalyticsEvent::WeatherChart);
    }

    fn render_comparison(&mut self, _chart: &PlotSpec) {
        self.events.push(AnalyticsEvent::Comparison);
    }

    fn render_table(&mut self, rows: &[&HistoricalRecord]) {
        self.events.push(AnalyticsEvent::Table(rows.len()));
    }

    fn render_headline(&mut self, metrics: &[HeadlineMetric]) {
        self.events.push(AnalyticsEvent::Headline(metrics.len()));
    }

    fn set_refreshing(&mut self, busy: bool) {
        self.events.push(AnalyticsEvent::Refreshing(busy));
    }

    fn set_exporting(&mut self, busy: bool) {
        self.events.push(AnalyticsEvent::Exporting(busy));
    }

    fn notify(&mut self, notification: Notification) {
        self.events.push(AnalyticsEvent::Notified(notification.level));
        self.notices.push(notification);
    }

    fn offer_file(&mut self, filename: &str, mime: &str, contents: &str) -> Result<(), String> {
        if self.fail_downloads {
            return Err("download blocked".to_string());
        }
        self.files.push((filename.to_string(), mime.to_string(), contents.to_string()));
        Ok(())
    }
}
