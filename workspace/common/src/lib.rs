//! Common transport-layer types shared between the terminal client and the
//! browser frontend. These structs mirror the prediction backend's
//! request/response payloads so both clients deserialize API responses
//! without duplicating shapes.

mod analytics;
mod locations;

pub use analytics::{HistoricalRecord, WeatherCondition};
pub use locations::{PREDEFINED_LOCATIONS, PredefinedLocation};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ===================== Location =====================

/// A coordinate pair in decimal degrees (mirrors backend `location`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationQuery {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Geocoding response (`GET /api/geocode/{text}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeocodeResponse {
    pub success: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Display address resolved by the geocoder.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// ===================== Weather =====================

/// Current conditions for a coordinate pair. Display only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    /// Metres per second.
    pub wind_speed: f64,
    /// Percent of sky covered.
    pub cloud_cover: f64,
    /// W/m².
    pub solar_irradiance: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Weather response (`GET /api/weather/{lat}/{lon}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WeatherResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<WeatherSnapshot>,
    #[serde(default)]
    pub error: Option<String>,
}

// ===================== Prediction =====================

/// Aggregation granularity of a prediction. Daily predictions come back as
/// an hourly series, weekly and monthly ones as a per-day series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PredictionType {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl PredictionType {
    pub const ALL: [PredictionType; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for PredictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PredictionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!("Unknown prediction type: {}", other)),
        }
    }
}

/// Panel geometry submitted with a prediction (mirrors backend `panel_config`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PanelConfiguration {
    /// Panel area in square metres.
    pub area: f64,
    /// Tilt from horizontal, degrees.
    pub tilt: f64,
    /// Compass azimuth, degrees (180 = south-facing).
    pub azimuth: f64,
}

/// Request body for `POST /api/predict`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRequest {
    pub location: LocationQuery,
    pub panel_config: PanelConfiguration,
    pub prediction_type: PredictionType,
}

/// One point of an hourly series (power in W).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HourlyPower {
    pub hour: u32,
    pub power: f64,
}

/// One point of a per-day series (energy in Wh).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyPower {
    pub day: u32,
    pub power: f64,
}

/// A prediction as returned by the backend.
///
/// Exactly one of `hourly_predictions` / `daily_predictions` is populated
/// in a well-formed response; the optional summary fields follow the
/// same split (`peak_hour` for daily, `average_daily` otherwise).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PredictionResult {
    pub total_power: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_daily: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_predictions: Option<Vec<HourlyPower>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_predictions: Option<Vec<DailyPower>>,
}

/// Server-computed panel orientation maximising output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OptimalConfig {
    pub tilt: f64,
    pub azimuth: f64,
}

/// Prediction response (`POST /api/predict`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub prediction: Option<PredictionResult>,
    #[serde(default)]
    pub optimal_prediction: Option<PredictionResult>,
    #[serde(default)]
    pub optimal_config: Option<OptimalConfig>,
    #[serde(default)]
    pub improvement_percentage: Option<f64>,
}

// ===================== Reports =====================

/// Report artifact format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Pdf,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("Unknown report format: {}", other)),
        }
    }
}

/// Request body for `POST /api/report`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub report_type: ReportFormat,
    pub prediction_data: PredictionResult,
}

/// Report response; `report_path` is a URL or server-relative path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReportResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub report_path: Option<String>,
}
