//! Client-side validation of the prediction form.
//!
//! Rules run in a fixed order and the first failure wins, so the user is
//! always shown the most fundamental problem first (no location before a
//! bad panel area, and so on).

use common::{LocationQuery, PanelConfiguration, PredictionRequest, PredictionType};
use tracing::debug;

use crate::error::ValidationError;

pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;
pub const TILT_RANGE: std::ops::RangeInclusive<f64> = 0.0..=90.0;
pub const AZIMUTH_RANGE: std::ops::RangeInclusive<f64> = 0.0..=360.0;

/// Raw prediction form contents, exactly as typed by the user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionForm {
    pub latitude: String,
    pub longitude: String,
    pub panel_area: String,
    pub tilt: String,
    pub azimuth: String,
    pub prediction_type: String,
}

impl PredictionForm {
    /// Form prefilled with the page defaults (10 m², 30° tilt, south-facing, daily).
    pub fn with_defaults() -> Self {
        Self {
            panel_area: "10".to_string(),
            tilt: "30".to_string(),
            azimuth: "180".to_string(),
            prediction_type: PredictionType::Daily.to_string(),
            ..Default::default()
        }
    }
}

/// Parses a numeric form field. Blank, non-numeric and non-finite input
/// all count as absent.
pub fn parse_field(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Returns the coordinate pair when both fields hold numbers, regardless
/// of range. Used to decide whether a weather refresh is due.
pub fn complete_coordinates(latitude: &str, longitude: &str) -> Option<LocationQuery> {
    Some(LocationQuery::new(parse_field(latitude)?, parse_field(longitude)?))
}

pub fn validate_location(latitude: Option<f64>, longitude: Option<f64>) -> Result<LocationQuery, ValidationError> {
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Err(ValidationError::MissingCoordinates);
    };
    if !LATITUDE_RANGE.contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange);
    }
    if !LONGITUDE_RANGE.contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange);
    }
    Ok(LocationQuery::new(latitude, longitude))
}

pub fn validate_panel(area: Option<f64>, tilt: Option<f64>, azimuth: Option<f64>) -> Result<PanelConfiguration, ValidationError> {
    let area = area.filter(|a| *a > 0.0).ok_or(ValidationError::InvalidPanelArea)?;
    let tilt = tilt
        .filter(|t| TILT_RANGE.contains(t))
        .ok_or(ValidationError::TiltOutOfRange)?;
    let azimuth = azimuth
        .filter(|a| AZIMUTH_RANGE.contains(a))
        .ok_or(ValidationError::AzimuthOutOfRange)?;
    Ok(PanelConfiguration { area, tilt, azimuth })
}

/// Validates the whole form and builds the outbound request.
pub fn validate_form(form: &PredictionForm) -> Result<PredictionRequest, ValidationError> {
    let location = validate_location(parse_field(&form.latitude), parse_field(&form.longitude))?;
    let panel_config = validate_panel(
        parse_field(&form.panel_area),
        parse_field(&form.tilt),
        parse_field(&form.azimuth),
    )?;
    let prediction_type = form
        .prediction_type
        .parse::<PredictionType>()
        .map_err(|_| ValidationError::UnknownPredictionType(form.prediction_type.trim().to_string()))?;

    debug!(%location, ?panel_config, %prediction_type, "Prediction form validated");
    Ok(PredictionRequest {
        location,
        panel_config,
        prediction_type,
    })
}

/// Trims a free-text place name, rejecting blank input.
pub fn validate_place_query(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyLocationQuery)
    } else {
        Ok(trimmed)
    }
}
