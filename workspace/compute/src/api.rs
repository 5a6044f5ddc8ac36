use async_trait::async_trait;
use common::{
    GeocodeResponse, LocationQuery, PredictResponse, PredictionRequest, ReportRequest, ReportResponse,
    WeatherResponse,
};

use crate::error::ApiError;

/// The four backend endpoints the controllers depend on.
///
/// Implementations return the decoded envelope whatever the HTTP status
/// was, and only report [`ApiError::Http`] when the body was not JSON.
/// Futures are not `Send` so the browser client can implement this too.
#[async_trait(?Send)]
pub trait SolarApi {
    /// `GET /api/geocode/{text}`
    async fn geocode(&self, text: &str) -> Result<GeocodeResponse, ApiError>;

    /// `GET /api/weather/{lat}/{lon}`
    async fn weather(&self, location: LocationQuery) -> Result<WeatherResponse, ApiError>;

    /// `POST /api/predict`
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictResponse, ApiError>;

    /// `POST /api/report`
    async fn report(&self, request: &ReportRequest) -> Result<ReportResponse, ApiError>;
}
