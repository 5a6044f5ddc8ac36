use async_trait::async_trait;
use common::{
    GeocodeResponse, LocationQuery, PredictResponse, PredictionRequest, ReportRequest, ReportResponse,
    WeatherResponse,
};
use compute::{ApiError, SolarApi};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::AbortController;

use crate::settings;

/// `SolarApi` over the browser's fetch, configured from the app settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrowserApi;

impl BrowserApi {
    pub fn new() -> Self {
        Self
    }
}

/// Decodes the JSON envelope whatever the status; falls back to the status
/// only when the body is not JSON.
async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        log::error!("{} - Failed to read body: {}", endpoint, e);
        ApiError::Transport(e.to_string())
    })?;

    match serde_json::from_str::<T>(&body) {
        Ok(value) => {
            log::debug!("{} - Response decoded (status {})", endpoint, status);
            Ok(value)
        }
        Err(_) if !response.ok() => {
            log::error!("{} - HTTP error: {}", endpoint, status);
            Err(ApiError::Http(status))
        }
        Err(e) => {
            log::error!("{} - Failed to parse response: {}", endpoint, e);
            Err(ApiError::Decode(e.to_string()))
        }
    }
}

/// Sends with the configured timeout; the request is aborted when it fires.
async fn send(endpoint: &str, builder: RequestBuilder, body: Option<String>) -> Result<Response, ApiError> {
    let timeout_ms = settings::get_settings().request_timeout_ms;
    let controller = AbortController::new().ok();
    let builder = builder.abort_signal(controller.as_ref().map(|c| c.signal()).as_ref());

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(json),
        None => builder.build(),
    }
    .map_err(|e| {
        log::error!("{} - Failed to build request: {}", endpoint, e);
        ApiError::Transport(e.to_string())
    })?;

    let timer = controller.map(|c| Timeout::new(timeout_ms, move || c.abort()));
    let result = request.send().await;
    // Dropping the timer cancels it.
    drop(timer);

    result.map_err(|e| {
        log::error!("{} - Request failed: {}", endpoint, e);
        ApiError::Transport(e.to_string())
    })
}

async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let url = settings::get_settings().api_url(path);
    log::debug!("GET request to: {}", url);
    let response = send(path, Request::get(&url), None).await?;
    decode(path, response).await
}

async fn post<T: DeserializeOwned, B: Serialize>(path: &str, body: &B) -> Result<T, ApiError> {
    let url = settings::get_settings().api_url(path);
    log::debug!("POST request to: {}", url);
    let json = serde_json::to_string(body).map_err(|e| {
        log::error!("POST {} - Failed to serialize request: {}", path, e);
        ApiError::Decode(e.to_string())
    })?;
    let response = send(path, Request::post(&url), Some(json)).await?;
    decode(path, response).await
}

#[async_trait(?Send)]
impl SolarApi for BrowserApi {
    async fn geocode(&self, text: &str) -> Result<GeocodeResponse, ApiError> {
        let segment = String::from(js_sys::encode_uri_component(text));
        get(&format!("/api/geocode/{}", segment)).await
    }

    async fn weather(&self, location: LocationQuery) -> Result<WeatherResponse, ApiError> {
        get(&format!("/api/weather/{}/{}", location.latitude, location.longitude)).await
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictResponse, ApiError> {
        post("/api/predict", request).await
    }

    async fn report(&self, request: &ReportRequest) -> Result<ReportResponse, ApiError> {
        post("/api/report", request).await
    }
}
