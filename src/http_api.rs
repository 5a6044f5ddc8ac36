use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use common::{
    GeocodeResponse, LocationQuery, PredictResponse, PredictionRequest, ReportRequest, ReportResponse,
    WeatherResponse,
};
use compute::{ApiError, SolarApi};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, trace};

/// reqwest client for the prediction backend.
#[derive(Debug, Clone)]
pub struct HttpSolarApi {
    client: Client,
    base_url: Url,
}

impl HttpSolarApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).with_context(|| format!("Invalid API base URL: {}", base_url))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        debug!(%base_url, ?timeout, "HTTP client ready");
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("Base URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Resolves a report path (absolute URL or server-relative path) against
    /// the base URL.
    pub fn resolve(&self, report_path: &str) -> Result<Url> {
        self.base_url
            .join(report_path)
            .with_context(|| format!("Invalid report path: {}", report_path))
    }

    /// Fetches a generated report.
    #[instrument(skip(self))]
    pub async fn download(&self, report_path: &str) -> Result<Vec<u8>> {
        let url = self.resolve(report_path)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to download {}", url))?
            .error_for_status()
            .with_context(|| format!("Report download rejected: {}", url))?;
        let bytes = response.bytes().await.context("Failed to read report body")?;
        info!(%url, bytes = bytes.len(), "Report downloaded");
        Ok(bytes.to_vec())
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Decodes the JSON envelope whatever the status; only a non-JSON body on
/// an error status becomes [`ApiError::Http`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport)?;
    trace!(%status, bytes = body.len(), "Response received");

    match serde_json::from_slice::<T>(&body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Err(ApiError::Http(status.as_u16())),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

#[async_trait(?Send)]
impl SolarApi for HttpSolarApi {
    #[instrument(skip(self))]
    async fn geocode(&self, text: &str) -> Result<GeocodeResponse, ApiError> {
        let url = self.endpoint(&["api", "geocode", text])?;
        let response = self.client.get(url).send().await.map_err(transport)?;
        decode(response).await
    }

    #[instrument(skip(self))]
    async fn weather(&self, location: LocationQuery) -> Result<WeatherResponse, ApiError> {
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();
        let url = self.endpoint(&["api", "weather", &latitude, &longitude])?;
        let response = self.client.get(url).send().await.map_err(transport)?;
        decode(response).await
    }

    #[instrument(skip(self, request), fields(location = %request.location, prediction_type = %request.prediction_type))]
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictResponse, ApiError> {
        let url = self.endpoint(&["api", "predict"])?;
        let response = self.client.post(url).json(request).send().await.map_err(transport)?;
        decode(response).await
    }

    #[instrument(skip(self, request), fields(format = %request.report_type))]
    async fn report(&self, request: &ReportRequest) -> Result<ReportResponse, ApiError> {
        let url = self.endpoint(&["api", "report"])?;
        let response = self.client.post(url).json(request).send().await.map_err(transport)?;
        decode(response).await
    }
}
