//! In-process stand-in for the prediction backend.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use common::{
    DailyPower, GeocodeResponse, HourlyPower, OptimalConfig, PredictResponse, PredictionRequest, PredictionResult,
    PredictionType, ReportRequest, ReportResponse, WeatherResponse, WeatherSnapshot,
};
use tokio::net::TcpListener;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;
use crate::http_api::HttpSolarApi;

/// Latitude that makes the stub answer with a non-JSON 500.
pub const BROKEN_LATITUDE: f64 = 13.0;
pub const REPORT_BYTES: &[u8] = b"stub-report";

/// Every request path the stub has seen, in order.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    fn push(&self, entry: String) {
        if let Ok(mut log) = self.0.lock() {
            log.push(entry);
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.0.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.requests().iter().filter(|r| r.starts_with(prefix)).count()
    }
}

pub struct StubBackend {
    pub base_url: String,
    pub recorder: Recorder,
    _tracing: tracing::subscriber::DefaultGuard,
}

impl StubBackend {
    pub fn api(&self) -> HttpSolarApi {
        HttpSolarApi::new(&self.base_url, std::time::Duration::from_secs(5)).expect("stub client")
    }

    pub fn config(&self, output_dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.api.base_url = self.base_url.clone();
        config.output_dir = output_dir.to_path_buf();
        config
    }
}

async fn geocode(State(recorder): State<Recorder>, Path(text): Path<String>) -> Response {
    recorder.push(format!("geocode {}", text));
    match text.as_str() {
        "Paris" => Json(GeocodeResponse {
            success: true,
            latitude: Some(48.8566),
            longitude: Some(2.3522),
            address: Some("Paris, Île-de-France, France".to_string()),
            error: None,
        })
        .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(GeocodeResponse {
                success: false,
                error: Some(format!("No results for {}", text)),
                ..Default::default()
            }),
        )
            .into_response(),
    }
}

async fn weather(State(recorder): State<Recorder>, Path((lat, lon)): Path<(String, String)>) -> Json<WeatherResponse> {
    recorder.push(format!("weather {} {}", lat, lon));
    Json(WeatherResponse {
        success: true,
        data: Some(WeatherSnapshot {
            temperature: 18.5,
            humidity: 55.0,
            wind_speed: 4.0,
            cloud_cover: 20.0,
            solar_irradiance: 640.26,
            description: Some("scattered clouds".to_string()),
        }),
        error: None,
    })
}

async fn predict(State(recorder): State<Recorder>, Json(request): Json<PredictionRequest>) -> Response {
    recorder.push(format!("predict {} {}", request.location, request.prediction_type));
    if request.location.latitude == BROKEN_LATITUDE {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    let prediction = match request.prediction_type {
        PredictionType::Daily => PredictionResult {
            total_power: 2000.0,
            peak_power: Some(250.0),
            peak_hour: Some(12),
            hourly_predictions: Some((0..24).map(|hour| HourlyPower { hour, power: 2000.0 / 24.0 }).collect()),
            ..Default::default()
        },
        PredictionType::Weekly | PredictionType::Monthly => {
            let days = if request.prediction_type == PredictionType::Weekly { 7 } else { 30 };
            PredictionResult {
                total_power: days as f64 * 8000.0,
                peak_power: Some(1200.0),
                average_daily: Some(8000.0),
                daily_predictions: Some((1..=days).map(|day| DailyPower { day, power: 8000.0 }).collect()),
                ..Default::default()
            }
        }
    };

    Json(PredictResponse {
        success: true,
        error: None,
        optimal_prediction: Some(prediction.clone()),
        prediction: Some(prediction),
        optimal_config: Some(OptimalConfig { tilt: 34.5, azimuth: 180.0 }),
        improvement_percentage: Some(8.2),
    })
    .into_response()
}

async fn report(State(recorder): State<Recorder>, Json(request): Json<ReportRequest>) -> Json<ReportResponse> {
    recorder.push(format!("report {}", request.report_type));
    Json(ReportResponse {
        success: true,
        error: None,
        report_path: Some(format!("/reports/prediction.{}", request.report_type.extension())),
    })
}

async fn report_file(State(recorder): State<Recorder>, Path(name): Path<String>) -> &'static [u8] {
    recorder.push(format!("download {}", name));
    REPORT_BYTES
}

pub fn stub_router(recorder: Recorder) -> Router {
    Router::new()
        .route("/api/geocode/:text", get(geocode))
        .route("/api/weather/:lat/:lon", get(weather))
        .route("/api/predict", post(predict))
        .route("/api/report", post(report))
        .route("/reports/:name", get(report_file))
        .with_state(recorder)
}

/// Serves the stub on an ephemeral local port for the rest of the test.
pub async fn spawn_stub_backend() -> StubBackend {
    let tracing_guard = init_test_tracing();
    let recorder = Recorder::default();
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub backend");
    let addr = listener.local_addr().expect("stub address");
    let app = stub_router(recorder.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub backend crashed");
    });

    StubBackend {
        base_url: format!("http://{}", addr),
        recorder,
        _tracing: tracing_guard,
    }
}

/// Log level comes from RUST_LOG, defaulting to WARN.
fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}
