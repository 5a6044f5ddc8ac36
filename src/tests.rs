use clap::Parser;
use common::{LocationQuery, PredictionType};
use compute::{ApiError, SolarApi};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::test_utils::{BROKEN_LATITUDE, REPORT_BYTES, spawn_stub_backend};

/// Parses `args` as a command line and runs it, returning stdout and the result.
async fn run(config: &AppConfig, args: &[&str]) -> (String, anyhow::Result<()>) {
    let cli = Cli::try_parse_from(std::iter::once("solarcast").chain(args.iter().copied())).unwrap();
    let mut out = Vec::new();
    let result = cli.run(config, &mut out).await;
    (String::from_utf8(out).unwrap(), result)
}

// ---- HTTP client against the stub ----

#[tokio::test]
async fn test_geocode_decodes_error_envelope_on_404() {
    let backend = spawn_stub_backend().await;
    let api = backend.api();

    let found = api.geocode("Paris").await.unwrap();
    assert!(found.success);
    assert_eq!(found.latitude, Some(48.8566));

    let missing = api.geocode("New York/Queens").await.unwrap();
    assert!(!missing.success);
    assert_eq!(missing.error.as_deref(), Some("No results for New York/Queens"));
    assert_eq!(backend.recorder.requests()[1], "geocode New York/Queens");
}

#[tokio::test]
async fn test_non_json_error_falls_back_to_status() {
    let backend = spawn_stub_backend().await;
    let request = common::PredictionRequest {
        location: LocationQuery::new(BROKEN_LATITUDE, 0.0),
        panel_config: common::PanelConfiguration { area: 1.0, tilt: 30.0, azimuth: 180.0 },
        prediction_type: PredictionType::Daily,
    };

    let err = backend.api().predict(&request).await.unwrap_err();
    assert_eq!(err, ApiError::Http(500));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let api = crate::http_api::HttpSolarApi::new("http://127.0.0.1:9", std::time::Duration::from_secs(2)).unwrap();
    let err = api.weather(LocationQuery::new(1.0, 2.0)).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

// ---- commands end to end ----

#[tokio::test]
async fn test_predict_for_city_with_report_download() {
    let backend = spawn_stub_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let config = backend.config(dir.path());

    let (out, result) = run(&config, &["predict", "--city", "Tokyo", "--export", "pdf"]).await;
    result.unwrap();

    assert!(out.contains("Coordinates: 35.6762, 139.6503"));
    assert!(out.contains("Solar Irradiance   640.3 W/m²"));
    assert!(out.contains("Hourly Power Generation (W)"));
    assert!(out.contains("13:00"));
    assert!(out.contains("Total Power  2000.0"));
    // 2000 / (10 * 1000 * 0.2) * 100
    assert!(out.contains("Efficiency   100.0%"));
    assert!(out.contains("Optimal Tilt Angle: For maximum power generation, set your panel tilt to 34.5°"));

    let saved = std::fs::read(dir.path().join("solar_prediction_report.pdf")).unwrap();
    assert_eq!(saved, REPORT_BYTES);
    assert_eq!(
        backend.recorder.requests(),
        vec![
            "weather 35.6762 139.6503",
            "predict 35.6762, 139.6503 daily",
            "report pdf",
            "download prediction.pdf",
        ]
    );
}

#[tokio::test]
async fn test_weekly_prediction_from_geocoded_place() {
    let backend = spawn_stub_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let config = backend.config(dir.path());

    let (out, result) = run(&config, &["predict", "--place", "Paris", "--type", "weekly", "--area", "20"]).await;
    result.unwrap();

    assert!(out.contains("Address: Paris, Île-de-France, France"));
    assert!(out.contains("Daily Power Generation (Wh)"));
    assert!(out.contains("Day 7"));
    assert!(out.contains("Avg Daily    8000.0"));
}

#[tokio::test]
async fn test_invalid_latitude_never_reaches_backend() {
    let backend = spawn_stub_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let config = backend.config(dir.path());

    let (out, result) = run(&config, &["predict", "--lat", "123", "--lon", "10"]).await;
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Latitude must be between -90 and 90 degrees");
    assert!(out.contains("Error: Latitude must be between -90 and 90 degrees"));
    assert!(backend.recorder.requests().is_empty());
}

#[tokio::test]
async fn test_unknown_place_stops_before_prediction() {
    let backend = spawn_stub_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let config = backend.config(dir.path());

    let (_, result) = run(&config, &["predict", "--place", "Atlantis"]).await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Location not found. Please try a different location."
    );
    assert_eq!(backend.recorder.count("predict"), 0);
}

#[tokio::test]
async fn test_backend_failure_surfaces_status() {
    let backend = spawn_stub_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let config = backend.config(dir.path());

    let (_, result) = run(&config, &["predict", "--lat", "13", "--lon", "100.5"]).await;
    assert_eq!(result.unwrap_err().to_string(), "Error making prediction: HTTP error: 500");
}

#[tokio::test]
async fn test_locate_device_uses_configured_position() {
    let backend = spawn_stub_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let mut config = backend.config(dir.path());

    let (_, result) = run(&config, &["locate", "--device"]).await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Unable to retrieve your location. Please enter coordinates manually."
    );

    config.device_position = Some(LocationQuery::new(40.712_812_34, -74.006_012_99));
    let (out, result) = run(&config, &["locate", "--device"]).await;
    result.unwrap();
    assert!(out.contains("Coordinates: 40.712812, -74.006013"));
    assert!(out.contains("Current weather"));
}

#[tokio::test]
async fn test_locate_search_lists_matches() {
    let backend = spawn_stub_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let config = backend.config(dir.path());

    let (out, result) = run(&config, &["locate", "--search", "south"]).await;
    result.unwrap();
    assert!(out.contains("Cape Town"));
    assert!(out.contains("Seoul"));
    assert!(!out.contains("Tokyo"));
    assert!(backend.recorder.requests().is_empty());
}

#[tokio::test]
async fn test_weather_command() {
    let backend = spawn_stub_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let config = backend.config(dir.path());

    let (out, result) = run(&config, &["weather", "--lat", "-33.8688", "--lon", "151.2093"]).await;
    result.unwrap();
    assert!(out.contains("Temperature        18.5°C"));
    assert!(out.contains("Cloud Cover        20%"));

    let (_, result) = run(&config, &["weather", "--lat", "north", "--lon", "1"]).await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Please select a valid location or enter coordinates"
    );
}

#[tokio::test]
async fn test_analytics_export_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        output_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };

    let (out, result) = run(&config, &["analytics", "--seed", "7", "--period", "weekly", "--export"]).await;
    result.unwrap();
    assert!(out.contains("Energy generation (weekly)"));
    assert!(out.contains("Week 4"));
    assert!(out.contains("[ok] Data exported successfully!"));

    let csv = std::fs::read_to_string(dir.path().join("solar_analytics_data.csv")).unwrap();
    assert_eq!(csv.lines().count(), 31);
    assert!(csv.starts_with("Date,Generation (kWh),Peak Power (kW),Efficiency (%),Weather\n"));
}

#[tokio::test]
async fn test_analytics_ignores_unusable_base_url() {
    let mut config = AppConfig::default();
    config.api.base_url = "not a url".to_string();

    let (out, result) = run(&config, &["analytics", "--seed", "3"]).await;
    result.unwrap();
    assert!(out.contains("Energy generation"));

    let (_, result) = run(&config, &["weather", "--lat", "1", "--lon", "2"]).await;
    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Invalid API base URL: not a url"));
}

#[tokio::test]
async fn test_analytics_refresh_notifies() {
    let config = AppConfig::default();
    let (out, result) = run(&config, &["analytics", "--seed", "1", "--refresh"]).await;
    result.unwrap();
    assert!(out.contains("Refreshing..."));
    assert!(out.contains("[ok] Data refreshed successfully!"));
}

// ---- argument parsing ----

#[test]
fn test_negative_coordinates_parse() {
    let cli = Cli::try_parse_from([
        "solarcast", "predict", "--lat", "-33.8", "--lon", "-70.6", "--type", "monthly", "--export", "csv",
    ])
    .unwrap();
    let Commands::Predict(args) = cli.command else {
        panic!("expected predict");
    };
    assert_eq!(args.lat.as_deref(), Some("-33.8"));
    assert_eq!(args.export, Some(common::ReportFormat::Csv));
}

#[test]
fn test_locate_requires_a_source() {
    assert!(Cli::try_parse_from(["solarcast", "locate"]).is_err());
    assert!(Cli::try_parse_from(["solarcast", "predict", "--city", "Tokyo", "--lat", "1"]).is_err());
}

#[test]
fn test_global_overrides() {
    let cli = Cli::try_parse_from(["solarcast", "--api-url", "http://other:1", "analytics", "-o", "/tmp/out"]).unwrap();
    let mut config = AppConfig::default();
    cli.apply_overrides(&mut config);
    assert_eq!(config.api.base_url, "http://other:1");
    assert_eq!(config.output_dir, std::path::PathBuf::from("/tmp/out"));
}
