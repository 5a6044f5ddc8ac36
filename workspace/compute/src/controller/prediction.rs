use common::{PredictResponse, PredictionRequest, PredictionResult, ReportFormat, ReportRequest, ReportResponse};
use tracing::{debug, info, instrument, warn};

use crate::api::SolarApi;
use crate::charts::power_chart;
use crate::controller::Completion;
use crate::error::{ApiError, Result, WorkflowError};
use crate::export::report_filename;
use crate::metrics::{OptimalRecommendation, SummaryMetrics};
use crate::series::power_series;
use crate::validation::{PredictionForm, validate_form};
use crate::view::{PredictionView, ReportDownload, ResultsViewModel};

const PREDICTING: &str = "making prediction";
const EXPORTING: &str = "exporting report";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictionState {
    #[default]
    Idle,
    Loading,
    Results,
    Error(String),
}

/// An accepted submission waiting for its response.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPrediction {
    pub generation: u64,
    pub request: PredictionRequest,
}

/// Drives the prediction page: form validation, the predict call, results
/// and report export.
pub struct PredictionController<V> {
    view: V,
    state: PredictionState,
    generation: u64,
    current: Option<PredictionResult>,
}

impl<V: PredictionView> PredictionController<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            state: PredictionState::Idle,
            generation: 0,
            current: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn state(&self) -> &PredictionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == PredictionState::Loading
    }

    /// The last successful prediction, kept for export.
    pub fn current_data(&self) -> Option<&PredictionResult> {
        self.current.as_ref()
    }

    /// Validates the form and, when it passes, enters `Loading` and returns
    /// the ticket for the request to send.
    pub fn begin_submit(&mut self, form: &PredictionForm) -> Result<PendingPrediction> {
        let request = match validate_form(form) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Prediction form rejected");
                // Outstanding requests must not overwrite the rejection.
                self.generation += 1;
                return Err(self.fail(e.into()));
            }
        };

        self.generation += 1;
        self.state = PredictionState::Loading;
        self.view.show_loading();
        info!(generation = self.generation, location = %request.location, "Submitting prediction");

        Ok(PendingPrediction {
            generation: self.generation,
            request,
        })
    }

    /// Applies a prediction response. Responses for anything but the most
    /// recent submission are dropped and reported as [`Completion::Stale`].
    pub fn complete_submit(
        &mut self,
        pending: PendingPrediction,
        outcome: std::result::Result<PredictResponse, ApiError>,
    ) -> Result<Completion> {
        if pending.generation != self.generation {
            debug!(
                generation = pending.generation,
                latest = self.generation,
                "Ignoring stale prediction response"
            );
            return Ok(Completion::Stale);
        }

        match Self::build_results(&pending.request, outcome) {
            Ok(results) => {
                info!(
                    total_power = results.summary.total_power,
                    points = results.series.len(),
                    "Prediction completed"
                );
                self.current = Some(results.prediction.clone());
                self.state = PredictionState::Results;
                self.view.show_results(&results);
                Ok(Completion::Applied)
            }
            Err(e) => {
                warn!(error = %e, "Prediction failed");
                Err(self.fail(e))
            }
        }
    }

    pub async fn submit<A: SolarApi + ?Sized>(&mut self, api: &A, form: &PredictionForm) -> Result<Completion> {
        let pending = self.begin_submit(form)?;
        let outcome = api.predict(&pending.request).await;
        self.complete_submit(pending, outcome)
    }

    /// Hides results and errors.
    pub fn dismiss(&mut self) {
        self.state = PredictionState::Idle;
        self.view.clear();
    }

    /// Builds the report request from the current data. Fails locally when
    /// nothing has been predicted yet.
    pub fn begin_export(&mut self, format: ReportFormat) -> Result<ReportRequest> {
        match &self.current {
            Some(prediction) => Ok(ReportRequest {
                report_type: format,
                prediction_data: prediction.clone(),
            }),
            None => {
                let err = WorkflowError::NoDataToExport;
                self.view.show_export_error(&err.to_string());
                Err(err)
            }
        }
    }

    pub fn complete_export(
        &mut self,
        format: ReportFormat,
        outcome: std::result::Result<ReportResponse, ApiError>,
    ) -> Result<ReportDownload> {
        let download = match outcome {
            Err(e) => Err(WorkflowError::api(EXPORTING, e)),
            Ok(response) if !response.success => Err(WorkflowError::Rejected(format!(
                "Error generating report: {}",
                response.error.as_deref().unwrap_or("Unknown error")
            ))),
            Ok(response) => response
                .report_path
                .map(|url| ReportDownload {
                    format,
                    url,
                    filename: report_filename(format),
                })
                .ok_or_else(|| WorkflowError::malformed(EXPORTING, "missing report_path")),
        };

        match download {
            Ok(download) => {
                info!(url = %download.url, %format, "Report generated");
                self.view.offer_report(&download);
                Ok(download)
            }
            Err(e) => {
                warn!(error = %e, "Report export failed");
                self.view.show_export_error(&e.to_string());
                Err(e)
            }
        }
    }

    #[instrument(skip(self, api))]
    pub async fn export<A: SolarApi + ?Sized>(&mut self, api: &A, format: ReportFormat) -> Result<ReportDownload> {
        let request = self.begin_export(format)?;
        let outcome = api.report(&request).await;
        self.complete_export(format, outcome)
    }

    fn fail(&mut self, err: WorkflowError) -> WorkflowError {
        let message = err.to_string();
        self.view.show_error(&message);
        self.state = PredictionState::Error(message);
        err
    }

    fn build_results(
        request: &PredictionRequest,
        outcome: std::result::Result<PredictResponse, ApiError>,
    ) -> Result<ResultsViewModel> {
        let response = outcome.map_err(|e| WorkflowError::api(PREDICTING, e))?;
        if !response.success {
            return Err(WorkflowError::Rejected(
                response.error.unwrap_or_else(|| "Prediction failed".to_string()),
            ));
        }

        let prediction = response
            .prediction
            .ok_or_else(|| WorkflowError::malformed(PREDICTING, "missing prediction"))?;
        let series = power_series(&prediction).map_err(|reason| WorkflowError::malformed(PREDICTING, reason))?;

        let summary = SummaryMetrics::from_prediction(&prediction, response.improvement_percentage, request.panel_config.area);
        let recommendation = response
            .optimal_config
            .map(|config| OptimalRecommendation::new(config, summary.improvement_percent));

        Ok(ResultsViewModel {
            prediction_type: request.prediction_type,
            chart: power_chart(&series),
            series,
            summary,
            recommendation,
            peak_hour: prediction.peak_hour,
            average_daily: prediction.average_daily,
            prediction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::testing::{PredictionEvent, RecordingPredictionView, ScriptedApi, daily_response, hourly_response, init_tracing};
    use common::OptimalConfig;

    fn valid_form() -> PredictionForm {
        PredictionForm {
            latitude: "35.6762".into(),
            longitude: "139.6503".into(),
            ..PredictionForm::with_defaults()
        }
    }

    fn controller() -> PredictionController<RecordingPredictionView> {
        PredictionController::new(RecordingPredictionView::default())
    }

    #[tokio::test]
    async fn test_out_of_range_latitude_never_calls_api() {
        let api = ScriptedApi::default();
        let mut ctl = controller();
        let form = PredictionForm { latitude: "95".into(), ..valid_form() };

        let err = ctl.submit(&api, &form).await.unwrap_err();
        assert_eq!(err, WorkflowError::Validation(ValidationError::LatitudeOutOfRange));
        assert_eq!(api.predict_calls(), 0);
        assert_eq!(ctl.state(), &PredictionState::Error("Latitude must be between -90 and 90 degrees".into()));
        assert_eq!(
            ctl.view().events,
            vec![PredictionEvent::Error("Latitude must be between -90 and 90 degrees".into())]
        );
    }

    #[tokio::test]
    async fn test_zero_area_rejected_locally() {
        let api = ScriptedApi::default();
        let mut ctl = controller();
        let form = PredictionForm { panel_area: "0".into(), ..valid_form() };

        assert!(ctl.submit(&api, &form).await.is_err());
        assert_eq!(api.predict_calls(), 0);
    }

    #[tokio::test]
    async fn test_hourly_success_renders_results() {
        init_tracing();
        let api = ScriptedApi::default();
        let mut response = hourly_response(24, 1000.0);
        response.optimal_config = Some(OptimalConfig { tilt: 35.0, azimuth: 180.0 });
        response.improvement_percentage = Some(12.5);
        api.push_predict(Ok(response));

        let mut ctl = controller();
        assert_eq!(ctl.submit(&api, &valid_form()).await.unwrap(), Completion::Applied);
        assert_eq!(ctl.state(), &PredictionState::Results);
        assert_eq!(api.predict_calls(), 1);

        let results = ctl.view().last_results().unwrap();
        assert_eq!(results.series.labels.len(), 24);
        assert_eq!(results.series.labels[7], "7:00");
        assert_eq!(results.chart.title(), Some("Hourly Power Generation (W)"));
        // 1000 / (10 * 1000 * 0.2) * 100
        assert_eq!(results.summary.efficiency_percent, 50.0);
        assert_eq!(results.summary.improvement_percent, 12.5);
        let rec = results.recommendation.unwrap();
        assert_eq!(rec.tilt, 35.0);
        assert_eq!(ctl.view().events[0], PredictionEvent::Loading);
        assert!(ctl.current_data().is_some());
    }

    #[tokio::test]
    async fn test_daily_series_labels_and_no_recommendation() {
        let api = ScriptedApi::default();
        api.push_predict(Ok(daily_response(7)));
        let mut ctl = controller();
        let form = PredictionForm { prediction_type: "Weekly".into(), ..valid_form() };

        ctl.submit(&api, &form).await.unwrap();
        let results = ctl.view().last_results().unwrap();
        assert_eq!(results.series.labels[0], "Day 1");
        assert_eq!(results.chart.layout["xaxis"]["title"]["text"], "Day");
        assert!(results.recommendation.is_none());
        assert_eq!(results.summary.improvement_percent, 0.0);
        assert_eq!(api.last_predict_request().unwrap().prediction_type, common::PredictionType::Weekly);
    }

    #[tokio::test]
    async fn test_server_rejection_uses_message_or_default() {
        let api = ScriptedApi::default();
        api.push_predict(Ok(PredictResponse {
            success: false,
            error: Some("Invalid location".into()),
            ..Default::default()
        }));
        api.push_predict(Ok(PredictResponse::default()));

        let mut ctl = controller();
        let err = ctl.submit(&api, &valid_form()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid location");

        let err = ctl.submit(&api, &valid_form()).await.unwrap_err();
        assert_eq!(err.to_string(), "Prediction failed");
        assert_eq!(ctl.state(), &PredictionState::Error("Prediction failed".into()));
    }

    #[tokio::test]
    async fn test_transport_failure_message() {
        let api = ScriptedApi::default();
        api.push_predict(Err(ApiError::Transport("connection refused".into())));
        let mut ctl = controller();

        let err = ctl.submit(&api, &valid_form()).await.unwrap_err();
        assert_eq!(err.to_string(), "Error making prediction: connection refused");
    }

    #[tokio::test]
    async fn test_response_without_series_is_malformed() {
        let api = ScriptedApi::default();
        api.push_predict(Ok(PredictResponse {
            success: true,
            prediction: Some(PredictionResult { total_power: 5.0, ..Default::default() }),
            ..Default::default()
        }));
        let mut ctl = controller();

        let err = ctl.submit(&api, &valid_form()).await.unwrap_err();
        assert!(matches!(err, WorkflowError::MalformedResponse { .. }));
        assert!(ctl.current_data().is_none());
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut ctl = controller();
        let first = ctl.begin_submit(&valid_form()).unwrap();
        let second = ctl.begin_submit(&valid_form()).unwrap();

        assert_eq!(ctl.complete_submit(second, Ok(hourly_response(3, 300.0))).unwrap(), Completion::Applied);
        let latest = ctl.view().last_results().unwrap().summary.total_power;

        assert_eq!(ctl.complete_submit(first, Ok(hourly_response(24, 9999.0))).unwrap(), Completion::Stale);
        assert_eq!(ctl.view().last_results().unwrap().summary.total_power, latest);
        assert_eq!(ctl.current_data().unwrap().total_power, 300.0);
    }

    #[test]
    fn test_stale_failure_does_not_clobber_results() {
        let mut ctl = controller();
        let first = ctl.begin_submit(&valid_form()).unwrap();
        let second = ctl.begin_submit(&valid_form()).unwrap();
        ctl.complete_submit(second, Ok(hourly_response(3, 300.0))).unwrap();

        let stale = ctl.complete_submit(first, Err(ApiError::Http(502)));
        assert_eq!(stale, Ok(Completion::Stale));
        assert_eq!(ctl.state(), &PredictionState::Results);
    }

    #[test]
    fn test_rejected_form_supersedes_pending_request() {
        let mut ctl = controller();
        let first = ctl.begin_submit(&valid_form()).unwrap();

        let mut invalid = valid_form();
        invalid.panel_area = "0".to_string();
        let err = ctl.begin_submit(&invalid).unwrap_err();
        assert_eq!(err.to_string(), "Panel area must be greater than 0");

        let late = ctl.complete_submit(first, Ok(hourly_response(3, 300.0)));
        assert_eq!(late, Ok(Completion::Stale));
        assert_eq!(ctl.state(), &PredictionState::Error("Panel area must be greater than 0".into()));
        assert!(ctl.current_data().is_none());
    }

    #[test]
    fn test_dismiss_returns_to_idle() {
        let mut ctl = controller();
        let _ = ctl.begin_submit(&PredictionForm::with_defaults());
        ctl.dismiss();
        assert_eq!(ctl.state(), &PredictionState::Idle);
        assert_eq!(ctl.view().events.last(), Some(&PredictionEvent::Cleared));
    }

    #[tokio::test]
    async fn test_export_without_prediction_fails_locally() {
        let api = ScriptedApi::default();
        let mut ctl = controller();

        let err = ctl.export(&api, ReportFormat::Csv).await.unwrap_err();
        assert_eq!(err.to_string(), "No data to export. Please make a prediction first.");
        assert_eq!(api.report_calls(), 0);
    }

    #[tokio::test]
    async fn test_export_offers_named_download() {
        let api = ScriptedApi::default();
        api.push_predict(Ok(hourly_response(24, 1200.0)));
        api.push_report(Ok(ReportResponse {
            success: true,
            report_path: Some("/reports/abc.pdf".into()),
            ..Default::default()
        }));
        let mut ctl = controller();
        ctl.submit(&api, &valid_form()).await.unwrap();

        let download = ctl.export(&api, ReportFormat::Pdf).await.unwrap();
        assert_eq!(download.filename, "solar_prediction_report.pdf");
        assert_eq!(download.url, "/reports/abc.pdf");
        assert_eq!(api.last_report_request().unwrap().prediction_data.total_power, 1200.0);
        assert_eq!(ctl.view().events.last(), Some(&PredictionEvent::Report(download)));
    }

    #[tokio::test]
    async fn test_export_failures() {
        let api = ScriptedApi::default();
        api.push_predict(Ok(hourly_response(24, 1200.0)));
        api.push_report(Ok(ReportResponse {
            success: false,
            error: Some("disk full".into()),
            ..Default::default()
        }));
        api.push_report(Err(ApiError::Transport("timed out".into())));
        api.push_report(Ok(ReportResponse { success: true, ..Default::default() }));
        let mut ctl = controller();
        ctl.submit(&api, &valid_form()).await.unwrap();

        let err = ctl.export(&api, ReportFormat::Csv).await.unwrap_err();
        assert_eq!(err.to_string(), "Error generating report: disk full");
        let err = ctl.export(&api, ReportFormat::Csv).await.unwrap_err();
        assert_eq!(err.to_string(), "Error exporting report: timed out");
        let err = ctl.export(&api, ReportFormat::Csv).await.unwrap_err();
        assert!(matches!(err, WorkflowError::MalformedResponse { .. }));

        // Export problems leave the results on screen.
        assert_eq!(ctl.state(), &PredictionState::Results);
    }
}
