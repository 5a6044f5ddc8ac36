use std::time::Duration;

use chrono::NaiveDate;
use common::HistoricalRecord;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::analytics::{ChartPeriod, HEADLINE_METRICS, generate_series, recent_records, trend_view, weather_distribution};
use crate::charts::{comparison_chart, trend_chart, weather_chart};
use crate::error::{Result, WorkflowError};
use crate::export::{ANALYTICS_CSV_FILENAME, ANALYTICS_CSV_MIME, analytics_csv};
use crate::view::{AnalyticsView, Notification};

/// Simulated round trip of a dashboard refresh.
pub const REFRESH_DELAY: Duration = Duration::from_millis(2000);
/// How long a notification stays on screen in the browser.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(3000);

/// Analytics dashboard over locally generated history. Nothing here talks
/// to the backend.
pub struct AnalyticsController<V, R> {
    view: V,
    rng: R,
    today: NaiveDate,
    series: Vec<HistoricalRecord>,
    period: ChartPeriod,
    refreshing: bool,
    exporting: bool,
}

impl<V: AnalyticsView, R: Rng> AnalyticsController<V, R> {
    /// Generates the initial series and renders every section.
    pub fn new(view: V, mut rng: R, today: NaiveDate) -> Self {
        let series = generate_series(&mut rng, today);
        let mut controller = Self {
            view,
            rng,
            today,
            series,
            period: ChartPeriod::default(),
            refreshing: false,
            exporting: false,
        };
        controller.render_all();
        controller
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn series(&self) -> &[HistoricalRecord] {
        &self.series
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn period(&self) -> ChartPeriod {
        self.period
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn render_all(&mut self) {
        self.render_trend();
        self.view.render_weather_distribution(&weather_chart(&weather_distribution(&self.series)));
        self.view.render_comparison(&comparison_chart());
        self.view.render_table(&recent_records(&self.series));
        self.view.render_headline(&HEADLINE_METRICS);
    }

    /// Re-slices the trend chart; the series itself is untouched.
    pub fn set_period(&mut self, period: ChartPeriod) {
        debug!(%period, "Switching trend period");
        self.period = period;
        self.render_trend();
    }

    /// Puts the refresh control into its busy state. Returns `false` when a
    /// refresh is already running.
    pub fn begin_refresh(&mut self) -> bool {
        if self.refreshing {
            debug!("Refresh already in progress");
            self.view.notify(Notification::info("Refresh already in progress"));
            return false;
        }
        self.refreshing = true;
        self.view.set_refreshing(true);
        true
    }

    /// Regenerates the series ending on `today` and re-renders everything.
    pub fn complete_refresh(&mut self, today: NaiveDate) {
        self.today = today;
        self.series = generate_series(&mut self.rng, today);
        self.render_all();
        self.refreshing = false;
        self.view.set_refreshing(false);
        info!(records = self.series.len(), %today, "Analytics data refreshed");
        self.view.notify(Notification::success("Data refreshed successfully!"));
    }

    /// Serializes the full series and hands it to the view as a CSV file.
    pub fn export_all(&mut self) -> Result<()> {
        self.exporting = true;
        self.view.set_exporting(true);

        let outcome = analytics_csv(&self.series)
            .map_err(|e| e.to_string())
            .and_then(|csv| self.view.offer_file(ANALYTICS_CSV_FILENAME, ANALYTICS_CSV_MIME, &csv));

        self.exporting = false;
        self.view.set_exporting(false);

        match outcome {
            Ok(()) => {
                info!(records = self.series.len(), "Analytics data exported");
                self.view.notify(Notification::success("Data exported successfully!"));
                Ok(())
            }
            Err(detail) => {
                warn!(error = %detail, "Analytics export failed");
                let err = WorkflowError::ExportFailed(detail);
                self.view.notify(Notification::error(err.to_string()));
                Err(err)
            }
        }
    }

    fn render_trend(&mut self) {
        let view = trend_view(&self.series, self.period);
        self.view.render_trend(self.period, &trend_chart(&view));
    }
}
