//! Plain-text renderings of the page views for the terminal client.

use std::io::Write;
use std::path::PathBuf;

use common::{HistoricalRecord, LocationQuery, PredefinedLocation};
use compute::analytics::{ChartPeriod, HeadlineMetric};
use compute::charts::PlotSpec;
use compute::metrics::LOADING_STEPS;
use compute::view::{
    AnalyticsView, LocationView, Notification, NotificationLevel, PredictionView, ReportDownload, ResultsViewModel,
    WeatherRow,
};
use serde_json::Value;
use tracing::{info, warn};

/// Writes every view update as lines of text to `out`.
pub struct Terminal<W> {
    out: W,
    output_dir: PathBuf,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            out,
            output_dir: output_dir.into(),
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        if let Err(e) = writeln!(self.out, "{}", text.as_ref()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn heading(&mut self, title: &str) {
        self.line("");
        self.line(title);
        self.line("-".repeat(title.chars().count()));
    }

    fn points(&mut self, chart: &PlotSpec) {
        for (label, value) in plot_points(&chart.data[0]) {
            self.line(format!("  {:<12} {:>10.1}", label, value));
        }
    }
}

/// `(x, y)` pairs of a single plotly trace.
pub fn plot_points(trace: &Value) -> Vec<(String, f64)> {
    let labels = trace["x"].as_array().cloned().unwrap_or_default();
    let values = trace["y"].as_array().cloned().unwrap_or_default();
    labels
        .iter()
        .zip(values.iter())
        .map(|(label, value)| {
            let label = label.as_str().map(str::to_string).unwrap_or_else(|| label.to_string());
            (label, value.as_f64().unwrap_or(0.0))
        })
        .collect()
}

impl<W: Write> PredictionView for Terminal<W> {
    fn show_loading(&mut self) {
        for (i, step) in LOADING_STEPS.iter().enumerate() {
            self.line(format!("[{}/{}] {}...", i + 1, LOADING_STEPS.len(), step));
        }
    }

    fn show_results(&mut self, results: &ResultsViewModel) {
        self.heading(&format!("Prediction results ({})", results.prediction_type));
        for counter in results.summary.counters() {
            let text = counter.final_text();
            self.line(format!("{:<12} {}", counter.label, text));
        }
        if let Some(hour) = results.peak_hour {
            self.line(format!("{:<12} {}:00", "Peak Hour", hour));
        }
        if let Some(average) = results.average_daily {
            self.line(format!("{:<12} {:.1}", "Avg Daily", average));
        }

        self.heading(results.series.kind.title());
        self.points(&results.chart);

        if let Some(recommendation) = &results.recommendation {
            self.heading("Recommendations");
            for (title, text) in recommendation.lines() {
                self.line(format!("{}: {}", title, text));
            }
        }
    }

    fn show_error(&mut self, message: &str) {
        self.line(format!("Error: {}", message));
    }

    fn clear(&mut self) {}

    fn show_export_error(&mut self, message: &str) {
        self.line(format!("Export error: {}", message));
    }

    fn offer_report(&mut self, download: &ReportDownload) {
        self.line(format!("Report ready: {} ({})", download.filename, download.url));
    }
}

impl<W: Write> LocationView for Terminal<W> {
    fn set_coordinates(&mut self, location: LocationQuery) {
        self.line(format!("Coordinates: {}", location));
    }

    fn show_weather(&mut self, rows: &[WeatherRow]) {
        self.heading("Current weather");
        for row in rows {
            self.line(format!("{:<18} {}", row.label, row.value));
        }
    }

    fn show_location_error(&mut self, message: &str) {
        self.line(format!("Error: {}", message));
    }

    fn set_locating(&mut self, busy: bool) {
        if busy {
            self.line("Locating...");
        }
    }

    fn show_predefined(&mut self, entries: &[&'static PredefinedLocation], selected: Option<&'static str>) {
        if entries.is_empty() {
            self.line("No matching locations");
            return;
        }
        for entry in entries {
            let marker = if selected == Some(entry.name) { '*' } else { ' ' };
            self.line(format!(
                "{} {:<14} {:<14} {:>9.4} {:>10.4}",
                marker, entry.name, entry.country, entry.latitude, entry.longitude
            ));
        }
    }

    fn show_address(&mut self, address: &str) {
        self.line(format!("Address: {}", address));
    }
}

impl<W: Write> AnalyticsView for Terminal<W> {
    fn render_trend(&mut self, period: ChartPeriod, chart: &PlotSpec) {
        self.heading(&format!("Energy generation ({})", period));
        self.points(chart);
    }

    fn render_weather_distribution(&mut self, chart: &PlotSpec) {
        self.heading("Weather distribution");
        let trace = &chart.data[0];
        let labels = trace["labels"].as_array().cloned().unwrap_or_default();
        let values = trace["values"].as_array().cloned().unwrap_or_default();
        for (label, days) in labels.iter().zip(values.iter()) {
            self.line(format!("  {:<14} {} days", label.as_str().unwrap_or_default(), days));
        }
    }

    fn render_comparison(&mut self, chart: &PlotSpec) {
        self.heading("Current vs optimal (kWh)");
        let current = plot_points(&chart.data[0]);
        let optimal = plot_points(&chart.data[1]);
        for ((month, now), (_, best)) in current.iter().zip(optimal.iter()) {
            self.line(format!("  {:<5} {:>6.1} {:>6.1}", month, now, best));
        }
    }

    fn render_table(&mut self, rows: &[&HistoricalRecord]) {
        self.heading("Recent days");
        for record in rows {
            self.line(format!(
                "  {}  {:>5.1} kWh  {:>4.1} kW  {:>5.1}%  {}",
                record.date.format("%Y-%m-%d"),
                record.generation_kwh,
                record.peak_power_kw,
                record.efficiency_pct,
                record.weather
            ));
        }
    }

    fn render_headline(&mut self, metrics: &[HeadlineMetric]) {
        self.heading("Overview");
        for metric in metrics {
            let value = if metric.percentage {
                format!("{:.1}%", metric.value)
            } else {
                format!("{:.1} {}", metric.value, metric.unit)
            };
            self.line(format!("  {:<18} {}", metric.label, value));
        }
    }

    fn set_refreshing(&mut self, busy: bool) {
        if busy {
            self.line("Refreshing...");
        }
    }

    fn set_exporting(&mut self, busy: bool) {
        if busy {
            self.line("Exporting...");
        }
    }

    fn notify(&mut self, notification: Notification) {
        let level = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Error => "error",
            NotificationLevel::Info => "info",
        };
        self.line(format!("[{}] {}", level, notification.message));
    }

    fn offer_file(&mut self, filename: &str, _mime: &str, contents: &str) -> Result<(), String> {
        let path = self.output_dir.join(filename);
        std::fs::write(&path, contents).map_err(|e| format!("{}: {}", path.display(), e))?;
        info!(path = %path.display(), "File written");
        self.line(format!("Saved {}", path.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plot_points_pairs_labels_and_values() {
        let trace = json!({"x": ["Mon", "Tue", "Wed"], "y": [1.0, 2.5]});
        assert_eq!(plot_points(&trace), vec![("Mon".to_string(), 1.0), ("Tue".to_string(), 2.5)]);
        assert!(plot_points(&json!({})).is_empty());
    }

    #[test]
    fn test_weather_rows_are_printed() {
        let mut out = Vec::new();
        {
            let mut terminal = Terminal::new(&mut out, ".");
            terminal.show_weather(&[WeatherRow { label: "Temperature", value: "20°C".into() }]);
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Current weather"));
        assert!(text.contains("Temperature        20°C"));
    }

    #[test]
    fn test_offer_file_writes_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut terminal = Terminal::new(Vec::new(), dir.path());
        terminal.offer_file("data.csv", "text/csv", "a,b").unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("data.csv")).unwrap(), "a,b");
    }
}
