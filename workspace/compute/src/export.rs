use common::{HistoricalRecord, ReportFormat};
use csv::{Terminator, WriterBuilder};
use tracing::debug;

use crate::error::ExportError;

pub const ANALYTICS_CSV_FILENAME: &str = "solar_analytics_data.csv";
pub const ANALYTICS_CSV_MIME: &str = "text/csv";
pub const ANALYTICS_CSV_HEADER: [&str; 5] = [
    "Date",
    "Generation (kWh)",
    "Peak Power (kW)",
    "Efficiency (%)",
    "Weather",
];

/// Download name for a server-generated prediction report.
pub fn report_filename(format: ReportFormat) -> String {
    format!("solar_prediction_report.{}", format.extension())
}

/// Serializes the analytics series. Rows are `\n` separated with no
/// trailing newline after the last record.
pub fn analytics_csv(series: &[HistoricalRecord]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(ANALYTICS_CSV_HEADER)?;
    for record in series {
        writer.write_record([
            record.date.format("%Y-%m-%d").to_string(),
            format!("{:.1}", record.generation_kwh),
            format!("{:.1}", record.peak_power_kw),
            format!("{:.1}", record.efficiency_pct),
            record.weather.label().to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Buffer(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| ExportError::Buffer(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }

    debug!(rows = series.len(), bytes = text.len(), "Serialized analytics CSV");
    Ok(text)
}
