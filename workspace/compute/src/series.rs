use common::PredictionResult;

/// Which of the two mutually exclusive series a prediction carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Hourly,
    Daily,
}

impl SeriesKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Hourly => "Hourly Power Generation (W)",
            Self::Daily => "Daily Power Generation (Wh)",
        }
    }

    pub fn axis_title(&self) -> &'static str {
        match self {
            Self::Hourly => "Hour",
            Self::Daily => "Day",
        }
    }
}

/// Chart-ready labels and values for a prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSeries {
    pub kind: SeriesKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl PowerSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Maps the populated series of a prediction to labels and values.
///
/// Hourly points are labelled `"{hour}:00"`, per-day points `"Day {day}"`.
/// A result with neither or both series is malformed; the error string
/// names which.
pub fn power_series(result: &PredictionResult) -> Result<PowerSeries, String> {
    match (&result.hourly_predictions, &result.daily_predictions) {
        (Some(hourly), None) => Ok(PowerSeries {
            kind: SeriesKind::Hourly,
            labels: hourly.iter().map(|h| format!("{}:00", h.hour)).collect(),
            values: hourly.iter().map(|h| h.power).collect(),
        }),
        (None, Some(daily)) => Ok(PowerSeries {
            kind: SeriesKind::Daily,
            labels: daily.iter().map(|d| format!("Day {}", d.day)).collect(),
            values: daily.iter().map(|d| d.power).collect(),
        }),
        (None, None) => Err("no prediction series".to_string()),
        (Some(_), Some(_)) => Err("both hourly and daily series present".to_string()),
    }
}
