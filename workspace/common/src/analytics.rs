use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sky condition recorded for a day of synthetic history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Sunny,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    Cloudy,
    Overcast,
}

impl WeatherCondition {
    /// Display order, also used for distribution charts.
    pub const ALL: [WeatherCondition; 4] = [
        Self::Sunny,
        Self::PartlyCloudy,
        Self::Cloudy,
        Self::Overcast,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Overcast => "Overcast",
        }
    }

    /// Badge style suffix used by the history table.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Sunny => "success",
            Self::PartlyCloudy => "warning",
            Self::Cloudy => "info",
            Self::Overcast => "secondary",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One day of locally synthesized generation history. Demo data only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalRecord {
    pub date: NaiveDate,
    pub generation_kwh: f64,
    pub peak_power_kw: f64,
    pub efficiency_pct: f64,
    pub weather: WeatherCondition,
}
