//! Derived summary figures and the cosmetic timing helpers used when
//! presenting them (counter easing, staggered loading steps).

use std::time::Duration;

use common::{OptimalConfig, PredictionResult};

/// Standard test irradiance, W/m².
pub const REFERENCE_IRRADIANCE_W_M2: f64 = 1000.0;
/// Nominal panel conversion efficiency used for the theoretical maximum.
pub const REFERENCE_PANEL_EFFICIENCY: f64 = 0.2;

/// Duration of the summary counter animation.
pub const COUNTER_ANIMATION: Duration = Duration::from_millis(2000);
/// Delay between successive loading steps lighting up.
pub const LOADING_STEP_INTERVAL: Duration = Duration::from_millis(1000);

pub const LOADING_STEPS: [&str; 4] = [
    "Fetching weather data",
    "Calculating solar position",
    "Running prediction model",
    "Optimizing panel configuration",
];

/// Predicted output as a percentage of the panel's theoretical maximum
/// (`area * 1000 W/m² * 20 %`).
pub fn efficiency_percent(total_power: f64, panel_area: f64) -> f64 {
    let theoretical_max = panel_area * REFERENCE_IRRADIANCE_W_M2 * REFERENCE_PANEL_EFFICIENCY;
    total_power / theoretical_max * 100.0
}

/// The four headline figures shown above the prediction chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryMetrics {
    pub total_power: f64,
    pub peak_power: f64,
    pub improvement_percent: f64,
    pub efficiency_percent: f64,
}

impl SummaryMetrics {
    pub fn from_prediction(result: &PredictionResult, improvement_percent: Option<f64>, panel_area: f64) -> Self {
        Self {
            total_power: result.total_power,
            peak_power: result.peak_power.unwrap_or(0.0),
            improvement_percent: improvement_percent.unwrap_or(0.0),
            efficiency_percent: efficiency_percent(result.total_power, panel_area),
        }
    }

    /// Counters in display order: total, peak, improvement, efficiency.
    pub fn counters(&self) -> [CounterAnimation; 4] {
        [
            CounterAnimation::new("Total Power", self.total_power, false),
            CounterAnimation::new("Peak Power", self.peak_power, false),
            CounterAnimation::new("Improvement", self.improvement_percent, true),
            CounterAnimation::new("Efficiency", self.efficiency_percent, true),
        ]
    }
}

/// Optimisation advice derived from the server's optimal configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimalRecommendation {
    pub tilt: f64,
    pub azimuth: f64,
    pub improvement_percent: f64,
}

impl OptimalRecommendation {
    pub fn new(config: OptimalConfig, improvement_percent: f64) -> Self {
        Self {
            tilt: config.tilt,
            azimuth: config.azimuth,
            improvement_percent,
        }
    }

    /// Heading and sentence pairs for the recommendations panel.
    pub fn lines(&self) -> [(&'static str, String); 3] {
        [
            (
                "Optimal Tilt Angle",
                format!("For maximum power generation, set your panel tilt to {:.1}°", self.tilt),
            ),
            (
                "Optimal Azimuth Angle",
                format!("For maximum power generation, set your panel azimuth to {:.1}°", self.azimuth),
            ),
            (
                "Potential Improvement",
                format!(
                    "By optimizing your panel configuration, you could increase power generation by {:.1}%",
                    self.improvement_percent
                ),
            ),
        ]
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// A numeric counter animating from 0 to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    pub label: &'static str,
    pub target: f64,
    pub percentage: bool,
    pub duration: Duration,
}

impl CounterAnimation {
    pub fn new(label: &'static str, target: f64, percentage: bool) -> Self {
        Self {
            label,
            target,
            percentage,
            duration: COUNTER_ANIMATION,
        }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, elapsed: Duration) -> f64 {
        self.target * ease_out_cubic(self.progress(elapsed))
    }

    pub fn text_at(&self, elapsed: Duration) -> String {
        self.format(self.value_at(elapsed))
    }

    pub fn final_text(&self) -> String {
        self.format(self.target)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    fn format(&self, value: f64) -> String {
        if self.percentage {
            format!("{:.1}%", value)
        } else {
            format!("{:.1}", value)
        }
    }
}

/// Number of loading steps lit after `elapsed`; the first lights immediately.
pub fn active_loading_steps(elapsed: Duration) -> usize {
    let stepped = (elapsed.as_millis() / LOADING_STEP_INTERVAL.as_millis()) as usize;
    (stepped + 1).min(LOADING_STEPS.len())
}
