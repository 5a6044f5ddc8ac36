//! Plotly figure specifications.
//!
//! Each builder returns the `data`/`layout`/`config` triple that
//! `Plotly.newPlot` expects. The browser hands these to the JS library
//! verbatim; the terminal client only reads the titles and series back out.

use serde::Serialize;
use serde_json::{Value, json};

use crate::analytics::{COMPARISON_CURRENT, COMPARISON_MONTHS, COMPARISON_OPTIMAL, TrendView};
use crate::series::PowerSeries;
use common::WeatherCondition;

const SOLAR_ORANGE: &str = "#f59e0b";
const SOLAR_FILL: &str = "rgba(245, 158, 11, 0.15)";
const CURRENT_BLUE: &str = "#3b82f6";
const OPTIMAL_GREEN: &str = "#22c55e";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub data: Value,
    pub layout: Value,
    pub config: Value,
}

impl PlotSpec {
    pub fn title(&self) -> Option<&str> {
        self.layout.pointer("/title/text").and_then(Value::as_str)
    }
}

fn base_layout(title: Option<&str>) -> Value {
    let mut layout = json!({
        "margin": {"t": 40, "r": 10, "l": 50, "b": 40},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
        "xaxis": {"showgrid": false},
        "yaxis": {"showgrid": true, "gridcolor": "#eee", "rangemode": "tozero"}
    });
    if let Some(title) = title {
        layout["title"] = json!({"text": title});
    }
    layout
}

fn base_config() -> Value {
    json!({"responsive": true, "displayModeBar": false})
}

/// Line chart of a prediction's power series.
pub fn power_chart(series: &PowerSeries) -> PlotSpec {
    let title = series.kind.title();
    let mut layout = base_layout(Some(title));
    layout["xaxis"]["title"] = json!({"text": series.kind.axis_title()});
    layout["yaxis"]["title"] = json!({"text": "Power"});

    PlotSpec {
        data: json!([{
            "x": series.labels,
            "y": series.values,
            "type": "scatter",
            "mode": "lines+markers",
            "fill": "tozeroy",
            "fillcolor": SOLAR_FILL,
            "line": {"color": SOLAR_ORANGE, "shape": "spline"},
            "name": title
        }]),
        layout,
        config: base_config(),
    }
}

/// Generation trend for the analytics dashboard.
pub fn trend_chart(view: &TrendView) -> PlotSpec {
    let mut layout = base_layout(None);
    layout["yaxis"]["title"] = json!({"text": "Generation (kWh)"});

    PlotSpec {
        data: json!([{
            "x": view.labels,
            "y": view.values,
            "type": "scatter",
            "mode": "lines",
            "fill": "tozeroy",
            "fillcolor": SOLAR_FILL,
            "line": {"color": SOLAR_ORANGE, "shape": "spline"},
            "name": "Energy Generation (kWh)"
        }]),
        layout,
        config: base_config(),
    }
}

/// Doughnut of days per weather condition.
pub fn weather_chart(distribution: &[(WeatherCondition, usize)]) -> PlotSpec {
    let labels: Vec<&str> = distribution.iter().map(|(c, _)| c.label()).collect();
    let values: Vec<usize> = distribution.iter().map(|(_, n)| *n).collect();

    PlotSpec {
        data: json!([{
            "labels": labels,
            "values": values,
            "type": "pie",
            "hole": 0.5,
            "sort": false,
            "marker": {"colors": ["#f59e0b", "#fbbf24", "#94a3b8", "#64748b"]}
        }]),
        layout: json!({
            "margin": {"t": 10, "r": 10, "l": 10, "b": 10},
            "paper_bgcolor": "rgba(0,0,0,0)",
            "showlegend": true,
            "legend": {"orientation": "h", "y": -0.1}
        }),
        config: base_config(),
    }
}

/// Static "current vs optimal" monthly comparison.
pub fn comparison_chart() -> PlotSpec {
    let mut layout = base_layout(None);
    layout["barmode"] = json!("group");
    layout["yaxis"]["title"] = json!({"text": "kWh"});
    layout["legend"] = json!({"orientation": "h", "y": -0.2});

    PlotSpec {
        data: json!([
            {
                "x": COMPARISON_MONTHS,
                "y": COMPARISON_CURRENT,
                "type": "bar",
                "name": "Current Configuration",
                "marker": {"color": CURRENT_BLUE}
            },
            {
                "x": COMPARISON_MONTHS,
                "y": COMPARISON_OPTIMAL,
                "type": "bar",
                "name": "Optimal Configuration",
                "marker": {"color": OPTIMAL_GREEN}
            }
        ]),
        layout,
        config: base_config(),
    }
}
