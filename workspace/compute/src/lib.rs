//! Client-side logic of the SolarCast prediction app: validation, data
//! shaping, chart specifications and the page controllers. Everything here
//! is presentation-agnostic and shared by the browser frontend and the CLI.

pub mod analytics;
pub mod api;
pub mod charts;
pub mod controller;
pub mod error;
pub mod export;
pub mod metrics;
pub mod series;
pub mod validation;
pub mod view;

#[cfg(test)]
pub mod testing;

pub use api::SolarApi;
pub use controller::{AnalyticsController, Completion, LocationHelper, PredictionController};
pub use error::{ApiError, Result, ValidationError, WorkflowError};
