//! Page controllers.
//!
//! Each asynchronous action comes as a synchronous `begin_*`/`complete_*`
//! pair plus an `async` method that runs both against a [`crate::api::SolarApi`].
//! The pair form lets a UI release its borrow of the controller while the
//! request is in flight.

pub mod analytics;
pub mod location;
pub mod prediction;

pub use analytics::AnalyticsController;
pub use location::LocationHelper;
pub use prediction::{PendingPrediction, PredictionController, PredictionState};

/// How a completed request was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request was issued meanwhile; this answer was dropped.
    Stale,
}
