pub mod analytics;
pub mod locate;
pub mod predict;
pub mod weather;

pub use analytics::{AnalyticsArgs, analytics};
pub use locate::{LocateArgs, locate};
pub use predict::{PredictArgs, predict};
pub use weather::{WeatherArgs, weather};
