pub mod chart;
pub mod counters;
pub mod layout;
pub mod location_picker;
pub mod results;
pub mod weather_card;
