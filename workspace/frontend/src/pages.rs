pub mod analytics;
pub mod home;
pub mod predict;
