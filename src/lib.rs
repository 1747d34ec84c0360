//! Water Consumption Tracker
//!
//! Records date/quantity observations, shows them in a table, charts them in
//! one of four display modes and exports the chart (PDF) or the table (CSV).

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod session;

pub use config::AppConfig;
pub use session::TrackerSession;
