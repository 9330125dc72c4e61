//! Domain types for the meal monitor.
//!
//! This module contains the status record, configuration, and error handling.

pub mod config;
pub mod error;
pub mod status;

// Re-exports for convenience
pub use config::{ConfigError, CorsConfig, DashboardConfig, HttpConfig, MonitorConfig};
pub use error::{MonitorError, MonitorResult};
pub use status::{format_duration, MealState, MealStatus, DEFAULT_DURATION, TIMESTAMP_FORMAT};
