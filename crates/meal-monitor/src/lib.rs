//! Meal Monitor - records whether a meal is in progress and serves it over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   GET /mealStart, /mealEnd    ┌─────────────────────────────┐
//! │ meal-sensor  │ ────────────────────────────→ │         meal-monitor         │
//! │ (detector +  │                               │  Cors → Tracing → Handlers   │
//! │  reporter)   │                               │             │                │
//! └──────────────┘                               │      ┌──────┴──────┐         │
//!                                                │      │ StatusStore │         │
//! ┌──────────────┐   GET /status (polling)       │      │  (Mutex)    │         │
//! │  dashboard   │ ────────────────────────────→ │      └─────────────┘         │
//! └──────────────┘                               └─────────────────────────────┘
//! ```
//!
//! # Endpoints
//!
//! - `GET /` dashboard page with the current values filled in
//! - `GET /mealStart`, `GET /mealEnd`, `GET /reset` state transitions
//! - `GET /status` JSON snapshot `{status, start_time, end_time, duration}`
//! - `GET /health`, `GET /metrics`
//!
//! # Usage
//!
//! ```ignore
//! use meal_monitor::{MonitorConfig, MonitorService};
//!
//! let service = MonitorService::new(MonitorConfig::from_env()?)?;
//! service.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod dashboard;
pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod service;
pub mod store;
pub mod telemetry;

// Re-exports for public API
pub use domain::config::MonitorConfig;
pub use domain::error::{MonitorError, MonitorResult};
pub use domain::status::{MealState, MealStatus};
pub use middleware::MonitorMetrics;
pub use service::MonitorService;
pub use store::StatusStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
