//! Middleware stack for the monitor.
//!
//! Layer order: Request → Cors → Tracing → Handler

pub mod cors;
pub mod metrics;
pub mod tracing;

pub use cors::create_cors_layer;
pub use metrics::MonitorMetrics;
pub use tracing::TracingLayer;
