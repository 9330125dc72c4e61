//! CORS middleware.
//!
//! Wrapper around tower-http CORS with monitor configuration. Only GET is
//! ever served, so methods are fixed.

use crate::domain::config::CorsConfig;
use axum::http::{HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Create CORS layer from monitor config
pub fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    if !config.enabled {
        // No CORS headers at all: browsers fall back to same-origin only
        return CorsLayer::new();
    }

    let mut cors = CorsLayer::new().allow_methods([Method::GET]);

    if config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors.max_age(Duration::from_secs(config.max_age))
}
