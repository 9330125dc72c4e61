//! HTTP request handlers.
//!
//! None of these can fail: a missing start time on `/mealEnd` is tolerated.

use crate::dashboard::render_index;
use crate::domain::config::DashboardConfig;
use crate::domain::status::MealStatus;
use crate::middleware::MonitorMetrics;
use crate::store::StatusStore;
use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

pub const MEAL_STARTED_MESSAGE: &str = "食事開始時刻を記録しました";
pub const MEAL_ENDED_MESSAGE: &str = "食事終了時刻を記録しました";
pub const RESET_MESSAGE: &str = "システム状態をリセットしました";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StatusStore>,
    pub metrics: Arc<MonitorMetrics>,
    pub dashboard: Arc<DashboardConfig>,
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.store.status(), &state.dashboard))
}

/// `GET /mealStart`
pub async fn meal_start(State(state): State<AppState>) -> &'static str {
    state.store.start_meal();
    state.metrics.record_start();
    MEAL_STARTED_MESSAGE
}

/// `GET /mealEnd`
pub async fn meal_end(State(state): State<AppState>) -> &'static str {
    state.store.end_meal();
    state.metrics.record_end();
    MEAL_ENDED_MESSAGE
}

/// `GET /reset`
pub async fn reset(State(state): State<AppState>) -> &'static str {
    state.store.reset();
    state.metrics.record_reset();
    RESET_MESSAGE
}

/// `GET /status`
pub async fn status(State(state): State<AppState>) -> Json<MealStatus> {
    Json(state.store.status())
}

/// `GET /metrics`
pub async fn metrics(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.metrics.to_json())
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "meal-monitor",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
