//! Monitor service - router assembly and HTTP server lifecycle.

use crate::domain::config::MonitorConfig;
use crate::domain::error::{MonitorError, MonitorResult};
use crate::handlers::{self, AppState};
use crate::middleware::{create_cors_layer, MonitorMetrics, TracingLayer};
use crate::store::StatusStore;
use axum::{routing::get, Router};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::{info, warn};

/// Meal monitor service
pub struct MonitorService {
    config: MonitorConfig,
    store: Arc<StatusStore>,
    metrics: Arc<MonitorMetrics>,
}

impl MonitorService {
    /// Create a new service with a fresh status store
    pub fn new(config: MonitorConfig) -> MonitorResult<Self> {
        Self::with_store(config, Arc::new(StatusStore::new()))
    }

    /// Create a service around an existing store
    pub fn with_store(config: MonitorConfig, store: Arc<StatusStore>) -> MonitorResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            store,
            metrics: Arc::new(MonitorMetrics::new()),
        })
    }

    /// Shared status store
    pub fn store(&self) -> Arc<StatusStore> {
        Arc::clone(&self.store)
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<MonitorMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Build the HTTP router.
    ///
    /// Unknown paths fall through to 404 and non-GET methods on known paths
    /// get 405 from axum's method routing.
    pub fn router(&self) -> Router {
        let state = AppState {
            store: Arc::clone(&self.store),
            metrics: Arc::clone(&self.metrics),
            dashboard: Arc::new(self.config.dashboard.clone()),
        };

        let middleware = ServiceBuilder::new()
            .layer(create_cors_layer(&self.config.cors))
            .layer(TracingLayer::new(Arc::clone(&self.metrics)));

        Router::new()
            .route("/", get(handlers::index))
            .route("/mealStart", get(handlers::meal_start))
            .route("/mealEnd", get(handlers::meal_end))
            .route("/reset", get(handlers::reset))
            .route("/status", get(handlers::status))
            .route("/health", get(handlers::health_check))
            .route("/metrics", get(handlers::metrics))
            .layer(middleware)
            .with_state(state)
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn start(self) -> MonitorResult<()> {
        let addr = self.config.http_addr();
        let listener = bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> MonitorResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener
            .local_addr()
            .map_err(|e| MonitorError::Internal(e.to_string()))?;
        info!(addr = %addr, "Starting meal monitor HTTP server");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(MonitorError::Serve)?;

        info!("Meal monitor stopped");
        Ok(())
    }
}

/// Bind a TCP listener, mapping the error with the address.
pub async fn bind(addr: SocketAddr) -> MonitorResult<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| MonitorError::Bind { addr, source })
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}
