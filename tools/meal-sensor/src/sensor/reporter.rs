//! Outbound reporting of detected meal events to a running monitor.

use super::detector::MealEvent;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when reporting to the monitor.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("monitor returned {status} for {path}")]
    Status { status: u16, path: &'static str },
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Destination for detected meal events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one event; returns the monitor's response text.
    async fn send(&self, event: MealEvent) -> Result<String, ReporterError>;
}

/// Reports events with `GET {base_url}/{event path}`.
pub struct HttpReporter {
    client: Client,
    base_url: String,
}

impl HttpReporter {
    /// Default per-request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(base_url: impl Into<String>) -> Result<Self, ReporterError> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ReporterError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(2))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for an event.
    pub fn url_for(&self, event: MealEvent) -> String {
        format!("{}/{}", self.base_url, event.path())
    }
}

#[async_trait]
impl EventSink for HttpReporter {
    async fn send(&self, event: MealEvent) -> Result<String, ReporterError> {
        let url = self.url_for(event);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_connect() {
                ReporterError::Connection(format!("Cannot connect to {}", self.base_url))
            } else {
                ReporterError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReporterError::Status {
                status: status.as_u16(),
                path: event.path(),
            });
        }

        Ok(response.text().await?)
    }
}
