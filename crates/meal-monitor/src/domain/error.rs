//! Monitor error types.
//!
//! Request handlers never fail; these cover startup and serving.

use super::config::ConfigError;

/// Server-level errors (internal use, never sent to clients)
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error
    #[error("server bind error on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Error while serving connections
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;
