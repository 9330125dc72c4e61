//! Monitor configuration with validation.
//!
//! Defaults match the deployed sensor setup: all interfaces, port 50000.
//! `MonitorConfig::from_env` applies `MEAL_*` overrides on top.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// Main monitor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Dashboard client settings
    pub dashboard: DashboardConfig,
}

impl MonitorConfig {
    /// Build configuration from defaults plus environment overrides.
    ///
    /// # Environment Variables
    ///
    /// - `MEAL_HOST`: Bind address (default: 0.0.0.0)
    /// - `MEAL_PORT`: Bind port (default: 50000)
    /// - `MEAL_POLL_INTERVAL_MS`: Dashboard polling interval (default: 1000)
    /// - `MEAL_ALERT_TIMEOUT_SECS`: Dashboard alert countdown (default: 30)
    /// - `MEAL_CORS_ENABLED`: Enable CORS headers (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = env_parse::<IpAddr>("MEAL_HOST")? {
            config.http.host = host;
        }
        if let Some(port) = env_parse::<u16>("MEAL_PORT")? {
            config.http.port = port;
        }
        if let Some(ms) = env_parse::<u64>("MEAL_POLL_INTERVAL_MS")? {
            config.dashboard.poll_interval_ms = ms;
        }
        if let Some(secs) = env_parse::<u64>("MEAL_ALERT_TIMEOUT_SECS")? {
            config.dashboard.alert_timeout_secs = secs;
        }
        if let Ok(v) = env::var("MEAL_CORS_ENABLED") {
            config.cors.enabled = v.to_lowercase() != "false" && v != "0";
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.dashboard.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms cannot be 0".into(),
            ));
        }

        if self.dashboard.alert_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "alert_timeout_secs cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 50000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 50000,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Max age for preflight cache
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            max_age: 86400, // 24 hours
        }
    }
}

/// Settings interpolated into the dashboard page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// How often the page polls `/status`
    pub poll_interval_ms: u64,
    /// Countdown before the page alerts that no meal was detected
    pub alert_timeout_secs: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            alert_timeout_secs: 30,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Port 0 would bind a random port
    #[error("port cannot be 0")]
    InvalidPort,
    /// Environment variable present but unparsable
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn env_parse<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}
