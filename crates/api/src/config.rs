//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the SlotBook API
//! server. It retrieves configuration values from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `DATA_URL`: Base URL of a remote JSON directory; takes precedence over `DATA_DIR`
//! - `DATA_TIMEOUT_SECONDS`: Per-request timeout for `DATA_URL` (default: 10)
//! - `DATA_DIR`: Local directory holding `candidates.json` and `engineers.json` (default: "./data")
//! - `BOOKING_LATENCY_MS`: Simulated confirmation latency for `DATA_DIR` (default: 500)
//! - `SERVE_DATA`: Whether to expose `DATA_DIR` under `/data` (default: true)

use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, WrapErr};
use tracing::Level;

/// Where candidates and engineers come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Remote JSON directory at the given base URL
    Remote { url: String, timeout: Duration },
    /// Local data directory with a simulated booking service
    Local {
        dir: PathBuf,
        booking_latency: Duration,
    },
}

/// Configuration for the SlotBook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Source of candidates, engineers and booking confirmations
    pub data_source: DataSource,

    /// Serve the local data directory under `/data`
    pub serve_data: bool,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The API_PORT value cannot be parsed as a u16
    /// - The BOOKING_LATENCY_MS value cannot be parsed as milliseconds
    /// - The DATA_TIMEOUT_SECONDS value cannot be parsed as seconds
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS")
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Data settings
        let data_source = match lookup("DATA_URL") {
            Some(url) => {
                let timeout_secs: u64 = lookup("DATA_TIMEOUT_SECONDS")
                    .unwrap_or_else(|| "10".to_string())
                    .parse()
                    .wrap_err("Invalid DATA_TIMEOUT_SECONDS value")?;
                DataSource::Remote {
                    url,
                    timeout: Duration::from_secs(timeout_secs),
                }
            }
            None => {
                let dir = PathBuf::from(lookup("DATA_DIR").unwrap_or_else(|| "./data".to_string()));
                let latency_ms: u64 = lookup("BOOKING_LATENCY_MS")
                    .unwrap_or_else(|| "500".to_string())
                    .parse()
                    .wrap_err("Invalid BOOKING_LATENCY_MS value")?;
                DataSource::Local {
                    dir,
                    booking_latency: Duration::from_millis(latency_ms),
                }
            }
        };

        let serve_data = lookup("SERVE_DATA")
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(true);

        Ok(Self {
            host,
            port,
            log_level,
            cors_origins,
            request_timeout,
            data_source,
            serve_data,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The local directory to expose under `/data`, if any.
    pub fn served_data_dir(&self) -> Option<&PathBuf> {
        match &self.data_source {
            DataSource::Local { dir, .. } if self.serve_data => Some(dir),
            _ => None,
        }
    }
}
