//! Configuration management.
//!
//! All settings have defaults matching the public volumes API, so a missing
//! file is never required. A TOML file can override any of them:
//!
//! ```toml
//! endpoint = "https://www.googleapis.com/books/v1/volumes"
//! max_results = 10
//! connect_timeout_ms = 15000
//! read_timeout_ms = 10000
//! fault_policy = "skip_item"
//!
//! [logging]
//! level = "debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::models::{FaultPolicy, DEFAULT_MAX_RESULTS};

/// Default volumes search endpoint
pub const GOOGLE_BOOKS_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the volumes search endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Results requested per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Read timeout in milliseconds
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Custom user agent; the crate name and version are used when unset
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Handling of structurally broken entries
    #[serde(default)]
    pub fault_policy: FaultPolicy,

    /// Logging section
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_results: default_max_results(),
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            user_agent: None,
            fault_policy: FaultPolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Point the client at a different endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the fault policy
    pub fn fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }

    /// Set both timeouts
    pub fn timeouts(mut self, connect: Duration, read: Duration) -> Self {
        self.connect_timeout_ms = connect.as_millis() as u64;
        self.read_timeout_ms = read.as_millis() as u64;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

fn default_endpoint() -> String {
    GOOGLE_BOOKS_ENDPOINT.to_string()
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_connect_timeout_ms() -> u64 {
    15_000
}

fn default_read_timeout_ms() -> u64 {
    10_000
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive handed to the subscriber, e.g. `info` or `book_listing=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<ClientConfig, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;

    settings.try_deserialize()
}
