//! HTTP client utilities.

use reqwest::{Client, IntoUrl, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::sources::SearchError;

/// Shared HTTP client with the search timeouts applied
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, SearchError> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a client honoring the timeouts and user agent in `config`
    pub fn with_config(config: &ClientConfig) -> Result<Self, SearchError> {
        let user_agent = config.user_agent.clone().unwrap_or_else(default_user_agent);
        Self::build(&user_agent, config.connect_timeout(), config.read_timeout())
    }

    /// Create a new HTTP client with a custom user agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self, SearchError> {
        let config = ClientConfig::default();
        Self::build(user_agent, config.connect_timeout(), config.read_timeout())
    }

    fn build(user_agent: &str, connect: Duration, read: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(connect)
            .read_timeout(read)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| SearchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Wrap a reqwest client built elsewhere; its own timeouts apply
    pub fn from_client(client: Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Start a GET request
    pub fn get<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.client.get(url)
    }
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}
