//! Utility modules supporting search operations.
//!
//! - [`HttpClient`]: shared reqwest client with the connect and read timeouts applied
//! - [`logging::init`]: install a tracing subscriber for binaries embedding the client
//!
//! ```rust,no_run
//! use book_listing::config::ClientConfig;
//! use book_listing::utils::{logging, HttpClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::default();
//! logging::init(&config.logging);
//! let client = HttpClient::with_config(&config)?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

mod http;
pub mod logging;

pub use http::HttpClient;
