//! # Book Listing
//!
//! A fail-soft client for the Google Books volumes search API.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (BookRecord, SearchQuery, SearchOutcome)
//! - [`sources`]: The [`BookSource`] trait, the Google Books source and JSON extraction
//! - [`session`]: Background dispatch with single delivery and latest-wins result sets
//! - [`utils`]: HTTP client and logging setup
//! - [`config`]: Configuration management

pub mod config;
pub mod models;
pub mod session;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{BookRecord, SearchOutcome, SearchQuery};
pub use session::{spawn_search, SearchHandle, SearchSession};
pub use sources::{BookSource, GoogleBooksSource, SearchError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
