//! Book sources with a trait-based seam for the network boundary.
//!
//! [`BookSource`] has one required operation, [`BookSource::try_search`], which
//! reports every failure as a [`SearchError`]. The provided methods layered on
//! top of it are fail-soft: [`BookSource::search_outcome`] turns an error into a
//! failed [`SearchOutcome`] and logs it, and [`BookSource::search`] goes one step
//! further and hands back only the records.
//!
//! | Failure                               | Strict (`try_search`)  | Fail-soft (`search`)       |
//! |---------------------------------------|------------------------|----------------------------|
//! | bad endpoint URL                      | `InvalidUrl`           | empty, logged              |
//! | connect / DNS / socket error          | `Network` / `Timeout`  | empty, logged              |
//! | status other than 200                 | `Status(code)`         | empty, logged              |
//! | body read failure                     | `Io` / `Timeout`       | empty, logged              |
//! | body is not a JSON object             | `Parse`                | empty, logged              |
//! | broken entry inside `items`           | `Ok`, partial outcome  | remaining records, logged  |
//! | entry without a title                 | `Ok`, entry skipped    | entry skipped, not logged  |

mod extract;
mod google_books;

pub mod mock;

pub use extract::{compact_body, extract_books, Extraction};
pub use google_books::GoogleBooksSource;
pub use mock::MockSource;

use async_trait::async_trait;

use crate::models::{BookRecord, SearchOutcome, SearchQuery};

/// A place books can be searched.
#[async_trait]
pub trait BookSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Query used when searching by bare term
    fn query_for(&self, term: &str) -> SearchQuery {
        SearchQuery::new(term)
    }

    /// Search, reporting transport and top-level parse failures as errors
    async fn try_search(&self, query: &SearchQuery) -> Result<SearchOutcome, SearchError>;

    /// Search without failing; errors become a failed outcome and a log entry
    async fn search_outcome(&self, query: &SearchQuery) -> SearchOutcome {
        match self.try_search(query).await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(
                    source = self.id(),
                    term = %query.term,
                    error = %error,
                    "Book search failed, returning no results"
                );
                SearchOutcome::failed(error, query.term.clone())
            }
        }
    }

    /// Search by term and return whatever records could be extracted
    async fn search(&self, term: &str) -> Vec<BookRecord> {
        let query = self.query_for(term);
        self.search_outcome(&query).await.into_books()
    }
}

/// Errors that can occur while searching a source
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The request URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection, DNS or socket failure
    #[error("Network error: {0}")]
    Network(String),

    /// Connect or read timeout elapsed
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The server answered with something other than 200
    #[error("HTTP status {0}")]
    Status(u16),

    /// Reading the response body failed
    #[error("IO error: {0}")]
    Io(String),

    /// The body is not a JSON object
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout(err.to_string())
        } else if err.is_body() || err.is_decode() {
            SearchError::Io(err.to_string())
        } else {
            SearchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Parse(format!("JSON: {}", err))
    }
}

impl From<url::ParseError> for SearchError {
    fn from(err: url::ParseError) -> Self {
        SearchError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        SearchError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(SearchError::from(json_err), SearchError::Parse(msg) if msg.starts_with("JSON:")));

        let url_err = url::Url::parse("not a url").unwrap_err();
        assert!(matches!(SearchError::from(url_err), SearchError::InvalidUrl(_)));

        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        assert_eq!(SearchError::from(io_err), SearchError::Io("truncated".to_string()));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(SearchError::Status(404).to_string(), "HTTP status 404");
        assert_eq!(
            SearchError::Parse("JSON: eof".to_string()).to_string(),
            "Parse error: JSON: eof"
        );
    }
}
