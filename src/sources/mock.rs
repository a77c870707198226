//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::models::{BookRecord, SearchOutcome, SearchQuery};
use crate::sources::{BookSource, SearchError};

/// A mock source for testing that returns predefined responses.
#[derive(Debug, Default)]
pub struct MockSource {
    response: Mutex<Option<Result<SearchOutcome, SearchError>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait this long before answering each search.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer every search with these books.
    pub fn set_books(&self, books: Vec<BookRecord>) {
        *self.slot() = Some(Ok(SearchOutcome::complete(books, "")));
    }

    /// Answer every search with this outcome.
    pub fn set_search_response(&self, outcome: SearchOutcome) {
        *self.slot() = Some(Ok(outcome));
    }

    /// Fail every search with this error.
    pub fn set_error(&self, error: SearchError) {
        *self.slot() = Some(Err(error));
    }

    /// Clear the configured response.
    pub fn clear_response(&self) {
        *self.slot() = None;
    }

    /// Number of searches answered so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn slot(&self) -> MutexGuard<'_, Option<Result<SearchOutcome, SearchError>>> {
        self.response.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl BookSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn try_search(&self, query: &SearchQuery) -> Result<SearchOutcome, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let configured = self.slot().clone();
        match configured {
            Some(Ok(mut outcome)) => {
                outcome.term = query.term.clone();
                Ok(outcome)
            }
            Some(Err(error)) => Err(error),
            None => Ok(SearchOutcome::complete(Vec::new(), query.term.clone())),
        }
    }
}

/// Helper function to create a mock book for testing; `None` for a blank title.
pub fn make_book(title: &str, authors: &[&str]) -> Option<BookRecord> {
    BookRecord::builder(title).map(|builder| builder.author_names(authors).build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_defaults_to_empty() {
        let source = MockSource::new();
        let outcome = source.try_search(&SearchQuery::new("anything")).await.unwrap();
        assert!(outcome.is_empty());
        assert_eq!(outcome.term, "anything");
        assert_eq!(source.calls(), 1);
        assert_eq!(source.name(), "Mock Source");
    }

    #[test]
    fn test_mock_without_delay_needs_no_runtime() {
        let source = MockSource::new();
        source.set_books(vec![make_book("Dune", &["Frank Herbert"]).unwrap()]);

        let books = tokio_test::block_on(source.search("dune"));
        assert_eq!(books[0].title(), "Dune");
        assert!(make_book(" ", &[]).is_none());
    }

    #[tokio::test]
    async fn test_mock_returns_configured_books() {
        let source = MockSource::new();
        source.set_books(vec![make_book("Go", &["R. Pike"]).unwrap()]);

        let books = source.search("go").await;
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].authors(), "R. Pike");
    }

    #[tokio::test]
    async fn test_mock_error_is_fail_soft() {
        let source = MockSource::new();
        source.set_error(SearchError::Status(500));

        assert_eq!(
            source.try_search(&SearchQuery::new("go")).await,
            Err(SearchError::Status(500))
        );
        let outcome = source.search_outcome(&SearchQuery::new("go")).await;
        assert_eq!(outcome.error(), Some(&SearchError::Status(500)));
        assert!(source.search("go").await.is_empty());

        source.clear_response();
        assert!(!source.search_outcome(&SearchQuery::new("go")).await.is_failed());
    }
}
