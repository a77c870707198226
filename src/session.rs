//! Background search dispatch with single delivery.
//!
//! [`spawn_search`] runs one fail-soft search on a tokio task and hands its
//! outcome back over a oneshot channel, so every search is delivered at most
//! once and a caller can always tell "not delivered yet" from "delivered,
//! but empty".
//!
//! [`SearchSession`] sits on top for UI-style consumers: each submitted term
//! gets a higher generation, the previous in-flight search is abandoned, and
//! only the latest generation may replace the current result set.

use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;

use crate::models::{BookRecord, SearchOutcome, SearchQuery};
use crate::sources::BookSource;

/// Monotonic search counter; higher is newer.
pub type Generation = u64;

/// Result of polling a [`SearchHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The search is still running
    Pending,
    /// The search finished; this is its only delivery
    Delivered(SearchOutcome),
    /// The outcome was already taken, or the task ended without sending one
    Closed,
}

/// Handle to one search running in the background.
#[derive(Debug)]
pub struct SearchHandle {
    generation: Generation,
    term: String,
    receiver: Option<oneshot::Receiver<SearchOutcome>>,
    task: JoinHandle<()>,
}

/// Start `query` on a tokio task. Must be called from within a runtime.
pub fn spawn_search(source: Arc<dyn BookSource>, query: SearchQuery) -> SearchHandle {
    spawn_with_generation(source, query, 0)
}

fn spawn_with_generation(
    source: Arc<dyn BookSource>,
    query: SearchQuery,
    generation: Generation,
) -> SearchHandle {
    let (sender, receiver) = oneshot::channel();
    let term = query.term.clone();

    let task = tokio::spawn(async move {
        let outcome = source.search_outcome(&query).await;
        if sender.send(outcome).is_err() {
            tracing::debug!(generation, term = %query.term, "Search finished after being abandoned");
        }
    });

    SearchHandle {
        generation,
        term,
        receiver: Some(receiver),
        task,
    }
}

impl SearchHandle {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Take the outcome if it has arrived, without waiting.
    pub fn try_take(&mut self) -> Delivery {
        let Some(receiver) = self.receiver.as_mut() else {
            return Delivery::Closed;
        };

        match receiver.try_recv() {
            Ok(outcome) => {
                self.receiver = None;
                Delivery::Delivered(outcome)
            }
            Err(TryRecvError::Empty) => Delivery::Pending,
            Err(TryRecvError::Closed) => {
                self.receiver = None;
                Delivery::Closed
            }
        }
    }

    /// Wait for the outcome. `None` if it was already taken or the task was aborted.
    pub async fn wait(&mut self) -> Option<SearchOutcome> {
        let receiver = self.receiver.take()?;
        receiver.await.ok()
    }

    /// Stop the background task; the outcome will never be delivered.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Whether the background task has ended
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Latest-wins search state for a single result list.
#[derive(Debug)]
pub struct SearchSession {
    source: Arc<dyn BookSource>,
    generation: Generation,
    in_flight: Option<SearchHandle>,
    latest: Option<SearchOutcome>,
}

impl SearchSession {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        Self {
            source,
            generation: 0,
            in_flight: None,
            latest: None,
        }
    }

    /// Start a search for `term`, abandoning any search still running.
    ///
    /// A blank term starts nothing and leaves the current results in place.
    pub fn submit(&mut self, term: &str) -> Option<Generation> {
        if term.trim().is_empty() {
            return None;
        }

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(
                generation = previous.generation(),
                term = previous.term(),
                "Abandoning superseded search"
            );
            previous.abort();
        }

        self.generation += 1;
        let query = self.source.query_for(term);
        self.in_flight = Some(spawn_with_generation(
            Arc::clone(&self.source),
            query,
            self.generation,
        ));

        Some(self.generation)
    }

    /// Check the in-flight search without waiting. Returns `true` when a new
    /// result set was installed.
    pub fn poll(&mut self) -> bool {
        let Some(mut handle) = self.in_flight.take() else {
            return false;
        };

        match handle.try_take() {
            Delivery::Pending => {
                self.in_flight = Some(handle);
                false
            }
            Delivery::Delivered(outcome) => self.accept(handle.generation(), outcome),
            Delivery::Closed => {
                tracing::warn!(
                    generation = handle.generation(),
                    "Search task ended without delivering a result"
                );
                false
            }
        }
    }

    /// Wait for the in-flight search, if any, and install its result.
    pub async fn settle(&mut self) -> Option<&SearchOutcome> {
        if let Some(mut handle) = self.in_flight.take() {
            if let Some(outcome) = handle.wait().await {
                self.accept(handle.generation(), outcome);
            }
        }
        self.latest.as_ref()
    }

    /// Install `outcome` if it belongs to the latest generation.
    pub fn accept(&mut self, generation: Generation, outcome: SearchOutcome) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                latest = self.generation,
                "Dropping stale search result"
            );
            return false;
        }

        if self
            .in_flight
            .as_ref()
            .is_some_and(|h| h.generation() == generation)
        {
            self.in_flight = None;
        }
        self.latest = Some(outcome);
        true
    }

    /// Books from the latest delivered search
    pub fn books(&self) -> &[BookRecord] {
        self.latest
            .as_ref()
            .map(|o| o.books.as_slice())
            .unwrap_or(&[])
    }

    /// Latest delivered outcome; `None` until the first search lands
    pub fn latest(&self) -> Option<&SearchOutcome> {
        self.latest.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::make_book;
    use crate::sources::{MockSource, SearchError};
    use std::time::Duration;

    fn mock(delay_ms: u64) -> Arc<MockSource> {
        Arc::new(MockSource::new().with_delay(Duration::from_millis(delay_ms)))
    }

    #[tokio::test]
    async fn test_handle_delivers_exactly_once() {
        let source = mock(0);
        source.set_books(vec![make_book("Go", &["R. Pike"]).unwrap()]);

        let mut handle = spawn_search(source, SearchQuery::new("go"));
        let outcome = handle.wait().await.unwrap();
        assert_eq!(outcome.books.len(), 1);
        assert_eq!(outcome.term, "go");

        assert_eq!(handle.try_take(), Delivery::Closed);
        assert!(handle.wait().await.is_none());
    }

    #[tokio::test]
    async fn test_pending_until_finished() {
        let source = mock(100);
        let mut handle = spawn_search(source, SearchQuery::new("slow"));
        assert_eq!(handle.try_take(), Delivery::Pending);
        assert!(!handle.is_finished());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(handle.is_finished());
        match handle.try_take() {
            Delivery::Delivered(outcome) => assert!(outcome.is_empty()),
            other => panic!("expected delivery, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_search_is_delivered_not_lost() {
        let source = mock(0);
        source.set_error(SearchError::Status(503));

        let mut handle = spawn_search(source, SearchQuery::new("go"));
        let outcome = handle.wait().await.unwrap();
        assert!(outcome.is_failed());
        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn test_aborted_handle_is_closed() {
        let source = mock(500);
        let mut handle = spawn_search(source, SearchQuery::new("never"));
        handle.abort();
        assert!(handle.wait().await.is_none());
    }

    #[tokio::test]
    async fn test_session_blank_term_starts_nothing() {
        let source = mock(0);
        let mut session = SearchSession::new(source.clone());

        assert_eq!(session.submit("  "), None);
        assert!(!session.is_loading());
        assert!(session.latest().is_none());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_session_latest_submit_wins() {
        let source = mock(100);
        source.set_books(vec![make_book("Dune", &["Frank Herbert"]).unwrap()]);
        let mut session = SearchSession::new(source);

        assert_eq!(session.submit("first"), Some(1));
        assert_eq!(session.submit("second"), Some(2));
        assert!(session.is_loading());

        let outcome = session.settle().await.unwrap();
        assert_eq!(outcome.term, "second");
        assert_eq!(session.books().len(), 1);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_session_rejects_stale_generation() {
        let source = mock(0);
        let mut session = SearchSession::new(source);
        session.submit("first");
        session.submit("second");

        let stale = SearchOutcome::complete(vec![make_book("Old", &[]).unwrap()], "first");
        assert!(!session.accept(1, stale));
        assert!(session.latest().is_none());

        session.settle().await;
        assert_eq!(session.latest().unwrap().term, "second");
    }

    #[tokio::test]
    async fn test_session_poll_installs_result() {
        let source = mock(20);
        source.set_books(vec![make_book("Go", &[]).unwrap()]);
        let mut session = SearchSession::new(source);
        session.submit("go");

        let mut installed = false;
        for _ in 0..100 {
            if session.poll() {
                installed = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert!(installed);
        assert_eq!(session.books()[0].title(), "Go");
        assert!(!session.poll());
    }

    #[tokio::test]
    async fn test_session_empty_delivery_differs_from_not_delivered() {
        let source = mock(0);
        let mut session = SearchSession::new(source);
        assert!(session.latest().is_none());

        session.submit("nothing");
        let outcome = session.settle().await.unwrap();
        assert!(outcome.is_empty());
        assert!(session.books().is_empty());
        assert!(session.latest().is_some());
    }
}
