//! Search request and outcome models.

use serde::{Deserialize, Serialize};

use crate::models::BookRecord;
use crate::sources::SearchError;

/// Number of results requested when the caller does not say otherwise
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Largest page size the volumes endpoint accepts
pub const MAX_RESULTS_LIMIT: usize = 40;

/// Search query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free text search term
    pub term: String,

    /// Maximum number of results to request
    pub max_results: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            term: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchQuery {
    /// Create a new search query
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Default::default()
        }
    }

    /// Set maximum results
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Result count actually sent upstream, clamped to `1..=40`
    pub fn effective_max_results(&self) -> usize {
        self.max_results.clamp(1, MAX_RESULTS_LIMIT)
    }

    /// Whether the term has nothing worth sending
    pub fn is_blank(&self) -> bool {
        self.term.trim().is_empty()
    }
}

/// What to do when one entry of the `items` array is structurally broken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Record the fault, drop that entry and keep going
    #[default]
    SkipItem,
    /// Stop at the first fault and keep what was extracted before it
    StopExtraction,
}

/// A structural problem found in one entry of the `items` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFault {
    /// Position of the entry in the upstream array
    pub index: usize,

    /// What was wrong with it
    pub reason: String,
}

impl ItemFault {
    pub fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ItemFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item {}: {}", self.index, self.reason)
    }
}

/// How a search finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Every entry was either extracted or skipped for lacking a title
    Complete,

    /// Some entries were structurally broken; the records that did extract are kept
    Partial { faults: Vec<ItemFault> },

    /// Nothing usable came back
    Failed(SearchError),
}

/// Records from one search together with how the search went.
///
/// `books` is meaningful in every status: a partial outcome still carries the
/// records extracted around (or before) the faulty entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Books in upstream order
    pub books: Vec<BookRecord>,

    /// Term that was searched
    pub term: String,

    /// Entries dropped because they had no usable title
    pub skipped: usize,

    /// Completion status
    pub status: OutcomeStatus,
}

impl SearchOutcome {
    /// A finished search with no faults
    pub fn complete(books: Vec<BookRecord>, term: impl Into<String>) -> Self {
        Self {
            books,
            term: term.into(),
            skipped: 0,
            status: OutcomeStatus::Complete,
        }
    }

    /// A search that produced nothing because of `error`
    pub fn failed(error: SearchError, term: impl Into<String>) -> Self {
        Self {
            books: Vec::new(),
            term: term.into(),
            skipped: 0,
            status: OutcomeStatus::Failed(error),
        }
    }

    /// Set the number of entries skipped for a missing title
    pub fn skipped(mut self, skipped: usize) -> Self {
        self.skipped = skipped;
        self
    }

    /// Attach per-item faults; an empty list leaves the status untouched
    pub fn with_faults(mut self, faults: Vec<ItemFault>) -> Self {
        if !faults.is_empty() {
            self.status = OutcomeStatus::Partial { faults };
        }
        self
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, OutcomeStatus::Complete)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed(_))
    }

    /// The error behind a failed outcome
    pub fn error(&self) -> Option<&SearchError> {
        match &self.status {
            OutcomeStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Faults behind a partial outcome
    pub fn faults(&self) -> &[ItemFault] {
        match &self.status {
            OutcomeStatus::Partial { faults } => faults,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Drop the status and keep the records
    pub fn into_books(self) -> Vec<BookRecord> {
        self.books
    }
}
