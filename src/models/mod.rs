//! Core data models for books and search operations.

mod book;
mod search;

pub use book::{BookBuilder, BookRecord, AUTHOR_SEPARATOR};
pub use search::{
    FaultPolicy, ItemFault, OutcomeStatus, SearchOutcome, SearchQuery, DEFAULT_MAX_RESULTS,
    MAX_RESULTS_LIMIT,
};
