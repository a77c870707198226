//! Basic usage example for the Book Listing library.
//!
//! Searches Google Books for the term given on the command line (or a default)
//! and prints the results the way a list view would show them.

use book_listing::config::{load_config, ClientConfig};
use book_listing::models::OutcomeStatus;
use book_listing::utils::logging;
use book_listing::{BookSource, GoogleBooksSource, SearchSession};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(2) {
        Some(path) => load_config(Path::new(&path))?,
        None => ClientConfig::default(),
    };
    logging::init(&config.logging);

    let term = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rust programming".to_string());

    let source = GoogleBooksSource::with_config(config)?;
    println!("Using {} at {}", source.name(), source.config().endpoint);
    let mut session = SearchSession::new(Arc::new(source));

    if session.submit(&term).is_none() {
        println!("Enter a title to search for.");
        return Ok(());
    }
    println!("Searching for \"{}\"...", term);

    let Some(outcome) = session.settle().await else {
        println!("Search was abandoned before it finished.");
        return Ok(());
    };

    match &outcome.status {
        OutcomeStatus::Failed(e) => println!("No books found ({}).", e),
        OutcomeStatus::Partial { faults } => {
            println!("Some results could not be read ({} entries).", faults.len())
        }
        OutcomeStatus::Complete => {}
    }

    if outcome.is_empty() && !outcome.is_failed() {
        println!("No books found.");
    }

    for (i, book) in outcome.books.iter().enumerate() {
        println!("\n{}. {}", i + 1, book.title());
        if !book.authors().is_empty() {
            println!("   Authors: {}", book.authors());
        }
        if !book.published_date().is_empty() {
            println!("   Published: {}", book.published_date());
        }
        println!("   Pages: {}", book.page_count());
    }

    Ok(())
}
