//! Defensive extraction of books from a volumes search response.
//!
//! The upstream payload is walked as an untyped [`serde_json::Value`] rather
//! than deserialized into structs, because a single odd entry must not cost
//! the whole page. Only the fields below are read; everything else is ignored.
//!
//! ```json
//! { "items": [ { "volumeInfo": {
//!     "title": "...", "authors": ["..."], "publishedDate": "YYYY-MM-DD", "pageCount": 0
//! } } ] }
//! ```

use serde_json::{Map, Value};

use crate::models::{BookRecord, FaultPolicy, ItemFault};
use crate::sources::SearchError;

/// Books pulled out of one response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Records in the order of the `items` array
    pub books: Vec<BookRecord>,

    /// Entries dropped for lacking a usable title
    pub skipped: usize,

    /// Entries that were structurally broken
    pub faults: Vec<ItemFault>,
}

/// Join the lines of a body without separators.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub fn compact_body(body: &str) -> String {
    body.split(['\n', '\r']).collect()
}

/// Extract books from a response body.
///
/// Fails only when the body is not a JSON object. A missing or empty `items`
/// array is an ordinary empty result.
pub fn extract_books(body: &str, policy: FaultPolicy) -> Result<Extraction, SearchError> {
    let mut extraction = Extraction::default();

    if body.trim().is_empty() {
        return Ok(extraction);
    }

    let root: Value = serde_json::from_str(body)?;
    let root = root
        .as_object()
        .ok_or_else(|| SearchError::Parse("response is not a JSON object".to_string()))?;

    let Some(items) = root.get("items").and_then(Value::as_array) else {
        return Ok(extraction);
    };

    for (index, item) in items.iter().enumerate() {
        match extract_item(item) {
            Ok(Some(book)) => extraction.books.push(book),
            Ok(None) => {
                tracing::debug!(index, "Skipping volume without a title");
                extraction.skipped += 1;
            }
            Err(reason) => {
                extraction.faults.push(ItemFault::new(index, reason));
                if policy == FaultPolicy::StopExtraction {
                    break;
                }
            }
        }
    }

    Ok(extraction)
}

/// `Ok(None)` means the entry has no title and is dropped quietly.
fn extract_item(item: &Value) -> Result<Option<BookRecord>, String> {
    let volume = volume_info(item)?;

    let Some(builder) = volume
        .get("title")
        .and_then(Value::as_str)
        .and_then(BookRecord::builder)
    else {
        return Ok(None);
    };

    let authors = match volume.get("authors") {
        Some(Value::Array(entries)) => author_names(entries)?,
        _ => Vec::new(),
    };

    Ok(Some(
        builder
            .author_names(authors)
            .published_date(text_field(volume.get("publishedDate")))
            .page_count(page_count(volume.get("pageCount")))
            .build(),
    ))
}

fn volume_info(item: &Value) -> Result<&Map<String, Value>, String> {
    let entry = item
        .as_object()
        .ok_or_else(|| "entry is not an object".to_string())?;

    match entry.get("volumeInfo") {
        Some(Value::Object(volume)) => Ok(volume),
        Some(_) => Err("volumeInfo is not an object".to_string()),
        None => Err("missing volumeInfo".to_string()),
    }
}

fn author_names(entries: &[Value]) -> Result<Vec<String>, String> {
    let mut names = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match entry {
            Value::String(name) => names.push(name.clone()),
            Value::Number(n) => names.push(n.to_string()),
            Value::Bool(b) => names.push(b.to_string()),
            Value::Null => {}
            Value::Array(_) | Value::Object(_) => {
                return Err(format!("author {} is not text", i));
            }
        }
    }
    Ok(names)
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn page_count(value: Option<&Value>) -> u32 {
    let pages = match value {
        Some(Value::Number(n)) => n.as_u64().map(|v| v as f64).or_else(|| n.as_f64()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match pages {
        Some(p) if p.is_finite() && p >= 0.0 => p.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}
