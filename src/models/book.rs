//! Book model representing a single volume returned by a search.

use serde::{Deserialize, Serialize};

/// Separator placed between author names when they are flattened into one string.
pub const AUTHOR_SEPARATOR: &str = ", ";

/// A book from a volume search.
///
/// Every record carries a non-empty title. The remaining fields degrade to
/// empty strings or zero when the upstream entry leaves them out, so a record
/// can always be rendered without further checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookRecord {
    title: String,
    authors: String,
    published_date: String,
    page_count: u32,
}

impl BookRecord {
    /// Start building a record. Returns `None` when the title is empty or blank.
    pub fn builder(title: impl Into<String>) -> Option<BookBuilder> {
        let title = title.into();
        if title.trim().is_empty() {
            return None;
        }
        Some(BookBuilder {
            book: BookRecord {
                title,
                authors: String::new(),
                published_date: String::new(),
                page_count: 0,
            },
        })
    }

    /// Book title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Authors joined with `", "`, or empty
    pub fn authors(&self) -> &str {
        &self.authors
    }

    /// Publication date as sent upstream (usually `YYYY-MM-DD`), or empty
    pub fn published_date(&self) -> &str {
        &self.published_date
    }

    /// Number of pages, zero when unknown
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Returns the author names as a vector
    pub fn author_list(&self) -> Vec<&str> {
        self.authors
            .split(AUTHOR_SEPARATOR)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Leading year of the publication date, if it has one
    pub fn published_year(&self) -> Option<u16> {
        self.published_date.get(..4)?.parse().ok()
    }
}

impl std::fmt::Display for BookRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)?;
        if !self.authors.is_empty() {
            write!(f, " by {}", self.authors)?;
        }
        Ok(())
    }
}

/// Builder for [`BookRecord`]; only reachable once a title is known.
#[derive(Debug, Clone)]
pub struct BookBuilder {
    book: BookRecord,
}

impl BookBuilder {
    /// Set authors from an already joined string
    pub fn authors(mut self, authors: impl Into<String>) -> Self {
        self.book.authors = authors.into();
        self
    }

    /// Set authors by joining names in order
    pub fn author_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for (i, name) in names.into_iter().enumerate() {
            if i > 0 {
                joined.push_str(AUTHOR_SEPARATOR);
            }
            joined.push_str(name.as_ref());
        }
        self.book.authors = joined;
        self
    }

    /// Set publication date
    pub fn published_date(mut self, date: impl Into<String>) -> Self {
        self.book.published_date = date.into();
        self
    }

    /// Set page count
    pub fn page_count(mut self, pages: u32) -> Self {
        self.book.page_count = pages;
        self
    }

    /// Build the record
    pub fn build(self) -> BookRecord {
        self.book
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_builder() {
        let book = BookRecord::builder("Go")
            .unwrap()
            .authors("R. Pike")
            .published_date("2009-11-10")
            .page_count(380)
            .build();

        assert_eq!(book.title(), "Go");
        assert_eq!(book.authors(), "R. Pike");
        assert_eq!(book.published_date(), "2009-11-10");
        assert_eq!(book.page_count(), 380);
    }

    #[test]
    fn test_defaults_when_only_title_is_known() {
        let book = BookRecord::builder("Untitled Draft").unwrap().build();
        assert_eq!(book.authors(), "");
        assert_eq!(book.published_date(), "");
        assert_eq!(book.page_count(), 0);
    }

    #[test]
    fn test_blank_title_is_rejected() {
        assert!(BookRecord::builder("").is_none());
        assert!(BookRecord::builder("   ").is_none());
    }

    #[test]
    fn test_author_names_joined_in_order() {
        let book = BookRecord::builder("Anthology")
            .unwrap()
            .author_names(["A", "B", "C"])
            .build();
        assert_eq!(book.authors(), "A, B, C");
        assert_eq!(book.author_list(), vec!["A", "B", "C"]);

        let none = BookRecord::builder("Anonymous")
            .unwrap()
            .author_names(Vec::<String>::new())
            .build();
        assert_eq!(none.authors(), "");
        assert!(none.author_list().is_empty());
    }

    #[test]
    fn test_published_year() {
        let dated = BookRecord::builder("Dated")
            .unwrap()
            .published_date("1999-04")
            .build();
        assert_eq!(dated.published_year(), Some(1999));

        let undated = BookRecord::builder("Undated").unwrap().build();
        assert_eq!(undated.published_year(), None);
    }

    #[test]
    fn test_display() {
        let book = BookRecord::builder("Go")
            .unwrap()
            .authors("R. Pike")
            .build();
        assert_eq!(book.to_string(), "Go by R. Pike");
        assert_eq!(BookRecord::builder("Solo").unwrap().build().to_string(), "Solo");
    }
}
