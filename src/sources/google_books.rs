//! Google Books volumes search.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use url::Url;

use crate::config::ClientConfig;
use crate::models::{SearchOutcome, SearchQuery};
use crate::sources::{compact_body, extract_books, BookSource, SearchError};
use crate::utils::HttpClient;

/// Google Books source
///
/// Issues one unauthenticated GET per search against the volumes endpoint and
/// extracts title, authors, publication date and page count from each volume.
#[derive(Debug, Clone)]
pub struct GoogleBooksSource {
    client: Arc<HttpClient>,
    config: ClientConfig,
}

impl GoogleBooksSource {
    /// Create a source with the default endpoint and timeouts
    pub fn new() -> Result<Self, SearchError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a source from a configuration
    pub fn with_config(config: ClientConfig) -> Result<Self, SearchError> {
        let client = HttpClient::with_config(&config)?;
        Ok(Self::with_client(client, config))
    }

    /// Create a source sharing an existing HTTP client
    pub fn with_client(client: HttpClient, config: ClientConfig) -> Self {
        Self {
            client: Arc::new(client),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the request URL: `<endpoint>?q=<term>&maxResults=<n>`
    pub fn build_url(&self, query: &SearchQuery) -> Result<Url, SearchError> {
        let mut url = Url::parse(&self.config.endpoint)?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(SearchError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                self.config.endpoint
            )));
        }

        url.query_pairs_mut()
            .append_pair("q", &query.term)
            .append_pair("maxResults", &query.effective_max_results().to_string());

        Ok(url)
    }

    /// GET `url` and return the compacted body of a 200 response
    async fn fetch_body(&self, url: Url) -> Result<String, SearchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout(e.to_string())
            } else {
                SearchError::Io(format!("Failed to read response body: {}", e))
            }
        })?;

        Ok(compact_body(&body))
    }
}

#[async_trait]
impl BookSource for GoogleBooksSource {
    fn id(&self) -> &str {
        "google_books"
    }

    fn name(&self) -> &str {
        "Google Books"
    }

    fn query_for(&self, term: &str) -> SearchQuery {
        SearchQuery::new(term).max_results(self.config.max_results)
    }

    async fn try_search(&self, query: &SearchQuery) -> Result<SearchOutcome, SearchError> {
        if query.is_blank() {
            tracing::debug!("Blank search term, skipping request");
            return Ok(SearchOutcome::complete(Vec::new(), query.term.clone()));
        }

        let url = self.build_url(query)?;
        tracing::debug!(%url, "Searching Google Books");

        let body = self.fetch_body(url).await?;
        let extraction = extract_books(&body, self.config.fault_policy)?;

        for fault in &extraction.faults {
            tracing::warn!(term = %query.term, %fault, "Malformed volume in search response");
        }
        tracing::debug!(
            books = extraction.books.len(),
            skipped = extraction.skipped,
            "Google Books search finished"
        );

        Ok(SearchOutcome::complete(extraction.books, query.term.clone())
            .skipped(extraction.skipped)
            .with_faults(extraction.faults))
    }
}
