use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::constants::FETCH_TIMEOUT_SECS;
use crate::error::{Error, Result};
use crate::utils::{get_bulk_source, get_quote_url_template};

/// HTTP client for the two CSV sources.
///
/// Sources without an http(s) scheme are read as local file paths, which is
/// how the bulk dataset usually ships alongside the widget.
pub struct QuoteClient {
    http: Client,
    bulk_source: String,
    quote_url_template: String,
}

impl QuoteClient {
    /// Create a client configured from the environment
    pub fn new() -> Result<Self> {
        Self::with_sources(get_bulk_source(), get_quote_url_template())
    }

    /// Create a client with explicit source locations
    pub fn with_sources(bulk_source: String, quote_url_template: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            bulk_source,
            quote_url_template,
        })
    }

    /// Fetch the bulk historical CSV document
    pub async fn fetch_bulk_csv(&self) -> Result<String> {
        self.fetch_source(&self.bulk_source).await
    }

    /// Fetch the quote CSV document for one symbol
    pub async fn fetch_symbol_csv(&self, symbol: &str) -> Result<String> {
        let location = self.quote_url_template.replace("{symbol}", symbol);
        self.fetch_source(&location).await
    }

    async fn fetch_source(&self, location: &str) -> Result<String> {
        if location.starts_with("http://") || location.starts_with("https://") {
            self.fetch_text(location).await
        } else {
            debug!(path = location, "Reading CSV source from local path");
            tokio::fs::read_to_string(location)
                .await
                .map_err(|e| Error::Io(format!("Failed to read {}: {}", location, e)))
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!("GET {} returned HTTP {}", url, status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read body from {}: {}", url, e)))?;

        if body.trim().is_empty() {
            return Err(Error::Network(format!("GET {} returned an empty body", url)));
        }

        Ok(body)
    }
}
