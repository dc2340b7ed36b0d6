//! Scraper builder and entry point

use crate::client::{normalize_url, FetchOptions};
use crate::error::ScrapeError;
use crate::extract::extract;
use crate::report::{render_text, DEFAULT_PREVIEW_CHARS};
use crate::sources::{HttpSource, PageSource};
use crate::types::ScrapeReport;
use schemars::schema_for;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Builder for configuring a [`Scraper`]
#[derive(Clone, Default)]
pub struct ScraperBuilder {
    options: FetchOptions,
    preview_chars: Option<usize>,
    source: Option<Arc<dyn PageSource>>,
}

impl ScraperBuilder {
    /// Create a new builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = Some(ua.into());
        self
    }

    /// Truncate bodies longer than `bytes` before extraction
    pub fn max_body_bytes(mut self, bytes: usize) -> Self {
        self.options.max_body_bytes = bytes;
        self
    }

    /// Set connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.options.connect_timeout = timeout;
        self
    }

    /// Set time allowed until response headers arrive
    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.options.response_timeout = timeout;
        self
    }

    /// Set time allowed for reading the body
    pub fn body_timeout(mut self, timeout: Duration) -> Self {
        self.options.body_timeout = timeout;
        self
    }

    /// Number of document characters shown in the text report preview
    pub fn preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = Some(chars);
        self
    }

    /// Replace the HTTP transport with another page source
    pub fn source(mut self, source: impl PageSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Build the scraper
    pub fn build(self) -> Scraper {
        Scraper {
            options: self.options,
            preview_chars: self.preview_chars.unwrap_or(DEFAULT_PREVIEW_CHARS),
            source: self.source.unwrap_or_else(|| Arc::new(HttpSource::new())),
        }
    }
}

impl fmt::Debug for ScraperBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScraperBuilder")
            .field("options", &self.options)
            .field("preview_chars", &self.preview_chars)
            .field("source", &self.source.as_ref().map(|s| s.name()))
            .finish()
    }
}

/// Configured scraper: fetch one page, extract its records
#[derive(Clone)]
pub struct Scraper {
    options: FetchOptions,
    preview_chars: usize,
    source: Arc<dyn PageSource>,
}

impl Default for Scraper {
    fn default() -> Self {
        ScraperBuilder::new().build()
    }
}

impl fmt::Debug for Scraper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scraper")
            .field("options", &self.options)
            .field("preview_chars", &self.preview_chars)
            .field("source", &self.source.name())
            .finish()
    }
}

impl Scraper {
    /// Create a new scraper builder
    pub fn builder() -> ScraperBuilder {
        ScraperBuilder::new()
    }

    /// Transport options in effect
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Preview length used by [`Scraper::render_text`]
    pub fn preview_chars(&self) -> usize {
        self.preview_chars
    }

    /// Get output schema as JSON
    pub fn output_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ScrapeReport);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Fetch `url` and extract every record kind from the body
    ///
    /// Input without a scheme is treated as https. HTTP error statuses are
    /// not errors: the body is still extracted and the status reported.
    pub async fn scrape(&self, url: &str) -> Result<ScrapeReport, ScrapeError> {
        let url = normalize_url(url)?;
        debug!(source = self.source.name(), url = %url, "Using page source");

        let page = self.source.fetch(url.as_str(), &self.options).await?;

        if !(200..300).contains(&page.status_code) {
            warn!(url = %page.url, status = page.status_code, "Non-success status, extracting body anyway");
        }
        if page.truncated {
            warn!(url = %page.url, size = page.size, "Document truncated before extraction");
        }

        let extraction = extract(&page.body);

        Ok(ScrapeReport {
            url: page.url,
            status_code: page.status_code,
            content_type: page.content_type,
            size: page.size,
            truncated: if page.truncated { Some(true) } else { None },
            extraction,
        })
    }

    /// Render a report as text using the configured preview length
    pub fn render_text(&self, report: &ScrapeReport) -> String {
        render_text(&report.extraction, self.preview_chars)
    }
}
