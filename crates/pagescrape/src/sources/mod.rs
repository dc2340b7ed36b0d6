//! Page sources: where raw markup comes from
//!
//! Design: the extraction engine only ever sees a complete document string.
//! A [`PageSource`] is responsible for producing it, including any time or
//! size bounding. [`HttpSource`] is the default; tests and embedders can
//! supply their own.

mod http;

pub use http::HttpSource;

use crate::client::FetchOptions;
use crate::error::ScrapeError;
use async_trait::async_trait;

/// A fully buffered page body plus response metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// The requested URL
    pub url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value
    pub content_type: Option<String>,
    /// Body size in bytes
    pub size: u64,
    /// Body decoded as UTF-8 (lossy)
    pub body: String,
    /// True if the body was cut short by the size or time limit
    pub truncated: bool,
}

/// Trait for anything that can deliver a page body for a URL
///
/// Implementations receive an already normalized `http(s)://` URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// Fetch the page at `url`
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<FetchedPage, ScrapeError>;
}

/// Source that serves one fixed document for every URL
///
/// Useful for running the scraper over markup that is already in hand.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    body: String,
}

impl StaticSource {
    /// Create a source serving `body`
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl PageSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch(&self, url: &str, _options: &FetchOptions) -> Result<FetchedPage, ScrapeError> {
        Ok(FetchedPage {
            url: url.to_string(),
            status_code: 200,
            content_type: Some("text/html".to_string()),
            size: self.body.len() as u64,
            body: self.body.clone(),
            truncated: false,
        })
    }
}
