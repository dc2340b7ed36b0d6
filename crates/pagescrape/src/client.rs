//! URL handling and fetch options for PageScrape
//!
//! This module provides the top-level entry points for scraping a URL.
//! Transport is implemented by sources in the [`sources`](crate::sources) module.

use crate::error::ScrapeError;
use crate::scraper::Scraper;
use crate::sources::{FetchedPage, HttpSource, PageSource};
use crate::types::ScrapeReport;
use std::time::Duration;
use url::Url;

/// Default maximum body size (10 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default wait for response headers
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(15);

/// Default total body read time
pub const DEFAULT_BODY_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport options, configured through [`ScraperBuilder`](crate::ScraperBuilder)
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Bodies longer than this are truncated before extraction
    pub max_body_bytes: usize,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
    /// Time allowed until response headers arrive
    pub response_timeout: Duration,
    /// Time allowed for reading the body
    pub body_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            body_timeout: DEFAULT_BODY_TIMEOUT,
        }
    }
}

/// Normalize user input into an absolute http(s) URL
///
/// Input without a scheme gets `https://` prepended, so `example.com/page`
/// becomes `https://example.com/page`. Explicit schemes other than http and
/// https are rejected.
pub fn normalize_url(input: &str) -> Result<Url, ScrapeError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScrapeError::MissingUrl);
    }

    let candidate = if has_http_scheme(input) {
        input.to_string()
    } else if explicit_scheme(input).is_some() {
        return Err(ScrapeError::InvalidUrlScheme);
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&candidate).map_err(|e| ScrapeError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ScrapeError::InvalidUrlScheme),
    }
}

/// `http://` or `https://`, compared case-insensitively
fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        input
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Scheme of an input that starts with `<scheme>://`
///
/// A `://` later in the input (say, inside a query string) is not a scheme.
fn explicit_scheme(input: &str) -> Option<&str> {
    let (scheme, _) = input.split_once("://")?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

/// Fetch a page over HTTP with default options
pub async fn fetch_page(url: &str) -> Result<FetchedPage, ScrapeError> {
    fetch_page_with_options(url, &FetchOptions::default()).await
}

/// Fetch a page over HTTP with custom options
pub async fn fetch_page_with_options(
    url: &str,
    options: &FetchOptions,
) -> Result<FetchedPage, ScrapeError> {
    let url = normalize_url(url)?;
    HttpSource::new().fetch(url.as_str(), options).await
}

/// Fetch a URL and extract its records with the default scraper
///
/// For custom options, use [`Scraper::builder`].
pub async fn scrape(url: &str) -> Result<ScrapeReport, ScrapeError> {
    Scraper::default().scrape(url).await
}
