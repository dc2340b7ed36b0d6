//! Error types for PageScrape
//!
//! The extraction engine itself never fails; these errors come from the
//! collaborators around it (URL handling, transport, report output).

use thiserror::Error;

/// Errors that can occur while fetching a page or writing its report
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Server did not answer in time
    #[error("Request timed out: server did not respond in time")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Report could not be written
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScrapeError::Timeout
        } else if err.is_connect() {
            ScrapeError::ConnectError(err)
        } else {
            ScrapeError::RequestError(err.to_string())
        }
    }
}
