//! HTTP page source
//!
//! Issues a GET request and buffers the body into a string, bounded by the
//! body timeout and the maximum body size from [`FetchOptions`].

use crate::client::FetchOptions;
use crate::error::ScrapeError;
use crate::sources::{FetchedPage, PageSource};
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use tracing::{error, warn};

const ACCEPT_HTML: &str = "text/html, application/xhtml+xml, */*;q=0.8";

/// Default HTTP(S) source built on reqwest
#[derive(Debug, Clone, Copy)]
pub struct HttpSource;

impl HttpSource {
    /// Create a new HTTP source
    pub fn new() -> Self {
        Self
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<FetchedPage, ScrapeError> {
        let mut headers = HeaderMap::new();
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(options.connect_timeout)
            .build()
            .map_err(ScrapeError::ClientBuildError)?;

        let response = tokio::time::timeout(options.response_timeout, client.get(url).send())
            .await
            .map_err(|_| ScrapeError::Timeout)?
            .map_err(ScrapeError::from_reqwest)?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let (body, truncated) =
            read_body_with_limits(response, options.body_timeout, options.max_body_bytes).await?;
        let size = body.len() as u64;

        Ok(FetchedPage {
            url: url.to_string(),
            status_code,
            content_type,
            size,
            body: String::from_utf8_lossy(&body).into_owned(),
            truncated,
        })
    }
}

/// Read response body until done, the deadline passes, or `max_bytes` is reached
///
/// Returns the bytes read and whether the body was cut short. A stream error
/// before any bytes arrived fails the fetch; after that the partial body is
/// kept and marked truncated.
async fn read_body_with_limits(
    response: reqwest::Response,
    timeout: Duration,
    max_bytes: usize,
) -> Result<(Bytes, bool), ScrapeError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let chunk_future = stream.next();
        let timeout_future = tokio::time::sleep_until(deadline);

        tokio::select! {
            chunk = chunk_future => {
                match chunk {
                    Some(Ok(bytes)) => {
                        let room = max_bytes.saturating_sub(body.len());
                        if bytes.len() > room {
                            body.extend_from_slice(&bytes[..room]);
                            warn!(max_bytes, "Body size limit reached, truncating document");
                            return Ok((Bytes::from(body), true));
                        }
                        body.extend_from_slice(&bytes);
                    }
                    Some(Err(e)) if body.is_empty() => {
                        error!("Error reading body: {}", e);
                        return Err(ScrapeError::RequestError(e.to_string()));
                    }
                    Some(Err(e)) => {
                        error!(
                            bytes = body.len(),
                            "Error reading body chunk, keeping partial content: {}", e
                        );
                        return Ok((Bytes::from(body), true));
                    }
                    None => {
                        return Ok((Bytes::from(body), false));
                    }
                }
            }
            _ = timeout_future => {
                warn!("Body timeout reached, returning partial content");
                return Ok((Bytes::from(body), true));
            }
        }
    }
}
