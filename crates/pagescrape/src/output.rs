//! Report file naming and writing

use crate::client::normalize_url;
use crate::error::ScrapeError;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Slug used when the URL cannot be parsed
pub const UNKNOWN_URL_SLUG: &str = "unknown-url";

/// File-name-safe form of a URL: host plus path
///
/// The path is dropped when it is just `/`. Every character other than
/// ASCII letters, digits, `.` and `-` becomes `-`.
pub fn url_slug(url: &str) -> String {
    let Ok(parsed) = normalize_url(url) else {
        return UNKNOWN_URL_SLUG.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return UNKNOWN_URL_SLUG.to_string();
    };

    let mut part = host.to_string();
    if parsed.path() != "/" {
        part.push_str(parsed.path());
    }
    sanitize_filename(&part)
}

/// Replace every character outside `[A-Za-z0-9.-]` with `-`
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// UTC timestamp to the second, with `-` separators only
pub fn timestamp_slug(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d-%H-%M-%S").to_string()
}

/// `<url slug>-<timestamp>.<extension>`
pub fn report_file_name(url: &str, at: DateTime<Utc>, extension: &str) -> String {
    format!("{}-{}.{}", url_slug(url), timestamp_slug(at), extension)
}

/// Write a report into `dir`, creating it if needed, and return the file path
pub fn write_report(
    dir: impl AsRef<Path>,
    file_name: &str,
    contents: &str,
) -> Result<PathBuf, ScrapeError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, contents)?;
    debug!(path = %path.display(), bytes = contents.len(), "Report written");
    Ok(path)
}
