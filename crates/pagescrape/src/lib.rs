//! PageScrape - single-page web scraper
//!
//! This crate fetches one web page and extracts structured records from its
//! raw markup: headings, paragraphs, links, images, script sources, meta
//! tags, and the deduplicated set of URLs they reference. The records can
//! be rendered as a plain-text report or serialized as JSON.
//!
//! ## Extraction
//!
//! [`extract`] is pattern-based, not a DOM parser. Each record kind has its
//! own forward-only scanner over the flat text, so work stays linear in the
//! document length even on adversarial input. Tags are matched
//! case-insensitively, attributes may appear in any order with either quote
//! style, and free text is whitespace-normalized.
//!
//! Known limitations: nested tags of the same kind, `<script>`/`<style>`
//! bodies and comments are not excluded, and captured text keeps any markup
//! nested inside it.
//!
//! ## Fetching
//!
//! [`Scraper`] wires a [`PageSource`] (HTTP by default, see [`HttpSource`])
//! to the extraction engine:
//!
//! ```no_run
//! # async fn run() -> Result<(), pagescrape::ScrapeError> {
//! let scraper = pagescrape::Scraper::builder().preview_chars(200).build();
//! let report = scraper.scrape("example.com").await?;
//! println!("{}", scraper.render_text(&report));
//! # Ok(())
//! # }
//! ```

pub mod client;
mod error;
mod extract;
mod normalize;
pub mod output;
mod report;
mod scan;
mod scraper;
pub mod sources;
mod types;
mod urls;

pub use client::{
    fetch_page, fetch_page_with_options, normalize_url, scrape, FetchOptions,
};
pub use error::ScrapeError;
pub use extract::{
    extract, extract_headings, extract_images, extract_links, extract_meta_tags,
    extract_paragraphs, extract_scripts,
};
pub use normalize::normalize_text;
pub use report::{format_record, render_text, DEFAULT_PREVIEW_CHARS};
pub use scraper::{Scraper, ScraperBuilder};
pub use sources::{FetchedPage, HttpSource, PageSource, StaticSource};
pub use types::{
    ExtractedRecord, ExtractionResult, Heading, Image, Link, MetaTag, Paragraph, RecordKind,
    ScrapeReport, Script, MISSING_ALT,
};
pub use urls::{UrlCollector, UrlSet};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Everruns PageScrape/1.0";
