//! Core types for PageScrape

use crate::urls::UrlSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal stored as an image's alt text when the tag has none
pub const MISSING_ALT: &str = "none";

/// The six categories of extractable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Heading,
    Paragraph,
    Link,
    Image,
    Script,
    MetaTag,
}

impl RecordKind {
    /// All kinds, in extraction order
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Heading,
        RecordKind::Paragraph,
        RecordKind::Link,
        RecordKind::Image,
        RecordKind::Script,
        RecordKind::MetaTag,
    ];

    /// Section title used in the text report
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Heading => "HEADINGS",
            RecordKind::Paragraph => "PARAGRAPHS",
            RecordKind::Link => "LINKS",
            RecordKind::Image => "IMAGES",
            RecordKind::Script => "SCRIPTS",
            RecordKind::MetaTag => "META TAGS",
        }
    }

    /// Prefix of the `[prefix-index]` marker in the text report
    ///
    /// Headings are listed without a marker.
    pub fn index_prefix(self) -> Option<&'static str> {
        match self {
            RecordKind::Heading => None,
            RecordKind::Paragraph => Some("p"),
            RecordKind::Link => Some("link"),
            RecordKind::Image => Some("img"),
            RecordKind::Script => Some("script"),
            RecordKind::MetaTag => Some("meta"),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Heading => "heading",
            RecordKind::Paragraph => "paragraph",
            RecordKind::Link => "link",
            RecordKind::Image => "image",
            RecordKind::Script => "script",
            RecordKind::MetaTag => "meta_tag",
        };
        f.write_str(name)
    }
}

/// Heading of any level 1-6
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Heading {
    pub index: usize,
    /// Normalized inner content
    pub text: String,
}

/// Paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Paragraph {
    pub index: usize,
    /// Normalized inner content
    pub text: String,
}

/// Anchor with an href
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Link {
    pub index: usize,
    /// href value as captured
    pub href: String,
    /// Normalized inner content
    pub text: String,
}

/// Image with a src
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Image {
    pub index: usize,
    pub src: String,
    /// alt value as captured, or [`MISSING_ALT`]
    pub alt: String,
}

/// External script reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Script {
    pub index: usize,
    pub src: String,
}

/// Meta tag carrying both `name` and `content`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MetaTag {
    pub index: usize,
    pub name: String,
    pub content: String,
}

/// One extracted record of any kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractedRecord {
    Heading(Heading),
    Paragraph(Paragraph),
    Link(Link),
    Image(Image),
    Script(Script),
    MetaTag(MetaTag),
}

impl ExtractedRecord {
    /// Kind of this record
    pub fn kind(&self) -> RecordKind {
        match self {
            ExtractedRecord::Heading(_) => RecordKind::Heading,
            ExtractedRecord::Paragraph(_) => RecordKind::Paragraph,
            ExtractedRecord::Link(_) => RecordKind::Link,
            ExtractedRecord::Image(_) => RecordKind::Image,
            ExtractedRecord::Script(_) => RecordKind::Script,
            ExtractedRecord::MetaTag(_) => RecordKind::MetaTag,
        }
    }

    /// Zero-based position among records of the same kind
    pub fn index(&self) -> usize {
        match self {
            ExtractedRecord::Heading(r) => r.index,
            ExtractedRecord::Paragraph(r) => r.index,
            ExtractedRecord::Link(r) => r.index,
            ExtractedRecord::Image(r) => r.index,
            ExtractedRecord::Script(r) => r.index,
            ExtractedRecord::MetaTag(r) => r.index,
        }
    }
}

/// Everything extracted from one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionResult {
    /// The document the records were extracted from, kept for the report preview
    #[serde(skip)]
    pub raw_html: String,
    pub headings: Vec<Heading>,
    pub paragraphs: Vec<Paragraph>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub scripts: Vec<Script>,
    pub meta_tags: Vec<MetaTag>,
    /// Distinct link, image and script URLs in first-occurrence order
    pub urls: UrlSet,
}

impl ExtractionResult {
    /// Number of records of the given kind
    pub fn count(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Heading => self.headings.len(),
            RecordKind::Paragraph => self.paragraphs.len(),
            RecordKind::Link => self.links.len(),
            RecordKind::Image => self.images.len(),
            RecordKind::Script => self.scripts.len(),
            RecordKind::MetaTag => self.meta_tags.len(),
        }
    }

    /// True if no record of any kind was found
    pub fn is_empty(&self) -> bool {
        RecordKind::ALL.iter().all(|kind| self.count(*kind) == 0)
    }

    /// Records of one kind, wrapped as [`ExtractedRecord`]
    pub fn records(&self, kind: RecordKind) -> Vec<ExtractedRecord> {
        match kind {
            RecordKind::Heading => wrap(&self.headings, ExtractedRecord::Heading),
            RecordKind::Paragraph => wrap(&self.paragraphs, ExtractedRecord::Paragraph),
            RecordKind::Link => wrap(&self.links, ExtractedRecord::Link),
            RecordKind::Image => wrap(&self.images, ExtractedRecord::Image),
            RecordKind::Script => wrap(&self.scripts, ExtractedRecord::Script),
            RecordKind::MetaTag => wrap(&self.meta_tags, ExtractedRecord::MetaTag),
        }
    }

    /// The first `max_chars` characters of the document
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.raw_html.char_indices().nth(max_chars) {
            Some((end, _)) => &self.raw_html[..end],
            None => &self.raw_html,
        }
    }
}

fn wrap<T: Clone>(records: &[T], f: fn(T) -> ExtractedRecord) -> Vec<ExtractedRecord> {
    records.iter().cloned().map(f).collect()
}

/// Result of scraping one URL
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScrapeReport {
    /// The fetched URL, after normalization
    pub url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Body size in bytes
    pub size: u64,

    /// True if the body was cut short by the size or time limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,

    /// Extracted records
    pub extraction: ExtractionResult,
}
