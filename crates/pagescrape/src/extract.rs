//! Pattern-based extraction engine
//!
//! Six independent rules run over the flat markup, each producing records
//! of one kind in document order. There is no tree: nested tags of the same
//! kind, `<script>`/`<style>` bodies and comments are scanned like any other
//! text, and captured inner text keeps whatever markup it contains.
//!
//! Link, image and script rules also feed their references, in that order,
//! into the [`UrlCollector`] owned by [`extract`].

use crate::normalize::normalize_text;
use crate::scan::{Elements, OpenTags, TagName};
use crate::types::{
    ExtractionResult, Heading, Image, Link, MetaTag, Paragraph, RecordKind, Script, MISSING_ALT,
};
use crate::urls::UrlCollector;
use tracing::debug;

const PARAGRAPH: TagName = TagName::Exact("p");
const ANCHOR: TagName = TagName::Exact("a");
const IMG: TagName = TagName::Exact("img");
const SCRIPT: TagName = TagName::Exact("script");
const META: TagName = TagName::Exact("meta");

/// Extract every record kind from a document
///
/// Total over any input: a document without a given tag shape simply
/// yields no records of that kind, and malformed tags are skipped.
pub fn extract(document: &str) -> ExtractionResult {
    let mut urls = UrlCollector::new();

    let headings = extract_headings(document);
    let paragraphs = extract_paragraphs(document);
    let links = extract_links(document, &mut urls);
    let images = extract_images(document, &mut urls);
    let scripts = extract_scripts(document, &mut urls);
    let meta_tags = extract_meta_tags(document);

    let result = ExtractionResult {
        raw_html: document.to_string(),
        headings,
        paragraphs,
        links,
        images,
        scripts,
        meta_tags,
        urls: urls.finish(),
    };

    debug!(
        bytes = document.len(),
        headings = result.count(RecordKind::Heading),
        paragraphs = result.count(RecordKind::Paragraph),
        links = result.count(RecordKind::Link),
        images = result.count(RecordKind::Image),
        scripts = result.count(RecordKind::Script),
        meta_tags = result.count(RecordKind::MetaTag),
        urls = result.urls.len(),
        "Extraction complete"
    );

    result
}

/// `<h1>`..`<h6>` content up to the next close tag of any level
pub fn extract_headings(document: &str) -> Vec<Heading> {
    Elements::new(document, TagName::Heading)
        .enumerate()
        .map(|(index, element)| Heading {
            index,
            text: normalize_text(element.inner),
        })
        .collect()
}

/// `<p>` content
pub fn extract_paragraphs(document: &str) -> Vec<Paragraph> {
    Elements::new(document, PARAGRAPH)
        .enumerate()
        .map(|(index, element)| Paragraph {
            index,
            text: normalize_text(element.inner),
        })
        .collect()
}

/// `<a href>` with its inner text
pub fn extract_links(document: &str, urls: &mut UrlCollector) -> Vec<Link> {
    Elements::new(document, ANCHOR)
        .requiring("href")
        .filter_map(|element| {
            let href = element.open.non_empty_attr("href")?;
            Some((href, element.inner))
        })
        .enumerate()
        .map(|(index, (href, inner))| {
            urls.push(href);
            Link {
                index,
                href: href.to_string(),
                text: normalize_text(inner),
            }
        })
        .collect()
}

/// `<img src>`, with `alt` when present and non-empty
pub fn extract_images(document: &str, urls: &mut UrlCollector) -> Vec<Image> {
    OpenTags::new(document, IMG)
        .filter_map(|tag| {
            let src = tag.non_empty_attr("src")?;
            let alt = tag.non_empty_attr("alt").unwrap_or(MISSING_ALT);
            Some((src, alt))
        })
        .enumerate()
        .map(|(index, (src, alt))| {
            urls.push(src);
            Image {
                index,
                src: src.to_string(),
                alt: alt.to_string(),
            }
        })
        .collect()
}

/// `<script src>`; inline scripts are not extracted
pub fn extract_scripts(document: &str, urls: &mut UrlCollector) -> Vec<Script> {
    OpenTags::new(document, SCRIPT)
        .filter_map(|tag| tag.non_empty_attr("src"))
        .enumerate()
        .map(|(index, src)| {
            urls.push(src);
            Script {
                index,
                src: src.to_string(),
            }
        })
        .collect()
}

/// `<meta>` carrying both `name` and `content`, in either order
pub fn extract_meta_tags(document: &str) -> Vec<MetaTag> {
    OpenTags::new(document, META)
        .filter_map(|tag| {
            let name = tag.non_empty_attr("name")?;
            let content = tag.attr("content")?;
            Some((name, content))
        })
        .enumerate()
        .map(|(index, (name, content))| MetaTag {
            index,
            name: name.to_string(),
            content: content.to_string(),
        })
        .collect()
}
