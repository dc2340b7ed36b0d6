//! Text report rendering

use crate::types::{ExtractedRecord, ExtractionResult, RecordKind};

/// Default number of document characters shown in the report preview
pub const DEFAULT_PREVIEW_CHARS: usize = 500;

const HEADER: &str = "=== SCRAPED DATA ===";
const TRUNCATED_MARKER: &str = "... [TRUNCATED]";
const EMPTY_SECTION: &str = "- none";

/// Render an extraction as the plain-text report
///
/// Layout: a header, a bounded preview of the raw document, one section per
/// record kind, then the unique URLs. Empty sections read `- none`.
pub fn render_text(result: &ExtractionResult, preview_chars: usize) -> String {
    let mut output = String::new();

    output.push_str(HEADER);
    output.push_str("\n\n");
    output.push_str(">> RAW HTML (truncated):\n");
    output.push_str(result.preview(preview_chars));
    output.push_str(TRUNCATED_MARKER);
    output.push_str("\n\n");

    for kind in RecordKind::ALL {
        let lines: Vec<String> = result.records(kind).iter().map(format_record).collect();
        push_section(&mut output, kind.label(), &lines);
    }

    let urls: Vec<String> = result.urls.iter().map(|url| format!("- {}", url)).collect();
    push_section(&mut output, "URLS (Unique)", &urls);

    output
}

fn push_section(output: &mut String, title: &str, lines: &[String]) {
    output.push_str(&format!(">> {}:\n", title));
    if lines.is_empty() {
        output.push_str(EMPTY_SECTION);
    } else {
        output.push_str(&lines.join("\n"));
    }
    output.push_str("\n\n");
}

/// Format one record as a report line
pub fn format_record(record: &ExtractedRecord) -> String {
    let marker = match record.kind().index_prefix() {
        Some(prefix) => format!("[{}-{}] ", prefix, record.index()),
        None => String::new(),
    };
    let body = match record {
        ExtractedRecord::Heading(h) => h.text.clone(),
        ExtractedRecord::Paragraph(p) => p.text.clone(),
        ExtractedRecord::Link(l) => format!("href=\"{}\" text=\"{}\"", l.href, l.text),
        ExtractedRecord::Image(i) => format!("src=\"{}\" alt=\"{}\"", i.src, i.alt),
        ExtractedRecord::Script(s) => format!("src=\"{}\"", s.src),
        ExtractedRecord::MetaTag(m) => format!("name=\"{}\" content=\"{}\"", m.name, m.content),
    };
    format!("- {}{}", marker, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::types::{Heading, Image, Link, MetaTag, Paragraph, Script};

    #[test]
    fn test_format_records() {
        let heading = ExtractedRecord::Heading(Heading {
            index: 3,
            text: "Title".to_string(),
        });
        assert_eq!(format_record(&heading), "- Title");

        let paragraph = ExtractedRecord::Paragraph(Paragraph {
            index: 1,
            text: "Body".to_string(),
        });
        assert_eq!(format_record(&paragraph), "- [p-1] Body");

        let link = ExtractedRecord::Link(Link {
            index: 0,
            href: "/a".to_string(),
            text: "A".to_string(),
        });
        assert_eq!(format_record(&link), "- [link-0] href=\"/a\" text=\"A\"");

        let image = ExtractedRecord::Image(Image {
            index: 2,
            src: "x.png".to_string(),
            alt: "none".to_string(),
        });
        assert_eq!(format_record(&image), "- [img-2] src=\"x.png\" alt=\"none\"");

        let script = ExtractedRecord::Script(Script {
            index: 0,
            src: "app.js".to_string(),
        });
        assert_eq!(format_record(&script), "- [script-0] src=\"app.js\"");

        let meta = ExtractedRecord::MetaTag(MetaTag {
            index: 0,
            name: "robots".to_string(),
            content: "noindex".to_string(),
        });
        assert_eq!(
            format_record(&meta),
            "- [meta-0] name=\"robots\" content=\"noindex\""
        );
    }

    #[test]
    fn test_render_empty_document() {
        let report = render_text(&extract(""), DEFAULT_PREVIEW_CHARS);
        let expected = "=== SCRAPED DATA ===\n\n\
            >> RAW HTML (truncated):\n... [TRUNCATED]\n\n\
            >> HEADINGS:\n- none\n\n\
            >> PARAGRAPHS:\n- none\n\n\
            >> LINKS:\n- none\n\n\
            >> IMAGES:\n- none\n\n\
            >> SCRIPTS:\n- none\n\n\
            >> META TAGS:\n- none\n\n\
            >> URLS (Unique):\n- none\n\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_render_sections_in_order() {
        let html = r#"<h1>Hi</h1><p>One</p><p>Two</p><a href="/x">X</a><img src="/i.png">"#;
        let report = render_text(&extract(html), DEFAULT_PREVIEW_CHARS);

        assert!(report.contains(">> HEADINGS:\n- Hi\n\n"));
        assert!(report.contains(">> PARAGRAPHS:\n- [p-0] One\n- [p-1] Two\n\n"));
        assert!(report.contains(">> LINKS:\n- [link-0] href=\"/x\" text=\"X\"\n\n"));
        assert!(report.contains(">> IMAGES:\n- [img-0] src=\"/i.png\" alt=\"none\"\n\n"));
        assert!(report.contains(">> URLS (Unique):\n- /x\n- /i.png\n\n"));

        let headings = report.find(">> HEADINGS").unwrap();
        let metas = report.find(">> META TAGS").unwrap();
        let urls = report.find(">> URLS").unwrap();
        assert!(headings < metas && metas < urls);
    }

    #[test]
    fn test_preview_bounded() {
        let html = format!("<p>{}</p>", "x".repeat(1000));
        let report = render_text(&extract(&html), 10);
        assert!(report.contains(">> RAW HTML (truncated):\n<p>xxxxxxx... [TRUNCATED]\n\n"));
    }
}
