//! Whitespace normalization for captured text

/// Collapse every whitespace run into a single space and trim both ends
///
/// Newlines and tabs count as whitespace. Used for heading, paragraph and
/// link text only; attribute values are stored as captured.
pub fn normalize_text(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !output.is_empty() {
            output.push(' ');
        }
        output.push_str(word);
    }
    output
}
