//! Forward-only tag scanning over flat markup
//!
//! Design: no tree, no backtracking. An open tag is `<name` followed by a
//! boundary and runs to the first `>`. An element's inner content runs to
//! the first matching close tag (`</name>`, optional whitespace before
//! `>`). When no `>` or close tag exists past some position, nothing after
//! it can match either, so the scanners stop there. Every scanner visits
//! each byte a bounded number of times.
//!
//! All needles are ASCII, so every offset found lands on a char boundary.

/// Which tag names a scanner matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagName {
    /// One literal name, compared case-insensitively
    Exact(&'static str),
    /// `h1` through `h6`
    Heading,
}

impl TagName {
    /// Length of the matched name at the start of `s`, if it matches and
    /// is followed by a name boundary
    fn match_len(self, s: &[u8]) -> Option<usize> {
        let len = match self {
            TagName::Exact(name) => {
                let name = name.as_bytes();
                if s.len() < name.len() || !s[..name.len()].eq_ignore_ascii_case(name) {
                    return None;
                }
                name.len()
            }
            TagName::Heading => match s {
                [h, level, ..]
                    if h.eq_ignore_ascii_case(&b'h') && (b'1'..=b'6').contains(level) =>
                {
                    2
                }
                _ => return None,
            },
        };
        match s.get(len) {
            None => Some(len),
            Some(b) if b.is_ascii_whitespace() || *b == b'/' || *b == b'>' => Some(len),
            Some(_) => None,
        }
    }
}

/// An open tag located in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenTag<'a> {
    /// Offset just past `>`
    pub end: usize,
    /// Everything between the tag name and `>`
    attrs: &'a str,
}

impl<'a> OpenTag<'a> {
    /// Value of the first attribute called `name`, if present
    ///
    /// A bare attribute (`<script async>`) yields `Some("")`.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        attribute(self.attrs, name)
    }

    /// Attribute value, treating an empty value as absent
    pub fn non_empty_attr(&self, name: &str) -> Option<&'a str> {
        self.attr(name).filter(|v| !v.is_empty())
    }
}

/// Find the next open tag named `name` at or after `from`
///
/// Returns `None` once no further complete open tag can exist.
pub(crate) fn next_open_tag(doc: &str, from: usize, name: TagName) -> Option<OpenTag<'_>> {
    let bytes = doc.as_bytes();
    let mut pos = from;
    while pos < bytes.len() {
        let lt = pos + doc[pos..].find('<')?;
        let name_start = lt + 1;
        let Some(name_len) = name.match_len(&bytes[name_start..]) else {
            pos = name_start;
            continue;
        };
        let attrs_start = name_start + name_len;
        let gt = attrs_start + doc[attrs_start..].find('>')?;
        return Some(OpenTag {
            end: gt + 1,
            attrs: &doc[attrs_start..gt],
        });
    }
    None
}

/// Find the first close tag for `name` at or after `from`
///
/// Returns `(start, end)` where `start` is the offset of `</` and `end` is
/// just past `>`.
pub(crate) fn next_close_tag(doc: &str, from: usize, name: TagName) -> Option<(usize, usize)> {
    let bytes = doc.as_bytes();
    let mut pos = from;
    while pos < bytes.len() {
        let start = pos + doc[pos..].find("</")?;
        let name_start = start + 2;
        if let Some(name_len) = name.match_len(&bytes[name_start..]) {
            let mut i = name_start + name_len;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if bytes.get(i) == Some(&b'>') {
                return Some((start, i + 1));
            }
        }
        pos = name_start;
    }
    None
}

/// Iterator over every open tag with a given name
pub(crate) struct OpenTags<'a> {
    doc: &'a str,
    pos: usize,
    name: TagName,
}

impl<'a> OpenTags<'a> {
    pub fn new(doc: &'a str, name: TagName) -> Self {
        Self { doc, pos: 0, name }
    }
}

impl<'a> Iterator for OpenTags<'a> {
    type Item = OpenTag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = next_open_tag(self.doc, self.pos, self.name)?;
        self.pos = tag.end;
        Some(tag)
    }
}

/// An open tag together with its inner content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Element<'a> {
    pub open: OpenTag<'a>,
    pub inner: &'a str,
}

/// Iterator over `<name ...>inner</name>` pairs, shortest inner content first
///
/// With `require`, open tags lacking a non-empty value for that attribute are
/// skipped without looking for their close tag.
pub(crate) struct Elements<'a> {
    doc: &'a str,
    pos: usize,
    name: TagName,
    require: Option<&'static str>,
}

impl<'a> Elements<'a> {
    pub fn new(doc: &'a str, name: TagName) -> Self {
        Self {
            doc,
            pos: 0,
            name,
            require: None,
        }
    }

    /// Only yield elements whose open tag carries a non-empty `attr`
    pub fn requiring(mut self, attr: &'static str) -> Self {
        self.require = Some(attr);
        self
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let open = next_open_tag(self.doc, self.pos, self.name)?;
            if let Some(attr) = self.require {
                if open.non_empty_attr(attr).is_none() {
                    self.pos = open.end;
                    continue;
                }
            }
            let Some((close_start, close_end)) = next_close_tag(self.doc, open.end, self.name)
            else {
                // No close tag anywhere ahead: later open tags cannot pair either
                self.pos = self.doc.len();
                return None;
            };
            self.pos = close_end;
            return Some(Element {
                open,
                inner: &self.doc[open.end..close_start],
            });
        }
    }
}

/// Read the first attribute called `wanted` out of an open tag's attribute text
///
/// Values may be double-quoted, single-quoted or unquoted. An unterminated
/// quote ends parsing: nothing after it is reachable.
fn attribute<'a>(attrs: &'a str, wanted: &str) -> Option<&'a str> {
    let is_space = |c: char| c.is_ascii_whitespace();
    let mut rest = attrs;
    loop {
        rest = rest.trim_start_matches(|c: char| is_space(c) || c == '/');
        if rest.is_empty() {
            return None;
        }

        let name_len = rest
            .find(|c: char| is_space(c) || c == '=' || c == '/')
            .unwrap_or(rest.len());
        if name_len == 0 {
            // Stray '='
            rest = &rest[1..];
            continue;
        }
        let name = &rest[..name_len];
        rest = rest[name_len..].trim_start_matches(is_space);

        let value = match rest.strip_prefix('=') {
            Some(after_eq) => {
                let after_eq = after_eq.trim_start_matches(is_space);
                match after_eq.chars().next() {
                    Some(quote @ ('"' | '\'')) => {
                        let body = &after_eq[1..];
                        let end = body.find(quote)?;
                        rest = &body[end + 1..];
                        &body[..end]
                    }
                    Some(_) => {
                        let end = after_eq.find(is_space).unwrap_or(after_eq.len());
                        rest = &after_eq[end..];
                        &after_eq[..end]
                    }
                    None => {
                        rest = after_eq;
                        ""
                    }
                }
            }
            None => "",
        };

        if name.eq_ignore_ascii_case(wanted) {
            return Some(value);
        }
    }
}
