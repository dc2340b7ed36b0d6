//! Ordered, deduplicated URL collection
//!
//! Link, image and script rules push every reference they capture into a
//! single [`UrlCollector`] owned by the extraction pass. Deduplication is
//! by exact string equality: no case folding, no trailing-slash handling.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Distinct URLs in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct UrlSet(Vec<String>);

impl UrlSet {
    /// Number of distinct URLs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no URL was collected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// URLs in first-occurrence order
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate URLs in first-occurrence order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Copy the URLs into a vector
    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

impl<'a> IntoIterator for &'a UrlSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Accumulates URLs for one extraction pass
#[derive(Debug, Default)]
pub struct UrlCollector {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl UrlCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a URL; returns false if it was already present
    pub fn push(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string());
        self.ordered.push(url.to_string());
        true
    }

    /// Number of distinct URLs so far
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// True if nothing has been collected
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Finalize into a [`UrlSet`]
    pub fn finish(self) -> UrlSet {
        UrlSet(self.ordered)
    }
}
