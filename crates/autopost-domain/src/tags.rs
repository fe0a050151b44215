//! Tag canonicalization map

use std::collections::{BTreeMap, BTreeSet};

/// Mapping from raw tags to canonical tags
///
/// Lookups fall back to the raw tag itself, so applying a map never drops a
/// tag. A map built with [`TagMap::total_over`] has an explicit entry for
/// every tag in the set it was built for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: BTreeMap<String, String>,
}

impl TagMap {
    /// Create an empty map (every tag maps to itself)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map that is total over `tags`
    ///
    /// Proposed entries for tags outside `tags` are ignored. Tags without a
    /// proposal, or whose proposal is blank, map to themselves. Canonical
    /// values are trimmed.
    pub fn total_over(tags: &BTreeSet<String>, mut proposed: BTreeMap<String, String>) -> Self {
        let entries = tags
            .iter()
            .map(|tag| {
                let canonical = proposed
                    .remove(tag)
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| tag.clone());
                (tag.clone(), canonical)
            })
            .collect();

        Self { entries }
    }

    /// Insert or replace one entry
    pub fn insert(&mut self, raw: impl Into<String>, canonical: impl Into<String>) {
        self.entries.insert(raw.into(), canonical.into());
    }

    /// Explicit entry for a raw tag, if any
    pub fn get(&self, raw: &str) -> Option<&str> {
        self.entries.get(raw).map(String::as_str)
    }

    /// Canonical form of a tag, or the tag itself when unmapped
    pub fn canonical<'a>(&'a self, tag: &'a str) -> &'a str {
        match self.entries.get(tag) {
            Some(canonical) if !canonical.trim().is_empty() => canonical,
            _ => tag,
        }
    }

    /// Rewrite a tag list through the map
    ///
    /// Duplicates produced by merging collapse to their first occurrence.
    pub fn apply(&self, tags: &[String]) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::with_capacity(tags.len());
        for tag in tags {
            let canonical = self.canonical(tag);
            if seen.insert(canonical) {
                out.push(canonical.to_string());
            }
        }
        out
    }

    /// Whether every tag in `tags` has an explicit entry
    pub fn covers<'a>(&self, tags: impl IntoIterator<Item = &'a String>) -> bool {
        tags.into_iter().all(|t| self.entries.contains_key(t))
    }

    /// Distinct canonical values
    pub fn canonical_tags(&self) -> BTreeSet<&str> {
        self.entries.values().map(String::as_str).collect()
    }

    /// Number of explicit entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no explicit entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(raw, canonical)` pairs in raw-tag order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
