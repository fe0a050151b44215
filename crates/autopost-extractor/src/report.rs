//! Enrichment run reporting

use autopost_domain::{Language, TagMap};
use std::collections::HashMap;

/// Outcome of one enrichment run
#[derive(Debug, Clone, Default)]
pub struct EnrichmentReport {
    /// Posts read and enriched
    pub posts_processed: usize,

    /// Posts per detected language
    pub by_language: HashMap<Language, usize>,

    /// Tanglish posts whose text the spelling table changed
    pub posts_normalized: usize,

    /// Distinct tags before canonicalization
    pub tags_before: usize,

    /// Distinct tags after canonicalization
    pub tags_after: usize,

    /// Raw tags that were renamed, with their canonical form
    pub merged: Vec<(String, String)>,

    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,
}

impl EnrichmentReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one enriched post
    pub fn record_post(&mut self, language: Language) {
        self.posts_processed += 1;
        *self.by_language.entry(language).or_insert(0) += 1;
    }

    /// Record the tag map produced by canonicalization
    pub fn record_tag_map(&mut self, map: &TagMap) {
        self.tags_before = map.len();
        self.tags_after = map.canonical_tags().len();
        self.merged = map
            .iter()
            .filter(|(raw, canonical)| raw != canonical)
            .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
            .collect();
    }

    /// Posts detected as `language`
    pub fn language_count(&self, language: Language) -> usize {
        self.by_language.get(&language).copied().unwrap_or(0)
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Enrichment Summary".to_string(),
            "==================".to_string(),
            format!("Posts processed: {}", self.posts_processed),
        ];

        for language in Language::ALL {
            lines.push(format!("  {}: {}", language, self.language_count(language)));
        }

        lines.push(format!("Tanglish posts normalized: {}", self.posts_normalized));
        lines.push(format!(
            "Distinct tags: {} -> {}",
            self.tags_before, self.tags_after
        ));

        if !self.merged.is_empty() {
            lines.push("Merged tags:".to_string());
            for (raw, canonical) in &self.merged {
                lines.push(format!("  {} -> {}", raw, canonical));
            }
        }

        lines.push(format!("Elapsed: {}ms", self.elapsed_ms));
        lines.join("\n")
    }
}
