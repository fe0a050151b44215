//! In-memory corpus of enriched posts

use crate::file::{read_json, write_json_pretty};
use crate::StoreError;
use autopost_domain::{EnrichedPost, Language, Length};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Owns the enriched corpus and answers few-shot lookups
///
/// Posts keep their corpus order. Lookups never reorder, rank or sample,
/// so example selection is deterministic for a given corpus.
#[derive(Debug, Clone, Default)]
pub struct CorpusStore {
    posts: Vec<EnrichedPost>,
    tag_index: HashMap<String, Vec<usize>>,
}

impl CorpusStore {
    /// Build a store, indexing posts by tag
    pub fn from_posts(posts: Vec<EnrichedPost>) -> Self {
        let mut tag_index: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, post) in posts.iter().enumerate() {
            let mut seen = BTreeSet::new();
            for tag in &post.tags {
                if seen.insert(tag.as_str()) {
                    tag_index.entry(tag.clone()).or_default().push(idx);
                }
            }
        }

        Self { posts, tag_index }
    }

    /// Load a processed corpus snapshot
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let posts: Vec<EnrichedPost> = read_json(path)?;
        Ok(Self::from_posts(posts))
    }

    /// Write the corpus snapshot as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json_pretty(path, &self.posts)
    }

    /// Posts matching length bucket, language and tag, in corpus order
    ///
    /// The iterator is lazy and can be cloned to restart it.
    pub fn filter<'a>(
        &'a self,
        length: Length,
        language: Language,
        tag: &str,
    ) -> impl Iterator<Item = &'a EnrichedPost> + Clone + 'a {
        self.tag_index
            .get(tag)
            .into_iter()
            .flatten()
            .filter_map(move |&idx| self.posts.get(idx))
            .filter(move |post| post.length() == length && post.language == language)
    }

    /// First `n` matches of [`filter`](Self::filter)
    pub fn select_examples(
        &self,
        length: Length,
        language: Language,
        tag: &str,
        n: usize,
    ) -> Vec<&EnrichedPost> {
        self.filter(length, language, tag).take(n).collect()
    }

    /// Distinct tags in the corpus, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tag_index.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Number of posts carrying `tag`
    pub fn tag_count(&self, tag: &str) -> usize {
        self.tag_index.get(tag).map_or(0, Vec::len)
    }

    /// All posts in corpus order
    pub fn posts(&self) -> &[EnrichedPost] {
        &self.posts
    }

    /// Give up ownership of the posts
    pub fn into_posts(self) -> Vec<EnrichedPost> {
        self.posts
    }

    /// Number of posts
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autopost_domain::{PostMetadata, RawPost};

    fn post(text: &str, lines: u32, language: Language, tags: &[&str]) -> EnrichedPost {
        EnrichedPost::from_parts(
            RawPost::new(text),
            PostMetadata {
                line_count: lines,
                language,
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        )
    }

    fn sample_store() -> CorpusStore {
        CorpusStore::from_posts(vec![
            post("short english motivation", 3, Language::English, &["Motivation"]),
            post("medium tanglish job", 8, Language::Tanglish, &["Job Search", "Motivation"]),
            post("short english second", 2, Language::English, &["Motivation", "Networking"]),
            post("long english", 14, Language::English, &["Motivation"]),
            post("short english third", 5, Language::English, &["Motivation"]),
        ])
    }

    #[test]
    fn test_filter_matches_all_three_keys() {
        let store = sample_store();
        let texts: Vec<_> = store
            .filter(Length::Short, Language::English, "Motivation")
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec!["short english motivation", "short english second", "short english third"]
        );
    }

    #[test]
    fn test_filter_is_restartable() {
        let store = sample_store();
        let iter = store.filter(Length::Medium, Language::Tanglish, "Job Search");
        assert_eq!(iter.clone().count(), 1);
        assert_eq!(iter.count(), 1);
    }

    #[test]
    fn test_filter_unknown_tag_is_empty() {
        let store = sample_store();
        assert_eq!(store.filter(Length::Short, Language::English, "Cooking").count(), 0);
        assert_eq!(store.filter(Length::Short, Language::English, "motivation").count(), 0);
    }

    #[test]
    fn test_select_examples_takes_first_n() {
        let store = sample_store();
        let examples = store.select_examples(Length::Short, Language::English, "Motivation", 2);
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].text, "short english motivation");
        assert_eq!(examples[1].text, "short english second");
    }

    #[test]
    fn test_tags_sorted_and_counted() {
        let store = sample_store();
        assert_eq!(store.tags(), vec!["Job Search", "Motivation", "Networking"]);
        assert_eq!(store.tag_count("Motivation"), 5);
        assert_eq!(store.tag_count("Unknown"), 0);
    }

    #[test]
    fn test_duplicate_tags_indexed_once() {
        let store = CorpusStore::from_posts(vec![post("x", 1, Language::English, &["A", "A"])]);
        assert_eq!(store.filter(Length::Short, Language::English, "A").count(), 1);
    }

    #[test]
    fn test_empty_store() {
        let store = CorpusStore::default();
        assert!(store.is_empty());
        assert!(store.tags().is_empty());
    }
}
