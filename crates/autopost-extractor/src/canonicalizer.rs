//! Corpus-wide tag canonicalization

use crate::error::ExtractorError;
use crate::parser::parse_tag_map;
use crate::prompt::{TagUnifyPromptBuilder, TAG_MAP_SCHEMA};
use autopost_domain::traits::LlmProvider;
use autopost_domain::{EnrichedPost, TagMap};
use autopost_llm::ResilientInvoker;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Distinct tags across `posts`, sorted
pub fn collect_tags(posts: &[EnrichedPost]) -> BTreeSet<String> {
    posts
        .iter()
        .flat_map(|post| post.tags.iter().cloned())
        .collect()
}

/// Merges near-duplicate tags into canonical labels with one model call
pub struct TagCanonicalizer<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    invoker: Arc<ResilientInvoker>,
}

impl<L> TagCanonicalizer<L>
where
    L: LlmProvider,
    L::Error: fmt::Display,
{
    /// Create a new canonicalizer
    pub fn new(llm_provider: Arc<L>, invoker: Arc<ResilientInvoker>) -> Self {
        Self {
            llm_provider,
            invoker,
        }
    }

    /// Ask the model for a mapping over `tags`
    ///
    /// The returned map has an entry for every input tag. An empty set
    /// yields an empty map without calling the model.
    pub fn unify(&self, tags: &BTreeSet<String>) -> Result<TagMap, ExtractorError> {
        if tags.is_empty() {
            debug!("No tags to unify");
            return Ok(TagMap::new());
        }

        let prompt = TagUnifyPromptBuilder::new(tags).build();
        debug!("Unify prompt length: {} chars ({} tags)", prompt.len(), tags.len());

        let response = self
            .invoker
            .invoke(|| self.llm_provider.generate_structured(&prompt, TAG_MAP_SCHEMA))?;

        let proposed = parse_tag_map(&response)?;
        let missing = tags.iter().filter(|t| !proposed.contains_key(*t)).count();
        if missing > 0 {
            debug!("{} tags missing from model map, mapping to themselves", missing);
        }

        Ok(TagMap::total_over(tags, proposed))
    }

    /// Rewrite every post's tags to their canonical form
    ///
    /// On error no post is modified.
    pub fn canonicalize(&self, posts: &mut [EnrichedPost]) -> Result<TagMap, ExtractorError> {
        let tags = collect_tags(posts);
        let map = self.unify(&tags)?;

        for post in posts.iter_mut() {
            post.tags = map.apply(&post.tags);
        }

        info!(
            "Canonicalized {} distinct tags into {}",
            tags.len(),
            map.canonical_tags().len()
        );
        Ok(map)
    }
}
