//! Raw corpus to processed corpus

use crate::canonicalizer::{collect_tags, TagCanonicalizer};
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::extractor::MetadataExtractor;
use crate::report::EnrichmentReport;
use autopost_domain::traits::LlmProvider;
use autopost_domain::{EnrichedPost, Language, RawPost, SpellingNormalizer};
use autopost_llm::ResilientInvoker;
use autopost_store::{read_raw_posts, CorpusStore};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Runs extraction, optional spelling normalization and tag canonicalization
/// over a whole corpus
///
/// A batch either completes or fails as a whole. Nothing is written when any
/// post fails.
pub struct EnrichmentPipeline<L>
where
    L: LlmProvider,
{
    extractor: MetadataExtractor<L>,
    canonicalizer: TagCanonicalizer<L>,
    normalizer: Option<SpellingNormalizer>,
}

impl<L> EnrichmentPipeline<L>
where
    L: LlmProvider,
    L::Error: fmt::Display,
{
    /// Create a pipeline sharing one provider and one invoker
    ///
    /// Uses the built-in Tanglish spelling table when
    /// `normalize_tanglish_text` is set.
    pub fn new(
        llm_provider: Arc<L>,
        invoker: Arc<ResilientInvoker>,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let normalizer = if config.normalize_tanglish_text {
            Some(SpellingNormalizer::builtin().map_err(ExtractorError::Config)?)
        } else {
            None
        };

        Ok(Self {
            extractor: MetadataExtractor::new(Arc::clone(&llm_provider), Arc::clone(&invoker), config),
            canonicalizer: TagCanonicalizer::new(llm_provider, invoker),
            normalizer,
        })
    }

    /// Replace the spelling table, or disable normalization with `None`
    pub fn with_normalizer(mut self, normalizer: Option<SpellingNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Enrich posts in memory
    pub fn enrich(
        &self,
        raw_posts: Vec<RawPost>,
    ) -> Result<(Vec<EnrichedPost>, EnrichmentReport), ExtractorError> {
        let start = Instant::now();
        let mut report = EnrichmentReport::new();
        let total = raw_posts.len();

        info!("Extracting metadata for {} posts", total);

        let mut posts = Vec::with_capacity(total);
        for (idx, raw) in raw_posts.into_iter().enumerate() {
            debug!("Processing post {}/{}", idx + 1, total);
            let metadata = self.extractor.extract(&raw.text)?;
            let mut post = EnrichedPost::from_parts(raw, metadata);

            if post.language == Language::Tanglish {
                if let Some(normalizer) = &self.normalizer {
                    let normalized = normalizer.normalize(&post.text);
                    if normalized != post.text {
                        post.text = normalized;
                        report.posts_normalized += 1;
                    }
                }
            }

            report.record_post(post.language);
            posts.push(post);
        }

        debug!("{} distinct tags before canonicalization", collect_tags(&posts).len());
        let map = self.canonicalizer.canonicalize(&mut posts)?;
        report.record_tag_map(&map);

        report.elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        Ok((posts, report))
    }

    /// Read a raw corpus file, enrich it and write the processed corpus
    pub fn process_corpus(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<EnrichmentReport, ExtractorError> {
        let start = Instant::now();
        let raw_posts = read_raw_posts(input_path)?;
        info!("Loaded {} raw posts from {}", raw_posts.len(), input_path.display());

        let (posts, mut report) = self.enrich(raw_posts)?;

        CorpusStore::from_posts(posts).save(output_path)?;
        report.elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            "Wrote {} posts to {} in {}ms",
            report.posts_processed,
            output_path.display(),
            report.elapsed_ms
        );
        Ok(report)
    }
}
