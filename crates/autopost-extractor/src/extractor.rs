//! Core metadata extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_metadata;
use crate::prompt::{MetadataPromptBuilder, METADATA_SCHEMA};
use autopost_domain::traits::LlmProvider;
use autopost_domain::PostMetadata;
use autopost_llm::ResilientInvoker;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Turns one post into validated [`PostMetadata`] with a single model call
pub struct MetadataExtractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    invoker: Arc<ResilientInvoker>,
    config: ExtractorConfig,
}

impl<L> MetadataExtractor<L>
where
    L: LlmProvider,
    L::Error: fmt::Display,
{
    /// Create a new extractor
    pub fn new(llm_provider: Arc<L>, invoker: Arc<ResilientInvoker>, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            invoker,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract line count, language and tags from a post
    ///
    /// Service failures are retried by the invoker. Schema failures are not.
    pub fn extract(&self, post_text: &str) -> Result<PostMetadata, ExtractorError> {
        if post_text.trim().is_empty() {
            return Err(ExtractorError::InvalidInput("Post text is empty".to_string()));
        }
        let chars = post_text.chars().count();
        if chars > self.config.max_post_chars {
            return Err(ExtractorError::InvalidInput(format!(
                "Post text too long: {} chars (max: {})",
                chars, self.config.max_post_chars
            )));
        }

        let prompt = MetadataPromptBuilder::new(post_text)
            .with_max_tags(self.config.requested_tags)
            .build();
        debug!("Metadata prompt length: {} chars", prompt.len());

        let response = self
            .invoker
            .invoke(|| self.llm_provider.generate_structured(&prompt, METADATA_SCHEMA))?;
        debug!("Metadata response length: {} chars", response.len());

        parse_metadata(&response, self.config.max_tags)
    }
}
