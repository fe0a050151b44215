//! Generation orchestrator

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::fallback::FallbackGenerator;
use crate::prompt::PromptAssembler;
use autopost_domain::traits::LlmProvider;
use autopost_domain::{GenerationRequest, Language, SpellingNormalizer};
use autopost_llm::ResilientInvoker;
use autopost_store::CorpusStore;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a drafted post came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSource {
    /// Written by the language model
    Model,

    /// Assembled locally after the model path failed
    Fallback,
}

/// A drafted post and its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPost {
    /// Post text, never empty
    pub text: String,

    /// Origin of the text
    pub source: PostSource,
}

impl GeneratedPost {
    /// Whether the model wrote this post
    pub fn is_model(&self) -> bool {
        self.source == PostSource::Model
    }
}

/// Drafts posts from a request, the corpus and the model
///
/// The model path retrieves few-shot examples, builds the prompt and calls
/// the model through the invoker. Any failure on that path is absorbed by
/// the [`FallbackGenerator`].
pub struct PostGenerator<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    invoker: Arc<ResilientInvoker>,
    store: Arc<CorpusStore>,
    normalizer: SpellingNormalizer,
    fallback: FallbackGenerator,
    assembler: PromptAssembler,
    config: GeneratorConfig,
}

impl<L> PostGenerator<L>
where
    L: LlmProvider,
    L::Error: fmt::Display,
{
    /// Create a generator, loading the configured spelling table
    pub fn new(
        llm_provider: Arc<L>,
        invoker: Arc<ResilientInvoker>,
        store: Arc<CorpusStore>,
        config: GeneratorConfig,
    ) -> Result<Self, GeneratorError> {
        config.validate().map_err(GeneratorError::Config)?;
        let normalizer = config.load_normalizer()?;
        let fallback = match config.fallback_seed {
            Some(seed) => FallbackGenerator::with_seed(seed),
            None => FallbackGenerator::new(),
        };

        Ok(Self {
            llm_provider,
            invoker,
            store,
            normalizer,
            fallback,
            assembler: PromptAssembler::new(),
            config,
        })
    }

    /// Use a specific fallback generator
    pub fn with_fallback(mut self, fallback: FallbackGenerator) -> Self {
        self.fallback = fallback;
        self
    }

    /// Corpus used for few-shot examples
    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    /// Check required request fields
    pub fn validate(&self, request: &GenerationRequest) -> Result<(), GeneratorError> {
        if request.topic.trim().is_empty() {
            return Err(GeneratorError::Validation { field: "topic" });
        }
        if request.profession.trim().is_empty() {
            return Err(GeneratorError::Validation { field: "profession" });
        }
        if request.purpose.requires_reason() && request.reason_text().is_none() {
            return Err(GeneratorError::Validation { field: "reason" });
        }
        Ok(())
    }

    /// Prompt the model would receive for `request`
    pub fn build_prompt(&self, request: &GenerationRequest) -> String {
        let examples = self.store.select_examples(
            request.length,
            request.language,
            request.topic.trim(),
            self.config.max_examples,
        );
        debug!("Selected {} few-shot examples", examples.len());
        self.assembler.build(request, &examples)
    }

    /// Draft a post, reporting whether the model or the fallback wrote it
    ///
    /// Only validation errors are returned. Model failures fall back.
    pub fn generate_detailed(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedPost, GeneratorError> {
        self.validate(request)?;

        match self.generate_with_model(request) {
            Ok(text) => {
                info!("Generated {} post on '{}'", request.length, request.topic);
                Ok(GeneratedPost {
                    text,
                    source: PostSource::Model,
                })
            }
            Err(e) => {
                warn!("Model generation failed, using fallback template: {}", e);
                Ok(GeneratedPost {
                    text: self.fallback.generate(request),
                    source: PostSource::Fallback,
                })
            }
        }
    }

    /// Draft a post as user-facing text
    ///
    /// Validation failures come back as a message starting with the warning
    /// marker. Never returns an empty string.
    pub fn generate(&self, request: &GenerationRequest) -> String {
        match self.generate_detailed(request) {
            Ok(post) => post.text,
            Err(e) => e.user_message(),
        }
    }

    fn generate_with_model(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        let prompt = self.build_prompt(request);
        debug!("Generation prompt length: {} chars", prompt.len());

        let response = self.invoker.invoke(|| self.llm_provider.generate(&prompt))?;
        let text = response.trim();
        if text.is_empty() {
            return Err(GeneratorError::EmptyResponse);
        }

        Ok(match request.language {
            Language::Tanglish => self.normalizer.normalize(text),
            Language::English => text.to_string(),
        })
    }
}
