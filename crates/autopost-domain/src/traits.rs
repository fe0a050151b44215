//! Trait definitions for external interactions
//!
//! These traits define the boundary between the pipeline and the hosted
//! language-model service. Implementations live in `autopost-llm`.

use std::sync::Arc;

/// Trait for LLM provider operations
///
/// Calls are blocking. Retry policy is not the provider's concern; callers
/// wrap calls in the resilient invoker.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate a completion that must be a JSON document
    ///
    /// `schema` is a human-readable description of the expected shape.
    /// Providers with a JSON output mode should enable it; the default
    /// falls back to plain generation.
    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.generate(prompt)
    }
}

impl<T: LlmProvider + ?Sized> LlmProvider for Arc<T> {
    type Error = T::Error;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        (**self).generate(prompt)
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        (**self).generate_structured(prompt, schema)
    }
}
