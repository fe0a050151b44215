//! AutoPost LLM Provider Layer
//!
//! Provider implementations and the single place where transient-failure
//! policy lives.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `autopost-domain`, plus the [`ResilientInvoker`] that every caller wraps
//! model calls in.
//!
//! # Providers
//!
//! - `MockProvider`: Scripted mock for testing
//! - `GroqProvider`: OpenAI-compatible chat-completions API (Groq by default)
//!
//! # Examples
//!
//! ```
//! use autopost_llm::{MockProvider, ResilientInvoker, RetryPolicy};
//! use autopost_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let invoker = ResilientInvoker::new(RetryPolicy::default());
//! let result = invoker.invoke(|| provider.generate("test prompt")).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod groq;
pub mod retry;

use autopost_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use config::LlmConfig;
pub use groq::GroqProvider;
pub use retry::{ExhaustedRetries, RecordingSleeper, ResilientInvoker, RetryPolicy, Sleeper, ThreadSleeper};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// API key rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Default)]
struct MockState {
    scripted: VecDeque<Result<String, String>>,
    by_fragment: Vec<(String, Result<String, String>)>,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Responses are resolved in this order:
/// 1. the next scripted response queued with [`push_response`](Self::push_response)
///    or [`push_error`](Self::push_error),
/// 2. the first registered fragment contained in the prompt,
/// 3. the default response (or error, for [`MockProvider::failing`]).
///
/// Clones share state, so a clone handed to a component still reports the
/// calls it received.
///
/// # Examples
///
/// ```
/// use autopost_llm::MockProvider;
/// use autopost_domain::traits::LlmProvider;
///
/// let mut provider = MockProvider::new("Fixed response");
/// provider.add_response("tags", "{}");
/// assert_eq!(provider.generate("any prompt").unwrap(), "Fixed response");
/// assert_eq!(provider.generate("list of tags").unwrap(), "{}");
///
/// provider.push_error("boom");
/// assert!(provider.generate("any prompt").is_err());
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default: Result<String, String>,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default: Ok(response.into()),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a MockProvider whose default outcome is an error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            default: Err(message.into()),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Respond with `response` to prompts containing `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        self.state()
            .by_fragment
            .push((fragment.into(), Ok(response.into())));
    }

    /// Fail prompts containing `fragment`
    pub fn add_error(&mut self, fragment: impl Into<String>) {
        self.state()
            .by_fragment
            .push((fragment.into(), Err("Mock error".to_string())));
    }

    /// Queue a one-shot response, consumed by the next call
    pub fn push_response(&self, response: impl Into<String>) {
        self.state().scripted.push_back(Ok(response.into()));
    }

    /// Queue a one-shot error, consumed by the next call
    pub fn push_error(&self, message: impl Into<String>) {
        self.state().scripted.push_back(Err(message.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.state().prompts.len()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.state().prompts.clone()
    }

    /// Most recent prompt, if any
    pub fn last_prompt(&self) -> Option<String> {
        self.state().prompts.last().cloned()
    }

    /// Reset the call log
    pub fn reset_call_count(&self) {
        self.state().prompts.clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.prompts.push(prompt.to_string());

        let outcome = match state.scripted.pop_front() {
            Some(outcome) => outcome,
            None => state
                .by_fragment
                .iter()
                .find(|(fragment, _)| prompt.contains(fragment.as_str()))
                .map(|(_, outcome)| outcome.clone())
                .unwrap_or_else(|| self.default.clone()),
        };

        outcome.map_err(LlmError::Other)
    }
}
