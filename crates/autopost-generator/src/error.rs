//! Error types for post generation

use autopost_llm::ExhaustedRetries;
use std::fmt;
use thiserror::Error;

/// Prefix on every error string shown to the user
pub const WARNING_MARKER: &str = "⚠️ ";

/// Errors that can occur while drafting a post
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A required request field is missing or blank
    #[error("Please provide a {field}")]
    Validation {
        /// Name of the missing field
        field: &'static str,
    },

    /// Model service kept failing past the retry bound
    #[error("Model service failed after {attempts} attempts: {last_error}")]
    Service {
        /// Attempts made
        attempts: u32,
        /// Error from the final attempt
        last_error: String,
    },

    /// Model returned only whitespace
    #[error("Model returned an empty post")]
    EmptyResponse,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl<E: fmt::Display> From<ExhaustedRetries<E>> for GeneratorError {
    fn from(e: ExhaustedRetries<E>) -> Self {
        GeneratorError::Service {
            attempts: e.attempts,
            last_error: e.last_error.to_string(),
        }
    }
}

impl GeneratorError {
    /// Human-readable message for the drafting UI
    pub fn user_message(&self) -> String {
        format!("{}{}", WARNING_MARKER, self)
    }
}
