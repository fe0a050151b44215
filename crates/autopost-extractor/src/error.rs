//! Error types for the Extractor

use autopost_llm::ExhaustedRetries;
use autopost_store::StoreError;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during extraction and canonicalization
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Model output failed structural validation (not retried)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Model service kept failing past the retry bound
    #[error("Model service failed after {attempts} attempts: {last_error}")]
    Service {
        /// Attempts made
        attempts: u32,
        /// Error from the final attempt
        last_error: String,
    },

    /// Input rejected before any model call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Corpus file could not be read or written
    #[error("Corpus error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl<E: fmt::Display> From<ExhaustedRetries<E>> for ExtractorError {
    fn from(e: ExhaustedRetries<E>) -> Self {
        ExtractorError::Service {
            attempts: e.attempts,
            last_error: e.last_error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::Schema(format!("JSON parse error: {}", e))
    }
}

impl ExtractorError {
    /// Whether this is a schema violation
    pub fn is_schema(&self) -> bool {
        matches!(self, ExtractorError::Schema(_))
    }
}
