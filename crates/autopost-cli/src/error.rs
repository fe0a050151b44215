//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No API key in the environment or on the command line
    #[error("API key is missing. Set {0} or pass --api-key.")]
    MissingApiKey(String),

    /// Corpus enrichment failed
    #[error(transparent)]
    Extractor(#[from] autopost_extractor::ExtractorError),

    /// Generator could not be set up
    #[error(transparent)]
    Generator(#[from] autopost_generator::GeneratorError),

    /// Corpus file error
    #[error(transparent)]
    Store(#[from] autopost_store::StoreError),

    /// Model provider could not be set up
    #[error(transparent)]
    Llm(#[from] autopost_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
