//! Configuration for the generator

use crate::error::GeneratorError;
use autopost_domain::SpellingNormalizer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Hard cap on few-shot examples per prompt
pub const MAX_EXAMPLES_LIMIT: usize = 2;

/// Configuration for drafting posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Few-shot examples pulled from the corpus (at most 2)
    pub max_examples: usize,

    /// Custom Tanglish spelling table; the built-in table is used when unset
    pub spelling_table: Option<PathBuf>,

    /// Fixed seed for fallback template selection
    pub fallback_seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_examples: MAX_EXAMPLES_LIMIT,
            spelling_table: None,
            fallback_seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_examples > MAX_EXAMPLES_LIMIT {
            return Err(format!("max_examples cannot exceed {}", MAX_EXAMPLES_LIMIT));
        }
        Ok(())
    }

    /// Load the configured spelling table
    pub fn load_normalizer(&self) -> Result<SpellingNormalizer, GeneratorError> {
        match &self.spelling_table {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    GeneratorError::Config(format!(
                        "Failed to read spelling table {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                SpellingNormalizer::from_toml(&contents).map_err(GeneratorError::Config)
            }
            None => SpellingNormalizer::builtin().map_err(GeneratorError::Config),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
