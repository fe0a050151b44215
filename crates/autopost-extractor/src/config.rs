//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Largest tag count the parser tolerates (the prompt asks for two)
pub const MAX_TAGS_LIMIT: usize = 3;

/// Configuration for metadata extraction and corpus enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum post length (characters) sent for extraction
    pub max_post_chars: usize,

    /// Tags requested from the model per post
    pub requested_tags: usize,

    /// Tags accepted from the model per post before the output is rejected
    pub max_tags: usize,

    /// Run the Tanglish spelling table over Tanglish posts during enrichment
    pub normalize_tanglish_text: bool,
}

impl Default for ExtractorConfig {
    /// Default configuration matching the extraction prompt contract
    fn default() -> Self {
        Self {
            max_post_chars: 10_000,
            requested_tags: 2,
            max_tags: MAX_TAGS_LIMIT,
            normalize_tanglish_text: true,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: reject anything beyond the two requested tags
    pub fn strict() -> Self {
        Self {
            max_tags: 2,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_post_chars == 0 {
            return Err("max_post_chars must be greater than 0".to_string());
        }
        if self.requested_tags == 0 {
            return Err("requested_tags must be greater than 0".to_string());
        }
        if self.max_tags < self.requested_tags {
            return Err("max_tags cannot be less than requested_tags".to_string());
        }
        if self.max_tags > MAX_TAGS_LIMIT {
            return Err(format!("max_tags cannot exceed {}", MAX_TAGS_LIMIT));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
