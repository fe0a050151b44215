//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use autopost_extractor::ExtractorConfig;
use autopost_generator::GeneratorConfig;
use autopost_llm::{LlmConfig, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration, one TOML section per component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model service connection
    pub llm: LlmConfig,

    /// Retry bounds for every model call
    pub retry: RetryPolicy,

    /// Metadata extraction and enrichment
    pub extractor: ExtractorConfig,

    /// Post drafting
    pub generator: GeneratorConfig,

    /// Corpus file locations
    pub corpus: CorpusConfig,

    /// Global settings
    pub settings: Settings,
}

/// Corpus file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Raw corpus read by `process`
    pub raw_path: PathBuf,

    /// Processed corpus written by `process` and read by `generate`
    pub processed_path: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text and tables
    Text,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".autopost").join("config.toml"))
    }

    /// Load configuration from `path`, or the default location.
    ///
    /// A missing file at the default location yields the defaults. A missing
    /// file that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::path()?, false),
        };

        let config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else if explicit {
            return Err(CliError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, or the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::path()?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&path, self.to_toml()?)?;
        Ok(path)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        let sections = [
            ("llm", self.llm.validate()),
            ("retry", self.retry.validate()),
            ("extractor", self.extractor.validate()),
            ("generator", self.generator.validate()),
        ];
        for (name, result) in sections {
            result.map_err(|e| CliError::Config(format!("[{}] {}", name, e)))?;
        }
        Ok(())
    }

    /// Resolve the API key: explicit value first, then the configured
    /// environment variable.
    pub fn api_key(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .map(str::to_string)
            .or_else(|| env::var(&self.llm.api_key_env).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| CliError::MissingApiKey(self.llm.api_key_env.clone()))
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            raw_path: PathBuf::from("data/raw_posts.json"),
            processed_path: PathBuf::from("data/processed_posts.json"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}
