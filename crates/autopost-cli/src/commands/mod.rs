//! Command implementations.

pub mod config;
pub mod generate;
pub mod process;
pub mod tags;

pub use self::config::execute_config;
pub use self::generate::execute_generate;
pub use self::process::execute_process;
pub use self::tags::execute_tags;

use crate::config::Config;
use crate::error::Result;
use autopost_llm::{GroqProvider, ResilientInvoker};
use std::sync::Arc;
use tracing::debug;

/// Build the model provider from configuration and a resolved API key.
pub(crate) fn build_provider(config: &Config, api_key: &str) -> Result<Arc<GroqProvider>> {
    let provider = GroqProvider::from_config(&config.llm, api_key)?;
    debug!("Using model {} at {}", provider.model(), config.llm.endpoint);
    Ok(Arc::new(provider))
}

/// Build the shared invoker from the retry section.
pub(crate) fn build_invoker(config: &Config) -> Arc<ResilientInvoker> {
    Arc::new(ResilientInvoker::new(config.retry.clone()))
}
