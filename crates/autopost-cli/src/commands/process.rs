//! Process command implementation.

use super::{build_invoker, build_provider};
use crate::cli::ProcessArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use autopost_domain::traits::LlmProvider;
use autopost_extractor::EnrichmentPipeline;
use autopost_llm::ResilientInvoker;
use std::fmt;
use std::sync::Arc;

/// Build the enrichment pipeline with the configured spelling table.
///
/// The same table drafts use, so corpus text and generated posts share one
/// spelling. `no_normalize` turns normalization off entirely.
pub fn build_pipeline<L>(
    llm_provider: Arc<L>,
    invoker: Arc<ResilientInvoker>,
    config: &Config,
    no_normalize: bool,
) -> Result<EnrichmentPipeline<L>>
where
    L: LlmProvider,
    L::Error: fmt::Display,
{
    let mut extractor_config = config.extractor.clone();
    if no_normalize {
        extractor_config.normalize_tanglish_text = false;
    }
    let normalize = extractor_config.normalize_tanglish_text;

    let pipeline = EnrichmentPipeline::new(llm_provider, invoker, extractor_config)?;
    if !normalize {
        return Ok(pipeline);
    }

    let normalizer = config.generator.load_normalizer()?;
    Ok(pipeline.with_normalizer(Some(normalizer)))
}

/// Execute the process command.
pub fn execute_process(
    args: ProcessArgs,
    config: &Config,
    api_key: &str,
    formatter: &Formatter,
) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.corpus.raw_path.clone());
    let output = args
        .output
        .unwrap_or_else(|| config.corpus.processed_path.clone());

    let pipeline = build_pipeline(
        build_provider(config, api_key)?,
        build_invoker(config),
        config,
        args.no_normalize,
    )?;

    eprintln!(
        "{}",
        formatter.info(&format!("Processing {}", input.display()))
    );
    let report = pipeline.process_corpus(&input, &output)?;

    println!("{}", formatter.format_report(&report)?);
    eprintln!(
        "{}",
        formatter.success(&format!("Processed corpus written to {}", output.display()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use autopost_domain::RawPost;
    use autopost_llm::{MockProvider, RetryPolicy};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const TANGLISH_METADATA: &str = r#"{"line_count": 1, "language": "Tanglish", "tags": []}"#;

    fn invoker() -> Arc<ResilientInvoker> {
        Arc::new(ResilientInvoker::new(RetryPolicy::immediate(1)))
    }

    fn enrich_text(config: &Config, no_normalize: bool, text: &str) -> String {
        let llm = Arc::new(MockProvider::new(TANGLISH_METADATA));
        let pipeline = build_pipeline(llm, invoker(), config, no_normalize).unwrap();
        let (posts, _) = pipeline.enrich(vec![RawPost::new(text)]).unwrap();
        posts[0].text.clone()
    }

    #[test]
    fn test_custom_spelling_table_applies_to_corpus() {
        let dir = tempdir().unwrap();
        let table = dir.path().join("spelling.toml");
        fs::write(&table, "[[replacement]]\nfrom = \"seri\"\nto = \"sari\"\n").unwrap();

        let mut config = Config::default();
        config.generator.spelling_table = Some(table);

        assert_eq!(enrich_text(&config, false, "seri da"), "sari da");
    }

    #[test]
    fn test_no_normalize_keeps_text() {
        let dir = tempdir().unwrap();
        let table = dir.path().join("spelling.toml");
        fs::write(&table, "[[replacement]]\nfrom = \"seri\"\nto = \"sari\"\n").unwrap();

        let mut config = Config::default();
        config.generator.spelling_table = Some(table);

        assert_eq!(enrich_text(&config, true, "seri da"), "seri da");
    }

    #[test]
    fn test_missing_spelling_table_is_error() {
        let mut config = Config::default();
        config.generator.spelling_table = Some(PathBuf::from("/nonexistent/spelling.toml"));

        let llm = Arc::new(MockProvider::new(TANGLISH_METADATA));
        let result = build_pipeline(llm, invoker(), &config, false);
        assert!(matches!(result, Err(CliError::Generator(_))));
    }
}
