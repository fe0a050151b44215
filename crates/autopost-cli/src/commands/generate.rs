//! Generate command implementation.

use super::{build_invoker, build_provider};
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use autopost_domain::traits::LlmProvider;
use autopost_domain::GenerationRequest;
use autopost_generator::PostGenerator;
use autopost_store::CorpusStore;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Turn command arguments into a generation request.
pub fn build_request(args: &GenerateArgs) -> GenerationRequest {
    let mut request = GenerationRequest::new(
        args.length.into(),
        args.language.into(),
        args.topic.clone(),
        args.profession.clone(),
    )
    .with_purpose(args.purpose.into());

    if let Some(reason) = &args.reason {
        request = request.with_reason(reason.clone());
    }
    if let Some(keywords) = &args.keywords {
        request = request.with_keywords(keywords.clone());
    }
    request
}

/// Draft a post and format it for output.
///
/// A rejected request is returned as an error so the process exits non-zero.
pub fn draft<L>(
    generator: &PostGenerator<L>,
    request: &GenerationRequest,
    formatter: &Formatter,
) -> Result<String>
where
    L: LlmProvider,
    L::Error: fmt::Display,
{
    let post = generator.generate_detailed(request)?;
    formatter.format_post(&post)
}

/// Execute the generate command.
///
/// A missing processed corpus is not fatal; the post is drafted without
/// examples.
pub fn execute_generate(
    args: GenerateArgs,
    config: &Config,
    api_key: &str,
    formatter: &Formatter,
) -> Result<()> {
    let corpus_path = args
        .corpus
        .clone()
        .unwrap_or_else(|| config.corpus.processed_path.clone());

    let store = if corpus_path.exists() {
        CorpusStore::load(&corpus_path)?
    } else {
        warn!("No processed corpus at {}, drafting without examples", corpus_path.display());
        CorpusStore::default()
    };

    let mut generator_config = config.generator.clone();
    if args.seed.is_some() {
        generator_config.fallback_seed = args.seed;
    }

    let generator = PostGenerator::new(
        build_provider(config, api_key)?,
        build_invoker(config),
        Arc::new(store),
        generator_config,
    )?;

    let request = build_request(&args);
    println!("{}", draft(&generator, &request, formatter)?);
    Ok(())
}
