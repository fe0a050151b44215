//! Tags command implementation.

use crate::cli::TagsArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use autopost_store::CorpusStore;

/// Execute the tags command.
pub fn execute_tags(args: TagsArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let path = args
        .corpus
        .unwrap_or_else(|| config.corpus.processed_path.clone());
    let store = CorpusStore::load(&path)?;

    println!("{}", formatter.format_tags(&store)?);
    Ok(())
}
