//! AutoPost Extractor
//!
//! Turns a raw corpus of LinkedIn posts into the processed corpus used for
//! few-shot drafting.
//!
//! # Overview
//!
//! Each post goes through one model call that returns its line count,
//! language and up to two topical tags. Once every post is enriched, a
//! single corpus-wide call merges near-duplicate tags into canonical labels.
//!
//! # Architecture
//!
//! ```text
//! raw_posts.json → MetadataExtractor → TagCanonicalizer → processed_posts.json
//! ```
//!
//! Every model call goes through the shared `ResilientInvoker`. Model
//! output is parsed strictly; a malformed response is a schema error and is
//! not retried.
//!
//! # Example Usage
//!
//! ```
//! use autopost_extractor::{EnrichmentPipeline, ExtractorConfig};
//! use autopost_domain::RawPost;
//! use autopost_llm::{MockProvider, ResilientInvoker, RetryPolicy};
//! use std::sync::Arc;
//!
//! let mut llm = MockProvider::new(
//!     r#"{"line_count": 1, "language": "English", "tags": ["Motivation"]}"#,
//! );
//! llm.add_response("list of tags", r#"{"Motivation": "Motivation"}"#);
//!
//! let invoker = Arc::new(ResilientInvoker::new(RetryPolicy::immediate(3)));
//! let pipeline = EnrichmentPipeline::new(Arc::new(llm), invoker, ExtractorConfig::default())?;
//!
//! let (posts, report) = pipeline.enrich(vec![RawPost::new("Keep going!")])?;
//! assert_eq!(posts[0].tags, vec!["Motivation"]);
//! assert_eq!(report.posts_processed, 1);
//! # Ok::<(), autopost_extractor::ExtractorError>(())
//! ```

#![warn(missing_docs)]

mod canonicalizer;
mod config;
mod error;
mod extractor;
mod parser;
mod pipeline;
mod prompt;
mod report;

#[cfg(test)]
mod tests;

pub use canonicalizer::{collect_tags, TagCanonicalizer};
pub use config::{ExtractorConfig, MAX_TAGS_LIMIT};
pub use error::ExtractorError;
pub use extractor::MetadataExtractor;
pub use parser::{parse_metadata, parse_tag_map};
pub use pipeline::EnrichmentPipeline;
pub use report::EnrichmentReport;
