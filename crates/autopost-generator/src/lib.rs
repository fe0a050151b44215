//! AutoPost Generator
//!
//! Drafts LinkedIn posts in the style of a processed corpus.
//!
//! A request names a topic, length, language and the author's profession.
//! Up to two corpus posts with the same length, language and topic tag are
//! used as few-shot examples. Tanglish output is passed through the spelling
//! table before it is returned.
//!
//! When the model path fails for any reason the generator falls back to a
//! locally templated post, so callers always get text back.
//!
//! # Example
//!
//! ```
//! use autopost_domain::{GenerationRequest, Language, Length};
//! use autopost_generator::{GeneratorConfig, PostGenerator, PostSource};
//! use autopost_llm::{MockProvider, ResilientInvoker, RetryPolicy};
//! use autopost_store::CorpusStore;
//! use std::sync::Arc;
//!
//! let generator = PostGenerator::new(
//!     Arc::new(MockProvider::failing("offline")),
//!     Arc::new(ResilientInvoker::new(RetryPolicy::immediate(1))),
//!     Arc::new(CorpusStore::default()),
//!     GeneratorConfig::default(),
//! )?;
//!
//! let request = GenerationRequest::new(Length::Short, Language::English, "Networking", "Nurse");
//! let post = generator.generate_detailed(&request)?;
//! assert_eq!(post.source, PostSource::Fallback);
//! assert!(post.text.contains("Nurse"));
//! # Ok::<(), autopost_generator::GeneratorError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod prompt;

pub use config::{GeneratorConfig, MAX_EXAMPLES_LIMIT};
pub use error::{GeneratorError, WARNING_MARKER};
pub use fallback::FallbackGenerator;
pub use generator::{GeneratedPost, PostGenerator, PostSource};
pub use prompt::PromptAssembler;
