//! AutoPost Corpus Storage
//!
//! In-memory corpus of enriched posts with JSON file persistence.
//!
//! # Architecture
//!
//! - A `Vec<EnrichedPost>` arena in corpus order
//! - A derived tag index (tag → positions) built once at construction
//! - Read-only after construction, so it can be shared freely
//!
//! # Examples
//!
//! ```
//! use autopost_domain::{EnrichedPost, Language, Length, PostMetadata, RawPost};
//! use autopost_store::CorpusStore;
//!
//! let post = EnrichedPost::from_parts(
//!     RawPost::new("One line"),
//!     PostMetadata { line_count: 1, language: Language::English, tags: vec!["Motivation".into()] },
//! );
//! let store = CorpusStore::from_posts(vec![post]);
//!
//! let examples: Vec<_> = store.filter(Length::Short, Language::English, "Motivation").collect();
//! assert_eq!(examples.len(), 1);
//! ```

#![warn(missing_docs)]

mod corpus;
mod file;

use std::path::PathBuf;
use thiserror::Error;

pub use corpus::CorpusStore;
pub use file::{read_raw_posts, write_json_pretty};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Corpus file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid JSON, or not the expected shape
    #[error("Invalid corpus JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record is structurally valid JSON but unusable
    #[error("Invalid post at index {index}: {reason}")]
    InvalidPost {
        /// Position in the corpus array
        index: usize,
        /// What is wrong with it
        reason: String,
    },
}
