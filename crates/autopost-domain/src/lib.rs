//! AutoPost Domain Layer
//!
//! This crate contains the data model shared by every other AutoPost crate.
//! It holds no I/O and no network code; infrastructure lives elsewhere and
//! plugs in through the traits defined here.
//!
//! ## Key Concepts
//!
//! - **RawPost**: a corpus entry as loaded from disk, only `text` is required
//! - **PostMetadata**: line count, language and topical tags extracted by the model
//! - **EnrichedPost**: a raw post with its metadata merged in
//! - **TagMap**: the corpus-wide mapping from raw tags to canonical tags
//! - **GenerationRequest**: what the user asked for at drafting time
//!
//! ## Architecture
//!
//! - Pure data and transformations only
//! - The language-model boundary is the [`traits::LlmProvider`] trait
//! - The Tanglish spelling table is data, loaded into a [`SpellingNormalizer`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod language;
pub mod post;
pub mod request;
pub mod spelling;
pub mod tags;
pub mod traits;

// Re-exports for convenience
pub use language::{Language, Length};
pub use post::{EnrichedPost, PostMetadata, RawPost};
pub use request::{GenerationRequest, PostPurpose};
pub use spelling::SpellingNormalizer;
pub use tags::TagMap;
