//! Post records: raw corpus entries and their enriched form

use crate::language::{Language, Length};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys owned by [`PostMetadata`]. Raw fields with these names are replaced on enrichment.
pub const METADATA_KEYS: [&str; 3] = ["line_count", "language", "tags"];

/// A post as it appears in the raw corpus file
///
/// Only `text` is required. Any other fields are kept verbatim and written
/// back out with the enriched record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    /// Post body
    pub text: String,

    /// Additional fields from the source record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawPost {
    /// Create a raw post with no extra fields
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra: Map::new(),
        }
    }
}

/// Metadata the extractor derives from a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMetadata {
    /// Number of lines in the post
    pub line_count: u32,

    /// Language register
    pub language: Language,

    /// Topical tags, duplicates removed, first occurrence order
    pub tags: Vec<String>,
}

/// A raw post with its metadata merged in
///
/// Serialized as one flat JSON object, matching the processed corpus file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPost {
    /// Post body, possibly spelling-normalized for Tanglish posts
    pub text: String,

    /// Number of lines in the post
    pub line_count: u32,

    /// Language register
    pub language: Language,

    /// Canonical tags once the corpus has been canonicalized
    pub tags: Vec<String>,

    /// Additional fields carried over from the raw record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EnrichedPost {
    /// Merge a raw post with its extracted metadata
    ///
    /// Metadata wins over same-named raw fields.
    pub fn from_parts(raw: RawPost, metadata: PostMetadata) -> Self {
        let RawPost { text, mut extra } = raw;
        for key in METADATA_KEYS {
            extra.remove(key);
        }

        Self {
            text,
            line_count: metadata.line_count,
            language: metadata.language,
            tags: metadata.tags,
            extra,
        }
    }

    /// Length bucket derived from the line count
    pub fn length(&self) -> Length {
        Length::from_line_count(self.line_count)
    }

    /// Whether the post carries exactly this tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Metadata view of this post
    pub fn metadata(&self) -> PostMetadata {
        PostMetadata {
            line_count: self.line_count,
            language: self.language,
            tags: self.tags.clone(),
        }
    }
}
