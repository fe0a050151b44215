//! Generation requests as supplied by the drafting UI

use crate::language::{Language, Length};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the post is for
///
/// Drives which fallback templates are used and whether a reason is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PostPurpose {
    /// Thoughts, lessons, general updates
    #[default]
    General,

    /// Celebrating a milestone or result
    Achievement,

    /// Looking for a new role
    JobSearch,

    /// Moving into a different field or role
    CareerChange,

    /// Announcing open positions
    Hiring,
}

impl PostPurpose {
    /// All purposes, in display order
    pub const ALL: [PostPurpose; 5] = [
        PostPurpose::General,
        PostPurpose::Achievement,
        PostPurpose::JobSearch,
        PostPurpose::CareerChange,
        PostPurpose::Hiring,
    ];

    /// Whether requests with this purpose must explain a reason
    pub fn requires_reason(&self) -> bool {
        matches!(self, PostPurpose::JobSearch | PostPurpose::CareerChange)
    }

    /// Get the purpose name
    pub fn as_str(&self) -> &'static str {
        match self {
            PostPurpose::General => "general",
            PostPurpose::Achievement => "achievement",
            PostPurpose::JobSearch => "job-search",
            PostPurpose::CareerChange => "career-change",
            PostPurpose::Hiring => "hiring",
        }
    }

    /// Parse a purpose name (case-insensitive, `_` and `-` interchangeable)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "general" => Some(PostPurpose::General),
            "achievement" => Some(PostPurpose::Achievement),
            "job-search" => Some(PostPurpose::JobSearch),
            "career-change" => Some(PostPurpose::CareerChange),
            "hiring" => Some(PostPurpose::Hiring),
            _ => None,
        }
    }
}

impl fmt::Display for PostPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PostPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid post purpose: {}", s))
    }
}

/// A single drafting request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Desired length bucket
    pub length: Length,

    /// Desired language register
    pub language: Language,

    /// Topic, matched against canonical corpus tags
    pub topic: String,

    /// Author's profession
    pub profession: String,

    /// Why the author is posting (required for some purposes)
    #[serde(default)]
    pub reason: Option<String>,

    /// Free-form keywords to weave in
    #[serde(default)]
    pub keywords: Option<String>,

    /// Post purpose category
    #[serde(default)]
    pub purpose: PostPurpose,
}

impl GenerationRequest {
    /// Create a request with the required fields and a general purpose
    pub fn new(
        length: Length,
        language: Language,
        topic: impl Into<String>,
        profession: impl Into<String>,
    ) -> Self {
        Self {
            length,
            language,
            topic: topic.into(),
            profession: profession.into(),
            reason: None,
            keywords: None,
            purpose: PostPurpose::General,
        }
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the keywords
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Set the purpose
    pub fn with_purpose(mut self, purpose: PostPurpose) -> Self {
        self.purpose = purpose;
        self
    }

    /// Reason, if present and not blank
    pub fn reason_text(&self) -> Option<&str> {
        non_blank(self.reason.as_deref())
    }

    /// Keywords, if present and not blank
    pub fn keywords_text(&self) -> Option<&str> {
        non_blank(self.keywords.as_deref())
    }

    /// Keywords split on commas, trimmed, blanks dropped
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords_text()
            .map(|k| {
                k.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
