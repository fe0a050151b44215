//! Language and length vocabularies used for corpus filtering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language register of a post
///
/// The serialized spellings are exactly `"English"` and `"Tanglish"`.
/// Model output using any other spelling is rejected, not coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Plain English
    English,

    /// Mixed Tamil and English, written in Latin script
    Tanglish,
}

impl Language {
    /// All known languages, in display order
    pub const ALL: [Language; 2] = [Language::English, Language::Tanglish];

    /// Get the canonical spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Tanglish => "Tanglish",
        }
    }

    /// Parse the canonical spelling. Case and whitespace variants are not accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "English" => Some(Language::English),
            "Tanglish" => Some(Language::Tanglish),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid language: {}", s))
    }
}

/// Length bucket of a post
///
/// - Short: 1 to 5 lines
/// - Medium: 6 to 10 lines
/// - Long: 11 to 15 lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Length {
    /// Up to five lines
    Short,

    /// Six to ten lines
    Medium,

    /// More than ten lines
    Long,
}

impl Length {
    /// All buckets, shortest first
    pub const ALL: [Length; 3] = [Length::Short, Length::Medium, Length::Long];

    /// Classify a post by its line count
    pub fn from_line_count(line_count: u32) -> Self {
        match line_count {
            0..=5 => Length::Short,
            6..=10 => Length::Medium,
            _ => Length::Long,
        }
    }

    /// Get the bucket name
    pub fn as_str(&self) -> &'static str {
        match self {
            Length::Short => "Short",
            Length::Medium => "Medium",
            Length::Long => "Long",
        }
    }

    /// Line range phrase used in generation prompts
    pub fn line_range(&self) -> &'static str {
        match self {
            Length::Short => "1 to 5 lines",
            Length::Medium => "6 to 10 lines",
            Length::Long => "11 to 15 lines",
        }
    }

    /// Parse a bucket name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" => Some(Length::Short),
            "medium" => Some(Length::Medium),
            "long" => Some(Length::Long),
            _ => None,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Length {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid length: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse_is_exact() {
        assert_eq!(Language::parse("English"), Some(Language::English));
        assert_eq!(Language::parse("Tanglish"), Some(Language::Tanglish));
        assert_eq!(Language::parse("english"), None);
        assert_eq!(Language::parse("Tamil"), None);
        assert_eq!(Language::parse(" Tanglish"), None);
    }

    #[test]
    fn test_language_serde_spelling() {
        let json = serde_json::to_string(&Language::Tanglish).unwrap();
        assert_eq!(json, "\"Tanglish\"");
        assert!(serde_json::from_str::<Language>("\"TANGLISH\"").is_err());
    }

    #[test]
    fn test_length_buckets() {
        assert_eq!(Length::from_line_count(0), Length::Short);
        assert_eq!(Length::from_line_count(5), Length::Short);
        assert_eq!(Length::from_line_count(6), Length::Medium);
        assert_eq!(Length::from_line_count(10), Length::Medium);
        assert_eq!(Length::from_line_count(11), Length::Long);
        assert_eq!(Length::from_line_count(40), Length::Long);
    }

    #[test]
    fn test_length_parse() {
        assert_eq!("medium".parse::<Length>(), Ok(Length::Medium));
        assert_eq!(Length::parse("LONG"), Some(Length::Long));
        assert!("tiny".parse::<Length>().is_err());
    }

    #[test]
    fn test_line_range_phrases() {
        assert_eq!(Length::Short.line_range(), "1 to 5 lines");
        assert_eq!(Length::Long.line_range(), "11 to 15 lines");
    }
}
