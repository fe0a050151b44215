//! Lookup-based Tanglish spelling normalization
//!
//! This is a fixed table of literal substring replacements, not a
//! transliteration engine. Entries are applied in table order, and a later
//! entry may rewrite text produced by an earlier one. Running the normalizer
//! twice is not guaranteed to give the same result as running it once.

use serde::Deserialize;

/// Table shipped with the crate
pub const BUILTIN_TANGLISH_TABLE: &str = include_str!("../data/tanglish_spelling.toml");

/// One `from → to` replacement
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Replacement {
    /// Literal text to find
    pub from: String,

    /// Text to put in its place
    pub to: String,
}

#[derive(Debug, Deserialize)]
struct SpellingTable {
    #[serde(default)]
    replacement: Vec<Replacement>,
}

/// Ordered substring-replacement pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpellingNormalizer {
    replacements: Vec<Replacement>,
}

impl SpellingNormalizer {
    /// Build from `(from, to)` pairs, keeping their order
    ///
    /// Returns an error if any `from` is empty.
    pub fn from_pairs<I, F, T>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        let replacements = pairs
            .into_iter()
            .map(|(from, to)| Replacement {
                from: from.into(),
                to: to.into(),
            })
            .collect();
        Self::from_replacements(replacements)
    }

    /// Parse a TOML table of `[[replacement]]` entries
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let table: SpellingTable = toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse spelling table: {}", e))?;
        Self::from_replacements(table.replacement)
    }

    /// The table shipped with the crate
    pub fn builtin() -> Result<Self, String> {
        Self::from_toml(BUILTIN_TANGLISH_TABLE)
    }

    fn from_replacements(replacements: Vec<Replacement>) -> Result<Self, String> {
        if let Some(idx) = replacements.iter().position(|r| r.from.is_empty()) {
            return Err(format!("Spelling table entry {} has an empty 'from'", idx));
        }
        Ok(Self { replacements })
    }

    /// Apply every replacement, in order, to `text`
    pub fn normalize(&self, text: &str) -> String {
        self.replacements
            .iter()
            .fold(text.to_string(), |acc, r| {
                if acc.contains(r.from.as_str()) {
                    acc.replace(r.from.as_str(), &r.to)
                } else {
                    acc
                }
            })
    }

    /// Entries in application order
    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}
