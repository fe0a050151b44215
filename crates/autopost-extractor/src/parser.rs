//! Parse LLM output into typed metadata and tag maps
//!
//! Parsing is strict. Anything that does not match the requested shape is a
//! schema error, and schema errors are never retried.

use crate::error::ExtractorError;
use autopost_domain::post::METADATA_KEYS;
use autopost_domain::{Language, PostMetadata};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Parse the metadata object for one post
///
/// `max_tags` bounds the number of distinct tags accepted.
pub fn parse_metadata(response: &str, max_tags: usize) -> Result<PostMetadata, ExtractorError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(&json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::Schema("Expected JSON object".to_string()))?;

    check_keys(obj)?;

    let line_count = obj
        .get("line_count")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            ExtractorError::Schema("'line_count' must be a non-negative integer".to_string())
        })?;

    let language_str = obj
        .get("language")
        .and_then(Value::as_str)
        .ok_or_else(|| ExtractorError::Schema("'language' must be a string".to_string()))?;
    let language = Language::parse(language_str).ok_or_else(|| {
        ExtractorError::Schema(format!("Unsupported language '{}'", language_str))
    })?;

    let tags = parse_tags(obj.get("tags"), max_tags)?;

    Ok(PostMetadata {
        line_count,
        language,
        tags,
    })
}

/// Parse the tag unification response into a raw string map
///
/// Completion against the input tag set happens in the caller.
pub fn parse_tag_map(response: &str) -> Result<BTreeMap<String, String>, ExtractorError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(&json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::Schema("Expected JSON object of tags".to_string()))?;

    obj.iter()
        .map(|(raw, canonical)| {
            canonical
                .as_str()
                .map(|c| (raw.clone(), c.to_string()))
                .ok_or_else(|| {
                    ExtractorError::Schema(format!("Tag '{}' maps to a non-string value", raw))
                })
        })
        .collect()
}

fn check_keys(obj: &Map<String, Value>) -> Result<(), ExtractorError> {
    for key in METADATA_KEYS {
        if !obj.contains_key(key) {
            return Err(ExtractorError::Schema(format!("Missing key '{}'", key)));
        }
    }
    if let Some(extra) = obj.keys().find(|k| !METADATA_KEYS.contains(&k.as_str())) {
        return Err(ExtractorError::Schema(format!("Unexpected key '{}'", extra)));
    }
    Ok(())
}

fn parse_tags(value: Option<&Value>, max_tags: usize) -> Result<Vec<String>, ExtractorError> {
    let array = value
        .and_then(Value::as_array)
        .ok_or_else(|| ExtractorError::Schema("'tags' must be an array".to_string()))?;

    let mut seen = BTreeSet::new();
    let mut tags = Vec::with_capacity(array.len());
    for item in array {
        let tag = item
            .as_str()
            .ok_or_else(|| ExtractorError::Schema("Tags must be strings".to_string()))?
            .trim();
        if tag.is_empty() {
            return Err(ExtractorError::Schema("Empty tag".to_string()));
        }
        if seen.insert(tag) {
            tags.push(tag.to_string());
        }
    }

    if tags.len() > max_tags {
        return Err(ExtractorError::Schema(format!(
            "Expected at most {} tags, got {}",
            max_tags,
            tags.len()
        )));
    }

    Ok(tags)
}

/// Extract JSON from response, handling markdown code blocks
///
/// The fence may sit on the same line as the JSON, with or without a `json`
/// language tag, and the closing fence may be missing.
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return Ok(trimmed.to_string());
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    let body = rest.trim();
    if body.is_empty() {
        return Err(ExtractorError::Schema("Empty code block".to_string()));
    }
    Ok(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_valid_metadata() {
        let response =
            r#"{"line_count": 4, "language": "Tanglish", "tags": ["Motivation", "Job Search"]}"#;

        let metadata = parse_metadata(response, 3).unwrap();
        assert_eq!(metadata.line_count, 4);
        assert_eq!(metadata.language, Language::Tanglish);
        assert_eq!(metadata.tags, vec!["Motivation", "Job Search"]);
    }

    #[test]
    fn test_parse_metadata_with_markdown_wrapper() {
        let response = r#"```json
{"line_count": 2, "language": "English", "tags": ["Networking"]}
```"#;

        let metadata = parse_metadata(response, 3).unwrap();
        assert_eq!(metadata.language, Language::English);
        assert_eq!(metadata.tags, vec!["Networking"]);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_metadata("This is not JSON", 3);
        assert!(matches!(result, Err(ExtractorError::Schema(_))));
    }

    #[test]
    fn test_parse_not_object() {
        let result = parse_metadata(r#"["Motivation"]"#, 3);
        assert!(result.unwrap_err().is_schema());
    }

    #[test]
    fn test_language_spelling_is_exact() {
        for language in ["Tamil", "english", "TANGLISH", "Hindi"] {
            let response = format!(
                r#"{{"line_count": 1, "language": "{}", "tags": ["Motivation"]}}"#,
                language
            );
            assert!(parse_metadata(&response, 3).unwrap_err().is_schema());
        }
    }

    #[test]
    fn test_missing_and_extra_keys() {
        let missing = r#"{"line_count": 1, "language": "English"}"#;
        assert!(parse_metadata(missing, 3).unwrap_err().is_schema());

        let extra = r#"{"line_count": 1, "language": "English", "tags": [], "mood": "happy"}"#;
        assert!(parse_metadata(extra, 3).unwrap_err().is_schema());
    }

    #[test]
    fn test_line_count_must_be_unsigned_integer() {
        for value in ["-1", "2.5", "\"4\""] {
            let response = format!(
                r#"{{"line_count": {}, "language": "English", "tags": []}}"#,
                value
            );
            assert!(parse_metadata(&response, 3).unwrap_err().is_schema());
        }
    }

    #[test]
    fn test_tags_trimmed_and_deduplicated() {
        let response = r#"{"line_count": 3, "language": "English",
            "tags": [" Motivation ", "Motivation", "Job Search"]}"#;

        let metadata = parse_metadata(response, 2).unwrap();
        assert_eq!(metadata.tags, vec!["Motivation", "Job Search"]);
    }

    #[test]
    fn test_empty_tag_rejected() {
        let response = r#"{"line_count": 3, "language": "English", "tags": ["  "]}"#;
        assert!(parse_metadata(response, 3).unwrap_err().is_schema());
    }

    #[test]
    fn test_too_many_tags_rejected() {
        let response = r#"{"line_count": 3, "language": "English",
            "tags": ["A", "B", "C", "D"]}"#;
        assert!(parse_metadata(response, 3).unwrap_err().is_schema());
    }

    #[test]
    fn test_parse_tag_map() {
        let response = r#"{"Fresh Graduates": "Freshers", "Motivation": "Motivation"}"#;
        let map = parse_tag_map(response).unwrap();
        assert_eq!(map.get("Fresh Graduates").map(String::as_str), Some("Freshers"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_parse_tag_map_rejects_non_string_values() {
        assert!(parse_tag_map(r#"{"Motivation": 3}"#).unwrap_err().is_schema());
        assert!(parse_tag_map(r#"["Motivation"]"#).unwrap_err().is_schema());
    }

    #[test]
    fn test_extract_json_from_plain_json() {
        let json = r#"{"key": "value"}"#;
        assert_eq!(extract_json(json).unwrap(), json);
    }

    #[test]
    fn test_extract_json_from_markdown_without_language() {
        let response = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(response).unwrap(), r#"{"key": "value"}"#);
    }

    #[test]
    fn test_parse_metadata_single_line_fence() {
        let response =
            r#"```json {"line_count": 2, "language": "English", "tags": ["Networking"]}```"#;

        let metadata = parse_metadata(response, 3).unwrap();
        assert_eq!(metadata.line_count, 2);
        assert_eq!(metadata.tags, vec!["Networking"]);
    }

    #[test]
    fn test_extract_json_empty_fence() {
        assert!(extract_json("```json\n```").unwrap_err().is_schema());
        assert!(extract_json("```").unwrap_err().is_schema());
    }

    #[test]
    fn test_extract_json_unterminated_fence() {
        let response = "```json\n{\"key\": \"value\"}";
        assert_eq!(extract_json(response).unwrap(), r#"{"key": "value"}"#);
    }

    proptest! {
        #[test]
        fn prop_only_exact_language_spellings_accepted(language in "[A-Za-z]{1,10}") {
            let response = serde_json::json!({
                "line_count": 2,
                "language": language,
                "tags": ["Motivation"],
            })
            .to_string();

            let result = parse_metadata(&response, 3);
            if language == "English" || language == "Tanglish" {
                prop_assert!(result.is_ok());
            } else {
                prop_assert!(result.unwrap_err().is_schema());
            }
        }

        #[test]
        fn prop_accepted_tags_are_trimmed_and_distinct(
            tags in prop::collection::vec("[ ]{0,2}[A-Za-z][A-Za-z ]{0,8}", 0..6)
        ) {
            let response = serde_json::json!({
                "line_count": 1,
                "language": "English",
                "tags": tags,
            })
            .to_string();

            if let Ok(metadata) = parse_metadata(&response, 3) {
                prop_assert!(metadata.tags.len() <= 3);
                let distinct: BTreeSet<&String> = metadata.tags.iter().collect();
                prop_assert_eq!(distinct.len(), metadata.tags.len());
                for tag in &metadata.tags {
                    prop_assert_eq!(tag.trim(), tag.as_str());
                    prop_assert!(!tag.is_empty());
                }
            }
        }
    }
}
