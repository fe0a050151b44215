//! LLM prompt engineering for metadata extraction and tag unification

use std::collections::BTreeSet;

/// Shape description handed to providers with a JSON output mode
pub const METADATA_SCHEMA: &str =
    r#"{"line_count": integer, "language": "English" | "Tanglish", "tags": [string]}"#;

/// Shape description for the tag unification response
pub const TAG_MAP_SCHEMA: &str = r#"{"<original tag>": "<unified tag>"}"#;

/// Builds the per-post metadata extraction prompt
pub struct MetadataPromptBuilder<'a> {
    post: &'a str,
    max_tags: usize,
}

impl<'a> MetadataPromptBuilder<'a> {
    /// Create a new prompt builder for one post
    pub fn new(post: &'a str) -> Self {
        Self { post, max_tags: 2 }
    }

    /// Set how many tags to ask for
    pub fn with_max_tags(mut self, max_tags: usize) -> Self {
        self.max_tags = max_tags;
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(METADATA_INSTRUCTIONS);
        prompt.push_str(&format!(
            "3. tags is an array of text tags. Extract a maximum of {} tags.\n",
            self.max_tags
        ));
        prompt.push_str(LANGUAGE_RULE);
        prompt.push_str("\n\n");

        prompt.push_str("Here is the actual post:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.post);
        prompt.push_str("\n---\n\n");

        prompt.push_str(METADATA_FORMAT_REMINDER);
        prompt
    }
}

/// Builds the corpus-wide tag unification prompt
pub struct TagUnifyPromptBuilder<'a> {
    tags: &'a BTreeSet<String>,
}

impl<'a> TagUnifyPromptBuilder<'a> {
    /// Create a builder over the distinct corpus tags
    pub fn new(tags: &'a BTreeSet<String>) -> Self {
        Self { tags }
    }

    /// Build the complete unification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(UNIFY_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str("Here is the list of tags:\n");
        let list: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        prompt.push_str(&list.join(", "));
        prompt.push_str("\n\n");

        prompt.push_str(UNIFY_FORMAT_REMINDER);
        prompt
    }
}

const METADATA_INSTRUCTIONS: &str = r#"You are given a LinkedIn post. You need to extract number of lines, language of the post, and tags.
1. Return a valid JSON. No preamble.
2. JSON object should have exactly three keys: line_count, language, and tags.
"#;

const LANGUAGE_RULE: &str =
    "4. Language should be English or Tanglish (Tanglish means Tamil + English).";

const METADATA_FORMAT_REMINDER: &str = r#"Output format (JSON object only, no additional text):
{"line_count": 4, "language": "English", "tags": ["Motivation", "Job Search"]}

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;

const UNIFY_INSTRUCTIONS: &str = r#"I will give you a list of tags. You need to unify them with the following rules:
1. Merge similar tags into a single category.
   Example:
      - "Fresh Graduates", "Recent Graduates" → "Freshers"
      - "Job Hunting", "Job Search", "Applying for Jobs" → "Job Search"
      - "Motivation", "Inspiration", "Career Motivation" → "Motivation"
      - "Mental Health", "Job Search Anxiety", "Stress Management" → "Mental Health"
      - "Networking", "Building Connections", "Professional Networking" → "Networking"
      - "Self Improvement", "Personal Growth", "Career Growth" → "Self Improvement"
      - "Rejections", "Job Rejections", "Application Rejections" → "Rejections"
2. Each tag should follow title case convention. Example: "Motivation", "Job Search"
3. Output should be a JSON object (no preamble) mapping original tags to unified tags.
   Every tag in the list must appear as a key exactly as written."#;

const UNIFY_FORMAT_REMINDER: &str = r#"Output format (JSON object only, no additional text):
{"Fresh Graduates": "Freshers", "Job Hunting": "Job Search", "Motivation": "Motivation"}

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_prompt_includes_post() {
        let prompt = MetadataPromptBuilder::new("Rejections hurt, but keep going.").build();
        assert!(prompt.contains("Rejections hurt, but keep going."));
        assert!(prompt.contains("exactly three keys: line_count, language, and tags"));
        assert!(prompt.contains("English or Tanglish"));
    }

    #[test]
    fn test_metadata_prompt_tag_count() {
        let prompt = MetadataPromptBuilder::new("x").with_max_tags(3).build();
        assert!(prompt.contains("Extract a maximum of 3 tags."));
    }

    #[test]
    fn test_unify_prompt_lists_every_tag() {
        let tags: BTreeSet<String> = ["Recent Graduates", "Fresh Graduates", "Motivation"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        let prompt = TagUnifyPromptBuilder::new(&tags).build();

        assert!(prompt.contains("Fresh Graduates, Motivation, Recent Graduates"));
        assert!(prompt.contains("title case"));
        assert!(prompt.contains("mapping original tags to unified tags"));
    }
}
