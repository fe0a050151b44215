//! Drafting prompt assembly

use crate::config::MAX_EXAMPLES_LIMIT;
use autopost_domain::{EnrichedPost, GenerationRequest, Language};

/// Renders a [`GenerationRequest`] and its few-shot examples into a prompt
///
/// Pure: no I/O, no model calls. At most two examples are ever rendered,
/// whatever the caller passes in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptAssembler;

impl PromptAssembler {
    /// Create an assembler
    pub fn new() -> Self {
        Self
    }

    /// Build the drafting prompt
    pub fn build(&self, request: &GenerationRequest, examples: &[&EnrichedPost]) -> String {
        let mut prompt = String::new();
        prompt.push_str("Generate a LinkedIn post using the below information. No preamble.\n\n");

        let mut fields = vec![
            format!("Topic: {}", request.topic.trim()),
            format!("Length: {}", request.length.line_range()),
            format!("Language: {}", request.language),
            format!("Profession: {}", request.profession.trim()),
        ];
        if let Some(reason) = request.reason_text() {
            fields.push(format!("Reason for posting: {}", reason));
        }
        if let Some(keywords) = request.keywords_text() {
            fields.push(format!("Keywords to include: {}", keywords));
        }

        for (i, field) in fields.iter().enumerate() {
            prompt.push_str(&format!("{}) {}\n", i + 1, field));
        }

        if request.language == Language::Tanglish {
            prompt.push_str(TANGLISH_NOTE);
            prompt.push_str("\n\n");
            prompt.push_str(TANGLISH_STYLE);
        }

        let shown = &examples[..examples.len().min(MAX_EXAMPLES_LIMIT)];
        if !shown.is_empty() {
            prompt.push_str("\nUse the writing style as per the following examples.");
            for (i, post) in shown.iter().enumerate() {
                prompt.push_str(&format!("\n\nExample {}:\n\n{}", i + 1, post.text));
            }
            prompt.push('\n');
        }

        prompt
    }
}

const TANGLISH_NOTE: &str = "Tanglish is a mix of Tamil and English. \
The script for the generated post should always be in English.";

const TANGLISH_STYLE: &str = r#"Follow this Tanglish writing style strictly:
- Use simple, clear English words mixed with Tamil phrases.
- Always spell Tamil words in the most phonetic and readable way.
- Avoid complex Tamil words that don't transliterate well.
- Use natural conversational flow, like how native speakers text.
- Maintain correct spelling and pronunciation.

Style example 1:
"Job search vera level stress da!
Call varuma nu wait panna, mail varuma nu check panna, last la 'We regret to inform you' nu oru mail.
Aana keep going! One rejection doesn't define your future. Un effort kandippa result kudukkum!
Oru naal, neeyum 'We're happy to offer you the position' nu read pannuvey."

Style example 2:
"Networking panna kashtama irukku nu oru feeling.
Aana bro, romba simple.
1. DM panna oru 'Hi' sollu.
2. Interest irukka field la leaders oda post la engage pannu.
3. Calls, webinars la participate pannu.
Oru naal unga name therinja, opportunities varum."

Now, generate a new LinkedIn post in the same Tanglish style, keeping spelling and pronunciation correct.
"#;
