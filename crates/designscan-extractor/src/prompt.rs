//! LLM prompt engineering for findings extraction

use crate::error::ExtractorError;
use designscan_domain::{Category, CompletionRequest, NOT_APPLICABLE, NOT_FOUND};
use serde::Serialize;

/// Serialized document text, cut to the forwarding limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentExcerpt {
    /// Text that will be forwarded
    pub text: String,

    /// Length of the full serialized document (characters)
    pub original_chars: usize,

    /// Whether `text` is shorter than the full serialization
    pub truncated: bool,
}

impl DocumentExcerpt {
    /// Length of the forwarded text (characters)
    pub fn char_len(&self) -> usize {
        if self.truncated {
            self.text.chars().count()
        } else {
            self.original_chars
        }
    }
}

/// Serialize a document as pretty JSON and keep at most `max_chars` characters
///
/// Truncation works on the serialized text, so the excerpt may end in the
/// middle of a JSON token. It never splits a character.
pub fn serialize_document<T>(document: &T, max_chars: usize) -> Result<DocumentExcerpt, ExtractorError>
where
    T: Serialize + ?Sized,
{
    let full = serde_json::to_string_pretty(document)
        .map_err(|e| ExtractorError::InvalidInput(format!("Document is not serializable: {}", e)))?;

    let original_chars = full.chars().count();
    if original_chars <= max_chars {
        return Ok(DocumentExcerpt {
            text: full,
            original_chars,
            truncated: false,
        });
    }

    Ok(DocumentExcerpt {
        text: truncate_chars(&full, max_chars).to_string(),
        original_chars,
        truncated: true,
    })
}

/// Longest prefix of `text` holding at most `max_chars` characters
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Builds the completion request for one extraction
pub struct PromptBuilder<'a> {
    categories: &'a [Category],
    document: &'a str,
    temperature: f32,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder over already-truncated document text
    pub fn new(categories: &'a [Category], document: &'a str) -> Self {
        Self {
            categories,
            document,
            temperature: 0.0,
        }
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Build the complete completion request
    pub fn build(&self) -> CompletionRequest {
        CompletionRequest::new(SYSTEM_INSTRUCTIONS, self.user_message())
            .with_temperature(self.temperature)
    }

    fn user_message(&self) -> String {
        let mut message = String::new();

        // 1. What to look for
        message.push_str(
            "Analyze this design file JSON and extract information for these categories:\n\n",
        );
        for category in self.categories {
            message.push_str(&format!("- {}\n", category));
        }
        message.push('\n');

        // 2. Field contract and reply shape
        message.push_str(&field_contract());
        message.push_str("\n\n");
        message.push_str(OUTPUT_FORMAT);
        message.push_str("\n\n");

        // 3. The document itself
        message.push_str("Design file JSON:\n");
        message.push_str(self.document);
        message.push('\n');

        message
    }
}

const SYSTEM_INSTRUCTIONS: &str = r#"You are a precise design file analysis tool.

CRITICAL RULES:
1. Extract ONLY information explicitly present in the JSON
2. NEVER infer, assume, or fabricate information
3. If a category has no relevant data, mark the finding as "Not Found"
4. Cite the specific location in the JSON structure where the evidence appears
5. Be conservative - when in doubt, say "Not Found""#;

const OUTPUT_FORMAT: &str = r#"Return a JSON array with this EXACT structure, one object per category, in the order listed:
[
  {
    "category": "Category Name",
    "finding": "description or 'Not Found'",
    "confidence": "High/Medium/Low/None",
    "source": "location or 'N/A'"
  }
]

Return ONLY the JSON array, no markdown code blocks, no explanation."#;

fn field_contract() -> String {
    format!(
        "For each category, return:\n\
         - category: exact category name from the list\n\
         - finding: the extracted information, or \"{nf}\" if not present\n\
         - confidence: \"High\" / \"Medium\" / \"Low\" / \"None\" (use \"None\" for \"{nf}\")\n\
         - source: where in the JSON you found it (e.g., \"Page 2, Frame: Login\") or \"{na}\"",
        nf = NOT_FOUND,
        na = NOT_APPLICABLE,
    )
}
