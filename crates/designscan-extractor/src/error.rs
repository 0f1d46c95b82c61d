//! Error types for the Extractor

use designscan_domain::FindingField;
use thiserror::Error;

/// Characters of a raw reply shown in the error message
const RAW_PREVIEW_CHARS: usize = 200;

/// Errors that can occur during extraction and rendering
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Empty or duplicate categories, or a document that cannot be serialized
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The text-generation service failed, timed out or returned an error status
    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    /// The reply held no parseable JSON array, directly or in a fenced block
    #[error("Unparsable response: {reason} (reply starts: {:?})", preview(.raw))]
    UnparsableResponse {
        /// Why the last parse attempt failed
        reason: String,
        /// The reply text, verbatim
        raw: String,
    },

    /// A finding lacks a field required for rendering
    #[error("Finding {index} is missing field '{field}'")]
    FieldMissing {
        /// Index of the offending finding
        index: usize,
        /// The absent field
        field: FindingField,
    },

    /// CSV writer failure
    #[error("CSV error: {0}")]
    Csv(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// The raw reply text, for unparsable responses
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            ExtractorError::UnparsableResponse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl From<csv::Error> for ExtractorError {
    fn from(e: csv::Error) -> Self {
        ExtractorError::Csv(e.to_string())
    }
}

fn preview(raw: &str) -> String {
    raw.chars().take(RAW_PREVIEW_CHARS).collect()
}
