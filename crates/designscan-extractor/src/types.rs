//! Result types for extraction

use designscan_domain::AnalysisResult;
use designscan_gatekeeper::ValidationWarning;
use serde::Serialize;

/// Result of an extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Findings in the order the service emitted them
    pub findings: AnalysisResult,

    /// Gatekeeper warnings (empty when no gatekeeper is attached)
    pub warnings: Vec<ValidationWarning>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// Whether the gatekeeper raised nothing
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Metadata about an extraction operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionMetadata {
    /// Name of the model that answered
    pub model_name: String,

    /// Number of categories requested
    pub category_count: usize,

    /// Length of the serialized document (characters)
    pub document_chars: usize,

    /// Length of the document text actually forwarded (characters)
    pub forwarded_chars: usize,

    /// Whether the document text was cut
    pub truncated: bool,

    /// Whether the reply needed the fenced-block fallback
    pub used_fallback: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
