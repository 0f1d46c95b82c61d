//! Findings and the categories they answer

use crate::Confidence;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel finding text when a category has no evidence in the document
pub const NOT_FOUND: &str = "Not Found";

/// Sentinel source when the finding is [`NOT_FOUND`]
pub const NOT_APPLICABLE: &str = "N/A";

/// A category label such as "Typography"
pub type Category = String;

/// Ordered findings for one document, in the order the service emitted them
pub type AnalysisResult = Vec<Finding>;

/// One result row for a single category
///
/// Fields hold whatever the text-generation service returned. A field the
/// service left out (or set to `null`) is `None`; nothing is defaulted, so
/// consumers that need all four fields must check for themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Finding {
    /// Category label echoed back by the service
    pub category: Option<String>,

    /// Extracted text, or "Not Found"
    pub finding: Option<String>,

    /// Confidence label as returned (normally High/Medium/Low/None)
    pub confidence: Option<String>,

    /// Location of the evidence within the document, or "N/A"
    pub source: Option<String>,
}

/// The four fields of a [`Finding`], in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingField {
    /// `category`
    Category,
    /// `finding`
    Finding,
    /// `confidence`
    Confidence,
    /// `source`
    Source,
}

impl FindingField {
    /// All fields in column order
    pub const ALL: [FindingField; 4] = [
        FindingField::Category,
        FindingField::Finding,
        FindingField::Confidence,
        FindingField::Source,
    ];

    /// JSON key used in service replies
    pub fn key(&self) -> &'static str {
        match self {
            FindingField::Category => "category",
            FindingField::Finding => "finding",
            FindingField::Confidence => "confidence",
            FindingField::Source => "source",
        }
    }

    /// Column header used in tabular output
    pub fn header(&self) -> &'static str {
        match self {
            FindingField::Category => "Category",
            FindingField::Finding => "Finding",
            FindingField::Confidence => "Confidence",
            FindingField::Source => "Source",
        }
    }
}

impl fmt::Display for FindingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Finding {
    /// Create a finding with all four fields present
    pub fn new(
        category: impl Into<String>,
        finding: impl Into<String>,
        confidence: Confidence,
        source: impl Into<String>,
    ) -> Self {
        Self {
            category: Some(category.into()),
            finding: Some(finding.into()),
            confidence: Some(confidence.as_str().to_string()),
            source: Some(source.into()),
        }
    }

    /// Create the canonical "Not Found" row for a category
    pub fn not_found(category: impl Into<String>) -> Self {
        Self::new(category, NOT_FOUND, Confidence::None, NOT_APPLICABLE)
    }

    /// Get a field by name
    pub fn get(&self, field: FindingField) -> Option<&str> {
        match field {
            FindingField::Category => self.category.as_deref(),
            FindingField::Finding => self.finding.as_deref(),
            FindingField::Confidence => self.confidence.as_deref(),
            FindingField::Source => self.source.as_deref(),
        }
    }

    /// Set a field by name
    pub fn set(&mut self, field: FindingField, value: Option<String>) {
        match field {
            FindingField::Category => self.category = value,
            FindingField::Finding => self.finding = value,
            FindingField::Confidence => self.confidence = value,
            FindingField::Source => self.source = value,
        }
    }

    /// First field (in column order) that is absent
    pub fn first_missing_field(&self) -> Option<FindingField> {
        FindingField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_none())
    }

    /// Whether all four fields are present
    pub fn is_complete(&self) -> bool {
        self.first_missing_field().is_none()
    }

    /// Parsed confidence label, if present and canonical
    pub fn confidence_level(&self) -> Option<Confidence> {
        self.confidence.as_deref().and_then(Confidence::parse)
    }

    /// Whether the finding text is the "Not Found" sentinel
    pub fn is_not_found(&self) -> bool {
        self.finding.as_deref() == Some(NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_row() {
        let finding = Finding::not_found("Color Scheme");
        assert_eq!(finding.category.as_deref(), Some("Color Scheme"));
        assert!(finding.is_not_found());
        assert_eq!(finding.confidence_level(), Some(Confidence::None));
        assert_eq!(finding.source.as_deref(), Some(NOT_APPLICABLE));
    }

    #[test]
    fn test_first_missing_field() {
        let mut finding = Finding::new("Typography", "Inter 16px", Confidence::High, "Page 1");
        assert!(finding.is_complete());

        finding.set(FindingField::Source, None);
        assert_eq!(finding.first_missing_field(), Some(FindingField::Source));

        finding.set(FindingField::Category, None);
        assert_eq!(finding.first_missing_field(), Some(FindingField::Category));
    }

    #[test]
    fn test_unknown_confidence_is_kept_raw() {
        let finding = Finding {
            confidence: Some("Very High".to_string()),
            ..Finding::default()
        };
        assert_eq!(finding.get(FindingField::Confidence), Some("Very High"));
        assert_eq!(finding.confidence_level(), None);
    }

    #[test]
    fn test_deserialize_partial_object() {
        let finding: Finding =
            serde_json::from_str(r#"{"category": "Typography", "finding": "Inter"}"#).unwrap();
        assert_eq!(finding.category.as_deref(), Some("Typography"));
        assert_eq!(finding.confidence, None);
        assert_eq!(finding.source, None);
    }

    #[test]
    fn test_field_names() {
        let headers: Vec<_> = FindingField::ALL.iter().map(|f| f.header()).collect();
        assert_eq!(headers, ["Category", "Finding", "Confidence", "Source"]);
        assert_eq!(FindingField::Source.to_string(), "source");
    }
}
