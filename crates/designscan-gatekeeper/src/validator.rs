//! Finding validation logic

use crate::ValidationConfig;
use designscan_domain::{Category, Confidence, Finding, FindingField, NOT_APPLICABLE, NOT_FOUND};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// A problem spotted in the service's reply
///
/// Warnings never block an extraction; they are reported next to the
/// findings so the caller decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Confidence label outside High/Medium/Low/None
    UnknownConfidence {
        /// Index of the finding
        index: usize,
        /// Label as returned
        label: String,
    },

    /// "Not Found" / "None" / "N/A" pairing is broken
    SentinelMismatch {
        /// Index of the finding
        index: usize,
        /// What is inconsistent
        issue: String,
    },

    /// Category that was never requested
    UnexpectedCategory {
        /// Index of the finding
        index: usize,
        /// Category as returned
        category: String,
    },

    /// Requested category with no finding
    MissingCategory {
        /// The requested label
        category: String,
    },

    /// Category returned more than once
    DuplicateCategory {
        /// Index of the repeated finding
        index: usize,
        /// Category label
        category: String,
    },

    /// Every category came back once, but not in the requested order
    OrderMismatch,

    /// Number of findings differs from the number of categories
    CountMismatch {
        /// Requested category count
        expected: usize,
        /// Findings returned
        actual: usize,
    },

    /// A finding lacks one of the four fields
    MissingField {
        /// Index of the finding
        index: usize,
        /// The absent field
        field: FindingField,
    },
}

impl ValidationWarning {
    /// Index of the finding the warning refers to, if it refers to one
    pub fn index(&self) -> Option<usize> {
        match self {
            ValidationWarning::UnknownConfidence { index, .. }
            | ValidationWarning::SentinelMismatch { index, .. }
            | ValidationWarning::UnexpectedCategory { index, .. }
            | ValidationWarning::DuplicateCategory { index, .. }
            | ValidationWarning::MissingField { index, .. } => Some(*index),
            ValidationWarning::MissingCategory { .. }
            | ValidationWarning::OrderMismatch
            | ValidationWarning::CountMismatch { .. } => None,
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::UnknownConfidence { index, label } => {
                write!(f, "finding {}: unknown confidence label '{}'", index, label)
            }
            ValidationWarning::SentinelMismatch { index, issue } => {
                write!(f, "finding {}: {}", index, issue)
            }
            ValidationWarning::UnexpectedCategory { index, category } => {
                write!(f, "finding {}: category '{}' was not requested", index, category)
            }
            ValidationWarning::MissingCategory { category } => {
                write!(f, "no finding for category '{}'", category)
            }
            ValidationWarning::DuplicateCategory { index, category } => {
                write!(f, "finding {}: category '{}' returned more than once", index, category)
            }
            ValidationWarning::OrderMismatch => {
                f.write_str("categories returned out of requested order")
            }
            ValidationWarning::CountMismatch { expected, actual } => {
                write!(f, "expected {} findings, got {}", expected, actual)
            }
            ValidationWarning::MissingField { index, field } => {
                write!(f, "finding {}: missing field '{}'", index, field)
            }
        }
    }
}

/// The Gatekeeper checks findings against the requested categories
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate findings against the categories that were requested
    ///
    /// Warnings are ordered per finding first (fields, confidence,
    /// sentinels, category), then the reply-level checks (missing
    /// categories, order, count).
    pub fn validate(&self, findings: &[Finding], categories: &[Category]) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        let requested: HashSet<&str> = categories.iter().map(String::as_str).collect();
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut categories_clean = true;

        for (index, finding) in findings.iter().enumerate() {
            // 1. Field presence
            if self.config.validate_fields {
                for field in FindingField::ALL {
                    if finding.get(field).is_none() {
                        warnings.push(ValidationWarning::MissingField { index, field });
                    }
                }
            }

            // 2. Confidence enumeration
            if self.config.validate_confidence_labels {
                if let Some(label) = finding.confidence.as_deref() {
                    if Confidence::parse(label).is_none() {
                        warnings.push(ValidationWarning::UnknownConfidence {
                            index,
                            label: label.to_string(),
                        });
                    }
                }
            }

            // 3. Sentinel pairing
            if self.config.validate_sentinels {
                if let Some(issue) = sentinel_issue(finding) {
                    warnings.push(ValidationWarning::SentinelMismatch { index, issue });
                }
            }

            // 4. Category membership
            let Some(category) = finding.category.as_deref() else {
                categories_clean = false;
                continue;
            };
            if !requested.contains(category) {
                categories_clean = false;
                if self.config.validate_categories {
                    warnings.push(ValidationWarning::UnexpectedCategory {
                        index,
                        category: category.to_string(),
                    });
                }
                continue;
            }
            let count = seen.entry(category).or_insert(0);
            *count += 1;
            if *count > 1 {
                categories_clean = false;
                if self.config.validate_categories {
                    warnings.push(ValidationWarning::DuplicateCategory {
                        index,
                        category: category.to_string(),
                    });
                }
            }
        }

        // 5. Requested categories with no finding
        for category in categories {
            if !seen.contains_key(category.as_str()) {
                categories_clean = false;
                if self.config.validate_categories {
                    warnings.push(ValidationWarning::MissingCategory {
                        category: category.clone(),
                    });
                }
            }
        }

        // 6. Order, only meaningful when the set itself matches
        if self.config.validate_order && categories_clean {
            let in_order = findings
                .iter()
                .zip(categories)
                .all(|(finding, category)| finding.category.as_deref() == Some(category.as_str()));
            if !in_order {
                warnings.push(ValidationWarning::OrderMismatch);
            }
        }

        // 7. Row count
        if self.config.validate_count && findings.len() != categories.len() {
            warnings.push(ValidationWarning::CountMismatch {
                expected: categories.len(),
                actual: findings.len(),
            });
        }

        debug!(
            "Validated {} findings against {} categories: {} warning(s)",
            findings.len(),
            categories.len(),
            warnings.len()
        );

        warnings
    }
}

/// Describe a broken sentinel pairing, if any
fn sentinel_issue(finding: &Finding) -> Option<String> {
    let not_found = finding.is_not_found();

    if let Some(confidence) = finding.confidence.as_deref() {
        let none = confidence == Confidence::None.as_str();
        if finding.finding.is_some() && not_found && !none {
            return Some(format!(
                "'{}' finding has confidence '{}' instead of 'None'",
                NOT_FOUND, confidence
            ));
        }
        if finding.finding.is_some() && !not_found && none {
            return Some(format!(
                "confidence 'None' on a finding that is not '{}'",
                NOT_FOUND
            ));
        }
    }

    if not_found {
        if let Some(source) = finding.source.as_deref() {
            if source != NOT_APPLICABLE {
                return Some(format!(
                    "'{}' finding cites source '{}' instead of '{}'",
                    NOT_FOUND, source, NOT_APPLICABLE
                ));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<String> {
        vec![
            "Typography".to_string(),
            "Color Scheme".to_string(),
            "Navigation Structure".to_string(),
        ]
    }

    fn clean_findings() -> Vec<Finding> {
        vec![
            Finding::new("Typography", "Inter, 16px body", Confidence::High, "Page 1, Frame: Home"),
            Finding::not_found("Color Scheme"),
            Finding::new("Navigation Structure", "Bottom tab bar", Confidence::Medium, "Page 2"),
        ]
    }

    #[test]
    fn test_clean_reply() {
        let gatekeeper = Gatekeeper::default_config();
        let warnings = gatekeeper.validate(&clean_findings(), &categories());
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    }

    #[test]
    fn test_unknown_confidence() {
        let gatekeeper = Gatekeeper::default_config();
        let mut findings = clean_findings();
        findings[0].confidence = Some("Certain".to_string());

        let warnings = gatekeeper.validate(&findings, &categories());
        assert_eq!(
            warnings,
            vec![ValidationWarning::UnknownConfidence {
                index: 0,
                label: "Certain".to_string()
            }]
        );
    }

    #[test]
    fn test_not_found_with_confidence() {
        let gatekeeper = Gatekeeper::default_config();
        let mut findings = clean_findings();
        findings[1].confidence = Some("Low".to_string());

        let warnings = gatekeeper.validate(&findings, &categories());
        assert_eq!(warnings.len(), 1);
        match &warnings[0] {
            ValidationWarning::SentinelMismatch { index, issue } => {
                assert_eq!(*index, 1);
                assert!(issue.contains("instead of 'None'"));
            }
            other => panic!("Expected SentinelMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_none_confidence_on_real_finding() {
        let gatekeeper = Gatekeeper::default_config();
        let mut findings = clean_findings();
        findings[2].confidence = Some("None".to_string());

        let warnings = gatekeeper.validate(&findings, &categories());
        assert!(matches!(
            warnings.as_slice(),
            [ValidationWarning::SentinelMismatch { index: 2, .. }]
        ));
    }

    #[test]
    fn test_not_found_with_source() {
        let gatekeeper = Gatekeeper::default_config();
        let mut findings = clean_findings();
        findings[1].source = Some("Page 4".to_string());

        let warnings = gatekeeper.validate(&findings, &categories());
        assert!(matches!(
            warnings.as_slice(),
            [ValidationWarning::SentinelMismatch { index: 1, issue }] if issue.contains("Page 4")
        ));
    }

    #[test]
    fn test_unexpected_and_missing_category() {
        let gatekeeper = Gatekeeper::default_config();
        let mut findings = clean_findings();
        findings[2].category = Some("Iconography".to_string());

        let warnings = gatekeeper.validate(&findings, &categories());
        assert_eq!(
            warnings,
            vec![
                ValidationWarning::UnexpectedCategory {
                    index: 2,
                    category: "Iconography".to_string()
                },
                ValidationWarning::MissingCategory {
                    category: "Navigation Structure".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_category() {
        let gatekeeper = Gatekeeper::default_config();
        let mut findings = clean_findings();
        findings.push(Finding::not_found("Typography"));

        let warnings = gatekeeper.validate(&findings, &categories());
        assert!(warnings.contains(&ValidationWarning::DuplicateCategory {
            index: 3,
            category: "Typography".to_string()
        }));
        assert!(warnings.contains(&ValidationWarning::CountMismatch {
            expected: 3,
            actual: 4
        }));
        assert!(!warnings.contains(&ValidationWarning::OrderMismatch));
    }

    #[test]
    fn test_order_mismatch() {
        let gatekeeper = Gatekeeper::default_config();
        let mut findings = clean_findings();
        findings.swap(0, 2);

        let warnings = gatekeeper.validate(&findings, &categories());
        assert_eq!(warnings, vec![ValidationWarning::OrderMismatch]);
    }

    #[test]
    fn test_count_mismatch_short_reply() {
        let gatekeeper = Gatekeeper::default_config();
        let findings = clean_findings()[..2].to_vec();

        let warnings = gatekeeper.validate(&findings, &categories());
        assert!(warnings.contains(&ValidationWarning::CountMismatch {
            expected: 3,
            actual: 2
        }));
    }

    #[test]
    fn test_missing_field() {
        let gatekeeper = Gatekeeper::default_config();
        let mut findings = clean_findings();
        findings[0].source = None;

        let warnings = gatekeeper.validate(&findings, &categories());
        assert_eq!(
            warnings,
            vec![ValidationWarning::MissingField {
                index: 0,
                field: FindingField::Source
            }]
        );
    }

    #[test]
    fn test_permissive_config() {
        let gatekeeper = Gatekeeper::new(ValidationConfig::permissive());
        let mut findings = clean_findings();
        findings.swap(0, 2);
        findings[1].confidence = Some("Low".to_string());
        findings.pop();

        // Only label enumeration is checked, and "Low" is a valid label
        assert!(gatekeeper.validate(&findings, &categories()).is_empty());
    }

    #[test]
    fn test_warning_display_and_index() {
        let warning = ValidationWarning::MissingField {
            index: 4,
            field: FindingField::Confidence,
        };
        assert_eq!(warning.to_string(), "finding 4: missing field 'confidence'");
        assert_eq!(warning.index(), Some(4));
        assert_eq!(ValidationWarning::OrderMismatch.index(), None);
    }
}
