//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Flag confidence labels outside High/Medium/Low/None
    pub validate_confidence_labels: bool,

    /// Flag broken "Not Found" / "None" / "N/A" pairing
    pub validate_sentinels: bool,

    /// Flag unexpected, missing and duplicate categories
    pub validate_categories: bool,

    /// Flag categories returned out of the requested order
    pub validate_order: bool,

    /// Flag a row count different from the category count
    pub validate_count: bool,

    /// Flag findings with absent fields
    pub validate_fields: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validate_confidence_labels: true,
            validate_sentinels: true,
            validate_categories: true,
            validate_order: true,
            validate_count: true,
            validate_fields: true,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (label enumeration only)
    pub fn permissive() -> Self {
        Self {
            validate_confidence_labels: true,
            validate_sentinels: false,
            validate_categories: false,
            validate_order: false,
            validate_count: false,
            validate_fields: false,
        }
    }

    /// Whether any check is enabled
    pub fn any_enabled(&self) -> bool {
        self.validate_confidence_labels
            || self.validate_sentinels
            || self.validate_categories
            || self.validate_order
            || self.validate_count
            || self.validate_fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert!(config.validate_confidence_labels);
        assert!(config.validate_sentinels);
        assert!(config.validate_categories);
        assert!(config.any_enabled());
    }

    #[test]
    fn test_permissive_config() {
        let config = ValidationConfig::permissive();
        assert!(config.validate_confidence_labels);
        assert!(!config.validate_categories);
        assert!(!config.validate_order);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let config: ValidationConfig =
            serde_json::from_str(r#"{"validate_order": false}"#).unwrap();
        assert!(!config.validate_order);
        assert!(config.validate_count);
    }
}
