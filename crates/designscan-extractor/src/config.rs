//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Default cap on serialized document text forwarded to the service
pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 15_000;

/// Categories analyzed when none are configured
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "User Journey",
    "Design Pattern",
    "Color Scheme",
    "Typography",
    "Accessibility Features",
    "Navigation Structure",
    "Form Validation Rules",
    "Responsive Breakpoints",
];

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum serialized document length forwarded to the service (characters)
    pub max_document_chars: usize,

    /// Sampling temperature (0.0 is the most deterministic setting)
    pub temperature: f32,

    /// Ordered category labels to extract
    pub categories: Vec<String>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_document_chars == 0 {
            return Err("max_document_chars must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be within [0.0, 2.0], got {}",
                self.temperature
            ));
        }
        if self.categories.is_empty() {
            return Err("categories must not be empty".to_string());
        }
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err("categories must not contain empty labels".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
            temperature: 0.0,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}
