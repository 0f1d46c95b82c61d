//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use designscan_extractor::ExtractorConfig;
use designscan_gatekeeper::ValidationConfig;
use designscan_llm::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Text-generation service settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Which reply checks to run
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Text-generation service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// OpenAI-compatible base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV file
    Csv,
    /// JSON with findings, warnings and metadata
    Json,
    /// Table on the terminal
    Table,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".designscan").join("config.toml"))
    }

    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate().map_err(CliError::Config)?;

        if self.llm.timeout_secs == 0 {
            return Err(CliError::Config("llm.timeout_secs must be greater than 0".into()));
        }
        if self.llm.model.trim().is_empty() {
            return Err(CliError::Config("llm.model must not be empty".into()));
        }
        if self.llm.api_key_env.trim().is_empty() {
            return Err(CliError::Config("llm.api_key_env must not be empty".into()));
        }
        Ok(())
    }

    /// Read the API key from the configured environment variable.
    ///
    /// The error names the variable, never its value.
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.llm.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(CliError::Config(format!(
                "{} is not set; export it or add it to a .env file",
                self.llm.api_key_env
            ))),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Csv,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Csv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.extractor.categories.len(), 8);
        assert_eq!(config.settings.format, OutputFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [llm]
            model = "gpt-4o-mini"

            [extractor]
            categories = ["Typography"]
            "#,
        )
        .unwrap();

        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.extractor.categories, vec!["Typography".to_string()]);
        assert_eq!(config.extractor.max_document_chars, 15_000);
        assert!(config.settings.color);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.llm.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_missing_api_key_names_variable() {
        let mut config = Config::default();
        config.llm.api_key_env = "DESIGNSCAN_TEST_UNSET_KEY".to_string();

        let err = config.api_key().unwrap_err();
        assert!(err.to_string().contains("DESIGNSCAN_TEST_UNSET_KEY"));
    }
}
