//! Error types for the CLI application.

use designscan_extractor::ExtractorError;
use designscan_llm::LlmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extraction or rendering error
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// Provider setup error
    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Background task failed to complete
    #[error("Extraction task failed: {0}")]
    Task(String),

    /// `--strict` run produced validation warnings
    #[error("{0} validation warning(s) in strict mode")]
    Validation(usize),
}
