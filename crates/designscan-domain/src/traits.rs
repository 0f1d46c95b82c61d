//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// A single completion call: a system instruction plus one user message
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction establishing the rules of the task
    pub system: String,

    /// User message carrying the task input
    pub user: String,

    /// Sampling temperature (0.0 is the most deterministic setting)
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create a request with deterministic sampling
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: 0.0,
        }
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Trait for text-generation providers
///
/// Implemented by the infrastructure layer (designscan-llm). Calls block
/// until the provider answers; timeouts are the caller's concern.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Run one completion and return the reply text verbatim
    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;

    /// Name of the model answering requests (for metadata and logs)
    fn model_name(&self) -> &str;
}
