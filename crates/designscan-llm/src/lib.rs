//! designscan LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `designscan-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat-completions API
//!
//! # Examples
//!
//! ```
//! use designscan_domain::{CompletionRequest, LlmProvider};
//! use designscan_llm::MockProvider;
//!
//! let provider = MockProvider::new("[]");
//! let reply = provider.complete(&CompletionRequest::new("rules", "input")).unwrap();
//! assert_eq!(reply, "[]");
//! ```

#![warn(missing_docs)]

pub mod openai;

use designscan_domain::{CompletionRequest, LlmProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use openai::{OpenAiProvider, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Non-success HTTP status from the provider
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Endpoint answered 404: unknown model, or a wrong base URL
    #[error("Model not available: {model} ({body})")]
    ModelNotAvailable {
        /// Model that was requested
        model: String,
        /// Response body, truncated
        body: String,
    },

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Provider misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured replies without making any network calls and
/// remembers the last request so tests can inspect exactly what was sent.
///
/// # Examples
///
/// ```
/// use designscan_domain::{CompletionRequest, LlmProvider};
/// use designscan_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("input one", "reply one");
///
/// let reply = provider.complete(&CompletionRequest::new("rules", "input one")).unwrap();
/// assert_eq!(reply, "reply one");
/// assert_eq!(provider.last_request().unwrap().user, "input one");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    model: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<CompletionRequest>>>,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

impl MockProvider {
    /// Create a new MockProvider with a fixed reply for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            model: "mock".to_string(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Report a different model name
    pub fn with_model_name(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Add a specific reply for a given user message
    pub fn add_response(&mut self, user: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(user.into(), MockReply::Text(response.into()));
    }

    /// Configure to fail for a specific user message
    pub fn add_error(&mut self, user: impl Into<String>, message: impl Into<String>) {
        lock(&self.responses).insert(user.into(), MockReply::Error(message.into()));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<CompletionRequest> {
        lock(&self.last_request).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_request) = Some(request.clone());

        match lock(&self.responses).get(&request.user) {
            Some(MockReply::Text(reply)) => Ok(reply.clone()),
            Some(MockReply::Error(message)) => Err(LlmError::Other(message.clone())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// A poisoned lock only means another test thread panicked mid-update; the
// data is still usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
