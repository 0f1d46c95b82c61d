//! OpenAI Provider Implementation
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint.
//!
//! # Features
//!
//! - Async HTTP communication, with a blocking bridge for the sync trait
//! - Configurable endpoint, model and timeout
//! - Single attempt per call; retrying is left to the caller
//!
//! # Examples
//!
//! ```no_run
//! use designscan_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("sk-...", "gpt-5-nano").unwrap();
//! ```

use crate::LlmError;
use designscan_domain::{CompletionRequest, LlmProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::runtime::{Builder, Handle, RuntimeFlavor};
use tracing::debug;

/// Default OpenAI API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-5-nano";

/// Default timeout for LLM requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Longest error body kept in [`LlmError::Status`]
const MAX_ERROR_BODY_CHARS: usize = 500;

/// OpenAI chat-completions provider
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

/// Request body for the chat-completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat-completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider for the default endpoint
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the API key is empty or the HTTP
    /// client cannot be built.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("API key is empty".to_string()));
        }

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key,
            client: build_client(DEFAULT_TIMEOUT_SECS)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Point at a different OpenAI-compatible base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Result<Self, LlmError> {
        self.client = build_client(timeout_secs)?;
        self.timeout_secs = timeout_secs;
        Ok(self)
    }

    /// Base URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one chat completion
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The endpoint is unreachable or the request times out
    /// - The API answers with a non-success status
    /// - The reply has no message content
    pub async fn chat(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
        };

        debug!(
            "POST {} (model {}, {} chars)",
            url,
            self.model,
            request.system.len() + request.user.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout_secs)
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status.as_u16(), &text, &self.model));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        first_message_content(chat)
    }
}

impl OpenAiProvider {
    /// Run [`OpenAiProvider::chat`] on a private current-thread runtime
    fn chat_blocking(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to start runtime: {}", e)))?;
        runtime.block_on(self.chat(request))
    }
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LlmProvider for OpenAiProvider {
    type Error = LlmError;

    /// Blocking wrapper around [`OpenAiProvider::chat`].
    ///
    /// Inside a multi-threaded tokio runtime (or on one of its blocking
    /// threads) the call is driven on that runtime. A current-thread runtime
    /// cannot be blocked, so the call runs on a private runtime on a scoped
    /// thread instead. Outside any runtime the private runtime runs inline.
    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.chat(request)))
            }
            Ok(_) => std::thread::scope(|scope| {
                scope
                    .spawn(|| self.chat_blocking(request))
                    .join()
                    .map_err(|_| LlmError::Other("Provider thread panicked".to_string()))?
            }),
            Err(_) => self.chat_blocking(request),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn build_client(timeout_secs: u64) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))
}

fn status_error(status: u16, body: &str, model: &str) -> LlmError {
    match status {
        404 => LlmError::ModelNotAvailable {
            model: model.to_string(),
            body: truncate_body(body),
        },
        429 => LlmError::RateLimitExceeded,
        _ => LlmError::Status {
            status,
            body: truncate_body(body),
        },
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

fn first_message_content(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
}
