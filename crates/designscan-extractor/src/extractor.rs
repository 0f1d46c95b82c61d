//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_findings;
use crate::prompt::{serialize_document, PromptBuilder};
use crate::types::{ExtractionMetadata, ExtractionResult};
use designscan_domain::{Category, LlmProvider};
use designscan_gatekeeper::Gatekeeper;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The Extractor turns a design-file document into one finding per category
///
/// Each call is independent: the Extractor holds only configuration and a
/// shared provider, so one instance can serve concurrent callers.
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    gatekeeper: Option<Gatekeeper>,
    config: ExtractorConfig,
}

impl<L> Clone for Extractor<L>
where
    L: LlmProvider,
{
    fn clone(&self) -> Self {
        Self {
            llm_provider: Arc::clone(&self.llm_provider),
            gatekeeper: self.gatekeeper.clone(),
            config: self.config.clone(),
        }
    }
}

impl<L> Extractor<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            gatekeeper: None,
            config,
        }
    }

    /// Create a new Extractor after checking the configuration
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if the configuration is invalid.
    pub fn try_new(llm_provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self::new(llm_provider, config))
    }

    /// Validate every reply with the given Gatekeeper
    pub fn with_gatekeeper(mut self, gatekeeper: Gatekeeper) -> Self {
        self.gatekeeper = Some(gatekeeper);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract findings for the configured categories
    pub fn extract_configured<T>(&self, document: &T) -> Result<ExtractionResult, ExtractorError>
    where
        T: Serialize + ?Sized,
    {
        self.extract(document, &self.config.categories)
    }

    /// Extract one finding per category from a document
    ///
    /// The serialized document is cut to `max_document_chars` characters
    /// before it is sent. Findings come back exactly as the service emitted
    /// them; if a Gatekeeper is attached its warnings are returned alongside.
    ///
    /// # Errors
    ///
    /// - [`ExtractorError::InvalidInput`] for empty, blank or duplicate
    ///   categories, or a document that cannot be serialized
    /// - [`ExtractorError::UpstreamFailure`] when the provider call fails
    /// - [`ExtractorError::UnparsableResponse`] when neither the reply nor
    ///   any fenced block in it is a JSON array of objects
    pub fn extract<T>(
        &self,
        document: &T,
        categories: &[Category],
    ) -> Result<ExtractionResult, ExtractorError>
    where
        T: Serialize + ?Sized,
    {
        let start_time = Instant::now();

        validate_categories(categories)?;

        let excerpt = serialize_document(document, self.config.max_document_chars)?;
        if excerpt.truncated {
            info!(
                "Document truncated from {} to {} chars",
                excerpt.original_chars, self.config.max_document_chars
            );
        }

        info!(
            "Starting extraction for {} categories, document length {} chars",
            categories.len(),
            excerpt.original_chars
        );

        let request = PromptBuilder::new(categories, &excerpt.text)
            .with_temperature(self.config.temperature)
            .build();

        debug!("Prompt length: {} chars", request.system.len() + request.user.len());

        let reply = self
            .llm_provider
            .complete(&request)
            .map_err(|e| ExtractorError::UpstreamFailure(e.to_string()))?;

        debug!("LLM response length: {} chars", reply.len());

        let parsed = parse_findings(&reply)?;
        if parsed.used_fallback {
            debug!("Reply parsed from a fenced code block");
        }

        let warnings = match &self.gatekeeper {
            Some(gatekeeper) => gatekeeper.validate(&parsed.findings, categories),
            None => Vec::new(),
        };
        for warning in &warnings {
            warn!("Validation warning: {}", warning);
        }

        let metadata = ExtractionMetadata {
            model_name: self.llm_provider.model_name().to_string(),
            category_count: categories.len(),
            document_chars: excerpt.original_chars,
            forwarded_chars: excerpt.char_len(),
            truncated: excerpt.truncated,
            used_fallback: parsed.used_fallback,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Extraction complete: {} findings, {} warnings",
            parsed.findings.len(),
            warnings.len()
        );

        Ok(ExtractionResult {
            findings: parsed.findings,
            warnings,
            metadata,
        })
    }
}

/// Reject empty lists, blank labels and repeated labels
fn validate_categories(categories: &[Category]) -> Result<(), ExtractorError> {
    if categories.is_empty() {
        return Err(ExtractorError::InvalidInput(
            "category list is empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for (idx, category) in categories.iter().enumerate() {
        if category.trim().is_empty() {
            return Err(ExtractorError::InvalidInput(format!(
                "category {} is blank",
                idx
            )));
        }
        if !seen.insert(category.as_str()) {
            return Err(ExtractorError::InvalidInput(format!(
                "category '{}' is listed more than once",
                category
            )));
        }
    }

    Ok(())
}
