//! designscan Extractor
//!
//! Pulls one structured finding per requested category out of a design-file
//! document using an LLM, and renders the findings as CSV.
//!
//! # Overview
//!
//! The document is serialized as pretty JSON, cut to a character limit and
//! sent to a text-generation service together with the category list and a
//! strict output contract. The reply is parsed as a JSON array of findings,
//! falling back to fenced code blocks when the service wraps its answer in
//! prose. Findings are returned exactly as the service produced them.
//!
//! # Architecture
//!
//! ```text
//! Document → Extractor → LLM → Findings → (Gatekeeper warnings) → CSV
//! ```
//!
//! # Example Usage
//!
//! ```
//! use designscan_extractor::{render, Extractor, ExtractorConfig};
//! use designscan_llm::MockProvider;
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(
//!     r#"[{"category": "Color Scheme", "finding": "Not Found", "confidence": "None", "source": "N/A"}]"#,
//! );
//! let extractor = Extractor::new(llm, ExtractorConfig::default());
//!
//! let document = json!({"name": "Checkout", "document": {"children": []}});
//! let result = extractor.extract(&document, &["Color Scheme".to_string()])?;
//!
//! let csv = render(&result.findings)?;
//! assert_eq!(
//!     csv,
//!     "Category,Finding,Confidence,Source\nColor Scheme,Not Found,None,N/A\n"
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod render;
mod types;

#[cfg(test)]
mod tests;

pub use config::{ExtractorConfig, DEFAULT_CATEGORIES, DEFAULT_MAX_DOCUMENT_CHARS};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use prompt::{serialize_document, DocumentExcerpt, PromptBuilder};
pub use render::{csv_file_name, render, render_to_writer, CSV_CONTENT_TYPE};
pub use types::{ExtractionMetadata, ExtractionResult};
