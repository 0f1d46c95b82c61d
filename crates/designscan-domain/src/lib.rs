//! designscan Domain Layer
//!
//! Value types and trait seams shared by every other crate in the workspace.
//! Nothing in here performs I/O.
//!
//! ## Key Concepts
//!
//! - **Category**: a label naming an attribute to look for in a design file
//! - **Finding**: one result row (category, finding, confidence, source)
//! - **Confidence**: the enumerated labels `High`, `Medium`, `Low`, `None`
//! - **Sentinels**: `"Not Found"`, `"N/A"` and `"None"` denote absence by contract
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - LLM backends live in `designscan-llm`
//! - The extraction pipeline lives in `designscan-extractor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod finding;
pub mod traits;

// Re-exports for convenience
pub use confidence::Confidence;
pub use finding::{AnalysisResult, Category, Finding, FindingField, NOT_APPLICABLE, NOT_FOUND};
pub use traits::{CompletionRequest, LlmProvider};
