//! designscan Gatekeeper
//!
//! Checks parsed findings against the request that produced them.
//!
//! The text-generation service is not trusted to honor the reply contract,
//! so the Gatekeeper looks for:
//! - Confidence labels outside High/Medium/Low/None
//! - Broken sentinel pairing ("Not Found" ⇔ "None", source "N/A")
//! - Categories that were not requested, are missing, repeated or reordered
//! - Row count mismatches and missing fields
//!
//! Validation never fails the extraction: it produces a list of
//! [`ValidationWarning`]s that travels alongside the findings.
//!
//! # Examples
//!
//! ```
//! use designscan_domain::Finding;
//! use designscan_gatekeeper::Gatekeeper;
//!
//! let gatekeeper = Gatekeeper::default_config();
//! let categories = vec!["Typography".to_string()];
//! let findings = vec![Finding::not_found("Typography")];
//!
//! assert!(gatekeeper.validate(&findings, &categories).is_empty());
//! ```

#![warn(missing_docs)]

mod config;
mod validator;

pub use config::ValidationConfig;
pub use validator::{Gatekeeper, ValidationWarning};
