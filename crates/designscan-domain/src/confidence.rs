//! Confidence labels attached to each finding

use std::fmt;

/// Confidence label reported for a finding
///
/// `None` is only valid together with the `"Not Found"` sentinel; the
/// other three grade how directly the evidence appears in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    /// Stated explicitly in the document
    High,

    /// Present but partially stated
    Medium,

    /// Weak or indirect evidence
    Low,

    /// No evidence (pairs with "Not Found")
    None,
}

impl Confidence {
    /// All labels in descending order of certainty
    pub const ALL: [Confidence; 4] = [
        Confidence::High,
        Confidence::Medium,
        Confidence::Low,
        Confidence::None,
    ];

    /// Get the canonical label
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "High",
            Confidence::Medium => "Medium",
            Confidence::Low => "Low",
            Confidence::None => "None",
        }
    }

    /// Parse a canonical label (exact spelling)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "High" => Some(Confidence::High),
            "Medium" => Some(Confidence::Medium),
            "Low" => Some(Confidence::Low),
            "None" => Some(Confidence::None),
            _ => None,
        }
    }

    /// Whether this label denotes absence of evidence
    pub fn is_none(&self) -> bool {
        matches!(self, Confidence::None)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid confidence label: {}", s))
    }
}
