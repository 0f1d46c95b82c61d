//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use designscan_domain::{Confidence, Finding};
use designscan_extractor::{render, ExtractionResult};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an extraction result.
    pub fn format_result(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Csv => Ok(render(&result.findings)?),
            OutputFormat::Json => self.format_result_json(result),
            OutputFormat::Table => Ok(self.format_findings_table(&result.findings)),
        }
    }

    fn format_result_json(&self, result: &ExtractionResult) -> Result<String> {
        let warnings: Vec<String> = result.warnings.iter().map(ToString::to_string).collect();
        let json = serde_json::json!({
            "findings": result.findings,
            "warnings": warnings,
            "metadata": result.metadata,
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }

    /// Format findings as a table.
    fn format_findings_table(&self, findings: &[Finding]) -> String {
        if findings.is_empty() {
            return self.colorize("No findings returned.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Category", "Finding", "Confidence", "Source"]);

        for finding in findings {
            let confidence = finding.confidence.as_deref().unwrap_or("-");
            let confidence = match finding.confidence_level() {
                Some(Confidence::High) => self.colorize(confidence, "green"),
                Some(Confidence::Medium) => self.colorize(confidence, "yellow"),
                Some(Confidence::Low) => self.colorize(confidence, "red"),
                Some(Confidence::None) => self.colorize(confidence, "dimmed"),
                None => self.colorize(confidence, "magenta"),
            };
            builder.push_record([
                finding.category.as_deref().unwrap_or("-").to_string(),
                finding.finding.as_deref().unwrap_or("-").to_string(),
                confidence,
                finding.source.as_deref().unwrap_or("-").to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "magenta" => text.magenta().to_string(),
            "dimmed" => text.dimmed().to_string(),
            _ => text.to_string(),
        }
    }
}
