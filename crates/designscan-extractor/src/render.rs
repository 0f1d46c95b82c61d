//! CSV rendering of findings

use crate::error::ExtractorError;
use csv::{Terminator, WriterBuilder};
use designscan_domain::{Finding, FindingField};
use std::io::Write;

/// MIME type of rendered output
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// File name for an analysis export, e.g. `figma_AbC123_analysis.csv`
pub fn csv_file_name(stem: &str) -> String {
    format!("{}_analysis.csv", stem)
}

/// Render findings as CSV text
///
/// Output starts with the header `Category,Finding,Confidence,Source`,
/// followed by one row per finding. Every finding is checked before any
/// row is produced, so a missing field yields
/// [`ExtractorError::FieldMissing`] and no output at all.
pub fn render(findings: &[Finding]) -> Result<String, ExtractorError> {
    let mut buffer = Vec::new();
    render_to_writer(findings, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| ExtractorError::Csv(format!("invalid utf-8 csv output: {}", e)))
}

/// Render findings as CSV into any writer
///
/// The field check runs before the first byte is written.
pub fn render_to_writer<W: Write>(findings: &[Finding], writer: W) -> Result<(), ExtractorError> {
    let rows = complete_rows(findings)?;

    let mut csv_writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(FindingField::ALL.iter().map(|f| f.header()))?;
    for row in rows {
        csv_writer.write_record(row)?;
    }
    csv_writer
        .flush()
        .map_err(|e| ExtractorError::Csv(e.to_string()))?;
    Ok(())
}

/// All four fields of every finding, or the first one missing
fn complete_rows(findings: &[Finding]) -> Result<Vec<[&str; 4]>, ExtractorError> {
    findings
        .iter()
        .enumerate()
        .map(|(index, finding)| {
            let get = |field: FindingField| {
                finding
                    .get(field)
                    .ok_or(ExtractorError::FieldMissing { index, field })
            };
            Ok([
                get(FindingField::Category)?,
                get(FindingField::Finding)?,
                get(FindingField::Confidence)?,
                get(FindingField::Source)?,
            ])
        })
        .collect()
}
