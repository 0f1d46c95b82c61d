//! Parse LLM output into findings

use crate::error::ExtractorError;
use designscan_domain::{Finding, FindingField};
use serde_json::Value;
use tracing::{debug, warn};

const FENCE: &str = "```";

/// Findings recovered from a reply
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedReply {
    pub findings: Vec<Finding>,
    pub used_fallback: bool,
}

/// Parse an LLM reply into findings
///
/// The reply is first parsed directly as a JSON array. If that fails, fenced
/// code blocks are tried: blocks labelled `json` first, then unlabelled
/// blocks, each in order of appearance. The first block holding a JSON array
/// of objects wins; blocks with any other label are ignored.
pub(crate) fn parse_findings(reply: &str) -> Result<ParsedReply, ExtractorError> {
    let direct_error = match parse_array(reply.trim()) {
        Ok(findings) => {
            return Ok(ParsedReply {
                findings,
                used_fallback: false,
            })
        }
        Err(e) => e,
    };

    debug!("Direct parse failed ({}), trying fenced blocks", direct_error);

    let blocks = fenced_blocks(reply);
    let candidates = blocks
        .iter()
        .filter(|b| b.label.eq_ignore_ascii_case("json"))
        .chain(blocks.iter().filter(|b| b.label.is_empty()));

    let mut last_error = None;
    for block in candidates {
        match parse_array(block.content) {
            Ok(findings) => {
                return Ok(ParsedReply {
                    findings,
                    used_fallback: true,
                })
            }
            Err(e) => {
                warn!("Fenced block labelled {:?} is not a findings array: {}", block.label, e);
                last_error = Some(e);
            }
        }
    }

    let reason = match last_error {
        Some(e) => format!("no fenced block holds a JSON array of objects ({})", e),
        None => format!("not a JSON array ({}) and no fenced JSON block found", direct_error),
    };

    Err(ExtractorError::UnparsableResponse {
        reason,
        raw: reply.to_string(),
    })
}

/// Parse text as a JSON array of finding objects
fn parse_array(text: &str) -> Result<Vec<Finding>, String> {
    let json: Value = serde_json::from_str(text).map_err(|e| format!("JSON parse error: {}", e))?;

    let items = json
        .as_array()
        .ok_or_else(|| "Expected JSON array".to_string())?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_finding_json(idx, item))
        .collect()
}

/// Convert one JSON object into a finding, keeping absent fields absent
fn parse_finding_json(idx: usize, json: &Value) -> Result<Finding, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| format!("Element {} is not a JSON object", idx))?;

    let mut finding = Finding::default();
    for field in FindingField::ALL {
        finding.set(field, obj.get(field.key()).and_then(value_text));
    }
    Ok(finding)
}

/// Textual form of a field value; `null` counts as absent
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// A fenced code block found in free-form text
#[derive(Debug, Clone, PartialEq, Eq)]
struct FencedBlock<'a> {
    label: &'a str,
    content: &'a str,
}

/// Every fenced block in `text`, in order of appearance
///
/// The label is the run of word characters after the opening fence, past any
/// spaces or tabs.
/// An opening fence with no closing fence runs to the end of the text.
fn fenced_blocks(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after = rest[open + FENCE.len()..].trim_start_matches([' ', '\t']);
        let label_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(after.len());
        let (label, body) = after.split_at(label_len);

        match body.find(FENCE) {
            Some(close) => {
                blocks.push(FencedBlock {
                    label,
                    content: body[..close].trim(),
                });
                rest = &body[close + FENCE.len()..];
            }
            None => {
                blocks.push(FencedBlock {
                    label,
                    content: body.trim(),
                });
                break;
            }
        }
    }

    blocks
}
