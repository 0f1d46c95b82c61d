//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use designscan_domain::LlmProvider;
use designscan_extractor::{csv_file_name, ExtractionResult, Extractor, ExtractorError};
use designscan_gatekeeper::Gatekeeper;
use designscan_llm::OpenAiProvider;
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Where rendered output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    Stdout,
    File(String),
}

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, color_enabled: bool) -> Result<()> {
    let format = args
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let formatter = Formatter::new(format, color_enabled);

    let document = read_document(&args.document)?;

    let mut extractor_config = config.extractor.clone();
    if !args.categories.is_empty() {
        extractor_config.categories = args.categories.clone();
    }
    if let Some(max_chars) = args.max_chars {
        extractor_config.max_document_chars = max_chars;
    }

    let model = args.model.as_deref().unwrap_or(&config.llm.model);
    let endpoint = args.endpoint.as_deref().unwrap_or(&config.llm.endpoint);
    let provider = OpenAiProvider::new(config.api_key()?, model)?
        .with_endpoint(endpoint)
        .with_timeout(config.llm.timeout_secs)?;
    debug!("Using {:?}", provider);

    let extractor = Extractor::try_new(provider, extractor_config)?
        .with_gatekeeper(Gatekeeper::new(config.validation.clone()));

    let result = run_extraction(extractor, document, config.llm.timeout_secs).await?;

    for warning in &result.warnings {
        eprintln!("{}", formatter.warning(&warning.to_string()));
    }
    enforce_strict(&result, args.strict)?;

    let output = formatter.format_result(&result)?;
    match destination(&args.document, args.output.as_deref(), format) {
        Destination::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            if !output.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
        Destination::File(path) => {
            fs::write(&path, output)?;
            eprintln!(
                "{}",
                formatter.success(&format!(
                    "Wrote {} finding(s) to {}",
                    result.findings.len(),
                    path
                ))
            );
        }
    }

    Ok(())
}

/// Run one extraction on the blocking pool, bounded by `timeout_secs`.
///
/// Running out of time is reported as an upstream failure.
pub async fn run_extraction<L>(
    extractor: Extractor<L>,
    document: Value,
    timeout_secs: u64,
) -> Result<ExtractionResult>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    info!(
        "Analyzing document with {} categories",
        extractor.config().categories.len()
    );

    let task = tokio::task::spawn_blocking(move || extractor.extract_configured(&document));

    match tokio::time::timeout(Duration::from_secs(timeout_secs), task).await {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(join_error)) => Err(CliError::Task(join_error.to_string())),
        Err(_) => Err(ExtractorError::UpstreamFailure(format!(
            "no reply within {}s",
            timeout_secs
        ))
        .into()),
    }
}

/// In strict mode any validation warning fails the run.
fn enforce_strict(result: &ExtractionResult, strict: bool) -> Result<()> {
    if strict && !result.is_clean() {
        return Err(CliError::Validation(result.warnings.len()));
    }
    Ok(())
}

/// Read and parse the document from a path or stdin (`-`).
fn read_document(source: &str) -> Result<Value> {
    let text = if source == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(source)?
    };

    parse_document(&text, source)
}

fn parse_document(text: &str, source: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| {
        CliError::InvalidInput(format!("{} is not valid JSON: {}", display_source(source), e))
    })
}

fn display_source(source: &str) -> &str {
    if source == "-" {
        "stdin"
    } else {
        source
    }
}

/// Resolve where output goes.
///
/// CSV defaults to `<document stem>_analysis.csv`; the other formats default
/// to stdout. `-` always means stdout.
fn destination(document: &str, output: Option<&str>, format: OutputFormat) -> Destination {
    match output {
        Some("-") => Destination::Stdout,
        Some(path) => Destination::File(path.to_string()),
        None if format == OutputFormat::Csv => {
            let stem = Path::new(document)
                .file_stem()
                .and_then(|s| s.to_str())
                .filter(|_| document != "-")
                .unwrap_or("stdin");
            Destination::File(csv_file_name(stem))
        }
        None => Destination::Stdout,
    }
}
