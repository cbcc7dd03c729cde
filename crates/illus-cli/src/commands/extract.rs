//! Extract command - pull the comparison fields out of a single illustration.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use illus_core::illustration::{ExtractionResult, FieldExtractor, FieldMatch};
use illus_core::pdf::{DocumentReader, PdfTextReader};
use illus_core::{ExtractedRecord, Field};

use super::{format_csv, load_config, write_output};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which rule resolved each field (json and text formats)
    #[arg(long)]
    explain: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExplainedRecord<'a> {
    record: &'a ExtractedRecord,
    matches: &'a [FieldMatch],
    processing_time_ms: u64,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if args.explain && matches!(args.format, OutputFormat::Csv) {
        anyhow::bail!("--explain is not available with --format csv");
    }

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    info!("Processing file: {}", args.input.display());

    let extractor = FieldExtractor::from_config(&config.extraction)?;
    let data = fs::read(&args.input)?;
    let text = PdfTextReader::new(config.pdf.clone()).read_text(&data)?;
    if text.trim().is_empty() {
        eprintln!("{} No text found in document", style("⚠").yellow());
    }

    let result = extractor.extract_detailed(&text);
    let name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());
    let record = ExtractedRecord::new(name, result.fields.clone());

    let output = match args.format {
        OutputFormat::Json if args.explain => serde_json::to_string_pretty(&ExplainedRecord {
            record: &record,
            matches: &result.matches,
            processing_time_ms: result.processing_time_ms,
        })?,
        OutputFormat::Json => serde_json::to_string_pretty(&record)?,
        OutputFormat::Csv => format_csv(&[&record])?,
        OutputFormat::Text => format_record_text(&record, args.explain.then_some(&result)),
    };
    write_output(args.output.as_deref(), &output)?;

    let missing = result.missing();
    if !missing.is_empty() {
        eprintln!(
            "{} {} of {} fields not found",
            style("ℹ").blue(),
            missing.len(),
            Field::EXTRACTED.len()
        );
    }

    Ok(())
}

fn format_record_text(record: &ExtractedRecord, explain: Option<&ExtractionResult>) -> String {
    let mut output = String::new();

    for (field, value) in Field::ALL.iter().zip(record.values()) {
        output.push_str(&format!("{:<22} {}\n", format!("{}:", field.header()), value));
    }

    if let Some(result) = explain {
        output.push_str("\nRules:\n");
        for m in &result.matches {
            match (&m.rule_index, &m.pattern) {
                (Some(index), Some(pattern)) => {
                    output.push_str(&format!("  {:<22} #{} {}\n", m.field.key(), index, pattern))
                }
                _ => output.push_str(&format!("  {:<22} no match\n", m.field.key())),
            }
        }
        output.push_str(&format!("\nProcessing time: {}ms\n", result.processing_time_ms));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record_text() {
        let extractor = FieldExtractor::new();
        let result = extractor.extract_detailed(r#""Currency","USD""#);
        let record = ExtractedRecord::new("plan.pdf", result.fields.clone());

        let plain = format_record_text(&record, None);
        assert!(plain.contains("File Name:"));
        assert!(plain.contains("plan.pdf"));
        assert!(plain.contains("USD"));
        assert!(!plain.contains("Rules:"));

        let explained = format_record_text(&record, Some(&result));
        assert!(explained.contains("Rules:"));
        assert!(explained.contains("currency"));
        assert!(explained.contains("no match"));
    }
}
