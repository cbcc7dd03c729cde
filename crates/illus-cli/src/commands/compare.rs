//! Compare command - extract a batch of illustrations into a comparison table.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::{pad_str, style, Alignment};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use illus_core::batch::{BatchProcessor, ComparisonSession, DocumentSource};
use illus_core::report::{export_report, ExportOutcome};
use illus_core::{ComparisonTable, ExtractedRecord, Field, SortConfig, SortDirection};

use super::{format_csv, load_config, write_output};

/// Widest a column gets in the terminal table.
const MAX_COLUMN_WIDTH: usize = 24;

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Input files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Column to sort by (e.g. "faceAmount", "cash_value_year_10")
    #[arg(short, long)]
    sort: Option<Field>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Only show rows containing this text (case-insensitive, any column)
    #[arg(long)]
    filter: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: CompareFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also export the displayed rows as a PDF report
    #[arg(long)]
    export: bool,

    /// Directory for the exported report
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum CompareFormat {
    /// Aligned text table
    Table,
    /// JSON array of records
    Json,
    /// CSV with the table headers
    Csv,
}

pub async fn run(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for: {}", args.inputs.join(" "));
    }
    info!("Comparing {} files", files.len());

    let processor = BatchProcessor::from_config(&config)?;
    let mut session = ComparisonSession::new(processor, ComparisonTable::with_sort(config.table.sort()));

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message(format!("Processing {} files", files.len()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let sources = files.into_iter().map(DocumentSource::from).collect();
    let count = match session.upload(sources).await {
        Ok(count) => {
            pb.finish_and_clear();
            count
        }
        Err(e) => {
            pb.abandon();
            anyhow::bail!("{}", e);
        }
    };
    debug!("Loaded {} records in {:?}", count, start.elapsed());

    let table = session.table_mut();
    if let Some(key) = args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        table.set_sort(SortConfig::new(key, direction));
    } else if args.desc {
        let key = table.sort().key;
        table.set_sort(SortConfig::new(key, SortDirection::Descending));
    }
    if let Some(filter) = &args.filter {
        table.set_filter(filter.as_str());
    }

    let table = session.table();
    let rows = table.rows();

    let output = match args.format {
        CompareFormat::Table => format_table(&rows, table.total()),
        CompareFormat::Json => serde_json::to_string_pretty(&rows)?,
        CompareFormat::Csv => format_csv(&rows)?,
    };
    write_output(args.output.as_deref(), &output)?;

    if args.export {
        match export_report(&rows, &config.report, &args.export_dir)? {
            ExportOutcome::Written(path) => eprintln!(
                "{} Report written to {}",
                style("✓").green(),
                path.display()
            ),
            ExportOutcome::NoData => eprintln!("{} No data to export", style("ℹ").blue()),
        }
    }

    Ok(())
}

/// Expand glob patterns; plain paths are kept even if missing so the batch reports them.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.contains(['*', '?', '[']) {
            let matched: Vec<PathBuf> = glob(input)?.filter_map(|r| r.ok()).collect();
            debug!("{} matched {} files", input, matched.len());
            files.extend(matched);
        } else {
            files.push(PathBuf::from(input));
        }
    }
    Ok(files)
}

fn format_table(rows: &[&ExtractedRecord], total: usize) -> String {
    let widths: Vec<usize> = Field::ALL
        .iter()
        .map(|field| {
            rows.iter()
                .map(|r| console::measure_text_width(r.get(*field)))
                .chain(std::iter::once(field.header().len()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let mut output = String::new();

    let header: Vec<String> = Field::ALL
        .iter()
        .zip(&widths)
        .map(|(field, &width)| style(cell(field.header(), width)).bold().to_string())
        .collect();
    output.push_str(header.join("  ").trim_end());
    output.push('\n');

    for row in rows {
        let line: Vec<String> = row
            .values()
            .zip(&widths)
            .map(|(value, &width)| cell(value, width))
            .collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }

    output.push_str(&format!("\n{} of {} records shown", rows.len(), total));
    output
}

fn cell(value: &str, width: usize) -> String {
    let tail = (console::measure_text_width(value) > width).then_some("..");
    pad_str(value, width, Alignment::Left, tail).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use illus_core::ExtractedFields;

    #[test]
    fn test_expand_inputs_keeps_plain_paths() {
        let files = expand_inputs(&["missing.pdf".to_string()]).unwrap();
        assert_eq!(files, vec![PathBuf::from("missing.pdf")]);
    }

    #[test]
    fn test_format_table() {
        let mut fields = ExtractedFields::default();
        fields.currency = "USD".to_string();
        let record = ExtractedRecord::new("plan.pdf", fields);

        let output = format_table(&[&record], 3);
        assert!(output.contains("File Name"));
        assert!(output.contains("S&P Rating"));
        assert!(output.contains("plan.pdf"));
        assert!(output.contains("USD"));
        assert!(output.ends_with("1 of 3 records shown"));
    }

    #[test]
    fn test_format_table_keeps_widest_values() {
        let mut fields = ExtractedFields::default();
        fields.face_amount = "1234567890123".to_string();
        let record = ExtractedRecord::new("my-illustration.pdf", fields);

        let output = format_table(&[&record], 1);
        assert!(output.contains("my-illustration.pdf"));
        assert!(output.contains("1234567890123"));
        assert!(output.contains("File Name"));
        assert!(output.contains("S&P Rating"));
        assert!(!output.contains(".."));
    }

    #[test]
    fn test_cell_keeps_exact_width() {
        assert_eq!(cell("abcdef", 6), "abcdef");
        assert_eq!(cell("abc", 6), "abc   ");
    }

    #[test]
    fn test_cell_truncates_long_values() {
        let value = "an-extremely-long-illustration-file-name.pdf";
        assert_eq!(console::measure_text_width(&cell(value, MAX_COLUMN_WIDTH)), MAX_COLUMN_WIDTH);
    }
}
