//! CLI subcommands.

pub mod compare;
pub mod config;
pub mod extract;

use std::fs;
use std::path::{Path, PathBuf};

use illus_core::models::config::IllusConfig;
use illus_core::{ExtractedRecord, Field};
use tracing::debug;

/// Per-user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("illus")
        .join("config.json")
}

/// The file `--config` names, else the per-user file.
pub fn config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load `--config` if given, else the per-user file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<IllusConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return IllusConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e));
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        IllusConfig::from_file(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))
    } else {
        Ok(IllusConfig::default())
    }
}

/// Records as CSV with the table headers.
pub fn format_csv(records: &[&ExtractedRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(Field::ALL.iter().map(|f| f.header()))?;
    for record in records {
        wtr.write_record(record.values())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Write `content` to `output`, or to stdout.
pub fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            eprintln!(
                "{} Output written to {}",
                console::style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", content),
    }
    Ok(())
}
