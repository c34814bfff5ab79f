//! Compare command
//!
//! Usage: revcmp compare --old <FILE> --new <FILE> [--format summary|json]
//!        [--config <FILE>] [--output <FILE>]

use anyhow::Context;
use clap::{Args, ValueEnum};
use revcmp_core::diff::render_human_summary;
use revcmp_core::{default_registry, CompareOptions, Revision, RevisionComparer};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown summary for review
    Summary,
    /// Full structured comparison
    Json,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Old revision (JSON)
    #[arg(long)]
    pub old: PathBuf,

    /// New revision (JSON)
    #[arg(long)]
    pub new: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Comparison options (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> anyhow::Result<()> {
    let options = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            CompareOptions::from_toml_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => CompareOptions::default(),
    };

    let old = load_revision(&args.old)?;
    let new = load_revision(&args.new)?;

    let comparer = RevisionComparer::with_options(Arc::new(default_registry()), options);
    let comparison = comparer.compare(&old, &new)?;

    let rendered = match args.format {
        OutputFormat::Summary => render_human_summary(&comparison),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&comparison)?;
            json.push('\n');
            json
        }
    };

    // Output
    if let Some(output_path) = args.output {
        std::fs::write(&output_path, rendered)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        println!("✓ Comparison written to {}", output_path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

fn load_revision(path: &Path) -> anyhow::Result<Revision> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read revision {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse revision {}", path.display()))
}
