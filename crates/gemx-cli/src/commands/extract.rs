//! Extract command - build one table from many contract files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use gemx_core::models::config::ExportFormat;
use gemx_core::source::{display_name, is_supported};
use gemx_core::{BatchAggregator, DocumentError, DocumentLoader, FailurePolicy, RecordAssembler, SourceDocument};

use crate::export::{write_csv, write_failure_report, write_json};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input files, directories or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output file (default: <file_stem>.<format> in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Field catalog JSON (default: built-in GeM contract catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Process documents in parallel
    #[arg(short = 'j', long)]
    parallel: bool,

    /// Stop at the first unreadable document
    #[arg(long)]
    fail_fast: bool,

    /// Write the list of unreadable documents to this CSV file
    #[arg(long)]
    failures: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// CSV table
    Csv,
    /// JSON records plus failures
    Json,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Json => ExportFormat::Json,
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;
    let catalog = super::load_catalog(args.catalog.as_deref(), &config)?;

    let files = collect_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No PDF or text files found for: {}", args.inputs.join(" "));
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Read everything up front; text extraction and assembly are synchronous.
    let loader = DocumentLoader::new(config.pdf.clone());
    let mut documents = Vec::with_capacity(files.len());
    for path in &files {
        let source = match tokio::fs::read(path).await {
            Ok(data) => {
                let name = display_name(path);
                let loader = loader.clone();
                tokio::task::spawn_blocking(move || loader.load(&name, &data)).await?
            }
            Err(e) => SourceDocument::Unreadable {
                file_name: display_name(path),
                error: DocumentError::Io(e),
            },
        };
        debug!("Loaded {}", source.file_name());
        documents.push(source);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let policy = if args.fail_fast {
        FailurePolicy::FailFast
    } else {
        config.extraction.failure_policy
    };

    let aggregator = BatchAggregator::new(RecordAssembler::new(catalog))
        .with_policy(policy)
        .with_parallel(args.parallel || config.extraction.parallel);

    let table = aggregator.aggregate(documents)?;

    let format: ExportFormat = args.format.map(Into::into).unwrap_or(config.output.format);
    let output_path = args.output.clone().unwrap_or_else(|| {
        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        PathBuf::from(format!("{}.{}", config.output.file_stem, extension))
    });

    let file = fs::File::create(&output_path)?;
    match format {
        ExportFormat::Csv => write_csv(&table, file)?,
        ExportFormat::Json => write_json(&table, file)?,
    }

    let failed: Vec<_> = table.failures().collect();
    let failure_path = args.failures.clone().or_else(|| {
        (config.output.failure_report && !failed.is_empty())
            .then(|| failure_report_path(&output_path))
    });
    if let Some(path) = &failure_path {
        write_failure_report(&table, path)?;
    }

    println!(
        "{} Wrote {} records to {}",
        style("✓").green(),
        table.records().count(),
        output_path.display()
    );
    println!(
        "   {} documents in {:?}: {} extracted, {} failed",
        table.len(),
        start.elapsed(),
        style(table.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for entry in &failed {
            println!(
                "  - {}: {}",
                entry.file_name,
                entry.failure().unwrap_or("unknown error")
            );
        }
        if let Some(path) = &failure_path {
            println!("   Failure report: {}", path.display());
        }
    }

    Ok(())
}

/// Expand files, directories and glob patterns into supported input paths,
/// keeping the order they were given in.
///
/// A plain path that does not exist is kept so that reading it fails and the
/// batch reports it, rather than dropping it silently.
fn collect_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.is_file())
                .collect();
            entries.sort();
            files.extend(entries);
        } else if path.is_file() || !is_glob_pattern(input) {
            files.push(path.to_path_buf());
        } else {
            let matched: Vec<PathBuf> = glob(input)?.filter_map(|r| r.ok()).collect();
            if matched.is_empty() {
                warn!("Pattern {} matched no files", input);
            }
            files.extend(matched);
        }
    }

    let (supported, skipped): (Vec<_>, Vec<_>) = files.into_iter().partition(|p| is_supported(p));
    for path in &skipped {
        warn!("Skipping unsupported file {}", path.display());
    }

    Ok(supported)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn failure_report_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("gemx");
    output.with_file_name(format!("{}_failures.csv", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_inputs_filters_and_orders() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.txt", "notes.docx"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let files = collect_inputs(&[dir.path().display().to_string()]).unwrap();
        let names: Vec<_> = files.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, vec!["a.txt", "b.pdf"]);
    }

    #[test]
    fn test_collect_inputs_glob() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c1.txt", "c2.txt", "other.pdf"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let pattern = dir.path().join("c*.txt").display().to_string();
        let files = collect_inputs(&[pattern]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_collect_inputs_keeps_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        let missing = dir.path().join("missing.pdf");

        let files = collect_inputs(&[
            dir.path().join("a.txt").display().to_string(),
            missing.display().to_string(),
        ])
        .unwrap();
        assert_eq!(files, vec![dir.path().join("a.txt"), missing]);
    }

    #[test]
    fn test_collect_inputs_unmatched_glob_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("*.pdf").display().to_string();

        assert!(collect_inputs(&[pattern]).unwrap().is_empty());
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("contracts/*.pdf"));
        assert!(is_glob_pattern("c?.txt"));
        assert!(!is_glob_pattern("contracts/missing.pdf"));
    }

    #[test]
    fn test_failure_report_path() {
        assert_eq!(
            failure_report_path(Path::new("out/table.csv")),
            PathBuf::from("out/table_failures.csv")
        );
    }
}
