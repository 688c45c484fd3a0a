//! Process command - show the record extracted from a single file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde_json::json;
use tracing::{debug, info};

use gemx_core::{DocumentLoader, ExtractionKind, ExtractionResult, RecordAssembler, SourceDocument};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or pre-extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: DisplayFormat,

    /// Field catalog JSON (default: built-in GeM contract catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Show whether each field label was found, empty or missing
    #[arg(long)]
    show_outcomes: bool,

    /// Print the raw extracted text instead of the record
    #[arg(long)]
    raw: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DisplayFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;
    let catalog = super::load_catalog(args.catalog.as_deref(), &config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let document = match DocumentLoader::new(config.pdf.clone()).load_path(&args.input) {
        SourceDocument::Readable(document) => document,
        SourceDocument::Unreadable { file_name, error } => {
            anyhow::bail!("Could not read {}: {}", file_name, error)
        }
    };

    if args.raw {
        println!("{}", document.text());
        return Ok(());
    }

    let result = RecordAssembler::new(catalog).assemble(&document);
    let output = match args.format {
        DisplayFormat::Json => format_json(&result, args.show_outcomes)?,
        DisplayFormat::Text => format_text(&result, args.show_outcomes),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_json(result: &ExtractionResult, show_outcomes: bool) -> anyhow::Result<String> {
    let value = if show_outcomes {
        let outcomes: serde_json::Map<String, serde_json::Value> = result
            .outcomes
            .iter()
            .map(|(name, kind)| Ok((name.clone(), serde_json::to_value(kind)?)))
            .collect::<Result<_, serde_json::Error>>()?;
        json!({ "record": result.record, "outcomes": outcomes })
    } else {
        serde_json::to_value(&result.record)?
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

fn format_text(result: &ExtractionResult, show_outcomes: bool) -> String {
    let mut output = String::new();

    for ((name, value), (_, kind)) in result.record.iter().zip(&result.outcomes) {
        let marker = match kind {
            ExtractionKind::Found => "found",
            ExtractionKind::Empty => "empty",
            ExtractionKind::NotFound => "missing",
        };

        if show_outcomes {
            output.push_str(&format!("{} [{}]:\n", name, marker));
        } else {
            output.push_str(&format!("{}:\n", name));
        }
        for line in value.lines() {
            output.push_str(&format!("  {}\n", line));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemx_core::Document;

    fn sample() -> ExtractionResult {
        RecordAssembler::default().assemble(&Document::new(
            "a.pdf",
            "Contract No: GEMC-7\nOrganisation Details\nMinistry : Power\nBuyer Details",
        ))
    }

    #[test]
    fn test_format_text_multiline_values_indented() {
        let text = format_text(&sample(), true);

        assert!(text.contains("Contract No. [found]:\n  GEMC-7\n"));
        assert!(text.contains("Organisation & Buyer Details [found]:\n  Organisation Details\n  Ministry : Power\n"));
        assert!(text.contains("Brand [missing]:\n"));
    }

    #[test]
    fn test_format_json_outcomes() {
        let json: serde_json::Value =
            serde_json::from_str(&format_json(&sample(), true).unwrap()).unwrap();

        assert_eq!(json["record"]["Contract No."], "GEMC-7");
        assert_eq!(json["outcomes"]["Contract No."], "found");
        assert_eq!(json["outcomes"]["Brand"], "not_found");
    }
}
