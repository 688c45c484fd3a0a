//! Catalog command - inspect and export field catalogs.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use gemx_core::{FieldCatalog, RuleDef};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    command: CatalogCommand,
}

#[derive(Subcommand)]
enum CatalogCommand {
    /// Print the active catalog as JSON
    Show {
        /// Catalog file (default: configured or built-in)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Write the built-in catalog to a file as a starting point
    Init(InitArgs),

    /// Compile a catalog file and list its columns
    Check {
        /// Catalog file to check
        path: PathBuf,
    },
}

#[derive(Args)]
struct InitArgs {
    /// Output path for the catalog file
    #[arg(short, long, default_value = "catalog.json")]
    output: PathBuf,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: CatalogArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        CatalogCommand::Show { catalog } => {
            let config = super::load_config(config_path)?;
            let catalog = super::load_catalog(catalog.as_deref(), &config)?;
            println!("{}", catalog.to_json()?);
            Ok(())
        }
        CatalogCommand::Init(init_args) => init_catalog(init_args),
        CatalogCommand::Check { path } => check_catalog(&path),
    }
}

fn init_catalog(args: InitArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "Catalog file already exists at {}. Use --force to overwrite.",
            args.output.display()
        );
    }

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(&args.output, FieldCatalog::gem_contract().to_json()?)?;

    println!(
        "{} Created catalog file at {}",
        style("✓").green(),
        args.output.display()
    );

    Ok(())
}

fn check_catalog(path: &Path) -> anyhow::Result<()> {
    let catalog = FieldCatalog::from_file(path)?;

    println!(
        "{} Catalog '{}' compiled with {} fields",
        style("✓").green(),
        catalog.name(),
        catalog.len()
    );
    for (i, field) in catalog.definition().fields.iter().enumerate() {
        println!("  {:>2}. {} ({})", i + 1, field.name, rule_kind(&field.rule));
    }

    Ok(())
}

fn rule_kind(rule: &RuleDef) -> &'static str {
    match rule {
        RuleDef::Single { .. } => "single",
        RuleDef::Block { .. } => "block",
        RuleDef::Composite { .. } => "composite",
        RuleDef::FileName => "file name",
    }
}
