//! Subcommands and the setup they share.

pub mod catalog;
pub mod config;
pub mod extract;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use gemx_core::models::config::GemxConfig;
use gemx_core::FieldCatalog;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gemx")
        .join("config.json")
}

/// Load the config from `--config`, else the default location, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<GemxConfig> {
    if let Some(path) = config_path {
        return Ok(GemxConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(GemxConfig::from_file(&default_path)?)
    } else {
        Ok(GemxConfig::default())
    }
}

/// Resolve the catalog: explicit flag, then config, then built-in.
pub fn load_catalog(flag: Option<&Path>, config: &GemxConfig) -> anyhow::Result<FieldCatalog> {
    match flag.or(config.extraction.catalog_path.as_deref()) {
        Some(path) => {
            debug!("Loading catalog from {}", path.display());
            FieldCatalog::from_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to load catalog {}: {}", path.display(), e))
        }
        None => Ok(FieldCatalog::gem_contract()),
    }
}
