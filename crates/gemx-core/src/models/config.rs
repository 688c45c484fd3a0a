//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::batch::FailurePolicy;
use crate::error::{GemxError, Result};

/// Main configuration for gemx.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GemxConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Table export configuration.
    pub output: OutputConfig,
}

/// Field extraction and batch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Field catalog JSON file; the built-in GeM catalog when unset.
    pub catalog_path: Option<PathBuf>,

    /// Process documents in parallel (row order is preserved).
    pub parallel: bool,

    /// What to do when a document cannot be read.
    pub failure_policy: FailurePolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            parallel: false,
            failure_policy: FailurePolicy::Skip,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Retry encrypted PDFs with an empty user password.
    pub decrypt_empty_password: bool,

    /// Minimum non-whitespace characters for a document to count as readable.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            decrypt_empty_password: true,
            min_text_length: 1,
        }
    }
}

/// Tabular export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Table export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default export format.
    pub format: ExportFormat,

    /// Default output file stem (extension follows the format).
    pub file_stem: String,

    /// Also write a report of documents that could not be read.
    pub failure_report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            file_stem: "gem_invoice_data".to_string(),
            failure_report: true,
        }
    }
}

impl GemxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| GemxError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| GemxError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
