//! Error types for the gemx-core library.

use thiserror::Error;

/// Main error type for the gemx library.
#[derive(Error, Debug)]
pub enum GemxError {
    /// Field catalog could not be loaded or compiled.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A batch running with fail-fast policy hit an unusable document.
    #[error("batch aborted at {file_name}: {reason}")]
    BatchAborted { file_name: String, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file could not be parsed or written.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Reasons a source file yields no document text.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file extension is not one the source understands.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The PDF could not be read.
    #[error(transparent)]
    Pdf(#[from] PdfError),

    /// The file was read but produced no text at all.
    #[error("no text extracted")]
    NoText,

    /// I/O error while reading the source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to field catalogs.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A single-value pattern failed to compile.
    #[error("invalid pattern for field {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A single-value rule declared no patterns.
    #[error("field {0} has no patterns")]
    NoPatterns(String),

    /// A block rule declared no start label.
    #[error("block field {0} has no start label")]
    EmptyStart(String),

    /// Two fields share a column name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    /// Catalog JSON could not be parsed.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for the gemx library.
pub type Result<T> = std::result::Result<T, GemxError>;
