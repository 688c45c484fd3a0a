//! Turning source files into documents.

use std::path::Path;

use tracing::debug;

use crate::batch::SourceDocument;
use crate::document::Document;
use crate::error::DocumentError;
use crate::models::config::PdfConfig;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// File extensions the loader understands.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

/// Whether `path` has an extension the loader can read.
pub fn is_supported(path: &Path) -> bool {
    extension(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

/// Loads `.pdf` text layers and pre-extracted `.txt` files.
#[derive(Debug, Clone, Default)]
pub struct DocumentLoader {
    config: PdfConfig,
}

impl DocumentLoader {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }

    /// Turn raw file bytes into a source document.
    ///
    /// Failures are carried in the returned value, never raised, so one bad
    /// file cannot stop the batch.
    pub fn load(&self, file_name: &str, data: &[u8]) -> SourceDocument {
        match self.read_text(file_name, data) {
            Ok(text) => SourceDocument::Readable(Document::new(file_name, text)),
            Err(error) => SourceDocument::Unreadable {
                file_name: file_name.to_string(),
                error,
            },
        }
    }

    /// Read `path` from disk and load it.
    pub fn load_path(&self, path: &Path) -> SourceDocument {
        let file_name = display_name(path);
        match std::fs::read(path) {
            Ok(data) => self.load(&file_name, &data),
            Err(e) => SourceDocument::Unreadable {
                file_name,
                error: DocumentError::Io(e),
            },
        }
    }

    fn read_text(&self, file_name: &str, data: &[u8]) -> Result<String, DocumentError> {
        let text = match extension(Path::new(file_name)).as_deref() {
            Some("pdf") => {
                let mut extractor = PdfExtractor::new()
                    .with_empty_password_decryption(self.config.decrypt_empty_password);
                extractor.load(data)?;
                debug!("{}: {} pages", file_name, extractor.page_count());
                extractor.extract_text()?
            }
            Some("txt") => String::from_utf8_lossy(data).into_owned(),
            other => {
                return Err(DocumentError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ));
            }
        };

        let visible = text.chars().filter(|c| !c.is_whitespace()).count();
        if visible < self.config.min_text_length.max(1) {
            return Err(DocumentError::NoText);
        }
        Ok(text)
    }
}

/// File name used as the document's identity in the table.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::pdf::fixtures::{empty_pdf, text_pdf};
    use crate::record::RecordAssembler;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_supported() {
        assert!(is_supported(Path::new("a/contract.PDF")));
        assert!(is_supported(Path::new("contract.txt")));
        assert!(!is_supported(Path::new("contract.docx")));
        assert!(!is_supported(Path::new("contract")));
    }

    #[test]
    fn test_load_text() {
        let loader = DocumentLoader::default();
        match loader.load("a.txt", "Brand : Syska".as_bytes()) {
            SourceDocument::Readable(doc) => {
                assert_eq!(doc.file_name(), "a.txt");
                assert_eq!(doc.text(), "Brand : Syska");
            }
            other => panic!("expected readable document, got {:?}", other),
        }
    }

    #[test]
    fn test_load_pdf_feeds_record() {
        let bytes = text_pdf(&["Contract No: GEMC-555", "Brand : Syska", "Rating - 100 Watt"]);

        let document = match DocumentLoader::default().load("x.pdf", &bytes) {
            SourceDocument::Readable(document) => document,
            other => panic!("expected readable document, got {:?}", other),
        };
        assert_eq!(document.file_name(), "x.pdf");
        assert!(document.text().contains("Contract No: GEMC-555"));

        let result = RecordAssembler::default().assemble(&document);
        assert_eq!(result.record.get("File Name"), Some("x.pdf"));
        assert_eq!(result.record.get("Contract No."), Some("GEMC-555"));
        assert_eq!(result.record.get("Brand"), Some("Syska"));
        assert_eq!(result.record.get("Wattage"), Some("100"));
    }

    #[test]
    fn test_pdf_without_pages_is_unreadable() {
        assert!(matches!(
            DocumentLoader::default().load("empty.pdf", &empty_pdf()),
            SourceDocument::Unreadable { error: DocumentError::Pdf(PdfError::NoPages), .. }
        ));
    }

    #[test]
    fn test_corrupt_pdf_is_unreadable() {
        let loader = DocumentLoader::default();
        let source = loader.load("broken.pdf", b"\x00\x01garbage");

        assert!(matches!(
            source,
            SourceDocument::Unreadable { error: DocumentError::Pdf(_), .. }
        ));
    }

    #[test]
    fn test_blank_text_is_unreadable() {
        let loader = DocumentLoader::default();
        assert!(matches!(
            loader.load("blank.txt", b" \n\t "),
            SourceDocument::Unreadable { error: DocumentError::NoText, .. }
        ));
    }

    #[test]
    fn test_unsupported_extension() {
        let loader = DocumentLoader::default();
        assert!(matches!(
            loader.load("scan.png", b"\x89PNG"),
            SourceDocument::Unreadable { error: DocumentError::UnsupportedFormat(ext), .. } if ext == "png"
        ));
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = DocumentLoader::default().load_path(&dir.path().join("missing.pdf"));

        assert_eq!(source.file_name(), "missing.pdf");
        assert!(matches!(source, SourceDocument::Unreadable { error: DocumentError::Io(_), .. }));
    }
}
