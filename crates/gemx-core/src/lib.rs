//! Core library for GeM contract field extraction.
//!
//! This crate provides:
//! - PDF text-layer extraction
//! - Single-value and label-bounded block field extractors
//! - Declarative field catalogs (built-in GeM contract catalog, JSON catalogs)
//! - Record assembly and order-preserving batch aggregation

pub mod batch;
pub mod catalog;
pub mod document;
pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;
pub mod record;
pub mod source;
pub mod text;

pub use batch::{BatchAggregator, BatchEntry, EntryOutcome, FailurePolicy, SourceDocument, Table};
pub use catalog::{CatalogDef, FieldCatalog, FieldDef, PartDef, PostProcess, RuleDef};
pub use document::Document;
pub use error::{CatalogError, DocumentError, GemxError, PdfError, Result};
pub use extract::{extract_block, extract_field, Extraction, ExtractionKind};
pub use models::config::GemxConfig;
pub use pdf::{PdfExtractor, PdfProcessor};
pub use record::{ExtractionResult, Record, RecordAssembler};
pub use source::DocumentLoader;
pub use text::normalize;
