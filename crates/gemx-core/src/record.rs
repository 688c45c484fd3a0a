//! Record assembly: one catalog run over one document.

use std::time::Instant;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::catalog::FieldCatalog;
use crate::document::Document;
use crate::extract::ExtractionKind;

/// Ordered field-name to value mapping for one document.
///
/// Every record assembled from the same catalog has the same keys in the
/// same order; fields that were not found hold an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Value of `name`, if the field is part of this record.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rebuild the record with every value passed through `f`.
    pub fn map_values(self, f: impl Fn(&str) -> String) -> Self {
        Self {
            fields: self
                .fields
                .into_iter()
                .map(|(key, value)| {
                    let value = f(&value);
                    (key, value)
                })
                .collect(),
        }
    }

    fn push(&mut self, key: &str, value: String) {
        self.fields.push((key.to_string(), value));
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Result of assembling one document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Assembled record.
    pub record: Record,
    /// Per-field outcome, in column order.
    pub outcomes: Vec<(String, ExtractionKind)>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// Fields whose label was never recognized.
    pub fn missing_fields(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|(_, kind)| *kind == ExtractionKind::NotFound)
            .map(|(name, _)| name.as_str())
    }
}

/// Runs a field catalog against documents.
#[derive(Debug, Clone, Default)]
pub struct RecordAssembler {
    catalog: FieldCatalog,
}

impl RecordAssembler {
    pub fn new(catalog: FieldCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Build the record for `document`.
    ///
    /// Never fails: a document that matches nothing yields a record whose
    /// values are all empty (or their declared defaults), plus warnings.
    pub fn assemble(&self, document: &Document) -> ExtractionResult {
        let start = Instant::now();
        let mut record = Record::default();
        let mut outcomes = Vec::with_capacity(self.catalog.len());
        let mut warnings = Vec::new();

        for (name, extraction, default) in self.catalog.evaluate(document) {
            let kind = extraction.kind();
            if kind == ExtractionKind::NotFound {
                warnings.push(format!("Could not extract {}", name));
            }
            record.push(name, extraction.value_or(default));
            outcomes.push((name.to_string(), kind));
        }

        let found = outcomes
            .iter()
            .filter(|(_, kind)| *kind == ExtractionKind::Found)
            .count();

        debug!(
            "Assembled {} with {}/{} fields found",
            document.file_name(),
            found,
            outcomes.len()
        );

        ExtractionResult {
            record,
            outcomes,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
