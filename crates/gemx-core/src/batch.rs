//! Batch aggregation of per-document records into one table.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::document::Document;
use crate::error::{DocumentError, GemxError, Result};
use crate::record::{ExtractionResult, Record, RecordAssembler};
use crate::text::normalize;

/// A batch input: either readable text or the reason there is none.
#[derive(Debug)]
pub enum SourceDocument {
    Readable(Document),
    Unreadable {
        file_name: String,
        error: DocumentError,
    },
}

impl SourceDocument {
    pub fn file_name(&self) -> &str {
        match self {
            Self::Readable(document) => document.file_name(),
            Self::Unreadable { file_name, .. } => file_name,
        }
    }
}

impl From<Document> for SourceDocument {
    fn from(document: Document) -> Self {
        Self::Readable(document)
    }
}

/// What the aggregator does with an unreadable document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record a failure entry and keep going.
    #[default]
    Skip,
    /// Abort the batch at the first failure.
    FailFast,
}

/// Outcome for one batch input.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    Extracted {
        record: Record,
        warnings: Vec<String>,
    },
    Failed {
        reason: String,
    },
}

/// One row of the table, tagged with its input position.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub index: usize,
    pub file_name: String,
    #[serde(flatten)]
    pub outcome: EntryOutcome,
}

impl BatchEntry {
    pub fn record(&self) -> Option<&Record> {
        match &self.outcome {
            EntryOutcome::Extracted { record, .. } => Some(record),
            EntryOutcome::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.outcome {
            EntryOutcome::Failed { reason } => Some(reason),
            EntryOutcome::Extracted { .. } => None,
        }
    }
}

/// Ordered batch results sharing one column schema.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    columns: Vec<String>,
    entries: Vec<BatchEntry>,
}

impl Table {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Every input, in input order.
    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    /// Successfully extracted records, in input order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().filter_map(BatchEntry::record)
    }

    /// Inputs that produced no record.
    pub fn failures(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|e| e.failure().is_some())
    }

    /// Number of inputs accounted for.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs the record assembler over a batch of documents.
#[derive(Debug, Clone, Default)]
pub struct BatchAggregator {
    assembler: RecordAssembler,
    policy: FailurePolicy,
    parallel: bool,
}

impl BatchAggregator {
    pub fn new(assembler: RecordAssembler) -> Self {
        Self {
            assembler,
            policy: FailurePolicy::default(),
            parallel: false,
        }
    }

    /// Set the failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Process documents in parallel. Ignored without the `parallel` feature.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn assembler(&self) -> &RecordAssembler {
        &self.assembler
    }

    /// Assemble every document into one table, preserving input order.
    ///
    /// Under [`FailurePolicy::Skip`] this never returns an error: unreadable
    /// documents and documents whose extraction panicked become failure
    /// entries. Under [`FailurePolicy::FailFast`] the first such document
    /// aborts the batch.
    pub fn aggregate<I>(&self, documents: I) -> Result<Table>
    where
        I: IntoIterator<Item = SourceDocument>,
    {
        self.aggregate_with(documents, |document| self.assembler.assemble(document))
    }

    /// Like [`aggregate`](Self::aggregate), with a caller-supplied assembly
    /// step per readable document.
    ///
    /// Columns still come from the configured assembler's catalog, so
    /// `assemble` must produce records with that key set.
    pub fn aggregate_with<I, F>(&self, documents: I, assemble: F) -> Result<Table>
    where
        I: IntoIterator<Item = SourceDocument>,
        F: Fn(&Document) -> ExtractionResult + Sync,
    {
        let start = Instant::now();
        let documents: Vec<SourceDocument> = documents.into_iter().collect();
        let total = documents.len();

        let entries = if self.parallel {
            self.process_parallel(documents, &assemble)?
        } else {
            self.process_sequential(documents, &assemble)?
        };

        let failed = entries.iter().filter(|e| e.failure().is_some()).count();
        info!(
            "Processed {} documents ({} failed) in {:?}",
            total,
            failed,
            start.elapsed()
        );

        Ok(Table {
            columns: self.assembler.catalog().columns(),
            entries,
        })
    }

    fn process_sequential<F>(&self, documents: Vec<SourceDocument>, assemble: &F) -> Result<Vec<BatchEntry>>
    where
        F: Fn(&Document) -> ExtractionResult + Sync,
    {
        let mut entries = Vec::with_capacity(documents.len());
        for (index, source) in documents.into_iter().enumerate() {
            let entry = self.process_one(index, source, assemble);
            self.check_policy(&entry)?;
            entries.push(entry);
        }
        Ok(entries)
    }

    #[cfg(feature = "parallel")]
    fn process_parallel<F>(&self, documents: Vec<SourceDocument>, assemble: &F) -> Result<Vec<BatchEntry>>
    where
        F: Fn(&Document) -> ExtractionResult + Sync,
    {
        use rayon::prelude::*;

        // Indexed collect keeps input order regardless of completion order.
        let entries: Vec<BatchEntry> = documents
            .into_par_iter()
            .enumerate()
            .map(|(index, source)| self.process_one(index, source, assemble))
            .collect();

        for entry in &entries {
            self.check_policy(entry)?;
        }
        Ok(entries)
    }

    #[cfg(not(feature = "parallel"))]
    fn process_parallel<F>(&self, documents: Vec<SourceDocument>, assemble: &F) -> Result<Vec<BatchEntry>>
    where
        F: Fn(&Document) -> ExtractionResult + Sync,
    {
        warn!("Built without the parallel feature, processing sequentially");
        self.process_sequential(documents, assemble)
    }

    fn check_policy(&self, entry: &BatchEntry) -> Result<()> {
        match (self.policy, entry.failure()) {
            (FailurePolicy::FailFast, Some(reason)) => Err(GemxError::BatchAborted {
                file_name: entry.file_name.clone(),
                reason: reason.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn process_one<F>(&self, index: usize, source: SourceDocument, assemble: &F) -> BatchEntry
    where
        F: Fn(&Document) -> ExtractionResult + Sync,
    {
        let file_name = normalize(source.file_name());

        let outcome = match source {
            SourceDocument::Readable(document) => {
                let assembled = panic::catch_unwind(AssertUnwindSafe(|| assemble(&document)));
                match assembled {
                    Ok(result) => EntryOutcome::Extracted {
                        record: result.record.map_values(normalize),
                        warnings: result.warnings,
                    },
                    Err(payload) => {
                        let reason = format!("extraction panicked: {}", panic_message(payload.as_ref()));
                        warn!("Failed to process {}: {}", file_name, reason);
                        EntryOutcome::Failed { reason }
                    }
                }
            }
            SourceDocument::Unreadable { error, .. } => {
                warn!("Failed to process {}: {}", file_name, error);
                EntryOutcome::Failed {
                    reason: error.to_string(),
                }
            }
        };

        BatchEntry {
            index,
            file_name,
            outcome,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
