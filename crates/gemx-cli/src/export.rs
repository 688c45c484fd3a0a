//! Table export to CSV and JSON.

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use gemx_core::{BatchEntry, Record, Table};

/// Write one header row and one row per extracted record.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(table.columns())?;
    for record in table.records() {
        wtr.write_record(record.values())?;
    }

    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonExport<'a> {
    generated_at: String,
    columns: &'a [String],
    records: Vec<&'a Record>,
    failures: Vec<FailureRow<'a>>,
}

#[derive(Serialize)]
struct FailureRow<'a> {
    index: usize,
    file_name: &'a str,
    reason: &'a str,
}

fn failure_rows(table: &Table) -> Vec<FailureRow<'_>> {
    table
        .failures()
        .filter_map(|entry: &BatchEntry| {
            entry.failure().map(|reason| FailureRow {
                index: entry.index,
                file_name: &entry.file_name,
                reason,
            })
        })
        .collect()
}

/// Write records and failures as one JSON document.
pub fn write_json<W: Write>(table: &Table, writer: W) -> anyhow::Result<()> {
    let export = JsonExport {
        generated_at: Utc::now().to_rfc3339(),
        columns: table.columns(),
        records: table.records().collect(),
        failures: failure_rows(table),
    };

    serde_json::to_writer_pretty(writer, &export)?;
    Ok(())
}

/// Write a CSV listing every document that produced no record.
pub fn write_failure_report(table: &Table, path: &Path) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["index", "file_name", "reason"])?;
    for row in failure_rows(table) {
        wtr.write_record([row.index.to_string().as_str(), row.file_name, row.reason])?;
    }

    wtr.flush()?;
    Ok(())
}
