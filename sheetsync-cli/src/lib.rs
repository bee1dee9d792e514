//! CSV bridge between files and [`Table`]s.
//!
//! A header row names the columns. An empty field is an absent cell, every
//! other field is kept as text; typing happens later against the remote
//! column kinds.

use sheetsync_sync::SyncSummary;
use sheetsync_types::{CellValue, Row, Table};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

/// Errors raised while moving tables in or out of CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid table: {0}")]
    Table(#[from] sheetsync_types::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CsvResult<T> = Result<T, CsvError>;

/// Reads a local table from CSV.
pub fn read_table<R: Read>(reader: R) -> CsvResult<Table> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    let mut table = Table::from_titles(headers.iter())?;
    let ids: Vec<_> = table.columns().iter().map(|c| c.id).collect();

    for record in reader.records() {
        let record = record?;
        let mut row = Row::new();
        for (id, field) in ids.iter().zip(record.iter()) {
            if field.is_empty() {
                continue;
            }
            row.set(*id, CellValue::text(field));
        }
        table.push_row(row)?;
    }
    Ok(table)
}

/// Writes a table as CSV, absent cells as empty fields.
pub fn write_table<W: Write>(table: &Table, writer: W) -> CsvResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(table.titles())?;
    for row in table.rows() {
        writer.write_record(
            table
                .columns()
                .iter()
                .map(|c| row.get(c.id).map(ToString::to_string).unwrap_or_default()),
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_table_from_path(path: &Path) -> CsvResult<Table> {
    read_table(File::open(path)?)
}

pub fn write_table_to_path(table: &Table, path: &Path) -> CsvResult<()> {
    write_table(table, File::create(path)?)
}

/// One-line report of a write.
pub fn summary_line(summary: &SyncSummary) -> String {
    let mut line = format!(
        "{} updated, {} created, {} deleted",
        summary.updated, summary.created, summary.deleted
    );
    if summary.cleared > 0 {
        line.push_str(&format!(" (after clearing {} rows)", summary.cleared));
    }
    line
}
