//! Paginated table assembly.
//!
//! A remote table is read in two steps. A probe fetch of page 1 with a tiny
//! page size learns the schema and the total row count without moving a full
//! page. Then pages `1..=ceil(total / page_size)` are fetched one after the
//! other and concatenated in fetch order, so the assembled row order equals
//! a single-shot read.

use crate::coerce::numeric_form;
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::remote::{RemoteSheets, Source};
use sheetsync_types::{CellValue, Column, ColumnKind, SourceSheet, Table};
use tracing::{debug, info, warn};

/// A fully read remote table.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledTable {
    /// Name of the sheet or aggregate view.
    pub source_name: String,
    /// Rows in fetch order under the probe's schema.
    pub table: Table,
    /// Display kind per column, in schema order. See [`infer_display_kind`].
    pub display_kinds: Vec<ColumnKind>,
    /// Backing sheets of an aggregate view; empty for plain sheets.
    pub source_sheets: Vec<SourceSheet>,
}

impl AssembledTable {
    /// Column titles paired with their display kinds.
    pub fn display_schema(&self) -> Vec<(&str, ColumnKind)> {
        self.table
            .titles()
            .zip(self.display_kinds.iter().copied())
            .collect()
    }
}

/// Number of bulk pages needed for `total_rows`. Zero rows need none: the
/// probe alone already describes an empty table.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size)
}

/// Reads every row of `source`.
///
/// Any failed fetch aborts the whole read; no partial table is returned.
pub async fn assemble(
    remote: &dyn RemoteSheets,
    source: Source,
    config: &SyncConfig,
) -> SyncResult<AssembledTable> {
    if config.page_size == 0 || config.probe_page_size == 0 {
        return Err(SyncError::Configuration(
            "page sizes must be positive".to_string(),
        ));
    }

    let probe = remote
        .fetch_page(source, config.probe_page_size, 1)
        .await?;
    let total_rows = probe.total_row_count.ok_or_else(|| {
        SyncError::Protocol(format!("probe of {} carried no total row count", source.id))
    })?;

    let mut table = Table::new(probe.columns)?;
    let mut source_sheets = probe.source_sheets;
    let pages = page_count(total_rows, config.page_size);
    info!(
        "- {} rows to be read from {} ({} pages of {})",
        total_rows, probe.source_name, pages, config.page_size
    );

    for page_number in 1..=pages {
        let page = remote
            .fetch_page(source, config.page_size, page_number)
            .await?;
        debug!("Page {}/{}: {} rows", page_number, pages, page.rows.len());
        if source_sheets.is_empty() {
            source_sheets = page.source_sheets;
        }
        table.extend_rows(page.rows).map_err(|e| {
            SyncError::Protocol(format!("page {page_number} of {}: {e}", source.id))
        })?;
    }

    if table.len() != total_rows {
        warn!(
            "Expected {} rows from {}, assembled {}",
            total_rows,
            source.id,
            table.len()
        );
    }

    let display_kinds = table
        .columns()
        .iter()
        .map(|c| infer_display_kind(c, table.column_values(c.id)))
        .collect();

    Ok(AssembledTable {
        source_name: probe.source_name,
        table,
        display_kinds,
        source_sheets,
    })
}

/// Narrows a loosely typed column to `Number` when every non-blank value in
/// it has a numeric reading.
///
/// Only the display schema is affected; cell values are left as fetched. A
/// single non-numeric value keeps the declared kind for the whole column, as
/// does a column with no values at all.
pub fn infer_display_kind<'a>(
    column: &Column,
    values: impl Iterator<Item = Option<&'a CellValue>>,
) -> ColumnKind {
    if !column.kind.is_loosely_typed() {
        return column.kind;
    }

    let mut seen = false;
    for value in values.flatten().filter(|v| !v.is_blank()) {
        if matches!(value, CellValue::Bool(_)) || numeric_form(value).is_none() {
            return column.kind;
        }
        seen = true;
    }

    if seen { ColumnKind::Number } else { column.kind }
}
