//! In-process remote store.
//!
//! Behaves like the real store where the sync core can observe it: pages
//! are sliced from a stable row order, columns and the row count only ride
//! on page 1, new rows get fresh ids and go to the bottom, and writing an
//! empty string clears a cell, and a mutation batch that fails validation
//! changes nothing. Every call is logged, and calls can be made to fail.

use super::{RemotePage, RemoteSheets, Source};
use crate::error::{SyncError, SyncResult};
use crate::plan::{CellWrite, NewRow, RowUpdate};
use async_trait::async_trait;
use sheetsync_types::{Column, Row, RowId, SheetId, SourceSheet};
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;
use tracing::debug;

/// First id handed to rows added through [`RemoteSheets::add_rows`].
const FIRST_ASSIGNED_ROW_ID: i64 = 9_000_000;

/// A sheet held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySheet {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    /// Reported when the sheet is read as an aggregate view.
    pub source_sheets: Vec<SourceSheet>,
}

impl MemorySheet {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
            source_sheets: Vec::new(),
        }
    }

    /// Builder-style row setter.
    #[must_use]
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    /// Builder-style source sheet setter.
    #[must_use]
    pub fn with_source_sheets(mut self, source_sheets: Vec<SourceSheet>) -> Self {
        self.source_sheets = source_sheets;
        self
    }
}

/// A call received by [`MemorySheets`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    FetchPage {
        source: Source,
        page_size: usize,
        page_number: usize,
    },
    DeleteRows {
        sheet_id: SheetId,
        row_ids: Vec<RowId>,
    },
    UpdateRows {
        sheet_id: SheetId,
        rows: Vec<RowUpdate>,
    },
    AddRows {
        sheet_id: SheetId,
        rows: Vec<NewRow>,
    },
}

impl RemoteCall {
    /// The operation this call performed.
    pub fn op(&self) -> RemoteOp {
        match self {
            RemoteCall::FetchPage { .. } => RemoteOp::FetchPage,
            RemoteCall::DeleteRows { .. } => RemoteOp::DeleteRows,
            RemoteCall::UpdateRows { .. } => RemoteOp::UpdateRows,
            RemoteCall::AddRows { .. } => RemoteOp::AddRows,
        }
    }
}

/// The operations of [`RemoteSheets`], for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOp {
    FetchPage,
    DeleteRows,
    UpdateRows,
    AddRows,
}

#[derive(Debug, Default)]
struct MemoryState {
    sheets: HashMap<SheetId, MemorySheet>,
    calls: Vec<RemoteCall>,
    failing_ops: HashSet<RemoteOp>,
    failing_pages: HashSet<usize>,
    next_row_id: i64,
}

/// In-memory [`RemoteSheets`] implementation.
#[derive(Debug)]
pub struct MemorySheets {
    state: Mutex<MemoryState>,
}

impl Default for MemorySheets {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySheets {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_row_id: FIRST_ASSIGNED_ROW_ID,
                ..Default::default()
            }),
        }
    }

    /// Builder-style sheet setter.
    #[must_use]
    pub fn with_sheet(mut self, id: SheetId, sheet: MemorySheet) -> Self {
        self.state.get_mut().sheets.insert(id, sheet);
        self
    }

    /// Adds or replaces a sheet.
    pub async fn insert_sheet(&self, id: SheetId, sheet: MemorySheet) {
        self.state.lock().await.sheets.insert(id, sheet);
    }

    /// Returns a snapshot of a sheet.
    pub async fn sheet(&self, id: SheetId) -> Option<MemorySheet> {
        self.state.lock().await.sheets.get(&id).cloned()
    }

    /// Returns every call received so far.
    pub async fn calls(&self) -> Vec<RemoteCall> {
        self.state.lock().await.calls.clone()
    }

    /// Returns the operations received so far, in order.
    pub async fn ops(&self) -> Vec<RemoteOp> {
        self.state.lock().await.calls.iter().map(RemoteCall::op).collect()
    }

    /// Makes every subsequent call of `op` fail.
    pub async fn fail(&self, op: RemoteOp) {
        self.state.lock().await.failing_ops.insert(op);
    }

    /// Makes every subsequent fetch of `page_number` fail.
    pub async fn fail_page(&self, page_number: usize) {
        self.state.lock().await.failing_pages.insert(page_number);
    }
}

impl MemoryState {
    fn record(&mut self, call: RemoteCall) -> SyncResult<()> {
        let op = call.op();
        let failing_page = match &call {
            RemoteCall::FetchPage { page_number, .. } => self.failing_pages.contains(page_number),
            _ => false,
        };
        self.calls.push(call);
        if failing_page || self.failing_ops.contains(&op) {
            return Err(SyncError::RemoteUnavailable(format!("{op:?} failed (injected)")));
        }
        Ok(())
    }

    fn sheet_mut(&mut self, id: SheetId) -> SyncResult<&mut MemorySheet> {
        self.sheets
            .get_mut(&id)
            .ok_or_else(|| SyncError::RemoteUnavailable(format!("sheet {id} not found")))
    }
}

fn check_cells(sheet_columns: &[Column], cells: &[CellWrite]) -> SyncResult<()> {
    match cells
        .iter()
        .find(|cell| !sheet_columns.iter().any(|c| c.id == cell.column_id))
    {
        Some(cell) => Err(SyncError::RemoteUnavailable(format!(
            "column {} not found",
            cell.column_id
        ))),
        None => Ok(()),
    }
}

fn apply_cells(row: &mut Row, cells: &[CellWrite]) {
    for cell in cells {
        if cell.value.is_blank() {
            row.cells.remove(&cell.column_id);
        } else {
            row.cells.insert(cell.column_id, cell.value.clone());
        }
    }
}

#[async_trait]
impl RemoteSheets for MemorySheets {
    fn provider_name(&self) -> &'static str {
        "Memory"
    }

    async fn fetch_page(
        &self,
        source: Source,
        page_size: usize,
        page_number: usize,
    ) -> SyncResult<RemotePage> {
        let mut state = self.state.lock().await;
        state.record(RemoteCall::FetchPage {
            source,
            page_size,
            page_number,
        })?;

        if page_number == 0 || page_size == 0 {
            return Err(SyncError::RemoteUnavailable(format!(
                "invalid page request: size {page_size}, page {page_number}"
            )));
        }

        let sheet = state.sheet_mut(source.id)?;
        let start = (page_number - 1).saturating_mul(page_size).min(sheet.rows.len());
        let end = start.saturating_add(page_size).min(sheet.rows.len());
        debug!("Serving rows {}..{} of sheet {}", start, end, source.id);

        let first = page_number == 1;
        Ok(RemotePage {
            rows: sheet.rows[start..end].to_vec(),
            columns: if first { sheet.columns.clone() } else { Vec::new() },
            total_row_count: first.then_some(sheet.rows.len()),
            source_name: sheet.name.clone(),
            source_sheets: if first && source.is_aggregate_view {
                sheet.source_sheets.clone()
            } else {
                Vec::new()
            },
        })
    }

    async fn delete_rows(&self, sheet_id: SheetId, row_ids: &[RowId]) -> SyncResult<()> {
        let mut state = self.state.lock().await;
        state.record(RemoteCall::DeleteRows {
            sheet_id,
            row_ids: row_ids.to_vec(),
        })?;

        let sheet = state.sheet_mut(sheet_id)?;
        let existing: HashSet<RowId> = sheet.rows.iter().filter_map(|r| r.id).collect();
        if let Some(missing) = row_ids.iter().find(|id| !existing.contains(id)) {
            return Err(SyncError::RemoteUnavailable(format!("row {missing} not found")));
        }

        let doomed: HashSet<&RowId> = row_ids.iter().collect();
        sheet
            .rows
            .retain(|r| r.id.is_none_or(|id| !doomed.contains(&id)));
        Ok(())
    }

    async fn update_rows(&self, sheet_id: SheetId, rows: &[RowUpdate]) -> SyncResult<()> {
        let mut state = self.state.lock().await;
        state.record(RemoteCall::UpdateRows {
            sheet_id,
            rows: rows.to_vec(),
        })?;

        // A batch is applied whole or not at all.
        let sheet = state.sheet_mut(sheet_id)?;
        let mut positions = Vec::with_capacity(rows.len());
        for update in rows {
            let position = sheet
                .rows
                .iter()
                .position(|r| r.id == Some(update.id))
                .ok_or_else(|| {
                    SyncError::RemoteUnavailable(format!("row {} not found", update.id))
                })?;
            check_cells(&sheet.columns, &update.cells)?;
            positions.push(position);
        }

        for (position, update) in positions.into_iter().zip(rows) {
            apply_cells(&mut sheet.rows[position], &update.cells);
        }
        Ok(())
    }

    async fn add_rows(&self, sheet_id: SheetId, rows: &[NewRow]) -> SyncResult<()> {
        let mut state = self.state.lock().await;
        state.record(RemoteCall::AddRows {
            sheet_id,
            rows: rows.to_vec(),
        })?;

        let first_id = state.next_row_id;
        let sheet = state.sheet_mut(sheet_id)?;
        for new_row in rows {
            check_cells(&sheet.columns, &new_row.cells)?;
        }
        sheet
            .rows
            .extend(rows.iter().enumerate().map(|(offset, new_row)| {
                let mut row = Row::with_id(RowId::new(first_id + offset as i64));
                apply_cells(&mut row, &new_row.cells);
                row
            }));
        state.next_row_id = first_id + rows.len() as i64;
        Ok(())
    }
}
