//! Remote tabular stores.
//!
//! The sync core talks to the store through [`RemoteSheets`]: one paged read
//! and three batched mutations. Providers:
//! - [`SmartsheetClient`] for the Smartsheet REST API
//! - [`MemorySheets`] for in-process sheets (tests and dry runs)

pub mod memory;
pub mod smartsheet;

pub use memory::{MemorySheet, MemorySheets, RemoteCall, RemoteOp};
pub use smartsheet::{SmartsheetClient, SmartsheetConfig};

use crate::error::SyncResult;
use crate::plan::{NewRow, RowUpdate};
use async_trait::async_trait;
use sheetsync_types::{Column, Row, RowId, SheetId, SourceSheet};

/// What to read: a sheet, or an aggregate view (report) over several sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Source {
    pub id: SheetId,
    pub is_aggregate_view: bool,
}

impl Source {
    pub fn sheet(id: SheetId) -> Self {
        Self {
            id,
            is_aggregate_view: false,
        }
    }

    pub fn report(id: SheetId) -> Self {
        Self {
            id,
            is_aggregate_view: true,
        }
    }
}

/// One page of a remote table.
///
/// `columns` and `total_row_count` are only guaranteed on page 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemotePage {
    pub rows: Vec<Row>,
    pub columns: Vec<Column>,
    pub total_row_count: Option<usize>,
    pub source_name: String,
    /// Backing sheets, reported for aggregate views only.
    pub source_sheets: Vec<SourceSheet>,
}

/// Abstract remote store interface.
///
/// Rows must come back in a stable order across repeated fetches of the
/// same page. Every call is a single blocking round-trip; retries and
/// timeouts belong to the implementation's transport.
#[async_trait]
pub trait RemoteSheets: Send + Sync {
    /// Returns the name of the store.
    fn provider_name(&self) -> &'static str;

    /// Fetches page `page_number` (1-based) with `page_size` rows.
    async fn fetch_page(
        &self,
        source: Source,
        page_size: usize,
        page_number: usize,
    ) -> SyncResult<RemotePage>;

    /// Deletes rows by id.
    async fn delete_rows(&self, sheet_id: SheetId, row_ids: &[RowId]) -> SyncResult<()>;

    /// Overwrites cells of existing rows.
    async fn update_rows(&self, sheet_id: SheetId, rows: &[RowUpdate]) -> SyncResult<()>;

    /// Appends rows. Placement is the store's default.
    async fn add_rows(&self, sheet_id: SheetId, rows: &[NewRow]) -> SyncResult<()>;
}
