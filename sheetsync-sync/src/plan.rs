//! The output of reconciliation and the result of executing it.

use serde::Serialize;
use sheetsync_types::{CellValue, ColumnId, RowId};

/// One coerced value bound for one remote column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellWrite {
    pub column_id: ColumnId,
    pub value: CellValue,
}

impl CellWrite {
    pub fn new(column_id: ColumnId, value: CellValue) -> Self {
        Self { column_id, value }
    }
}

/// New values for an existing remote row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowUpdate {
    pub id: RowId,
    pub cells: Vec<CellWrite>,
}

/// A row to append to the remote table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRow {
    pub cells: Vec<CellWrite>,
}

/// Row-level operations produced by one reconciliation.
///
/// Built once per write and consumed by value by the executor. Updates
/// follow match order, creates follow local order, orphans follow remote
/// fetch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncPlan {
    pub updates: Vec<RowUpdate>,
    pub creates: Vec<NewRow>,
    pub orphan_ids: Vec<RowId>,
}

impl SyncPlan {
    /// Returns true if executing the plan would issue no call.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.creates.is_empty() && self.orphan_ids.is_empty()
    }
}

/// Row counts submitted to the remote store by one write.
///
/// These are submitted counts; confirmation is up to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub cleared: usize,
    pub updated: usize,
    pub created: usize,
    pub deleted: usize,
}
