//! Reconciliation of a local table against a remote table.
//!
//! Rows are joined on a reference column present on both sides. Matched
//! remote rows get their synced cells overwritten, local rows with no remote
//! counterpart can be created, and remote rows with no local counterpart can
//! be removed. Every value written is coerced against the remote column's
//! declared kind.

use crate::coerce::coerce;
use crate::config::DuplicateReferencePolicy;
use crate::error::{SyncError, SyncResult, TableSide};
use crate::indexer::{index, ReferenceKey};
use crate::plan::{CellWrite, NewRow, RowUpdate, SyncPlan};
use sheetsync_types::{Column, ColumnId, Row, Table};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Switches for one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Create remote rows for local references missing remotely.
    pub add_missing: bool,
    /// Delete remote rows whose reference is absent locally.
    pub remove_orphans: bool,
    pub duplicate_policy: DuplicateReferencePolicy,
}

/// Resolves the reference column on both sides.
///
/// Returns `(local, remote)` column ids.
pub fn reference_columns(
    local: &Table,
    remote: &Table,
    reference_column: &str,
) -> SyncResult<(ColumnId, ColumnId)> {
    let local_id = local_reference_column(local, reference_column)?;
    let remote_id = remote
        .column_by_title(reference_column)
        .ok_or_else(|| SyncError::InvalidReferenceColumn {
            column: reference_column.to_string(),
            side: TableSide::Remote,
        })?
        .id;
    Ok((local_id, remote_id))
}

/// Resolves the reference column of the local table alone, so it can be
/// checked before any remote call.
pub fn local_reference_column(local: &Table, reference_column: &str) -> SyncResult<ColumnId> {
    if reference_column.is_empty() {
        return Err(SyncError::Configuration(
            "reference column is not set".to_string(),
        ));
    }
    local
        .column_by_title(reference_column)
        .map(|c| c.id)
        .ok_or_else(|| SyncError::InvalidReferenceColumn {
            column: reference_column.to_string(),
            side: TableSide::Local,
        })
}

/// Remote columns written on update, paired with their local column:
/// titles present on both sides, minus the reference column, in remote
/// schema order.
pub fn synced_columns<'a>(
    local: &Table,
    remote: &'a Table,
    reference_column: &str,
) -> Vec<(&'a Column, ColumnId)> {
    shared_columns(local, remote)
        .into_iter()
        .filter(|(column, _)| column.title != reference_column)
        .collect()
}

fn shared_columns<'a>(local: &Table, remote: &'a Table) -> Vec<(&'a Column, ColumnId)> {
    remote
        .columns()
        .iter()
        .filter_map(|column| {
            local
                .column_by_title(&column.title)
                .map(|local_column| (column, local_column.id))
        })
        .collect()
}

fn coerce_cells(columns: &[(&Column, ColumnId)], source: &Row) -> Vec<CellWrite> {
    columns
        .iter()
        .map(|(column, local_id)| {
            CellWrite::new(column.id, coerce(source.get(*local_id), column.kind))
        })
        .collect()
}

/// Builds the plan that brings `remote` in line with `local`.
///
/// Local-only columns are ignored for updates but do not block anything;
/// remote-only columns are never written. A local row with a blank
/// reference cannot be matched or identified later, and is skipped. When
/// local references repeat, the first local row supplies the update values
/// and every occurrence is a separate create.
pub fn reconcile(
    local: &Table,
    remote: &Table,
    reference_column: &str,
    options: &ReconcileOptions,
) -> SyncResult<SyncPlan> {
    let (local_ref, remote_ref) = reference_columns(local, remote, reference_column)?;

    let mut keyed: Vec<(ReferenceKey, &Row)> = Vec::with_capacity(local.len());
    for row in local.rows() {
        match row.get(local_ref).and_then(ReferenceKey::from_value) {
            Some(key) => keyed.push((key, row)),
            None => warn!("Skipping local row with blank {:?}", reference_column),
        }
    }
    let references: Vec<ReferenceKey> = keyed.iter().map(|(k, _)| k.clone()).collect();

    let mut by_reference: HashMap<&ReferenceKey, &Row> = HashMap::with_capacity(keyed.len());
    for (key, row) in &keyed {
        by_reference.entry(key).or_insert(*row);
    }

    let index = index(remote, remote_ref, &references, options.duplicate_policy)?;

    info!("sync to be done:");
    info!("- matching refs: {} -> UPDATE", index.matched.len());
    info!(
        "- new      refs: {} -> {}",
        index.missing_local.len(),
        if options.add_missing { "CREATE" } else { "SKIP" }
    );
    info!(
        "- old      refs: {} -> {}",
        index.unmatched_remote.len(),
        if options.remove_orphans { "DELETE" } else { "SKIP" }
    );

    let synced = synced_columns(local, remote, reference_column);
    let updates = if synced.is_empty() {
        Vec::new()
    } else {
        index
            .matched
            .iter()
            .filter_map(|m| by_reference.get(&m.reference).map(|row| (m.row_id, *row)))
            .map(|(id, row)| RowUpdate {
                id,
                cells: coerce_cells(&synced, row),
            })
            .collect()
    };

    let creates = if options.add_missing {
        let matched: HashSet<&ReferenceKey> = index.matched.iter().map(|m| &m.reference).collect();
        let shared = shared_columns(local, remote);
        keyed
            .iter()
            .filter(|(key, _)| !matched.contains(key))
            .map(|(_, row)| NewRow {
                cells: coerce_cells(&shared, row),
            })
            .collect()
    } else {
        Vec::new()
    };

    let orphan_ids = if options.remove_orphans {
        let mut seen = HashSet::new();
        index
            .unmatched_remote
            .iter()
            .map(|u| u.row_id)
            .filter(|id| seen.insert(*id))
            .collect()
    } else {
        Vec::new()
    };

    Ok(SyncPlan {
        updates,
        creates,
        orphan_ids,
    })
}
