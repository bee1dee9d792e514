//! Reference-key indexing of a remote table against local references.

use crate::coerce::numeric_form;
use crate::config::DuplicateReferencePolicy;
use crate::error::{SyncError, SyncResult};
use sheetsync_types::{CellValue, ColumnId, RowId, Table};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

/// The join key found in a reference column cell.
///
/// Keys compare by canonical text on both sides: anything with a numeric
/// reading is keyed by that reading, so `"42"`, `"42.0"`, `42` and `42.0`
/// all match. Other text is kept verbatim. Blank cells have no key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceKey(String);

impl ReferenceKey {
    /// Returns the key of a cell value, or `None` for blank values.
    pub fn from_value(value: &CellValue) -> Option<Self> {
        if value.is_blank() {
            return None;
        }
        let canonical = match value {
            CellValue::Bool(b) => b.to_string(),
            other => numeric_form(other)
                .map_or_else(|| other.to_string(), |n| n.to_string()),
        };
        Some(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReferenceKey {
    fn from(s: &str) -> Self {
        Self::from_value(&CellValue::text(s)).unwrap_or_else(|| Self(String::new()))
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A remote row and the reference it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedRow {
    pub reference: ReferenceKey,
    pub row_id: RowId,
}

/// How remote rows relate to local references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    /// One remote row per matched reference, in first-match order.
    pub matched: Vec<IndexedRow>,
    /// Remote rows whose reference has no local counterpart, in fetch order.
    pub unmatched_remote: Vec<IndexedRow>,
    /// Local references with no remote row, in local order, duplicates kept.
    pub missing_local: Vec<ReferenceKey>,
}

impl ReferenceIndex {
    /// Returns the remote row matched to `reference`.
    pub fn matched_row(&self, reference: &ReferenceKey) -> Option<RowId> {
        self.matched
            .iter()
            .find(|m| &m.reference == reference)
            .map(|m| m.row_id)
    }
}

/// Indexes `remote` by the values under `reference_column`.
///
/// Remote rows with a blank reference are neither matched nor orphaned.
/// When several remote rows share a matched reference, `policy` decides
/// which one is kept; the others are dropped from both lists.
pub fn index(
    remote: &Table,
    reference_column: ColumnId,
    local_references: &[ReferenceKey],
    policy: DuplicateReferencePolicy,
) -> SyncResult<ReferenceIndex> {
    let local: HashSet<&ReferenceKey> = local_references.iter().collect();
    let mut matched: Vec<IndexedRow> = Vec::new();
    let mut positions: HashMap<ReferenceKey, usize> = HashMap::new();
    let mut unmatched_remote = Vec::new();

    for row in remote.rows() {
        let Some(reference) = row.get(reference_column).and_then(ReferenceKey::from_value) else {
            continue;
        };
        let Some(row_id) = row.id else {
            debug!("Skipping remote row without id (ref {})", reference);
            continue;
        };

        if !local.contains(&reference) {
            unmatched_remote.push(IndexedRow { reference, row_id });
            continue;
        }

        match positions.get(&reference) {
            None => {
                positions.insert(reference.clone(), matched.len());
                matched.push(IndexedRow { reference, row_id });
            }
            Some(&pos) => match policy {
                DuplicateReferencePolicy::LastWins => matched[pos].row_id = row_id,
                DuplicateReferencePolicy::FirstWins => {}
                DuplicateReferencePolicy::Reject => {
                    return Err(SyncError::DuplicateReference(reference.to_string()));
                }
            },
        }
    }

    let missing_local = local_references
        .iter()
        .filter(|r| !positions.contains_key(*r))
        .cloned()
        .collect();

    Ok(ReferenceIndex {
        matched,
        unmatched_remote,
        missing_local,
    })
}
