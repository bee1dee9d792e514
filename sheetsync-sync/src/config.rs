//! Sync configuration.

use serde::{Deserialize, Serialize};

/// Rows fetched per bulk page.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Rows fetched by the probe that learns the schema and row count.
pub const PROBE_PAGE_SIZE: usize = 1;

/// What to do when several remote rows share one reference value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateReferencePolicy {
    /// The last row seen in fetch order is matched (default).
    #[default]
    LastWins,
    /// The first row seen in fetch order is matched.
    FirstWins,
    /// Fail the reconciliation.
    Reject,
}

/// Configuration for reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Rows per bulk page.
    pub page_size: usize,
    /// Rows requested by the schema probe.
    pub probe_page_size: usize,
    /// Handling of duplicate remote reference values.
    pub duplicate_policy: DuplicateReferencePolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            probe_page_size: PROBE_PAGE_SIZE,
            duplicate_policy: DuplicateReferencePolicy::LastWins,
        }
    }
}
