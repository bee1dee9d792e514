//! Error types for the sync layer.

use std::fmt;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Which side of a reconciliation a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSide {
    Local,
    Remote,
}

impl fmt::Display for TableSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

/// Errors that can occur in sync operations.
///
/// Values that cannot be converted to a column's type are never an error;
/// they are written back as text.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Missing credential or invalid parameters. Raised before any remote call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The reference column is empty or missing from one side.
    #[error("reference column {column:?} not found in {side} columns")]
    InvalidReferenceColumn { column: String, side: TableSide },

    /// A collaborator call failed (network, auth, not found).
    #[error("remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// A page came back without something the protocol guarantees.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Two remote rows share a reference value under the `Reject` policy.
    #[error("duplicate reference value in remote table: {0}")]
    DuplicateReference(String),

    /// A table invariant was violated.
    #[error("table error: {0}")]
    Table(#[from] sheetsync_types::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SyncError {
    /// Returns true for errors that block execution before any remote I/O
    /// and must not be retried.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SyncError::Configuration(_) | SyncError::InvalidReferenceColumn { .. }
        )
    }

    /// Returns true if a collaborator call failed.
    pub fn is_remote(&self) -> bool {
        matches!(self, SyncError::RemoteUnavailable(_))
    }
}
