//! Tabular data model for sheetsync.
//!
//! This crate defines the plain types shared by the read and write paths:
//! - Numeric identifiers for sheets, columns and rows
//! - Column kinds as declared by the remote store
//! - Scalar cell values
//! - Rows and tables with a title index built once per table
//!
//! Everything here is in-memory and I/O free. Fetching, reconciling and
//! writing back live in `sheetsync-sync`.

mod ids;
mod table;
mod value;

pub use ids::{ColumnId, RowId, SheetId};
pub use table::{Column, ColumnKind, Row, SourceSheet, Table};
pub use value::CellValue;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building tables.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("duplicate column title: {0}")]
    DuplicateColumnTitle(String),

    #[error("duplicate column id: {0}")]
    DuplicateColumnId(ColumnId),

    #[error("row references unknown column id: {0}")]
    UnknownColumn(ColumnId),

    #[error("no column titled {0:?}")]
    UnknownTitle(String),
}
