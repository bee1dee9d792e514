//! Paginated reads and reference-keyed writes for remote tabular stores.
//!
//! # Architecture
//!
//! Two pure algorithms sit between thin I/O edges:
//!
//! - **Assembler**: reads a whole remote table page by page after a
//!   one-row probe that learns the schema and row count
//! - **Indexer**: joins remote rows to local rows on a reference column
//! - **Reconciler**: turns the join into a [`SyncPlan`] of updates, creates
//!   and orphan deletes, with every value coerced to its target column
//! - **Executor**: submits a plan as one batched call per phase
//!
//! The remote store is abstracted by [`RemoteSheets`]; [`SheetSync`] wires
//! everything to one store.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sheetsync_sync::{MemorySheets, SheetSync, SyncConfig};
//!
//! let remote = Arc::new(MemorySheets::new());
//! let sync = SheetSync::new(remote, SyncConfig::default());
//! assert_eq!(sync.provider_name(), "Memory");
//! ```

pub mod assembler;
pub mod coerce;
mod config;
mod error;
pub mod events;
pub mod executor;
pub mod indexer;
pub mod plan;
pub mod reconcile;
pub mod remote;
mod service;

pub use assembler::{assemble, infer_display_kind, page_count, AssembledTable};
pub use coerce::{coerce, numeric_form};
pub use config::{DuplicateReferencePolicy, SyncConfig, DEFAULT_PAGE_SIZE, PROBE_PAGE_SIZE};
pub use error::{SyncError, SyncResult, TableSide};
pub use events::{RecordingEventSink, SyncEvent, SyncEventSink, SyncPhase, TracingEventSink};
pub use executor::execute;
pub use indexer::{index, IndexedRow, ReferenceIndex, ReferenceKey};
pub use plan::{CellWrite, NewRow, RowUpdate, SyncPlan, SyncSummary};
pub use reconcile::{reconcile, synced_columns, ReconcileOptions};
pub use remote::{
    MemorySheet, MemorySheets, RemoteCall, RemoteOp, RemotePage, RemoteSheets, SmartsheetClient,
    SmartsheetConfig, Source,
};
pub use service::{
    source_sheets_table, ReadOutput, SheetSync, WriteRequest, SHEET_ID_TITLE, SHEET_NAME_TITLE,
};
