//! Read and write entry points.
//!
//! [`SheetSync`] wires the assembler, the reconciliation engine and the
//! executor to one remote store. It holds no state between calls: every
//! read and write fetches the remote table afresh.

use crate::assembler::{assemble, AssembledTable};
use crate::config::SyncConfig;
use crate::error::SyncResult;
use crate::events::{SyncEvent, SyncEventSink, SyncPhase, TracingEventSink};
use crate::executor::execute;
use crate::plan::{SyncPlan, SyncSummary};
use crate::reconcile::{local_reference_column, reconcile, ReconcileOptions};
use crate::remote::{RemoteSheets, Source};
use sheetsync_types::{
    CellValue, Column, ColumnId, ColumnKind, Row, RowId, SheetId, SourceSheet, Table,
};
use std::sync::Arc;
use tracing::info;

/// Title of the sheet id column of a [`ReadOutput::source_sheets`] table.
pub const SHEET_ID_TITLE: &str = "Sheet ID";
/// Title of the sheet name column of a [`ReadOutput::source_sheets`] table.
pub const SHEET_NAME_TITLE: &str = "Sheet Name";

/// The result of a read.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutput {
    pub source_name: String,
    pub table: Table,
    pub display_kinds: Vec<ColumnKind>,
    /// `Sheet ID` / `Sheet Name` rows for an aggregate view. A plain sheet
    /// yields a table with no columns and no rows.
    pub source_sheets: Table,
}

/// Parameters of a write.
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub sheet_id: SheetId,
    pub local_table: Table,
    pub reference_column: String,
    /// Delete every remote row before reconciling.
    pub clear_first: bool,
    pub add_missing: bool,
    pub remove_orphans: bool,
}

impl WriteRequest {
    /// A plain update-only write.
    pub fn new(sheet_id: SheetId, local_table: Table, reference_column: impl Into<String>) -> Self {
        Self {
            sheet_id,
            local_table,
            reference_column: reference_column.into(),
            clear_first: false,
            add_missing: false,
            remove_orphans: false,
        }
    }

    #[must_use]
    pub fn clear_first(mut self, yes: bool) -> Self {
        self.clear_first = yes;
        self
    }

    #[must_use]
    pub fn add_missing(mut self, yes: bool) -> Self {
        self.add_missing = yes;
        self
    }

    #[must_use]
    pub fn remove_orphans(mut self, yes: bool) -> Self {
        self.remove_orphans = yes;
        self
    }
}

/// Builds the source sheets table of an aggregate view.
pub fn source_sheets_table(sheets: &[SourceSheet]) -> SyncResult<Table> {
    let id_column = ColumnId::new(0);
    let name_column = ColumnId::new(1);
    let mut table = Table::new(vec![
        Column::new(id_column, SHEET_ID_TITLE, ColumnKind::Number),
        Column::new(name_column, SHEET_NAME_TITLE, ColumnKind::Text),
    ])?;
    table.extend_rows(sheets.iter().map(|s| {
        Row::new()
            .cell(id_column, CellValue::Int(s.id.get()))
            .cell(name_column, s.name.as_str())
    }))?;
    Ok(table)
}

/// Reads and writes remote tables.
pub struct SheetSync {
    remote: Arc<dyn RemoteSheets>,
    config: SyncConfig,
    events: Arc<dyn SyncEventSink>,
}

impl SheetSync {
    /// Creates a facade that reports events through `tracing`.
    pub fn new(remote: Arc<dyn RemoteSheets>, config: SyncConfig) -> Self {
        Self::with_event_sink(remote, config, Arc::new(TracingEventSink))
    }

    /// Creates a facade with a custom event sink.
    pub fn with_event_sink(
        remote: Arc<dyn RemoteSheets>,
        config: SyncConfig,
        events: Arc<dyn SyncEventSink>,
    ) -> Self {
        Self {
            remote,
            config,
            events,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns the name of the underlying store.
    pub fn provider_name(&self) -> &'static str {
        self.remote.provider_name()
    }

    async fn fetch(&self, source: Source) -> SyncResult<AssembledTable> {
        let assembled = assemble(self.remote.as_ref(), source, &self.config).await?;
        self.events.on_event(&SyncEvent::TableRead {
            source_name: assembled.source_name.clone(),
            rows: assembled.table.len(),
        });
        Ok(assembled)
    }

    /// Reads a sheet, or an aggregate view with its backing sheets.
    pub async fn read(
        &self,
        source_id: SheetId,
        is_aggregate_view: bool,
    ) -> SyncResult<ReadOutput> {
        let source = Source {
            id: source_id,
            is_aggregate_view,
        };
        let assembled = self.fetch(source).await?;
        let source_sheets = if is_aggregate_view {
            source_sheets_table(&assembled.source_sheets)?
        } else {
            Table::new(Vec::new())?
        };

        Ok(ReadOutput {
            source_name: assembled.source_name,
            table: assembled.table,
            display_kinds: assembled.display_kinds,
            source_sheets,
        })
    }

    fn options(&self, request: &WriteRequest) -> ReconcileOptions {
        ReconcileOptions {
            add_missing: request.add_missing,
            remove_orphans: request.remove_orphans,
            duplicate_policy: self.config.duplicate_policy,
        }
    }

    /// Computes the plan a write would execute, without mutating anything.
    ///
    /// With `clear_first`, the plan is computed against the remote schema
    /// with no rows, which is what the write would see after clearing.
    pub async fn plan(&self, request: &WriteRequest) -> SyncResult<SyncPlan> {
        local_reference_column(&request.local_table, &request.reference_column)?;

        let assembled = self.fetch(Source::sheet(request.sheet_id)).await?;
        let remote = if request.clear_first {
            Table::new(assembled.table.columns().to_vec())?
        } else {
            assembled.table
        };

        reconcile(
            &request.local_table,
            &remote,
            &request.reference_column,
            &self.options(request),
        )
    }

    /// Writes `request.local_table` to the remote sheet.
    ///
    /// Configuration problems detectable locally fail before any remote
    /// call. Phases already submitted when a later call fails stay applied.
    pub async fn write(&self, request: WriteRequest) -> SyncResult<SyncSummary> {
        local_reference_column(&request.local_table, &request.reference_column)?;

        let source = Source::sheet(request.sheet_id);
        let mut remote = self.fetch(source).await?;

        let mut cleared = 0;
        if request.clear_first {
            info!("deleting all existing rows...");
            let row_ids: Vec<RowId> = remote.table.rows().iter().filter_map(|r| r.id).collect();
            if row_ids.is_empty() {
                self.events.on_event(&SyncEvent::PhaseSkipped {
                    phase: SyncPhase::Clear,
                });
            } else {
                self.remote.delete_rows(request.sheet_id, &row_ids).await?;
                cleared = row_ids.len();
                self.events.on_event(&SyncEvent::PhaseCompleted {
                    phase: SyncPhase::Clear,
                    rows: cleared,
                });
                remote = self.fetch(source).await?;
            }
        }

        let plan = reconcile(
            &request.local_table,
            &remote.table,
            &request.reference_column,
            &self.options(&request),
        )?;
        self.events.on_event(&SyncEvent::PlanReady {
            updates: plan.updates.len(),
            creates: plan.creates.len(),
            orphans: plan.orphan_ids.len(),
        });

        let summary = execute(
            self.remote.as_ref(),
            request.sheet_id,
            plan,
            self.events.as_ref(),
        )
        .await?;

        Ok(SyncSummary { cleared, ..summary })
    }
}
