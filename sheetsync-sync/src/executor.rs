//! Execution of a [`SyncPlan`] against a remote store.

use crate::error::SyncResult;
use crate::events::{SyncEvent, SyncEventSink, SyncPhase};
use crate::plan::{SyncPlan, SyncSummary};
use crate::remote::RemoteSheets;
use sheetsync_types::SheetId;

/// Submits `plan` to `remote`.
///
/// Phases run in a fixed order: updates, then creates, then deletes, so only
/// rows that existed before this write can be deleted. Each non-empty phase
/// is one batched call; an empty phase issues none. A failure stops
/// execution immediately and earlier phases are not rolled back.
pub async fn execute(
    remote: &dyn RemoteSheets,
    sheet_id: SheetId,
    plan: SyncPlan,
    events: &dyn SyncEventSink,
) -> SyncResult<SyncSummary> {
    let SyncPlan {
        updates,
        creates,
        orphan_ids,
    } = plan;
    let mut summary = SyncSummary::default();

    if updates.is_empty() {
        events.on_event(&SyncEvent::PhaseSkipped {
            phase: SyncPhase::Update,
        });
    } else {
        remote.update_rows(sheet_id, &updates).await?;
        summary.updated = updates.len();
        events.on_event(&SyncEvent::PhaseCompleted {
            phase: SyncPhase::Update,
            rows: summary.updated,
        });
    }

    if creates.is_empty() {
        events.on_event(&SyncEvent::PhaseSkipped {
            phase: SyncPhase::Create,
        });
    } else {
        remote.add_rows(sheet_id, &creates).await?;
        summary.created = creates.len();
        events.on_event(&SyncEvent::PhaseCompleted {
            phase: SyncPhase::Create,
            rows: summary.created,
        });
    }

    if orphan_ids.is_empty() {
        events.on_event(&SyncEvent::PhaseSkipped {
            phase: SyncPhase::Delete,
        });
    } else {
        remote.delete_rows(sheet_id, &orphan_ids).await?;
        summary.deleted = orphan_ids.len();
        events.on_event(&SyncEvent::PhaseCompleted {
            phase: SyncPhase::Delete,
            rows: summary.deleted,
        });
    }

    Ok(summary)
}
