//! Structured progress events.
//!
//! The sync algorithms never log phase results directly. The facade and the
//! executor report to an injected [`SyncEventSink`], so hosts can route
//! them wherever they like.

use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// A write phase, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    Clear,
    Update,
    Create,
    Delete,
}

/// Something that happened during a read or a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncEvent {
    /// A remote table was fully assembled.
    TableRead { source_name: String, rows: usize },
    /// Reconciliation produced a plan.
    PlanReady {
        updates: usize,
        creates: usize,
        orphans: usize,
    },
    /// A phase submitted `rows` rows in one batched call.
    PhaseCompleted { phase: SyncPhase, rows: usize },
    /// A phase had nothing to submit, so no call was issued.
    PhaseSkipped { phase: SyncPhase },
}

/// Receives [`SyncEvent`]s.
pub trait SyncEventSink: Send + Sync {
    fn on_event(&self, event: &SyncEvent);
}

/// Logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl SyncEventSink for TracingEventSink {
    fn on_event(&self, event: &SyncEvent) {
        match event {
            SyncEvent::TableRead { source_name, rows } => {
                info!("- {} rows read from {}", rows, source_name);
            }
            SyncEvent::PlanReady {
                updates,
                creates,
                orphans,
            } => {
                info!(
                    "plan: {} updates, {} creates, {} deletes",
                    updates, creates, orphans
                );
            }
            SyncEvent::PhaseCompleted { phase, rows } => {
                info!("- {} rows submitted ({:?})", rows, phase);
            }
            SyncEvent::PhaseSkipped { phase } => {
                info!("- nothing to submit ({:?})", phase);
            }
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<SyncEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the events received so far.
    pub fn events(&self) -> Vec<SyncEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SyncEventSink for RecordingEventSink {
    fn on_event(&self, event: &SyncEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
