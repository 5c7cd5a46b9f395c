//! Where teams record their executions.
//!
//! Every team holds a sink. The shared [`WorkflowLog`] is an append-only
//! `Vec` behind `Arc<Mutex<..>>` so clones can be handed to each team; a team
//! that should not record anything holds a [`NullSink`].

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::types::WorkflowLogEntry;

/// Timestamp format used in log entries: fixed width, so entries sort as text.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

pub trait WorkflowSink: Send + Sync {
    /// Append `entry`. The sink owns the timestamp and overwrites it.
    fn record(&self, entry: WorkflowLogEntry);
}

/// Discards every entry.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl WorkflowSink for NullSink {
    fn record(&self, entry: WorkflowLogEntry) {
        tracing::debug!(team = %entry.team_name, "Workflow entry dropped by null sink");
    }
}

#[derive(Default)]
struct LogState {
    entries: Vec<WorkflowLogEntry>,
    last: Option<DateTime<Utc>>,
}

/// Shared in-memory workflow log.
///
/// Timestamps never decrease in append order: if the wall clock steps back,
/// the entry reuses the previous timestamp.
#[derive(Clone, Default)]
pub struct WorkflowLog {
    state: Arc<Mutex<LogState>>,
}

impl WorkflowLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_at(&self, mut entry: WorkflowLogEntry, now: DateTime<Utc>) {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        let stamp = match state.last {
            Some(last) if now < last => last,
            _ => now,
        };
        state.last = Some(stamp);
        entry.timestamp = stamp.format(TIMESTAMP_FORMAT).to_string();
        state.entries.push(entry);
    }

    /// Snapshot of all entries in append order.
    pub fn entries(&self) -> Vec<WorkflowLogEntry> {
        let state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        state.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(|p| p.into_inner()).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WorkflowSink for WorkflowLog {
    fn record(&self, entry: WorkflowLogEntry) {
        self.record_at(entry, Utc::now());
    }
}
