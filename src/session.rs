//! Session-scoped orchestration of cleaning, deduplication and undo.
//!
//! The engine functions are stateless; "which dataset is currently selected"
//! belongs to the caller. [`DatasetSession`] is that caller-side state as an
//! owned value: rows, declared columns, their current stats and the undo
//! ledger, wired together with the push-before-mutate discipline.

use crate::cleaning::{self, CleaningMethod};
use crate::dedup::{self, Resolution};
use crate::ledger::{Snapshot, VersionLedger};
use crate::profiling;
use crate::types::{ColumnStats, Row};
use serde_json::Value;
use uuid::Uuid;

/// One loaded dataset with its derived stats and undo history.
#[derive(Clone, Debug)]
pub struct DatasetSession {
    pub id: Uuid,
    pub name: String,
    rows: Vec<Row>,
    columns: Vec<String>,
    stats: Vec<ColumnStats>,
    ledger: VersionLedger,
}

impl DatasetSession {
    /// Create a session and profile the dataset immediately.
    pub fn new(name: impl Into<String>, rows: Vec<Row>, columns: Vec<String>) -> Self {
        let stats = profiling::profile_columns(&rows, &columns);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rows,
            columns,
            stats,
            ledger: VersionLedger::new(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn stats(&self) -> &[ColumnStats] {
        &self.stats
    }

    /// Number of undo steps currently available.
    pub fn history_len(&self) -> usize {
        self.ledger.len()
    }

    /// Apply a cleaning transform, snapshotting first and re-profiling after.
    ///
    /// Returns whether the transform changed anything. A snapshot is pushed
    /// even for a no-op, so undo semantics stay uniform: one undo per clean
    /// call.
    pub fn clean(
        &mut self,
        column: &str,
        method: CleaningMethod,
        custom_value: Option<&Value>,
    ) -> bool {
        self.ledger.push(Snapshot::capture(&self.rows, &self.stats));

        let outcome = cleaning::apply_transform(&self.rows, column, method, &self.stats, custom_value);
        self.rows = outcome.rows;
        self.stats = profiling::profile_columns(&self.rows, &self.columns);

        tracing::debug!(
            session = %self.id,
            column,
            method = method.as_str(),
            changed = outcome.changed,
            "clean step recorded"
        );
        outcome.changed
    }

    /// Apply duplicate resolutions, snapshotting first and re-profiling after.
    pub fn deduplicate(&mut self, resolutions: &[Resolution]) {
        self.ledger.push(Snapshot::capture(&self.rows, &self.stats));

        self.rows = dedup::apply_resolutions(&self.rows, resolutions);
        self.stats = profiling::profile_columns(&self.rows, &self.columns);

        tracing::debug!(
            session = %self.id,
            resolutions = resolutions.len(),
            rows = self.rows.len(),
            "deduplication step recorded"
        );
    }

    /// Roll back the most recent clean or deduplicate step.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.ledger.undo() else {
            return false;
        };
        self.rows = snapshot.rows;
        self.stats = snapshot.stats;
        true
    }
}
