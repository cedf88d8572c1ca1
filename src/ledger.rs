//! Pre-mutation snapshots with one-step undo.
//!
//! The ledger is owned by the caller and passed in and out explicitly; the
//! engine never persists it. Discipline: push a snapshot before every
//! mutating operation, pop exactly one on undo.

use crate::types::{ColumnStats, Row};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// An immutable capture of a dataset's rows and stats, taken immediately
/// before a mutating operation.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Snapshot {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub rows: Vec<Row>,
    pub stats: Vec<ColumnStats>,
}

impl Snapshot {
    pub fn capture(rows: &[Row], stats: &[ColumnStats]) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            rows: rows.to_vec(),
            stats: stats.to_vec(),
        }
    }
}

/// Last-in-first-out sequence of snapshots for one dataset.
///
/// Unbounded by default (snapshot growth is an accepted cost of full undo
/// history); [`VersionLedger::with_capacity`] bounds the depth by evicting
/// the oldest snapshot on overflow while preserving the LIFO pop contract.
#[derive(Clone, Debug, Default)]
pub struct VersionLedger {
    snapshots: VecDeque<Snapshot>,
    capacity: Option<usize>,
}

impl VersionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger that retains at most `capacity` snapshots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        if let Some(capacity) = self.capacity {
            while self.snapshots.len() >= capacity.max(1) {
                self.snapshots.pop_front();
            }
        }
        self.snapshots.push_back(snapshot);
    }

    /// Pop the most recent snapshot, if any.
    pub fn undo(&mut self) -> Option<Snapshot> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
