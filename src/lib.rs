//! # Quarry - Data Profiling & Cleaning Engine
//!
//! Quarry is an in-memory engine for profiling, cleaning, deduplicating and
//! merging tabular data. It owns no I/O: rows arrive from an external parsing
//! layer as ordered JSON-style maps, and every result is a plain data
//! structure for a presentation or persistence layer to consume.
//!
//! ## Quick Start
//!
//! ```
//! use quarry::profiling::profile_columns;
//! use quarry::cleaning::{apply_transform, CleaningMethod};
//! use serde_json::json;
//!
//! let rows: Vec<quarry::Row> = vec![
//!     json!({"age": 34, "city": "Sydney"}),
//!     json!({"age": null, "city": "Melbourne"}),
//! ]
//! .into_iter()
//! .filter_map(|v| v.as_object().cloned())
//! .collect();
//! let columns = vec!["age".to_owned(), "city".to_owned()];
//!
//! let stats = profile_columns(&rows, &columns);
//! assert_eq!(stats[0].missing, 1);
//!
//! // Fill the gap; the outcome says whether anything actually changed.
//! let outcome = apply_transform(&rows, "age", CleaningMethod::FillZero, &stats, None);
//! assert!(outcome.changed);
//! ```
//!
//! ## Core Modules
//!
//! - [`profiling`]: column type detection and descriptive statistics
//! - [`correlation`]: pairwise Pearson correlation over numeric columns
//! - [`regression`]: multivariate linear fit via batch gradient descent
//! - [`pii`]: PII pattern classification and masking primitives
//! - [`dedup`]: fuzzy duplicate detection and resolution
//! - [`cleaning`]: column-level cleaning transforms
//! - [`ledger`]: pre-mutation snapshots with one-step undo
//! - [`fusion`]: key-based dataset merging
//! - [`session`]: caller-side orchestration of the above
//!
//! ## Design Rules
//!
//! Every operation is a synchronous, pure function of
//! `(data, columns, parameters)`. The engine never retains references across
//! calls; the only stateful artifact is the [`ledger::VersionLedger`], which
//! the caller owns. Inputs must not be mutated while a computation is in
//! flight; there is no internal locking because nothing is shared.

#![warn(clippy::all, rust_2018_idioms)]

pub mod cleaning;
pub mod correlation;
pub mod dedup;
pub mod error;
pub mod fusion;
pub mod ledger;
pub mod logging;
pub mod pii;
pub mod profiling;
pub mod regression;
pub mod session;
pub mod types;
pub mod value;

pub use error::{QuarryError, Result};
pub use types::{
    ColumnStats, ColumnType, CorrelationEntry, DuplicateGroup, DuplicateMatch, PiiFinding,
    PiiType, RegressionResult, Row,
};
