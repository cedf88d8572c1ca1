//! Shared artifact types produced by the engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single dataset row: an insertion-ordered map from column name to a
/// scalar JSON value. All rows of a dataset are assumed (not enforced) to
/// share the same column set.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Classification of a column's contents.
///
/// `Mixed` is reserved: no detection rule currently assigns it, pending a
/// product decision on what ratio band should qualify.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Text,
    Date,
    Mixed,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Date => "date",
            Self::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptive statistics for one column.
///
/// The numeric aggregates are present only for numeric columns with at least
/// one parseable value; they are omitted, not zeroed, otherwise.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ColumnStats {
    pub column: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub count: usize,
    pub missing: usize,
    pub missing_percent: f64,
    pub unique: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ColumnStats {
    /// Count of rows with a usable (non-missing) value.
    pub fn non_missing(&self) -> usize {
        self.count - self.missing
    }
}

/// Per-column missing value report; only columns with gaps are listed.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct MissingValueSummary {
    pub column: String,
    pub missing: usize,
    pub percent: f64,
}

/// Pearson correlation for one ordered pair of numeric columns.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct CorrelationEntry {
    pub col1: String,
    pub col2: String,
    pub correlation: f64,
}

/// Category of personally identifiable information.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PiiType {
    Email,
    Phone,
    Ssn,
}

/// A column flagged as likely PII, with the sampled match ratio as
/// confidence (always above the 0.8 reporting threshold).
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PiiFinding {
    pub column: String,
    #[serde(rename = "type")]
    pub pii_type: PiiType,
    pub confidence: f64,
}

/// A row similar to a group's main row, with its similarity score.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct DuplicateMatch {
    pub index: usize,
    pub score: f64,
}

/// A cluster of near-duplicate rows in one column. `main_index` is the
/// canonical record; each index appears in at most one group overall.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct DuplicateGroup {
    pub main_index: usize,
    pub column: String,
    pub duplicates: Vec<DuplicateMatch>,
}

/// One fitted row for downstream visualization.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Prediction {
    pub index: usize,
    pub actual: f64,
    pub predicted: f64,
}

/// Result of a multivariate linear fit.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct RegressionResult {
    /// Coefficient of determination, clamped to a minimum of 0.
    pub r2: f64,
    pub mse: f64,
    /// Denormalized per-feature coefficients on the original scale.
    pub coefficients: HashMap<String, f64>,
    pub intercept: f64,
    /// At most the first 50 rows of the fitted set.
    pub predictions: Vec<Prediction>,
}
