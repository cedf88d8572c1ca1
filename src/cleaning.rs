//! Column-level cleaning transforms.
//!
//! Each transform is a pure mapping from `(rows, method)` to a new dataset.
//! A method whose precondition is not met (say, mean-fill on a text column)
//! returns the input unchanged instead of erroring, so a UI never has to
//! pre-validate every combination; the [`CleanOutcome::changed`] flag makes
//! that no-op detectable without comparing datasets.

use crate::pii;
use crate::types::{ColumnStats, ColumnType, Row};
use crate::value;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named cleaning transform.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum CleaningMethod {
    /// Remove every row where the target column is missing.
    DropRows,
    /// Replace missing cells with the column mean (numeric columns only).
    FillMean,
    /// Replace missing cells with the column median (numeric columns only).
    FillMedian,
    /// Replace missing cells with 0.
    FillZero,
    /// Replace missing cells with a caller-supplied value.
    FillValue,
    /// Mask string cells as email addresses.
    MaskEmail,
    /// Mask string cells as phone numbers.
    MaskPhone,
    /// Overwrite every cell with the redaction marker.
    Redact,
}

impl CleaningMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DropRows => "drop_rows",
            Self::FillMean => "fill_mean",
            Self::FillMedian => "fill_median",
            Self::FillZero => "fill_zero",
            Self::FillValue => "fill_value",
            Self::MaskEmail => "mask_email",
            Self::MaskPhone => "mask_phone",
            Self::Redact => "redact",
        }
    }
}

/// A transformed dataset plus whether the transform touched anything.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct CleanOutcome {
    pub changed: bool,
    pub rows: Vec<Row>,
}

/// Apply `method` to `column`, producing a new dataset snapshot.
///
/// `stats` must describe the input rows (fills read the mean/median from it).
/// Unknown columns and unmet preconditions pass the input through with
/// `changed: false`. The caller is responsible for pushing a ledger snapshot
/// before applying a transform it intends to make undoable.
pub fn apply_transform(
    rows: &[Row],
    column: &str,
    method: CleaningMethod,
    stats: &[ColumnStats],
    custom_value: Option<&Value>,
) -> CleanOutcome {
    let Some(col_stats) = stats.iter().find(|s| s.column == column) else {
        return unchanged(rows);
    };

    let outcome = match method {
        CleaningMethod::DropRows => {
            let kept: Vec<Row> = rows
                .iter()
                .filter(|row| !value::is_missing(row.get(column)))
                .cloned()
                .collect();
            CleanOutcome {
                changed: kept.len() != rows.len(),
                rows: kept,
            }
        }
        CleaningMethod::FillMean => match (col_stats.column_type, col_stats.mean) {
            (ColumnType::Numeric, Some(mean)) => fill_missing(rows, column, &Value::from(mean)),
            _ => unchanged(rows),
        },
        CleaningMethod::FillMedian => match (col_stats.column_type, col_stats.median) {
            (ColumnType::Numeric, Some(median)) => {
                fill_missing(rows, column, &Value::from(median))
            }
            _ => unchanged(rows),
        },
        CleaningMethod::FillZero => fill_missing(rows, column, &Value::from(0)),
        CleaningMethod::FillValue => match custom_value {
            Some(custom) => fill_missing(rows, column, custom),
            None => unchanged(rows),
        },
        CleaningMethod::MaskEmail => map_string_cells(rows, column, pii::mask_email),
        CleaningMethod::MaskPhone => map_string_cells(rows, column, pii::mask_phone),
        CleaningMethod::Redact => redact_cells(rows, column),
    };

    tracing::debug!(
        column,
        method = method.as_str(),
        changed = outcome.changed,
        "transform applied"
    );
    outcome
}

fn unchanged(rows: &[Row]) -> CleanOutcome {
    CleanOutcome {
        changed: false,
        rows: rows.to_vec(),
    }
}

fn fill_missing(rows: &[Row], column: &str, fill: &Value) -> CleanOutcome {
    let mut changed = false;
    let rows = rows
        .iter()
        .map(|row| {
            if value::is_missing(row.get(column)) {
                let mut row = row.clone();
                row.insert(column.to_owned(), fill.clone());
                changed = true;
                row
            } else {
                row.clone()
            }
        })
        .collect();
    CleanOutcome { changed, rows }
}

fn map_string_cells(rows: &[Row], column: &str, mask: impl Fn(&str) -> String) -> CleanOutcome {
    let mut changed = false;
    let rows = rows
        .iter()
        .map(|row| {
            let Some(Value::String(s)) = row.get(column) else {
                return row.clone();
            };
            let masked = mask(s);
            if masked == *s {
                return row.clone();
            }
            changed = true;
            let mut row = row.clone();
            row.insert(column.to_owned(), Value::String(masked));
            row
        })
        .collect();
    CleanOutcome { changed, rows }
}

fn redact_cells(rows: &[Row], column: &str) -> CleanOutcome {
    let marker = Value::String(pii::REDACTION_MARKER.to_owned());
    let mut changed = false;
    let rows = rows
        .iter()
        .map(|row| {
            if row.get(column) == Some(&marker) {
                return row.clone();
            }
            changed = true;
            let mut row = row.clone();
            row.insert(column.to_owned(), marker.clone());
            row
        })
        .collect();
    CleanOutcome { changed, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_wire_names() {
        let json = serde_json::to_string(&CleaningMethod::FillMean).expect("serializable");
        assert_eq!(json, "\"fill_mean\"");
        let parsed: CleaningMethod =
            serde_json::from_str("\"mask_email\"").expect("deserializable");
        assert_eq!(parsed, CleaningMethod::MaskEmail);
        assert_eq!(CleaningMethod::DropRows.as_str(), "drop_rows");
    }
}
