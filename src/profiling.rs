//! Column type detection and descriptive statistics.
//!
//! [`profile_columns`] makes a single pass over rows × columns, accumulating
//! missing counts, cardinality sets, a bounded type-detection sample and the
//! numeric values per column, then finalizes one [`ColumnStats`] per column.
//! Unparseable values are excluded from the numeric aggregates silently; they
//! still count toward the count/missing bookkeeping.

use crate::types::{ColumnStats, ColumnType, MissingValueSummary, Row};
use crate::value;
use serde_json::Value;
use std::collections::HashSet;

/// Number of non-missing values sampled per column for type detection.
pub const TYPE_SAMPLE_SIZE: usize = 500;

/// Ratio of parseable values a column must exceed to classify as numeric
/// (and, failing that, as date).
pub const TYPE_RATIO_THRESHOLD: f64 = 0.8;

/// Classify a set of raw cell values as numeric, date or text.
///
/// Missing values are ignored; a column with nothing but gaps is text.
/// Callers profiling large columns should pass a bounded sample (the first
/// [`TYPE_SAMPLE_SIZE`] non-missing values); classification is allowed to be
/// approximate. [`ColumnType::Mixed`] is never returned.
pub fn detect_column_type(values: &[&Value]) -> ColumnType {
    let present: Vec<&Value> = values
        .iter()
        .copied()
        .filter(|v| !value::is_missing(Some(v)))
        .collect();

    if present.is_empty() {
        return ColumnType::Text;
    }

    let total = present.len() as f64;
    let numeric = present
        .iter()
        .filter(|v| value::coerce_number(v).is_some())
        .count();
    if numeric as f64 / total > TYPE_RATIO_THRESHOLD {
        return ColumnType::Numeric;
    }

    let date = present
        .iter()
        .filter(|v| matches!(v, Value::String(s) if value::parses_as_date(s)))
        .count();
    if date as f64 / total > TYPE_RATIO_THRESHOLD {
        return ColumnType::Date;
    }

    ColumnType::Text
}

#[derive(Default)]
struct ColumnAccumulator<'a> {
    missing: usize,
    distinct: HashSet<String>,
    type_samples: Vec<&'a Value>,
    sum: f64,
    numeric_values: Vec<f64>,
}

/// Profile every column in a single pass over the dataset (O(rows × columns)).
pub fn profile_columns(rows: &[Row], columns: &[String]) -> Vec<ColumnStats> {
    let row_count = rows.len();
    let mut accumulators: Vec<ColumnAccumulator<'_>> =
        columns.iter().map(|_| ColumnAccumulator::default()).collect();

    for row in rows {
        for (acc, column) in accumulators.iter_mut().zip(columns) {
            let cell = row.get(column);
            if value::is_missing(cell) {
                acc.missing += 1;
                continue;
            }
            let Some(cell) = cell else { continue };

            acc.distinct.insert(value::distinct_key(cell));
            if acc.type_samples.len() < TYPE_SAMPLE_SIZE {
                acc.type_samples.push(cell);
            }
            if let Some(num) = value::coerce_number(cell) {
                acc.sum += num;
                acc.numeric_values.push(num);
            }
        }
    }

    columns
        .iter()
        .zip(accumulators)
        .map(|(column, acc)| finalize_column(column, acc, row_count))
        .collect()
}

fn finalize_column(column: &str, acc: ColumnAccumulator<'_>, row_count: usize) -> ColumnStats {
    let column_type = detect_column_type(&acc.type_samples);
    let mut stats = ColumnStats {
        column: column.to_owned(),
        column_type,
        count: row_count,
        missing: acc.missing,
        missing_percent: if row_count == 0 {
            0.0
        } else {
            acc.missing as f64 / row_count as f64 * 100.0
        },
        unique: acc.distinct.len(),
        mean: None,
        median: None,
        std: None,
        min: None,
        max: None,
    };

    if column_type == ColumnType::Numeric && !acc.numeric_values.is_empty() {
        let mut sorted = acc.numeric_values;
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let mean = acc.sum / n as f64;

        stats.mean = Some(mean);
        // Middle element of the ascending sort, no interpolation.
        stats.median = sorted.get(n / 2).copied();
        stats.min = sorted.first().copied();
        stats.max = sorted.last().copied();

        // Population standard deviation (divide by N).
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        stats.std = Some(variance.sqrt());
    }

    stats
}

/// Per-column missing value counts, restricted to columns with gaps.
pub fn missing_value_summary(rows: &[Row], columns: &[String]) -> Vec<MissingValueSummary> {
    let row_count = rows.len();
    columns
        .iter()
        .filter_map(|column| {
            let missing = rows
                .iter()
                .filter(|row| value::is_missing(row.get(column)))
                .count();
            if missing == 0 {
                return None;
            }
            Some(MissingValueSummary {
                column: column.clone(),
                missing,
                percent: if row_count == 0 {
                    0.0
                } else {
                    missing as f64 / row_count as f64 * 100.0
                },
            })
        })
        .collect()
}
