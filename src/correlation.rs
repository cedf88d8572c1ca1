//! Pairwise Pearson correlation across numeric columns.

use crate::profiling::detect_column_type;
use crate::types::{ColumnType, CorrelationEntry, Row};
use crate::value;
use serde_json::Value;

/// Pearson correlation coefficient over the first `min(|x|, |y|)` pairs.
///
/// Zero-variance inputs (either side) and empty inputs yield 0.0 rather than
/// NaN, so downstream sorting and rendering never see a hole.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }

    let mean_x = x.iter().take(n).sum::<f64>() / n as f64;
    let mean_y = y.iter().take(n).sum::<f64>() / n as f64;

    let mut numerator = 0.0;
    let mut denom_x = 0.0;
    let mut denom_y = 0.0;
    for (xv, yv) in x.iter().zip(y.iter()).take(n) {
        let dx = xv - mean_x;
        let dy = yv - mean_y;
        numerator += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    if denom_x == 0.0 || denom_y == 0.0 {
        return 0.0;
    }
    numerator / (denom_x * denom_y).sqrt()
}

/// Correlate every ordered pair of numeric columns.
///
/// Columns are classified over their full value set (no sampling) to
/// preserve numeric fidelity. Pairs keep the declared column order
/// (`col1` precedes `col2`, no self-pairs) and the result is stable-sorted
/// by descending absolute correlation.
pub fn correlate(rows: &[Row], columns: &[String]) -> Vec<CorrelationEntry> {
    let numeric_columns: Vec<&String> = columns
        .iter()
        .filter(|column| {
            let values: Vec<&Value> = rows.iter().filter_map(|row| row.get(*column)).collect();
            detect_column_type(&values) == ColumnType::Numeric
        })
        .collect();

    let mut correlations = Vec::new();
    for (i, col1) in numeric_columns.iter().enumerate() {
        for col2 in numeric_columns.iter().skip(i + 1) {
            let values1 = numeric_values(rows, col1);
            let values2 = numeric_values(rows, col2);
            correlations.push(CorrelationEntry {
                col1: (*col1).clone(),
                col2: (*col2).clone(),
                correlation: pearson(&values1, &values2),
            });
        }
    }

    correlations.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    correlations
}

fn numeric_values(rows: &[Row], column: &str) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| row.get(column).and_then(value::coerce_number))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_positive_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let x = [1.0, 2.0, 3.0];
        let y = [6.0, 4.0, 2.0];
        assert!((pearson(&x, &y) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_yields_zero() {
        let x = [5.0, 5.0, 5.0];
        let y = [1.0, 2.0, 3.0];
        assert_eq!(pearson(&x, &y), 0.0);
        assert_eq!(pearson(&[], &[]), 0.0);
    }
}
