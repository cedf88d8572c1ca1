//! Multivariate linear regression via batch gradient descent.
//!
//! Features are z-score normalized before the descent so a single fixed
//! learning rate converges across wildly different feature scales, then the
//! coefficients are mapped back to the original scale for reporting.

use crate::error::{QuarryError, Result};
use crate::types::{Prediction, RegressionResult, Row};
use crate::value;
use std::collections::HashMap;

/// Fixed step size for the descent; chosen for normalized features, not
/// discovered analytically.
pub const LEARNING_RATE: f64 = 0.1;

/// Fixed iteration count for the descent.
pub const ITERATIONS: usize = 100;

/// Minimum valid rows required for a stable fit.
pub const MIN_TRAINING_ROWS: usize = 5;

/// Cap on returned predictions (bounded output for visualization).
pub const PREDICTION_LIMIT: usize = 50;

struct TrainingPoint {
    y: f64,
    x: Vec<f64>,
}

/// Fit `target ~ features` over the rows where the target and every feature
/// coerce to a finite number; other rows are excluded from the fit.
///
/// # Errors
///
/// Returns [`QuarryError::InsufficientData`] when fewer than
/// [`MIN_TRAINING_ROWS`] valid rows remain.
pub fn fit_linear_model(
    rows: &[Row],
    target: &str,
    features: &[String],
) -> Result<RegressionResult> {
    let points: Vec<TrainingPoint> = rows
        .iter()
        .filter_map(|row| {
            let y = row.get(target).and_then(value::coerce_number)?;
            let x = features
                .iter()
                .map(|f| row.get(f).and_then(value::coerce_number))
                .collect::<Option<Vec<f64>>>()?;
            Some(TrainingPoint { y, x })
        })
        .collect();

    if points.len() < MIN_TRAINING_ROWS {
        return Err(QuarryError::InsufficientData {
            required: MIN_TRAINING_ROWS,
            actual: points.len(),
        });
    }
    let n = points.len() as f64;

    // Per-feature z-score normalization; zero std floors to 1 so constant
    // features survive the division.
    let means: Vec<f64> = (0..features.len())
        .map(|i| points.iter().map(|p| p.x[i]).sum::<f64>() / n)
        .collect();
    let stds: Vec<f64> = (0..features.len())
        .map(|i| {
            let variance = points
                .iter()
                .map(|p| (p.x[i] - means[i]).powi(2))
                .sum::<f64>()
                / n;
            let std = variance.sqrt();
            if std == 0.0 { 1.0 } else { std }
        })
        .collect();

    let normalized: Vec<TrainingPoint> = points
        .iter()
        .map(|p| TrainingPoint {
            y: p.y,
            x: p
                .x
                .iter()
                .enumerate()
                .map(|(i, v)| (v - means[i]) / stds[i])
                .collect(),
        })
        .collect();

    // Batch gradient descent on mean squared error.
    let mut weights = vec![0.0; features.len()];
    let mut bias = 0.0;
    for _ in 0..ITERATIONS {
        let mut grad_w = vec![0.0; features.len()];
        let mut grad_b = 0.0;

        for p in &normalized {
            let predicted: f64 = p.x.iter().zip(&weights).map(|(x, w)| x * w).sum::<f64>() + bias;
            let error = predicted - p.y;
            for (g, x) in grad_w.iter_mut().zip(&p.x) {
                *g += error * x;
            }
            grad_b += error;
        }

        for (w, g) in weights.iter_mut().zip(&grad_w) {
            *w -= LEARNING_RATE * g / n;
        }
        bias -= LEARNING_RATE * grad_b / n;
    }

    // Denormalize back to the original feature scale.
    let mut coefficients = HashMap::new();
    for (i, feature) in features.iter().enumerate() {
        coefficients.insert(feature.clone(), weights[i] / stds[i]);
    }
    let intercept = bias
        - weights
            .iter()
            .zip(&means)
            .zip(&stds)
            .map(|((w, m), s)| w * m / s)
            .sum::<f64>();

    let predictions: Vec<Prediction> = points
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let predicted: f64 = features
                .iter()
                .zip(&p.x)
                .map(|(f, x)| coefficients.get(f).copied().unwrap_or(0.0) * x)
                .sum::<f64>()
                + intercept;
            Prediction {
                index,
                actual: p.y,
                predicted,
            }
        })
        .collect();

    let y_mean = points.iter().map(|p| p.y).sum::<f64>() / n;
    let ss_res: f64 = predictions
        .iter()
        .map(|p| (p.actual - p.predicted).powi(2))
        .sum();
    let ss_tot: f64 = points.iter().map(|p| (p.y - y_mean).powi(2)).sum();

    let r2 = 1.0 - ss_res / if ss_tot == 0.0 { 1.0 } else { ss_tot };
    let mse = ss_res / n;

    let mut predictions = predictions;
    predictions.truncate(PREDICTION_LIMIT);

    Ok(RegressionResult {
        r2: r2.max(0.0),
        mse,
        coefficients,
        intercept,
        predictions,
    })
}
