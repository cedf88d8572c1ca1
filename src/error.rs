//! Error types for quarry operations.
//!
//! Most engine functions are total over their inputs and return plain values;
//! the ones that can genuinely fail (regression with too little data) return
//! [`Result`] with a matchable error enum rather than a stringly error, so
//! callers can decide user-visible messaging themselves.

use std::fmt;

/// Main error type for quarry operations.
#[derive(Debug)]
pub enum QuarryError {
    /// Too few valid rows to fit a stable model.
    InsufficientData { required: usize, actual: usize },

    /// Generic error with context.
    Other(String),
}

impl fmt::Display for QuarryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientData { required, actual } => write!(
                f,
                "Insufficient data for a stable model: {actual} valid rows, need at least {required}"
            ),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for QuarryError {}

impl From<anyhow::Error> for QuarryError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

/// Result type alias for quarry operations.
pub type Result<T> = std::result::Result<T, QuarryError>;
