//! Error types for configuration and runtime invariant checks

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} range is empty or non-finite: [{min}, {max}]")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} must lie in {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// A step produced NaN/inf; the configuration is unstable (usually dt too large)
    #[error("particle {index} has non-finite {quantity} after tick {tick}")]
    NonFinite {
        index: usize,
        quantity: &'static str,
        tick: u64,
    },

    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject non-positive or non-finite scalars
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::NonPositive { field, value })
    }
}

/// Reject `[min, max]` with min > max or a non-finite bound
pub(crate) fn ensure_range(field: &'static str, range: [f64; 2]) -> Result<()> {
    let [min, max] = range;
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(SimError::InvalidRange { field, min, max })
    }
}
