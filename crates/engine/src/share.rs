//! Ownership share percentages and the 100% cap.
//!
//! Percentages are plain `f64` values in `(0, 100]`. Sums are compared against
//! the cap with a fixed tolerance of [`SHARE_EPSILON`].

use crate::{EngineError, ResultEngine};

/// Tolerance used for every comparison against the 100% cap.
pub const SHARE_EPSILON: f64 = 1e-4;

/// Full ownership of an asset.
pub const FULL_SHARE: f64 = 100.0;

/// Validate a single offered/updated share percentage.
pub fn validate_share(percentage: f64) -> ResultEngine<f64> {
    if !percentage.is_finite() || percentage <= 0.0 || percentage > FULL_SHARE {
        return Err(EngineError::Validation(format!(
            "share percentage must be in (0, 100], got {percentage}"
        )));
    }
    Ok(percentage)
}

/// Returns `true` when `total` is past the cap (beyond the tolerance).
pub fn exceeds_cap(total: f64) -> bool {
    total > FULL_SHARE + SHARE_EPSILON
}

/// Returns `true` when `total` leaves some share unallocated.
pub fn leaves_remainder(total: f64) -> bool {
    total < FULL_SHARE - SHARE_EPSILON
}

/// Percentage still free once `total` is allocated (never negative).
pub fn available(total: f64) -> f64 {
    (FULL_SHARE - total).max(0.0)
}
