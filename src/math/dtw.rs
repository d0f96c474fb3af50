//! Dynamic time warping over 2D point sequences.
//!
//! Classic DTW with Euclidean point cost and the three-neighbour recurrence
//! (insertion, deletion, match). Only two rows of the cost matrix are kept,
//! in fixed stack buffers, so memory is `O(min(na, nb))` and nothing is
//! allocated.

use crate::error::{GestureError, Result};
use crate::geometry::Point;
use crate::MAX_SAMPLES;

/// Widest sequence the rolling rows can hold.
///
/// Only the shorter of the two inputs has to fit.
pub const DTW_MAX_WIDTH: usize = MAX_SAMPLES;

/// DTW distance between `a` and `b`, normalized by `na + nb`.
///
/// The recurrence is symmetric, so the shorter sequence is laid along the
/// rows to keep the buffers small.
///
/// # Errors
///
/// - [`GestureError::EmptySequence`] if either input is empty.
/// - [`GestureError::SequenceTooLong`] if both inputs exceed
///   [`DTW_MAX_WIDTH`].
pub fn dtw_distance(a: &[Point], b: &[Point]) -> Result<f64> {
    if a.is_empty() || b.is_empty() {
        return Err(GestureError::EmptySequence);
    }
    let (outer, inner) = if b.len() <= a.len() { (a, b) } else { (b, a) };
    let m = inner.len();
    if m > DTW_MAX_WIDTH {
        return Err(GestureError::sequence_too_long(m, DTW_MAX_WIDTH));
    }

    let mut prev = [f64::INFINITY; DTW_MAX_WIDTH + 1];
    let mut curr = [f64::INFINITY; DTW_MAX_WIDTH + 1];
    prev[0] = 0.0;

    for p in outer {
        curr[0] = f64::INFINITY;
        for j in 1..=m {
            let cost = p.distance(&inner[j - 1]);
            let best = prev[j].min(curr[j - 1]).min(prev[j - 1]);
            curr[j] = cost + best;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    Ok(prev[m] / (a.len() + b.len()) as f64)
}
