//! Fixed-length resampling by index.
//!
//! Output point `i` sits at fractional source position
//! `i / (m − 1) · (n − 1)` and is interpolated linearly between its two
//! neighbours. Parametrization is by sample index, not arc length: capture
//! runs at a fixed tick rate, so index is a fair proxy for time.

use crate::error::{GestureError, Result};
use crate::geometry::Point;

/// Resample `src` into every slot of `dst`.
///
/// A single-point source fills `dst` with copies of it. A one-slot `dst`
/// receives the first source point.
///
/// # Errors
///
/// Returns [`GestureError::EmptySequence`] if `src` is empty.
pub fn resample_into(src: &[Point], dst: &mut [Point]) -> Result<()> {
    let n = src.len();
    let m = dst.len();
    if n == 0 {
        return Err(GestureError::EmptySequence);
    }
    if n == 1 || m == 1 {
        dst.fill(src[0]);
        return Ok(());
    }

    let last = n - 1;
    for (i, out) in dst.iter_mut().enumerate() {
        let pos = i as f64 / (m - 1) as f64 * last as f64;
        let i0 = (pos.floor() as usize).min(last);
        let i1 = (i0 + 1).min(last);
        let f = pos - i0 as f64;
        *out = src[i0].lerp(&src[i1], f);
    }
    Ok(())
}

/// Resample `src` into a fixed-size array of `M` points.
///
/// # Errors
///
/// Returns [`GestureError::EmptySequence`] if `src` is empty.
pub fn resample<const M: usize>(src: &[Point]) -> Result<[Point; M]> {
    let mut out = [Point::ORIGIN; M];
    resample_into(src, &mut out)?;
    Ok(out)
}
