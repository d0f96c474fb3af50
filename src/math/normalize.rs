//! Position and scale normalization of captured strokes.
//!
//! The stroke's bounding box is centered on the canvas and its longer side
//! stretched to the full canvas width. Both axes share one scale factor, so
//! the aspect ratio of the drawing is kept.

use crate::geometry::{BoundingBox, Point, CANVAS_CENTER};

/// Floor for bounding-box half-extents, avoiding division blow-up on
/// strokes that are degenerate along one axis.
pub const MIN_HALF_EXTENT: f64 = 1e-3;

/// Isotropic scale factor used by [`normalize`]: the larger half-extent.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn isotropic_scale(points: &[Point]) -> Option<(Point, f64)> {
    let bb = BoundingBox::of(points)?;
    let (sx, sy) = bb.half_extents();
    let s = sx.max(MIN_HALF_EXTENT).max(sy.max(MIN_HALF_EXTENT));
    Some((bb.center(), s))
}

/// Normalize `points` in place into the canonical `[0, 1000]²` frame.
///
/// `x' = ((x − cx) / s + 1) · 500`, likewise for `y`. An empty slice is
/// left untouched.
pub fn normalize(points: &mut [Point]) {
    if let Some((center, s)) = isotropic_scale(points) {
        normalize_with(points, center, s);
    }
}

/// Apply the canonical-frame map for a precomputed center and scale.
///
/// The map is affine, so it commutes with linear resampling: a stroke can
/// be resampled first and mapped with its original bounding box after.
pub fn normalize_with(points: &mut [Point], center: Point, s: f64) {
    for p in points.iter_mut() {
        p.x = ((p.x - center.x) / s + 1.0) * CANVAS_CENTER;
        p.y = ((p.y - center.y) / s + 1.0) * CANVAS_CENTER;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_longer_axis_fills_canvas() {
        let mut pts = [
            Point::new(100.0, 200.0),
            Point::new(300.0, 250.0),
            Point::new(200.0, 300.0),
        ];
        normalize(&mut pts);

        let bb = BoundingBox::of(&pts).unwrap();
        assert_relative_eq!(bb.min.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(bb.max.x, 1000.0, epsilon = 1e-9);
        // Shorter axis keeps the aspect ratio, centered
        assert_relative_eq!(bb.min.y, 250.0, epsilon = 1e-9);
        assert_relative_eq!(bb.max.y, 750.0, epsilon = 1e-9);
    }

    #[test]
    fn test_vertical_line_no_blowup() {
        let mut pts = [
            Point::new(420.0, 100.0),
            Point::new(420.0, 300.0),
            Point::new(420.0, 500.0),
        ];
        normalize(&mut pts);
        for p in &pts {
            assert!(p.x.is_finite());
            assert_relative_eq!(p.x, 500.0, epsilon = 1e-9);
        }
        assert_relative_eq!(pts[0].y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pts[2].y, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_point_centers() {
        let mut pts = [Point::new(12.0, 987.0)];
        normalize(&mut pts);
        assert_eq!(pts[0], Point::new(500.0, 500.0));
    }

    #[test]
    fn test_empty_is_noop() {
        let mut pts: [Point; 0] = [];
        normalize(&mut pts);
        assert!(isotropic_scale(&pts).is_none());
    }
}
