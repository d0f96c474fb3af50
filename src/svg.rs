//! SVG rendering of a raw stroke.

use std::fmt;

use crate::geometry::Point;

/// A stroke rendered as a single-polyline SVG document on the
/// `1000 × 1000` canvas.
///
/// ```
/// use airdraw::{Point, SvgPolyline};
///
/// let stroke = [Point::new(10.0, 20.0), Point::new(30.26, 40.0)];
/// let svg = SvgPolyline::new(&stroke).to_string();
/// assert!(svg.contains("points='10.0,20.0 30.3,40.0'"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SvgPolyline<'a> {
    points: &'a [Point],
}

impl<'a> SvgPolyline<'a> {
    #[must_use]
    pub const fn new(points: &'a [Point]) -> Self {
        Self { points }
    }
}

impl fmt::Display for SvgPolyline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 1000 1000'>\n")?;
        f.write_str("<polyline fill='none' stroke='black' stroke-width='4' points='")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:.1},{:.1}", p.x, p.y)?;
        }
        f.write_str("'/>\n\n</svg>\n")
    }
}

/// Write the SVG document for `points` into `out`.
///
/// # Errors
///
/// Propagates errors from the writer.
pub fn write_svg<W: fmt::Write>(points: &[Point], mut out: W) -> fmt::Result {
    write!(out, "{}", SvgPolyline::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_document() {
        let stroke = [Point::new(1.0, 2.0), Point::new(500.06, 999.94)];
        let svg = SvgPolyline::new(&stroke).to_string();
        assert_eq!(
            svg,
            "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 1000 1000'>\n\
             <polyline fill='none' stroke='black' stroke-width='4' points='1.0,2.0 500.1,999.9'/>\n\
             \n\
             </svg>\n"
        );
    }

    #[test]
    fn test_empty_stroke() {
        let mut out = String::new();
        write_svg(&[], &mut out).unwrap();
        assert!(out.contains("points=''/>"));
        assert!(out.ends_with("</svg>\n"));
    }
}
