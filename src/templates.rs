//! Reference glyph shapes, generated on demand.
//!
//! Every glyph is a short path of straight runs and elliptical arcs in the
//! unit frame `[-1, 1]²`, with `y` growing downward like the canvas. A path
//! is traced at parameter `t ∈ [0, 1]` by arc length, so templates carry no
//! state and are never stored.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::{GestureError, Result};
use crate::geometry::Point;
use crate::NUM_TEMPLATES;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One piece of a glyph path.
#[derive(Debug, Clone, Copy)]
enum Seg {
    /// Straight runs through the listed vertices.
    Poly(&'static [(f64, f64)]),
    /// Elliptical arc from angle `start`, turning by `sweep` radians.
    /// Positive sweep turns clockwise on screen.
    Arc {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        start: f64,
        sweep: f64,
    },
}

impl Seg {
    fn length(&self) -> f64 {
        match *self {
            Self::Poly(v) => v
                .windows(2)
                .map(|w| (w[1].0 - w[0].0).hypot(w[1].1 - w[0].1))
                .sum(),
            Self::Arc { rx, ry, sweep, .. } => {
                // Ramanujan's perimeter approximation, prorated by sweep
                let h = ((rx - ry) / (rx + ry)).powi(2);
                let perimeter = PI * (rx + ry) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()));
                perimeter * sweep.abs() / TAU
            }
        }
    }

    /// Point at fraction `u ∈ [0, 1]` of this piece.
    fn at(&self, u: f64) -> Point {
        match *self {
            Self::Poly(v) => {
                let mut remaining = u * self.length();
                for w in v.windows(2) {
                    let a = Point::new(w[0].0, w[0].1);
                    let b = Point::new(w[1].0, w[1].1);
                    let len = a.distance(&b);
                    if remaining <= len && len > 0.0 {
                        return a.lerp(&b, remaining / len);
                    }
                    remaining -= len;
                }
                let (x, y) = v[v.len() - 1];
                Point::new(x, y)
            }
            Self::Arc {
                cx,
                cy,
                rx,
                ry,
                start,
                sweep,
            } => {
                let theta = start + sweep * u;
                Point::new(cx + rx * theta.cos(), cy + ry * theta.sin())
            }
        }
    }
}

const fn circle(cx: f64, cy: f64, r: f64, start: f64, sweep: f64) -> Seg {
    Seg::Arc {
        cx,
        cy,
        rx: r,
        ry: r,
        start,
        sweep,
    }
}

const fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64, start: f64, sweep: f64) -> Seg {
    Seg::Arc {
        cx,
        cy,
        rx,
        ry,
        start,
        sweep,
    }
}

use Seg::Poly;

/// Trace `path` at `t`, distributing `t` over pieces by length.
fn trace(path: &[Seg], t: f64) -> Point {
    let t = t.clamp(0.0, 1.0);
    let total: f64 = path.iter().map(Seg::length).sum();
    let mut remaining = t * total;
    let last = path.len().saturating_sub(1);
    for (i, seg) in path.iter().enumerate() {
        let len = seg.length();
        if remaining <= len || i == last {
            let u = if len > 0.0 { (remaining / len).min(1.0) } else { 0.0 };
            return seg.at(u);
        }
        remaining -= len;
    }
    Point::ORIGIN
}

/// Glyph paths indexed by glyph id.
const GLYPH_PATHS: [&[Seg]; NUM_TEMPLATES] = [
    // A
    &[Poly(&[(-0.8, 1.0), (0.0, -1.0), (0.8, 1.0), (0.45, 0.2), (-0.45, 0.2)])],
    // B
    &[
        Poly(&[(-0.65, 1.0), (-0.65, -1.0)]),
        ellipse(-0.65, -0.5, 1.1, 0.5, -FRAC_PI_2, PI),
        ellipse(-0.65, 0.5, 1.3, 0.5, -FRAC_PI_2, PI),
    ],
    // C: ~275° arc open to the right
    &[circle(0.13, 0.0, 1.0, -0.74, -4.8)],
    // D
    &[
        Poly(&[(-0.75, 1.0), (-0.75, -1.0)]),
        ellipse(-0.75, 0.0, 1.5, 1.0, -FRAC_PI_2, PI),
    ],
    // E
    &[Poly(&[
        (0.7, -1.0), (-0.7, -1.0), (-0.7, 0.0), (0.4, 0.0),
        (-0.7, 0.0), (-0.7, 1.0), (0.7, 1.0),
    ])],
    // F
    &[Poly(&[(0.7, -1.0), (-0.7, -1.0), (-0.7, 1.0), (-0.7, 0.0), (0.4, 0.0)])],
    // G
    &[
        circle(0.05, 0.0, 1.0, -0.6, -5.2),
        Poly(&[(0.936, 0.465), (0.95, 0.05), (0.15, 0.05)]),
    ],
    // H
    &[Poly(&[
        (-0.7, -1.0), (-0.7, 1.0), (-0.7, 0.0), (0.7, 0.0), (0.7, -1.0), (0.7, 1.0),
    ])],
    // I
    &[Poly(&[
        (-0.5, -1.0), (0.5, -1.0), (0.0, -1.0), (0.0, 1.0), (-0.5, 1.0), (0.5, 1.0),
    ])],
    // J
    &[
        Poly(&[(0.5, -1.0), (0.5, 0.5)]),
        circle(0.0, 0.5, 0.5, 0.0, PI),
    ],
    // K
    &[Poly(&[
        (-0.7, -1.0), (-0.7, 1.0), (-0.7, 0.0), (0.7, -1.0), (-0.7, 0.0), (0.7, 1.0),
    ])],
    // L
    &[Poly(&[(-0.65, -1.0), (-0.65, 1.0), (0.65, 1.0)])],
    // M
    &[Poly(&[(-0.8, 1.0), (-0.8, -1.0), (0.0, 0.3), (0.8, -1.0), (0.8, 1.0)])],
    // N
    &[Poly(&[(-0.7, 1.0), (-0.7, -1.0), (0.7, 1.0), (0.7, -1.0)])],
    // O: narrower than the zero and started from the top
    &[ellipse(0.0, 0.0, 0.75, 1.0, -FRAC_PI_2, -TAU)],
    // P
    &[
        Poly(&[(-0.6, 1.0), (-0.6, -1.0)]),
        ellipse(-0.6, -0.5, 1.2, 0.5, -FRAC_PI_2, PI),
    ],
    // Q
    &[
        circle(0.0, 0.0, 1.0, -FRAC_PI_2, -TAU),
        Poly(&[(0.2, 0.4), (0.9, 1.0)]),
    ],
    // R
    &[
        Poly(&[(-0.65, 1.0), (-0.65, -1.0)]),
        ellipse(-0.65, -0.5, 1.2, 0.5, -FRAC_PI_2, PI),
        Poly(&[(-0.65, 0.0), (0.65, 1.0)]),
    ],
    // S
    &[
        ellipse(0.0, -0.5, 0.7, 0.5, -PI / 6.0, -4.0 * PI / 3.0),
        ellipse(0.0, 0.5, 0.7, 0.5, -FRAC_PI_2, 4.0 * PI / 3.0),
    ],
    // T
    &[Poly(&[(-0.8, -1.0), (0.8, -1.0), (0.0, -1.0), (0.0, 1.0)])],
    // U
    &[
        Poly(&[(-0.7, -1.0), (-0.7, 0.3)]),
        circle(0.0, 0.3, 0.7, PI, -PI),
        Poly(&[(0.7, 0.3), (0.7, -1.0)]),
    ],
    // V
    &[Poly(&[(-0.8, -1.0), (0.0, 1.0), (0.8, -1.0)])],
    // W
    &[Poly(&[(-0.9, -1.0), (-0.45, 1.0), (0.0, -0.3), (0.45, 1.0), (0.9, -1.0)])],
    // X
    &[Poly(&[(-0.8, -1.0), (0.8, 1.0), (0.0, 0.0), (0.8, -1.0), (-0.8, 1.0)])],
    // Y
    &[Poly(&[(-0.8, -1.0), (0.0, 0.0), (0.8, -1.0), (0.0, 0.0), (0.0, 1.0)])],
    // Z
    &[Poly(&[(-0.8, -1.0), (0.8, -1.0), (-0.8, 1.0), (0.8, 1.0)])],
    // 0: full unit circle (cos 2πt, sin 2πt)
    &[circle(0.0, 0.0, 1.0, 0.0, TAU)],
    // 1
    &[Poly(&[(-0.2, -0.6), (0.2, -1.0), (0.2, 1.0)])],
    // 2
    &[
        circle(0.0, -0.4, 0.6, PI, 1.25 * PI),
        Poly(&[(0.424, 0.024), (-0.7, 1.0), (0.7, 1.0)]),
    ],
    // 3
    &[
        circle(0.0, -0.5, 0.5, PI, 1.5 * PI),
        circle(0.0, 0.5, 0.5, -FRAC_PI_2, 1.5 * PI),
    ],
    // 4
    &[Poly(&[(0.3, 1.0), (0.3, -1.0), (-0.7, 0.4), (0.7, 0.4)])],
    // 5
    &[
        Poly(&[(0.525, -1.0), (-0.575, -1.0), (-0.525, -0.12)]),
        circle(-0.075, 0.35, 0.65, -2.3, 4.7),
    ],
    // 6
    &[
        Poly(&[(0.5, -1.0), (-0.5, 0.5)]),
        circle(0.0, 0.5, 0.5, PI, -TAU),
    ],
    // 7
    &[Poly(&[(-0.7, -1.0), (0.7, -1.0), (-0.2, 1.0)])],
    // 8
    &[
        ellipse(0.0, -0.5, 0.45, 0.5, FRAC_PI_2, -TAU),
        circle(0.0, 0.5, 0.5, -FRAC_PI_2, TAU),
    ],
    // 9
    &[
        circle(0.0, -0.45, 0.55, 0.0, -TAU),
        Poly(&[(0.55, -0.45), (0.45, 1.0)]),
    ],
];

/// Whether a glyph is a letter or a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GlyphKind {
    Letter,
    Digit,
}

/// One of the 36 recognizable characters.
///
/// Ids follow declaration order: `A`..`Z` are 0..=25, `Digit0`..`Digit9`
/// are 26..=35.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
#[rustfmt::skip]
pub enum Glyph {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
}

impl Glyph {
    /// All glyphs in id order.
    #[rustfmt::skip]
    pub const ALL: [Self; NUM_TEMPLATES] = [
        Self::A, Self::B, Self::C, Self::D, Self::E, Self::F, Self::G,
        Self::H, Self::I, Self::J, Self::K, Self::L, Self::M, Self::N,
        Self::O, Self::P, Self::Q, Self::R, Self::S, Self::T, Self::U,
        Self::V, Self::W, Self::X, Self::Y, Self::Z,
        Self::Digit0, Self::Digit1, Self::Digit2, Self::Digit3, Self::Digit4,
        Self::Digit5, Self::Digit6, Self::Digit7, Self::Digit8, Self::Digit9,
    ];

    /// Glyph for `id`, or `None` outside `[0, NUM_TEMPLATES)`.
    #[must_use]
    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    #[must_use]
    pub const fn id(self) -> usize {
        self as usize
    }

    /// Glyph for an upper-case letter or digit character.
    #[must_use]
    pub fn from_label(label: char) -> Option<Self> {
        match label {
            'A'..='Z' => Self::from_id(label as usize - 'A' as usize),
            '0'..='9' => Self::from_id(26 + label as usize - '0' as usize),
            _ => None,
        }
    }

    /// `'A'..='Z'` for letters, `'0'..='9'` for digits.
    #[must_use]
    pub const fn label(self) -> char {
        let id = self as u8;
        if id < 26 {
            (b'A' + id) as char
        } else {
            (b'0' + id - 26) as char
        }
    }

    #[must_use]
    pub const fn kind(self) -> GlyphKind {
        if (self as u8) < 26 {
            GlyphKind::Letter
        } else {
            GlyphKind::Digit
        }
    }

    fn path(self) -> &'static [Seg] {
        GLYPH_PATHS[self as usize]
    }

    /// Point on the glyph at `t ∈ [0, 1]`, in the unit frame.
    #[must_use]
    pub fn point_at(self, t: f64) -> Point {
        trace(self.path(), t)
    }

    /// Fill `out` with evenly spaced samples in the unit frame.
    pub fn fill_unit(self, out: &mut [Point]) {
        let n = out.len();
        for (i, p) in out.iter_mut().enumerate() {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            *p = self.point_at(t);
        }
    }

    /// `N` samples in the unit frame.
    #[must_use]
    pub fn unit_template<const N: usize>(self) -> [Point; N] {
        let mut out = [Point::ORIGIN; N];
        self.fill_unit(&mut out);
        out
    }

    /// `N` samples remapped onto the canvas frame, ready for matching.
    #[must_use]
    pub fn canvas_template<const N: usize>(self) -> [Point; N] {
        let mut out = self.unit_template::<N>();
        for p in &mut out {
            *p = p.unit_to_canvas();
        }
        out
    }
}

impl TryFrom<usize> for Glyph {
    type Error = GestureError;

    fn try_from(id: usize) -> Result<Self> {
        Self::from_id(id).ok_or(GestureError::GlyphOutOfRange(id))
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fill `out` with the unit-frame template for glyph `id`.
///
/// # Errors
///
/// Returns [`GestureError::GlyphOutOfRange`] if `id >= NUM_TEMPLATES`.
pub fn fill_template(id: usize, out: &mut [Point]) -> Result<()> {
    Glyph::try_from(id)?.fill_unit(out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::dtw_distance;
    use crate::TEMPLATE_POINTS;
    use approx::assert_relative_eq;

    #[test]
    fn test_labels_round_trip() {
        for (id, glyph) in Glyph::ALL.iter().enumerate() {
            assert_eq!(glyph.id(), id);
            assert_eq!(Glyph::from_label(glyph.label()), Some(*glyph));
        }
        assert_eq!(Glyph::A.label(), 'A');
        assert_eq!(Glyph::Z.label(), 'Z');
        assert_eq!(Glyph::Digit0.id(), 26);
        assert_eq!(Glyph::Digit0.label(), '0');
        assert_eq!(Glyph::Digit9.label(), '9');
        assert_eq!(Glyph::from_label('a'), None);
        assert_eq!(Glyph::Q.kind(), GlyphKind::Letter);
        assert_eq!(Glyph::Digit3.kind(), GlyphKind::Digit);
    }

    #[test]
    fn test_out_of_range_id() {
        assert!(Glyph::from_id(NUM_TEMPLATES).is_none());
        let mut out = [Point::ORIGIN; 4];
        assert_eq!(
            fill_template(36, &mut out).unwrap_err(),
            GestureError::GlyphOutOfRange(36)
        );
    }

    #[test]
    fn test_zero_is_unit_circle() {
        let tpl: [Point; TEMPLATE_POINTS] = Glyph::Digit0.unit_template();
        for (i, p) in tpl.iter().enumerate() {
            let a = TAU * i as f64 / (TEMPLATE_POINTS - 1) as f64;
            assert_relative_eq!(p.x, a.cos(), epsilon = 1e-9);
            assert_relative_eq!(p.y, a.sin(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_templates_stay_in_unit_frame() {
        for glyph in Glyph::ALL {
            let tpl: [Point; TEMPLATE_POINTS] = glyph.unit_template();
            for p in &tpl {
                assert!(p.x.abs() <= 1.0 + 1e-9 && p.y.abs() <= 1.0 + 1e-9, "{glyph} at {p:?}");
            }
        }
    }

    #[test]
    fn test_endpoints() {
        let start = Glyph::L.point_at(0.0);
        assert_relative_eq!(start.x, -0.65, epsilon = 1e-9);
        assert_relative_eq!(start.y, -1.0, epsilon = 1e-9);
        let end = Glyph::L.point_at(1.0);
        assert_relative_eq!(end.x, 0.65, epsilon = 1e-9);
        assert_relative_eq!(end.y, 1.0, epsilon = 1e-9);
        let end = Glyph::C.point_at(1.0);
        assert_relative_eq!(end.x, 0.13 + (-5.54f64).cos(), epsilon = 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let a: [Point; TEMPLATE_POINTS] = Glyph::S.canvas_template();
        let b: [Point; TEMPLATE_POINTS] = Glyph::S.canvas_template();
        assert_eq!(a, b);
    }

    #[test]
    fn test_templates_pairwise_distinct() {
        let templates: Vec<[Point; TEMPLATE_POINTS]> =
            Glyph::ALL.iter().map(|g| g.canvas_template()).collect();
        for i in 0..NUM_TEMPLATES {
            for j in (i + 1)..NUM_TEMPLATES {
                let d = dtw_distance(&templates[i], &templates[j]).unwrap();
                assert!(
                    d > 1.0,
                    "{} and {} too close: {d}",
                    Glyph::ALL[i],
                    Glyph::ALL[j]
                );
            }
        }
    }

    #[test]
    fn test_canvas_mapping() {
        let unit: [Point; 8] = Glyph::W.unit_template();
        let canvas: [Point; 8] = Glyph::W.canvas_template();
        for (u, c) in unit.iter().zip(canvas.iter()) {
            assert_relative_eq!(c.x, (u.x + 1.0) * 500.0);
            assert_relative_eq!(c.y, (u.y + 1.0) * 500.0);
        }
    }
}
