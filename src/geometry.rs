//! 2D points and the canvas frame shared by capture, normalization and templates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Side length of the square drawing canvas.
pub const CANVAS_SIZE: f64 = 1000.0;

/// Canvas midpoint on either axis.
pub const CANVAS_CENTER: f64 = CANVAS_SIZE / 2.0;

/// A 2D coordinate, either in the device frame or the canonical frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation towards `other` by fraction `f`.
    #[inline]
    #[must_use]
    pub fn lerp(&self, other: &Self, f: f64) -> Self {
        Self {
            x: self.x * (1.0 - f) + other.x * f,
            y: self.y * (1.0 - f) + other.y * f,
        }
    }

    /// Map a unit-frame point (`[-1, 1]²`) onto the canvas (`[0, 1000]²`).
    #[inline]
    #[must_use]
    pub fn unit_to_canvas(&self) -> Self {
        Self {
            x: (self.x + 1.0) * CANVAS_CENTER,
            y: (self.y + 1.0) * CANVAS_CENTER,
        }
    }
}

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Bounding box of `points`, or `None` if the slice is empty.
    #[must_use]
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        let mut bb = Self {
            min: first,
            max: first,
        };
        for p in &points[1..] {
            bb.min.x = bb.min.x.min(p.x);
            bb.min.y = bb.min.y.min(p.y);
            bb.max.x = bb.max.x.max(p.x);
            bb.max.y = bb.max.y.max(p.y);
        }
        Some(bb)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Half the width and half the height.
    #[must_use]
    pub fn half_extents(&self) -> (f64, f64) {
        (
            (self.max.x - self.min.x) / 2.0,
            (self.max.y - self.min.y) / 2.0,
        )
    }
}

/// Total polyline length of a point sequence.
#[must_use]
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
