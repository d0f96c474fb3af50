//! Telemetry record for one gesture.
//!
//! Mirrors the JSON the host web page renders: the normalized input path,
//! a few stroke features and the recognition outcome with ranked
//! alternatives. Enable the `serde` feature to serialize it.
//!
//! Segments are the straight runs of the normalized path, split wherever
//! the heading turns by more than [`CORNER_DEGREES`] from the start of the
//! current run. Angles are the turns between consecutive segments.

use heapless::Vec;

use crate::classifier::{prepare, Classification};
use crate::geometry::{path_length, Point};
use crate::templates::GlyphKind;
use crate::{MAX_ALTERNATIVES, TEMPLATE_POINTS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Heading change, in degrees, that starts a new segment.
pub const CORNER_DEGREES: f64 = 45.0;

/// Upper bound on segments of a resampled path.
const MAX_SEGMENTS: usize = TEMPLATE_POINTS - 1;

/// Kind of recognized glyph, `None` when nothing matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResultKind {
    Letter,
    Digit,
    None,
}

impl From<GlyphKind> for ResultKind {
    fn from(kind: GlyphKind) -> Self {
        match kind {
            GlyphKind::Letter => Self::Letter,
            GlyphKind::Digit => Self::Digit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReportInput {
    /// Canonical-frame, resampled stroke.
    pub normalized: Vec<Point, TEMPLATE_POINTS>,
}

/// Straight run of the normalized path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub dx: f64,
    pub dy: f64,
    pub len: f64,
}

impl Segment {
    fn between(a: Point, b: Point) -> Self {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        Self {
            dx,
            dy,
            len: dx.hypot(dy),
        }
    }

    fn heading(&self) -> f64 {
        self.dy.atan2(self.dx)
    }
}

/// Absolute turn between two headings in radians, as degrees in `[0, 180]`.
fn turn_degrees(from: f64, to: f64) -> f64 {
    let d = (to - from).to_degrees().abs() % 360.0;
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// Split `path` into straight runs at corners sharper than [`CORNER_DEGREES`].
///
/// Zero-length steps are skipped. `path` holds at most [`TEMPLATE_POINTS`]
/// points, so the runs always fit.
fn split_segments(path: &[Point]) -> Vec<Segment, MAX_SEGMENTS> {
    let mut segments = Vec::new();
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return segments;
    };

    let mut start = first;
    let mut reference = None;
    for pair in path.windows(2) {
        let step = Segment::between(pair[0], pair[1]);
        if step.len <= f64::EPSILON {
            continue;
        }
        let heading = step.heading();
        match reference {
            None => reference = Some(heading),
            Some(r) if turn_degrees(r, heading) > CORNER_DEGREES => {
                let pushed = segments.push(Segment::between(start, pair[0]));
                debug_assert!(pushed.is_ok(), "more segments than steps");
                start = pair[0];
                reference = Some(heading);
            }
            Some(_) => {}
        }
    }
    if reference.is_some() {
        let pushed = segments.push(Segment::between(start, last));
        debug_assert!(pushed.is_ok(), "more segments than steps");
    }
    segments
}

/// Turns between consecutive segments, in degrees.
fn segment_angles(segments: &[Segment]) -> Vec<f64, MAX_SEGMENTS> {
    segments
        .windows(2)
        .map(|w| turn_degrees(w[0].heading(), w[1].heading()))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReportFeatures {
    /// Turns between consecutive segments, in degrees.
    pub angles: Vec<f64, MAX_SEGMENTS>,
    /// Straight runs of the normalized path.
    pub segments: Vec<Segment, MAX_SEGMENTS>,
    /// Path length of the raw stroke in canvas units.
    pub length: f64,
    /// Distance to the nearest template.
    pub dtw_distance: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alternative {
    pub name: char,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReportResult {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ResultKind,
    pub name: Option<char>,
    pub confidence: f64,
    pub alternatives: Vec<Alternative, MAX_ALTERNATIVES>,
}

impl ReportResult {
    fn none() -> Self {
        Self {
            kind: ResultKind::None,
            name: None,
            confidence: 0.0,
            alternatives: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GestureReport {
    pub input: ReportInput,
    pub features: ReportFeatures,
    pub result: ReportResult,
}

impl GestureReport {
    /// Build a report for a raw device-frame stroke.
    ///
    /// Without a classification the normalized path is still computed
    /// and the result block reports no match.
    #[must_use]
    pub fn from_stroke(stroke: &[Point], classification: Option<&Classification>) -> Self {
        let normalized = match classification {
            Some(c) => Some(c.input),
            None => prepare(stroke).ok(),
        };
        let input = ReportInput {
            normalized: normalized
                .map(|pts| pts.iter().copied().collect())
                .unwrap_or_default(),
        };

        let segments = split_segments(&input.normalized);
        let features = ReportFeatures {
            angles: segment_angles(&segments),
            segments,
            length: path_length(stroke),
            dtw_distance: classification.map(|c| c.nearest.distance),
        };

        let result = classification.map_or_else(ReportResult::none, |c| {
            let alternatives = c
                .alternatives
                .iter()
                .map(|alt| Alternative {
                    name: alt.label(),
                    confidence: alt.confidence(c.threshold),
                })
                .collect();
            match c.best() {
                Some(best) => ReportResult {
                    kind: best.glyph.kind().into(),
                    name: Some(best.label()),
                    confidence: c.confidence(),
                    alternatives,
                },
                None => ReportResult {
                    alternatives,
                    ..ReportResult::none()
                },
            }
        });

        Self {
            input,
            features,
            result,
        }
    }
}
