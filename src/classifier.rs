//! Nearest-template classification of captured strokes.
//!
//! A stroke is mapped into the canonical frame, resampled to
//! [`TEMPLATE_POINTS`] and compared by DTW against every glyph template.
//! The nearest template wins if its distance is under the configured
//! threshold. The runners-up are kept in a small ranked list for hosts that
//! want to show alternatives.

use heapless::Vec;

use crate::config::GestureConfig;
use crate::error::{GestureError, Result};
use crate::geometry::Point;
use crate::math::{dtw_distance, isotropic_scale, normalize_with, resample};
use crate::templates::Glyph;
use crate::{MAX_ALTERNATIVES, MIN_STROKE_POINTS, TEMPLATE_POINTS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Room for the nearest candidate plus the alternatives.
const RANKED_CAPACITY: usize = MAX_ALTERNATIVES + 1;

/// Confidence for a distance under `threshold`: `1 − d / threshold`,
/// clamped to `[0, 1]`.
#[must_use]
pub fn confidence(distance: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / threshold).clamp(0.0, 1.0)
}

/// One template compared against a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    pub glyph: Glyph,
    pub distance: f64,
}

impl Candidate {
    #[must_use]
    pub const fn label(&self) -> char {
        self.glyph.label()
    }

    #[must_use]
    pub fn confidence(&self, threshold: f64) -> f64 {
        confidence(self.distance, threshold)
    }
}

/// Outcome of the last recognition cycle, as stored by the recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassificationResult {
    /// Label of the nearest template, matched or not.
    pub label: char,
    /// Whether the distance was under the threshold.
    pub matched: bool,
    pub distance: f64,
}

/// Full ranking of a stroke against the template set.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Nearest template. Ties go to the lower glyph id.
    pub nearest: Candidate,
    /// Runners-up in ascending distance.
    pub alternatives: Vec<Candidate, MAX_ALTERNATIVES>,
    /// Threshold the stroke was judged against.
    pub threshold: f64,
    /// Canonical-frame, resampled input that was matched.
    pub input: [Point; TEMPLATE_POINTS],
}

impl Classification {
    /// The nearest candidate if it is under the threshold.
    #[must_use]
    pub fn best(&self) -> Option<Candidate> {
        self.is_match().then_some(self.nearest)
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.nearest.distance < self.threshold
    }

    /// Matched label, `None` when nothing was close enough.
    #[must_use]
    pub fn label(&self) -> Option<char> {
        self.best().map(|c| c.label())
    }

    /// Confidence of the nearest candidate.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.nearest.confidence(self.threshold)
    }

    #[must_use]
    pub fn result(&self) -> ClassificationResult {
        ClassificationResult {
            label: self.nearest.label(),
            matched: self.is_match(),
            distance: self.nearest.distance,
        }
    }
}

/// Bounded ranking of candidates, kept sorted by ascending distance.
///
/// A candidate only displaces entries that are strictly farther, so with
/// candidates filed in id order equal distances keep the lower id first.
#[derive(Debug, Clone)]
pub struct Ranking {
    limit: usize,
    ranked: Vec<Candidate, RANKED_CAPACITY>,
}

impl Ranking {
    /// Keep at most `limit` candidates, clamped to `1..=MAX_ALTERNATIVES + 1`.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.clamp(1, RANKED_CAPACITY),
            ranked: Vec::new(),
        }
    }

    pub fn file(&mut self, candidate: Candidate) {
        if self.ranked.len() == self.limit {
            match self.ranked.last() {
                Some(last) if candidate.distance >= last.distance => return,
                _ => {}
            }
            self.ranked.pop();
        }

        let ix = self
            .ranked
            .iter()
            .position(|c| c.distance > candidate.distance)
            .unwrap_or(self.ranked.len());
        // Room was made above, insert cannot overflow
        let inserted = self.ranked.insert(ix, candidate);
        debug_assert!(inserted.is_ok(), "ranking over capacity");
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Candidate] {
        &self.ranked
    }

    /// Split into the nearest candidate and the rest.
    #[must_use]
    pub fn split(&self) -> Option<(Candidate, Vec<Candidate, MAX_ALTERNATIVES>)> {
        let (first, rest) = self.ranked.split_first()?;
        let mut alternatives = Vec::new();
        for c in rest {
            if alternatives.push(*c).is_err() {
                break;
            }
        }
        Some((*first, alternatives))
    }
}

/// Canonical-frame, fixed-length version of a raw stroke.
///
/// The canonical map is affine and resampling interpolates linearly, so
/// resampling first and mapping with the raw stroke's bounding box gives
/// the same points as normalizing the whole stroke and then resampling.
///
/// # Errors
///
/// Returns [`GestureError::EmptySequence`] if `stroke` is empty.
pub fn prepare(stroke: &[Point]) -> Result<[Point; TEMPLATE_POINTS]> {
    let (center, s) = isotropic_scale(stroke).ok_or(GestureError::EmptySequence)?;
    let mut out = resample::<TEMPLATE_POINTS>(stroke)?;
    normalize_with(&mut out, center, s);
    Ok(out)
}

/// Classify a device-frame stroke against all glyph templates.
///
/// # Errors
///
/// - [`GestureError::StrokeTooShort`] if the stroke has fewer than
///   `config.min_stroke_points` points, or fewer than [`MIN_STROKE_POINTS`]
///   whatever the config says.
/// - Errors from [`prepare`] or [`dtw_distance`].
pub fn classify(stroke: &[Point], config: &GestureConfig) -> Result<Classification> {
    let min = config.min_stroke_points.max(MIN_STROKE_POINTS);
    if stroke.len() < min {
        return Err(GestureError::stroke_too_short(min, stroke.len()));
    }

    let input = prepare(stroke)?;
    let mut ranking = Ranking::new(config.alternatives + 1);
    for glyph in Glyph::ALL {
        let template = glyph.canvas_template::<TEMPLATE_POINTS>();
        let distance = dtw_distance(&input, &template)?;
        ranking.file(Candidate { glyph, distance });
    }

    let (nearest, alternatives) = ranking.split().ok_or(GestureError::EmptySequence)?;
    Ok(Classification {
        nearest,
        alternatives,
        threshold: config.match_threshold,
        input,
    })
}

/// Label for a glyph id: `'A'..='Z'` for 0..=25, `'0'..='9'` for 26..=35.
#[must_use]
pub fn label_for(id: usize) -> Option<char> {
    Glyph::from_id(id).map(Glyph::label)
}
