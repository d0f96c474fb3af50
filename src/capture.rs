//! Stroke capture: a bounded point buffer behind a two-state recorder, and
//! the edge detector that turns button presses into record toggles.

use heapless::Vec;

use crate::geometry::Point;
use crate::MAX_SAMPLES;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered device-frame points captured during one recording.
pub type Stroke = Vec<Point, MAX_SAMPLES>;

/// Recorder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CaptureState {
    #[default]
    Idle,
    Recording,
}

/// Logic level of a digital input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }
}

/// Detects falling edges on a pulled-up input.
///
/// Holds the previous level across ticks; the line idles high.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector {
    previous: Level,
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self {
            previous: Level::High,
        }
    }
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current level; returns `true` on a high-to-low transition.
    pub fn falling_edge(&mut self, level: Level) -> bool {
        let edge = self.previous == Level::High && level == Level::Low;
        self.previous = level;
        edge
    }
}

/// Bounded stroke buffer with Idle/Recording states.
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    state: CaptureState,
    stroke: Stroke,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new stroke, discarding any previous points.
    pub fn start(&mut self) {
        self.stroke.clear();
        self.state = CaptureState::Recording;
    }

    /// Append a point while recording.
    ///
    /// Returns `false` when the point was dropped, either because the
    /// recorder is idle or the buffer is full.
    pub fn append(&mut self, point: Point) -> bool {
        if self.state != CaptureState::Recording {
            return false;
        }
        self.stroke.push(point).is_ok()
    }

    /// Freeze the stroke and return to Idle.
    pub fn stop(&mut self) -> &[Point] {
        self.state = CaptureState::Idle;
        &self.stroke
    }

    #[must_use]
    pub const fn state(&self) -> CaptureState {
        self.state
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.state == CaptureState::Recording
    }

    /// The current (or last frozen) stroke.
    #[must_use]
    pub fn stroke(&self) -> &[Point] {
        &self.stroke
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stroke.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stroke.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.stroke.is_full()
    }
}
