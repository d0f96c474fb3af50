//! Per-tick recognition state machine.
//!
//! [`Recognizer`] owns everything that persists between ticks: the
//! orientation filter, the stroke buffer, the toggle edge detector and the
//! last result. It takes the current time, the toggle level and a sample
//! source as plain arguments, so it runs the same against real hardware
//! (see [`crate::device::AirDraw`]) and in tests.
//!
//! # Example
//!
//! ```
//! use airdraw::{GestureConfig, Level, Recognizer, Sample, TickOutcome};
//!
//! let mut recognizer = Recognizer::new(GestureConfig::default()).unwrap();
//! let level_board = Sample { az: 1.0, ..Sample::ZERO };
//!
//! // First tick calibrates, second is rate limited
//! assert_eq!(recognizer.tick(0, Level::High, || level_board), TickOutcome::Sampled);
//! assert_eq!(recognizer.tick(5, Level::High, || level_board), TickOutcome::Skipped);
//!
//! // A falling edge starts a stroke
//! assert_eq!(recognizer.tick(20, Level::Low, || level_board), TickOutcome::Started);
//! assert_eq!(recognizer.stroke().len(), 1);
//! ```

use crate::capture::{CaptureState, EdgeDetector, Level, StrokeCapture};
use crate::classifier::{classify, Classification, ClassificationResult};
use crate::config::GestureConfig;
use crate::error::{GestureError, Result};
use crate::geometry::Point;
use crate::orientation::{ComplementaryFilter, OrientationState, Sample};
use crate::report::GestureReport;
use crate::svg::SvgPolyline;

/// What a call to [`Recognizer::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Too soon after the previous tick; nothing happened.
    Skipped,
    /// A sample was processed.
    Sampled,
    /// A sample was processed and recording started on this tick.
    Started,
    /// Recording stopped and the stroke was classified on this tick.
    Stopped,
}

/// Air-drawing recognizer.
#[derive(Debug, Clone)]
pub struct Recognizer {
    config: GestureConfig,
    filter: ComplementaryFilter,
    capture: StrokeCapture,
    button: EdgeDetector,
    last_ms: Option<u64>,
    result: Option<ClassificationResult>,
    classification: Option<Classification>,
}

impl Default for Recognizer {
    fn default() -> Self {
        Self::with_config(GestureConfig::default())
    }
}

impl Recognizer {
    /// Create a recognizer from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidConfig`] if the configuration is
    /// invalid.
    pub fn new(config: GestureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: GestureConfig) -> Self {
        Self {
            filter: ComplementaryFilter::new(config.alpha),
            capture: StrokeCapture::new(),
            button: EdgeDetector::new(),
            last_ms: None,
            result: None,
            classification: None,
            config,
        }
    }

    /// Run one tick.
    ///
    /// In order: rate limiting, toggle edge handling, one sensor read via
    /// `read`, the orientation update, canvas mapping and, while recording,
    /// appending the point. `read` is not called on skipped ticks.
    pub fn tick<F>(&mut self, now_ms: u64, level: Level, read: F) -> TickOutcome
    where
        F: FnOnce() -> Sample,
    {
        if let Some(last) = self.last_ms {
            if now_ms.saturating_sub(last) < self.config.sample_interval_ms {
                return TickOutcome::Skipped;
            }
        }
        let dt = self
            .last_ms
            .map(|last| now_ms.saturating_sub(last) as f64 / 1000.0);
        self.last_ms = Some(now_ms);

        let mut outcome = TickOutcome::Sampled;
        if self.button.falling_edge(level) {
            if self.capture.is_recording() {
                self.stop_recording();
                outcome = TickOutcome::Stopped;
            } else {
                self.start_recording();
                outcome = TickOutcome::Started;
            }
        }

        let sample = read();
        let state = self.filter.update(&sample, dt);
        let point = state.to_canvas(self.config.canvas_gain);
        if self.capture.is_recording() && !self.capture.append(point) {
            tracing::trace!(x = point.x, y = point.y, "Stroke buffer full, point dropped");
        }

        outcome
    }

    /// Start a new stroke, clearing the previous stroke and result.
    pub fn start_recording(&mut self) {
        self.capture.start();
        self.result = None;
        self.classification = None;
        tracing::debug!("Recording started");
    }

    /// Stop recording and classify the captured stroke.
    ///
    /// Strokes shorter than `min_stroke_points` leave no result. Calling
    /// this while idle changes nothing.
    pub fn stop_recording(&mut self) -> Option<ClassificationResult> {
        if !self.capture.is_recording() {
            return self.result;
        }

        let stroke = self.capture.stop();
        tracing::debug!(points = stroke.len(), "Recording stopped");

        match classify(stroke, &self.config) {
            Ok(classification) => {
                let result = classification.result();
                if result.matched {
                    tracing::info!(
                        label = %result.label,
                        distance = result.distance,
                        "Glyph recognized"
                    );
                } else {
                    tracing::debug!(
                        nearest = %result.label,
                        distance = result.distance,
                        threshold = classification.threshold,
                        "No template under threshold"
                    );
                }
                self.result = Some(result);
                self.classification = Some(classification);
            }
            Err(GestureError::StrokeTooShort { min, actual }) => {
                tracing::debug!(min, actual, "Stroke too short to classify");
            }
            Err(err) => {
                tracing::warn!(error = %err, "Classification failed");
            }
        }
        self.result
    }

    /// `true` if the last stroke matched a template.
    #[must_use]
    pub fn has_result(&self) -> bool {
        self.result.is_some_and(|r| r.matched)
    }

    /// Outcome of the last classified stroke, matched or not.
    #[must_use]
    pub const fn result(&self) -> Option<ClassificationResult> {
        self.result
    }

    /// Label of the last matched glyph.
    #[must_use]
    pub fn result_label(&self) -> Option<char> {
        self.result.filter(|r| r.matched).map(|r| r.label)
    }

    /// Full ranking of the last classified stroke.
    #[must_use]
    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    /// Reset the orientation estimate from accelerometer tilt alone.
    pub fn calibrate(&mut self, sample: &Sample) -> OrientationState {
        self.filter.calibrate(sample)
    }

    /// Record `now_ms` as the previous tick, so the next tick integrates
    /// over a short interval instead of calibrating.
    pub fn mark_tick(&mut self, now_ms: u64) {
        self.last_ms = Some(now_ms);
    }

    #[must_use]
    pub const fn orientation(&self) -> OrientationState {
        self.filter.state()
    }

    #[must_use]
    pub const fn state(&self) -> CaptureState {
        self.capture.state()
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.capture.is_recording()
    }

    /// Current stroke, or the last frozen one while idle.
    #[must_use]
    pub fn stroke(&self) -> &[Point] {
        self.capture.stroke()
    }

    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Set the filter weight. Values outside `(0, 1)` are ignored.
    ///
    /// Returns whether the value was accepted.
    pub fn set_alpha(&mut self, alpha: f64) -> bool {
        if !GestureConfig::is_valid_alpha(alpha) {
            tracing::warn!(alpha, "Ignoring alpha outside (0, 1)");
            return false;
        }
        self.config.alpha = alpha;
        self.filter.set_alpha(alpha);
        true
    }

    /// Set the tick interval. Values under
    /// [`MIN_SAMPLE_INTERVAL_MS`](crate::config::MIN_SAMPLE_INTERVAL_MS)
    /// are ignored.
    ///
    /// Returns whether the value was accepted.
    pub fn set_sample_interval_ms(&mut self, ms: u64) -> bool {
        if !GestureConfig::is_valid_sample_interval(ms) {
            tracing::warn!(ms, "Ignoring sample interval below minimum");
            return false;
        }
        self.config.sample_interval_ms = ms;
        true
    }

    /// SVG rendering of the current stroke.
    #[must_use]
    pub fn svg(&self) -> SvgPolyline<'_> {
        SvgPolyline::new(self.capture.stroke())
    }

    /// Telemetry record for the current stroke and last classification.
    #[must_use]
    pub fn report(&self) -> GestureReport {
        GestureReport::from_stroke(self.capture.stroke(), self.classification.as_ref())
    }
}
