//! Configuration for the air-drawing recognizer.
//!
//! This module provides the [`GestureConfig`] struct which centralizes the
//! tunable parameters of the pipeline, along with a few presets.
//!
//! # Example
//!
//! ```
//! use airdraw::GestureConfig;
//!
//! // Use default configuration
//! let config = GestureConfig::default();
//! assert!(config.validate().is_ok());
//!
//! // Use a preset and adjust it
//! let config = GestureConfig::responsive().with_match_threshold(45.0);
//! assert_eq!(config.match_threshold, 45.0);
//! ```

use crate::error::{GestureError, Result};
use crate::{MAX_ALTERNATIVES, MAX_SAMPLES, MIN_STROKE_POINTS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest accepted tick interval in milliseconds.
pub const MIN_SAMPLE_INTERVAL_MS: u64 = 5;

/// Configuration for orientation tracking, capture and classification.
///
/// # Tuned constants
///
/// `canvas_gain` and `match_threshold` were tuned by hand against an
/// MPU-6050 on a handheld wand. Sensors with different noise or a different
/// mounting will likely need both recalibrated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GestureConfig {
    /// Complementary filter weight on the integrated gyro estimate.
    /// Must lie in the open interval `(0, 1)`.
    /// - 0.95: follows the accelerometer quickly, more jitter
    /// - 0.98: default
    /// - 0.99+: smooth, slower drift correction
    pub alpha: f64,

    /// Minimum milliseconds between processed ticks.
    pub sample_interval_ms: u64,

    /// Canvas units per degree of tilt.
    pub canvas_gain: f64,

    /// DTW distance below which the best template is accepted.
    pub match_threshold: f64,

    /// Strokes with fewer points are never classified. Can be raised above
    /// [`MIN_STROKE_POINTS`], never lowered below it.
    pub min_stroke_points: usize,

    /// Number of runner-up candidates kept for reporting.
    pub alternatives: usize,

    /// Bus address of the motion sensor.
    pub sensor_address: u8,

    /// Digital input line used as the record toggle.
    pub button_pin: u8,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            alpha: 0.98,
            sample_interval_ms: 20,
            canvas_gain: 6.5,
            match_threshold: 60.0,
            min_stroke_points: MIN_STROKE_POINTS,
            alternatives: 3,
            sensor_address: 0x68,
            button_pin: 2,
        }
    }
}

impl GestureConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `alpha` is an acceptable smoothing constant.
    #[inline]
    #[must_use]
    pub fn is_valid_alpha(alpha: f64) -> bool {
        alpha > 0.0 && alpha < 1.0
    }

    /// Whether `ms` is an acceptable tick interval.
    #[inline]
    #[must_use]
    pub const fn is_valid_sample_interval(ms: u64) -> bool {
        ms >= MIN_SAMPLE_INTERVAL_MS
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if !Self::is_valid_alpha(self.alpha) {
            return Err(GestureError::invalid_config("alpha must be in (0, 1)"));
        }
        if !Self::is_valid_sample_interval(self.sample_interval_ms) {
            return Err(GestureError::invalid_config(format!(
                "sample_interval_ms must be at least {MIN_SAMPLE_INTERVAL_MS}"
            )));
        }
        if !(self.canvas_gain > 0.0) {
            return Err(GestureError::invalid_config("canvas_gain must be positive"));
        }
        if !(self.match_threshold > 0.0) {
            return Err(GestureError::invalid_config(
                "match_threshold must be positive",
            ));
        }
        if !(MIN_STROKE_POINTS..=MAX_SAMPLES).contains(&self.min_stroke_points) {
            return Err(GestureError::invalid_config(format!(
                "min_stroke_points must be in {MIN_STROKE_POINTS}..={MAX_SAMPLES}"
            )));
        }
        if self.alternatives > MAX_ALTERNATIVES {
            return Err(GestureError::invalid_config(format!(
                "alternatives must be at most {MAX_ALTERNATIVES}"
            )));
        }
        Ok(())
    }

    /// Preset favouring a steady cursor over responsiveness.
    #[must_use]
    pub fn smooth() -> Self {
        Self {
            alpha: 0.99,
            ..Self::default()
        }
    }

    /// Preset for fast strokes: faster ticks, quicker drift correction.
    #[must_use]
    pub fn responsive() -> Self {
        Self {
            alpha: 0.95,
            sample_interval_ms: 10,
            ..Self::default()
        }
    }

    /// Preset that only accepts close matches.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            match_threshold: 40.0,
            ..Self::default()
        }
    }

    /// Set the complementary filter weight.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the tick interval.
    #[must_use]
    pub const fn with_sample_interval_ms(mut self, ms: u64) -> Self {
        self.sample_interval_ms = ms;
        self
    }

    /// Set the orientation-to-canvas gain.
    #[must_use]
    pub const fn with_canvas_gain(mut self, gain: f64) -> Self {
        self.canvas_gain = gain;
        self
    }

    /// Set the DTW acceptance threshold.
    #[must_use]
    pub const fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    /// Set the sensor bus address.
    #[must_use]
    pub const fn with_sensor_address(mut self, address: u8) -> Self {
        self.sensor_address = address;
        self
    }

    /// Set the toggle input line.
    #[must_use]
    pub const fn with_button_pin(mut self, pin: u8) -> Self {
        self.button_pin = pin;
        self
    }

    /// Set how many runner-up candidates are kept.
    #[must_use]
    pub const fn with_alternatives(mut self, n: usize) -> Self {
        self.alternatives = n;
        self
    }
}
