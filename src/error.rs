//! Error types for gesture recognition.
//!
//! Errors only surface at the fallible seams of the crate: configuration
//! validation, sequence checks in the matcher, register decoding and device
//! bring-up. The per-tick path degrades instead of failing.

use thiserror::Error;

/// Main error type for gesture recognition operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureError {
    /// Configuration validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Stroke is too short to classify.
    #[error("Stroke too short: need at least {min} points, got {actual}")]
    StrokeTooShort { min: usize, actual: usize },

    /// A point sequence was empty where at least one point is required.
    #[error("Point sequence is empty")]
    EmptySequence,

    /// A point sequence is wider than the fixed matcher buffers.
    #[error("Sequence too long: {len} points exceeds the limit of {max}")]
    SequenceTooLong { len: usize, max: usize },

    /// Register burst was shorter than the expected frame.
    #[error("Short sensor read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// Glyph id outside `[0, NUM_TEMPLATES)`.
    #[error("Glyph id {0} out of range")]
    GlyphOutOfRange(usize),

    /// Motion sensor bring-up failed.
    #[error("Sensor error: {0}")]
    Sensor(String),

    /// Digital input bring-up failed.
    #[error("Input error: {0}")]
    Input(String),
}

/// Result type alias for gesture recognition operations.
pub type Result<T> = std::result::Result<T, GestureError>;

impl GestureError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a stroke too short error.
    #[must_use]
    pub const fn stroke_too_short(min: usize, actual: usize) -> Self {
        Self::StrokeTooShort { min, actual }
    }

    /// Create a sequence-too-long error.
    #[must_use]
    pub const fn sequence_too_long(len: usize, max: usize) -> Self {
        Self::SequenceTooLong { len, max }
    }

    /// Create a short read error.
    #[must_use]
    pub const fn short_read(expected: usize, actual: usize) -> Self {
        Self::ShortRead { expected, actual }
    }

    /// Create a sensor error.
    #[must_use]
    pub fn sensor(msg: impl Into<String>) -> Self {
        Self::Sensor(msg.into())
    }

    /// Create an input error.
    #[must_use]
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }
}
