//! Air Drawing Recognition Library
//!
//! Recognizes letters and digits drawn in the air with a handheld
//! six-axis motion sensor.
//!
//! The pipeline runs once per tick:
//!
//! - **Orientation**: a complementary filter fuses integrated gyro rate with
//!   accelerometer tilt into pitch and roll
//! - **Capture**: the tilt is mapped onto a `1000 × 1000` canvas and
//!   appended to a bounded stroke while recording
//! - **Matching**: on stop, the stroke is normalized, resampled to
//!   [`TEMPLATE_POINTS`] and compared by DTW against 36 generated templates
//!   (`A`–`Z`, `0`–`9`)
//!
//! No heap allocation happens on the recognition path: strokes, rankings and
//! DTW rows all live in fixed-capacity buffers.
//!
//! # Quick Start
//!
//! ```
//! use airdraw::{GestureConfig, Level, Recognizer, Sample};
//!
//! let mut recognizer = Recognizer::new(GestureConfig::default())?;
//!
//! // Tilt through a circle while recording
//! recognizer.start_recording();
//! for i in 0..50u64 {
//!     let a = i as f64 / 49.0 * std::f64::consts::TAU;
//!     let (pitch, roll) = (-40.0 * a.sin(), 40.0 * a.cos());
//!     let (p, r) = (pitch.to_radians(), roll.to_radians());
//!     let sample = Sample {
//!         ax: -p.cos() * r.sin(),
//!         ay: p.sin(),
//!         az: p.cos() * r.cos(),
//!         ..Sample::ZERO
//!     };
//!     // Calibrating on every tick pins the estimate to the accelerometer
//!     recognizer.calibrate(&sample);
//!     recognizer.tick(i * 20, Level::High, || sample);
//! }
//! recognizer.stop_recording();
//! assert_eq!(recognizer.result_label(), Some('0'));
//! # Ok::<(), airdraw::GestureError>(())
//! ```
//!
//! # Presets
//!
//! ```
//! use airdraw::GestureConfig;
//!
//! let smooth = GestureConfig::smooth();
//! let responsive = GestureConfig::responsive();
//! let strict = GestureConfig::strict();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod capture;
pub mod classifier;
pub mod config;
pub mod device;
pub mod error;
pub mod geometry;
pub mod math;
pub mod orientation;
pub mod recognizer;
pub mod report;
pub mod svg;
pub mod templates;

// Re-exports for convenient access
pub use capture::{CaptureState, EdgeDetector, Level, Stroke, StrokeCapture};
pub use classifier::{
    classify, confidence, label_for, prepare, Candidate, Classification, ClassificationResult,
    Ranking,
};
pub use config::{GestureConfig, MIN_SAMPLE_INTERVAL_MS};
pub use device::{AirDraw, Clock, MotionSensor, ToggleInput};
pub use error::{GestureError, Result};
pub use geometry::{path_length, BoundingBox, Point, CANVAS_SIZE};
pub use math::{dtw_distance, normalize, resample, resample_into};
pub use orientation::{ComplementaryFilter, OrientationState, Sample};
pub use recognizer::{Recognizer, TickOutcome};
pub use report::{GestureReport, ResultKind};
pub use svg::{write_svg, SvgPolyline};
pub use templates::{fill_template, Glyph, GlyphKind};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Capacity of the stroke buffer.
pub const MAX_SAMPLES: usize = 300;

/// Points per template and per resampled stroke.
pub const TEMPLATE_POINTS: usize = 48;

/// Number of glyph templates: 26 letters and 10 digits.
pub const NUM_TEMPLATES: usize = 36;

/// Default minimum stroke length for classification.
pub const MIN_STROKE_POINTS: usize = 6;

/// Upper bound on runner-up candidates kept per classification.
pub const MAX_ALTERNATIVES: usize = 5;
