//! Shape processing for captured strokes.
//!
//! This module provides:
//! - [`normalize`]: position/scale normalization into the canonical frame
//! - [`resample`]: fixed-length resampling by index
//! - [`dtw`]: two-row dynamic time warping distance

pub mod dtw;
pub mod normalize;
pub mod resample;

pub use dtw::{dtw_distance, DTW_MAX_WIDTH};
pub use normalize::{isotropic_scale, normalize, normalize_with, MIN_HALF_EXTENT};
pub use resample::{resample, resample_into};
