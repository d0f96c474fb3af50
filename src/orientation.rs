//! Orientation estimation from raw accelerometer/gyroscope samples.
//!
//! A complementary filter integrates the gyro rates and pulls the result
//! towards the accelerometer tilt, which keeps pitch and roll from drifting.
//! The fused angles are then mapped onto the square drawing canvas.

use crate::error::{GestureError, Result};
use crate::geometry::{Point, CANVAS_CENTER, CANVAS_SIZE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of the accel/temp/gyro register burst.
pub const MPU6050_FRAME_LEN: usize = 14;

/// Accelerometer sensitivity at ±2 g full scale.
const ACCEL_LSB_PER_G: f64 = 16384.0;

/// Gyroscope sensitivity at ±250 °/s full scale.
const GYRO_LSB_PER_DPS: f64 = 131.0;

/// One raw reading in physical units.
///
/// Acceleration in g, angular rate in degrees per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
}

impl Sample {
    /// Reading substituted when the bus fails.
    pub const ZERO: Self = Self {
        ax: 0.0,
        ay: 0.0,
        az: 0.0,
        gx: 0.0,
        gy: 0.0,
        gz: 0.0,
    };

    /// Decode an MPU-6050 burst read starting at `ACCEL_XOUT_H`.
    ///
    /// The frame holds three big-endian accel words, the temperature word
    /// (ignored) and three gyro words.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::ShortRead`] if fewer than 14 bytes are given.
    pub fn from_mpu6050_registers(raw: &[u8]) -> Result<Self> {
        if raw.len() < MPU6050_FRAME_LEN {
            return Err(GestureError::short_read(MPU6050_FRAME_LEN, raw.len()));
        }
        let word = |i: usize| f64::from(i16::from_be_bytes([raw[2 * i], raw[2 * i + 1]]));
        Ok(Self {
            ax: word(0) / ACCEL_LSB_PER_G,
            ay: word(1) / ACCEL_LSB_PER_G,
            az: word(2) / ACCEL_LSB_PER_G,
            gx: word(4) / GYRO_LSB_PER_DPS,
            gy: word(5) / GYRO_LSB_PER_DPS,
            gz: word(6) / GYRO_LSB_PER_DPS,
        })
    }

    /// Tilt implied by gravity alone, in degrees.
    #[must_use]
    pub fn accel_tilt(&self) -> OrientationState {
        OrientationState {
            pitch: self
                .ay
                .atan2((self.ax * self.ax + self.az * self.az).sqrt())
                .to_degrees(),
            roll: (-self.ax).atan2(self.az).to_degrees(),
        }
    }
}

/// Pitch and roll in degrees. Not wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrientationState {
    pub pitch: f64,
    pub roll: f64,
}

impl OrientationState {
    /// Project onto the canvas: roll moves right, pitch moves up.
    ///
    /// Each axis saturates at the canvas edge.
    #[must_use]
    pub fn to_canvas(&self, gain: f64) -> Point {
        Point {
            x: (CANVAS_CENTER + self.roll * gain).clamp(0.0, CANVAS_SIZE),
            y: (CANVAS_CENTER - self.pitch * gain).clamp(0.0, CANVAS_SIZE),
        }
    }
}

/// Complementary filter over gyro integration and accelerometer tilt.
#[derive(Debug, Clone)]
pub struct ComplementaryFilter {
    alpha: f64,
    state: OrientationState,
    calibrated: bool,
}

impl ComplementaryFilter {
    /// Create an uncalibrated filter. `alpha` is the gyro weight.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            state: OrientationState::default(),
            calibrated: false,
        }
    }

    /// Seed the estimate from the accelerometer alone.
    pub fn calibrate(&mut self, sample: &Sample) -> OrientationState {
        self.state = sample.accel_tilt();
        self.calibrated = true;
        tracing::info!(
            pitch = self.state.pitch,
            roll = self.state.roll,
            "Orientation calibrated"
        );
        self.state
    }

    /// Advance the estimate by one sample.
    ///
    /// `dt` is the elapsed time in seconds since the previous update, or
    /// `None` when there is no previous update; the filter then calibrates
    /// instead of integrating. An uncalibrated filter always calibrates.
    pub fn update(&mut self, sample: &Sample, dt: Option<f64>) -> OrientationState {
        let dt = match dt {
            Some(dt) if self.calibrated => dt,
            _ => return self.calibrate(sample),
        };

        let accel = sample.accel_tilt();
        let gyro_pitch = self.state.pitch + sample.gx * dt;
        let gyro_roll = self.state.roll + sample.gy * dt;

        self.state = OrientationState {
            pitch: self.alpha * gyro_pitch + (1.0 - self.alpha) * accel.pitch,
            roll: self.alpha * gyro_roll + (1.0 - self.alpha) * accel.roll,
        };
        self.state
    }

    /// Current estimate.
    #[must_use]
    pub const fn state(&self) -> OrientationState {
        self.state
    }

    #[must_use]
    pub const fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Change the gyro weight. Callers validate the range.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn level() -> Sample {
        Sample {
            az: 1.0,
            ..Sample::ZERO
        }
    }

    #[test]
    fn test_accel_tilt_level() {
        let tilt = level().accel_tilt();
        assert_relative_eq!(tilt.pitch, 0.0);
        assert_relative_eq!(tilt.roll, 0.0);
    }

    #[test]
    fn test_accel_tilt_45_degrees() {
        let s = Sample {
            ay: 1.0,
            az: 1.0,
            ..Sample::ZERO
        };
        assert_relative_eq!(s.accel_tilt().pitch, 45.0, epsilon = 1e-9);

        let s = Sample {
            ax: -1.0,
            az: 1.0,
            ..Sample::ZERO
        };
        assert_relative_eq!(s.accel_tilt().roll, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_first_update_calibrates() {
        let mut filter = ComplementaryFilter::new(0.98);
        assert!(!filter.is_calibrated());

        let s = Sample {
            ay: 0.5,
            az: 0.5,
            gx: 1000.0,
            ..Sample::ZERO
        };
        let state = filter.update(&s, Some(0.02));
        assert!(filter.is_calibrated());
        // Gyro ignored on the calibration step
        assert_relative_eq!(state.pitch, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_gyro_integration_and_blend() {
        let mut filter = ComplementaryFilter::new(0.5);
        filter.calibrate(&level());

        let s = Sample {
            gx: 100.0,
            gy: -50.0,
            ..level()
        };
        let state = filter.update(&s, Some(0.1));
        // gyro: pitch 10, roll -5; accel: 0, 0; blended halfway
        assert_relative_eq!(state.pitch, 5.0, epsilon = 1e-9);
        assert_relative_eq!(state.roll, -2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_drift_correction_converges() {
        let mut filter = ComplementaryFilter::new(0.98);
        filter.calibrate(&level());
        let biased = Sample {
            gx: 1.0,
            ..level()
        };
        for _ in 0..2000 {
            filter.update(&biased, Some(0.02));
        }
        // Steady state: pitch = alpha * 0.02 / (1 - alpha) ≈ 0.98
        assert!(filter.state().pitch < 1.0);
    }

    #[test]
    fn test_to_canvas_and_saturation() {
        let p = OrientationState {
            pitch: 10.0,
            roll: 20.0,
        }
        .to_canvas(6.5);
        assert_relative_eq!(p.x, 630.0);
        assert_relative_eq!(p.y, 435.0);

        let p = OrientationState {
            pitch: -400.0,
            roll: -400.0,
        }
        .to_canvas(6.5);
        assert_eq!(p, Point::new(0.0, 1000.0));
    }

    #[test]
    fn test_register_decode() {
        let raw: [u8; 14] = [
            0x40, 0x00, // ax = 16384 -> 1 g
            0xC0, 0x00, // ay = -16384 -> -1 g
            0x20, 0x00, // az = 8192 -> 0.5 g
            0x12, 0x34, // temperature
            0x00, 0x83, // gx = 131 -> 1 dps
            0xFF, 0x7D, // gy = -131 -> -1 dps
            0x00, 0x00, // gz
        ];
        let s = Sample::from_mpu6050_registers(&raw).unwrap();
        assert_relative_eq!(s.ax, 1.0);
        assert_relative_eq!(s.ay, -1.0);
        assert_relative_eq!(s.az, 0.5);
        assert_relative_eq!(s.gx, 1.0);
        assert_relative_eq!(s.gy, -1.0);
        assert_relative_eq!(s.gz, 0.0);
    }

    #[test]
    fn test_register_decode_short_read() {
        let err = Sample::from_mpu6050_registers(&[0u8; 6]).unwrap_err();
        assert_eq!(err, GestureError::short_read(14, 6));
    }
}
