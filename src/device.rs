//! Hardware collaborators and the device-level driver loop.
//!
//! The recognizer never talks to a bus directly. A board support layer
//! implements [`MotionSensor`], [`ToggleInput`] and [`Clock`], and
//! [`AirDraw`] wires them to a [`Recognizer`].

use std::fmt::Debug;

use crate::capture::Level;
use crate::classifier::ClassificationResult;
use crate::config::GestureConfig;
use crate::error::{GestureError, Result};
use crate::orientation::Sample;
use crate::recognizer::{Recognizer, TickOutcome};

/// MPU-6050 power management register; writing zero wakes the chip.
pub const MPU6050_PWR_MGMT_1: u8 = 0x6B;

/// First register of the accel/temp/gyro burst.
pub const MPU6050_ACCEL_XOUT_H: u8 = 0x3B;

/// Six-axis motion sensor on a bus.
pub trait MotionSensor {
    type Error: Debug;

    /// Bring the sensor out of sleep.
    fn wake(&mut self, address: u8) -> core::result::Result<(), Self::Error>;

    /// Read one sample in physical units (g, degrees per second).
    fn read(&mut self, address: u8) -> core::result::Result<Sample, Self::Error>;
}

/// Digital input line used as the record toggle.
pub trait ToggleInput {
    type Error: Debug;

    fn enable_pull_up(&mut self, pin: u8) -> core::result::Result<(), Self::Error>;

    fn level(&mut self, pin: u8) -> Level;
}

/// Monotonic millisecond counter.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Read a sample, substituting [`Sample::ZERO`] on bus failure.
fn read_or_zero<S: MotionSensor>(sensor: &mut S, address: u8) -> Sample {
    match sensor.read(address) {
        Ok(sample) => sample,
        Err(err) => {
            tracing::warn!(error = ?err, address, "Sensor read failed, using zero sample");
            Sample::ZERO
        }
    }
}

/// Recognizer bound to its hardware collaborators.
pub struct AirDraw<S, B, C> {
    sensor: S,
    input: B,
    clock: C,
    recognizer: Recognizer,
}

impl<S, B, C> AirDraw<S, B, C>
where
    S: MotionSensor,
    B: ToggleInput,
    C: Clock,
{
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidConfig`] if the configuration is
    /// invalid.
    pub fn new(sensor: S, input: B, clock: C, config: GestureConfig) -> Result<Self> {
        Ok(Self {
            sensor,
            input,
            clock,
            recognizer: Recognizer::new(config)?,
        })
    }

    /// Wake the sensor, enable the toggle pull-up, calibrate from one
    /// reading and stamp the tick clock.
    ///
    /// # Errors
    ///
    /// - [`GestureError::Sensor`] if the sensor cannot be woken.
    /// - [`GestureError::Input`] if the pull-up cannot be enabled.
    pub fn begin(&mut self) -> Result<()> {
        let address = self.recognizer.config().sensor_address;
        let pin = self.recognizer.config().button_pin;

        self.sensor
            .wake(address)
            .map_err(|e| GestureError::sensor(format!("wake at {address:#04x}: {e:?}")))?;
        self.input
            .enable_pull_up(pin)
            .map_err(|e| GestureError::input(format!("pull-up on pin {pin}: {e:?}")))?;

        let sample = read_or_zero(&mut self.sensor, address);
        self.recognizer.calibrate(&sample);
        self.recognizer.mark_tick(self.clock.now_ms());

        tracing::info!(address, pin, "Air drawing started");
        Ok(())
    }

    /// Run one tick against the collaborators.
    pub fn update(&mut self) -> TickOutcome {
        let now = self.clock.now_ms();
        let level = self.input.level(self.recognizer.config().button_pin);
        let address = self.recognizer.config().sensor_address;
        let sensor = &mut self.sensor;
        self.recognizer
            .tick(now, level, || read_or_zero(sensor, address))
    }

    pub fn start_recording(&mut self) {
        self.recognizer.start_recording();
    }

    pub fn stop_recording(&mut self) -> Option<ClassificationResult> {
        self.recognizer.stop_recording()
    }

    #[must_use]
    pub fn has_result(&self) -> bool {
        self.recognizer.has_result()
    }

    #[must_use]
    pub fn result_label(&self) -> Option<char> {
        self.recognizer.result_label()
    }

    pub fn set_alpha(&mut self, alpha: f64) -> bool {
        self.recognizer.set_alpha(alpha)
    }

    pub fn set_sample_interval_ms(&mut self, ms: u64) -> bool {
        self.recognizer.set_sample_interval_ms(ms)
    }

    #[must_use]
    pub const fn recognizer(&self) -> &Recognizer {
        &self.recognizer
    }

    pub fn recognizer_mut(&mut self) -> &mut Recognizer {
        &mut self.recognizer
    }

    /// Release the collaborators.
    pub fn into_parts(self) -> (S, B, C) {
        (self.sensor, self.input, self.clock)
    }
}
