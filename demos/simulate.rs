//! Simulated air-drawing session.
//!
//! A fake MPU-6050 register bank replays a wand tilting through a few
//! gestures. A scripted button toggles recording around each one. The
//! recognized label and the SVG of the last stroke are printed.
//!
//! ```text
//! RUST_LOG=airdraw=debug cargo run --example simulate
//! ```

use std::cell::Cell;
use std::collections::VecDeque;
use std::f64::consts::TAU;
use std::rc::Rc;

use airdraw::device::{MPU6050_ACCEL_XOUT_H, MPU6050_PWR_MGMT_1};
use airdraw::orientation::MPU6050_FRAME_LEN;
use airdraw::{
    AirDraw, Clock, GestureConfig, Level, MotionSensor, OrientationState, Sample, TickOutcome,
    ToggleInput,
};

const TICK_MS: u64 = 20;
const GAIN: f64 = 6.5;

/// Ticks spent gliding between gestures, slow enough to keep the
/// simulated gyro inside its ±250 °/s range.
const RAMP_TICKS: usize = 30;

#[derive(Debug)]
enum BusError {
    Asleep,
    Nack(u8),
}

/// MPU-6050 register bank driven by a pose script.
struct SimulatedMpu {
    address: u8,
    awake: bool,
    poses: VecDeque<OrientationState>,
    last: OrientationState,
}

impl SimulatedMpu {
    fn new(address: u8) -> Self {
        Self {
            address,
            awake: false,
            poses: VecDeque::new(),
            last: OrientationState::default(),
        }
    }

    fn queue(&mut self, poses: impl IntoIterator<Item = OrientationState>) {
        self.poses.extend(poses);
    }

    fn write_register(&mut self, reg: u8, value: u8) {
        if reg == MPU6050_PWR_MGMT_1 {
            self.awake = value & 0x40 == 0;
        }
    }

    /// Burst read of the accel/temp/gyro block for the next pose.
    fn burst(&mut self, reg: u8) -> [u8; MPU6050_FRAME_LEN] {
        let mut frame = [0u8; MPU6050_FRAME_LEN];
        if reg != MPU6050_ACCEL_XOUT_H {
            return frame;
        }

        let next = self.poses.pop_front().unwrap_or(self.last);
        let dt = TICK_MS as f64 / 1000.0;
        let (p, r) = (next.pitch.to_radians(), next.roll.to_radians());
        let words = [
            -p.cos() * r.sin() * 16384.0,
            p.sin() * 16384.0,
            p.cos() * r.cos() * 16384.0,
            0.0,
            (next.pitch - self.last.pitch) / dt * 131.0,
            (next.roll - self.last.roll) / dt * 131.0,
            0.0,
        ];
        self.last = next;

        for (chunk, w) in frame.chunks_exact_mut(2).zip(words) {
            let raw = w.round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16;
            chunk.copy_from_slice(&raw.to_be_bytes());
        }
        frame
    }
}

impl MotionSensor for SimulatedMpu {
    type Error = BusError;

    fn wake(&mut self, address: u8) -> Result<(), BusError> {
        if address != self.address {
            return Err(BusError::Nack(address));
        }
        self.write_register(MPU6050_PWR_MGMT_1, 0x00);
        Ok(())
    }

    fn read(&mut self, address: u8) -> Result<Sample, BusError> {
        if address != self.address {
            return Err(BusError::Nack(address));
        }
        if !self.awake {
            return Err(BusError::Asleep);
        }
        let frame = self.burst(MPU6050_ACCEL_XOUT_H);
        // Frame length is fixed, decoding cannot come up short
        Ok(Sample::from_mpu6050_registers(&frame).unwrap_or(Sample::ZERO))
    }
}

/// Button that goes low for one tick on each scheduled press.
struct ScriptedButton {
    presses: VecDeque<usize>,
    tick: usize,
}

impl ToggleInput for ScriptedButton {
    type Error = BusError;

    fn enable_pull_up(&mut self, _pin: u8) -> Result<(), BusError> {
        Ok(())
    }

    fn level(&mut self, _pin: u8) -> Level {
        let tick = self.tick;
        self.tick += 1;
        if self.presses.front() == Some(&tick) {
            self.presses.pop_front();
            Level::Low
        } else {
            Level::High
        }
    }
}

struct SimClock(Rc<Cell<u64>>);

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

fn pose_at(x: f64, y: f64) -> OrientationState {
    OrientationState {
        pitch: (500.0 - y) / GAIN,
        roll: (x - 500.0) / GAIN,
    }
}

/// Poses walking canvas waypoints at constant speed, `n` in total.
fn trace(waypoints: &[(f64, f64)], n: usize) -> Vec<OrientationState> {
    let lengths: Vec<f64> = waypoints
        .windows(2)
        .map(|w| (w[1].0 - w[0].0).hypot(w[1].1 - w[0].1))
        .collect();
    let total: f64 = lengths.iter().sum();

    (0..n)
        .map(|i| {
            let mut remaining = total * i as f64 / (n - 1) as f64;
            for (w, len) in waypoints.windows(2).zip(&lengths) {
                if remaining <= *len {
                    let f = remaining / len;
                    return pose_at(w[0].0 + (w[1].0 - w[0].0) * f, w[0].1 + (w[1].1 - w[0].1) * f);
                }
                remaining -= len;
            }
            let (x, y) = waypoints[waypoints.len() - 1];
            pose_at(x, y)
        })
        .collect()
}

/// `k` poses moving evenly from `from` (exclusive) to `to` (inclusive).
fn ramp(from: OrientationState, to: OrientationState, k: usize) -> Vec<OrientationState> {
    (1..=k)
        .map(|i| {
            let f = i as f64 / k as f64;
            OrientationState {
                pitch: from.pitch + (to.pitch - from.pitch) * f,
                roll: from.roll + (to.roll - from.roll) * f,
            }
        })
        .collect()
}

fn circle(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let a = TAU * i as f64 / (n - 1) as f64;
            (500.0 + 300.0 * a.cos(), 500.0 + 300.0 * a.sin())
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airdraw=info".into()),
        )
        .init();

    let gestures: [(&str, Vec<(f64, f64)>); 3] = [
        ("circle", circle(64)),
        ("L", vec![(300.0, 200.0), (300.0, 800.0), (700.0, 800.0)]),
        ("Z", vec![(250.0, 250.0), (750.0, 250.0), (250.0, 750.0), (750.0, 750.0)]),
    ];

    let config = GestureConfig::default();
    let rest = pose_at(500.0, 500.0);
    let mut mpu = SimulatedMpu::new(config.sensor_address);
    // Read once by `begin` for calibration
    mpu.queue([rest]);

    let mut presses = VecDeque::new();
    let mut tick = 0;
    let mut from = rest;
    for (_, waypoints) in &gestures {
        let poses = trace(waypoints, 120);
        let n = poses.len();
        // Glide to the start, press, draw, press
        mpu.queue(ramp(from, poses[0], RAMP_TICKS));
        presses.push_back(tick + RAMP_TICKS);
        presses.push_back(tick + RAMP_TICKS + n);
        from = poses[n - 1];
        mpu.queue(poses);
        tick += RAMP_TICKS + n;
    }
    mpu.queue(ramp(from, rest, RAMP_TICKS));
    tick += RAMP_TICKS;

    let button = ScriptedButton { presses, tick: 0 };
    let time = Rc::new(Cell::new(0));
    let mut device = match AirDraw::new(mpu, button, SimClock(time.clone()), config) {
        Ok(device) => device,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return;
        }
    };
    if let Err(err) = device.begin() {
        eprintln!("bring-up failed: {err}");
        return;
    }

    let mut names = gestures.iter().map(|(name, _)| *name);
    for _ in 0..tick {
        time.set(time.get() + TICK_MS);
        if device.update() == TickOutcome::Stopped {
            let name = names.next().unwrap_or("?");
            match device.result_label() {
                Some(label) => println!("{name:>8}: recognized '{label}'"),
                None => println!("{name:>8}: no match"),
            }
        }
    }

    println!();
    print!("{}", device.recognizer().svg());
}
