//! End-to-end recognition sessions against scripted hardware.
//!
//! A scripted wand replays a sequence of poses with consistent accelerometer
//! and gyro readings, a scripted button presses and releases the toggle,
//! and a shared clock advances one tick interval per update.

use airdraw::{
    AirDraw, CaptureState, Clock, GestureConfig, Level, MotionSensor, OrientationState, Sample,
    TickOutcome, ToggleInput, MAX_SAMPLES,
};
use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::f64::consts::TAU;
use std::rc::Rc;

const TICK_MS: u64 = 20;
const GAIN: f64 = 6.5;

// =============================================================================
// SCRIPTED COLLABORATORS
// =============================================================================

/// Sensor replaying poses; holds the last pose once the script runs out.
struct ScriptedWand {
    poses: VecDeque<OrientationState>,
    last: OrientationState,
}

impl ScriptedWand {
    fn new(poses: Vec<OrientationState>) -> Self {
        let last = poses.first().copied().unwrap_or_default();
        Self {
            poses: poses.into(),
            last,
        }
    }
}

/// Reading for a move from `prev` to `next` over one tick: gravity matches
/// `next`, the gyro rate covers the difference.
fn sample_between(prev: OrientationState, next: OrientationState) -> Sample {
    let dt = TICK_MS as f64 / 1000.0;
    let (p, r) = (next.pitch.to_radians(), next.roll.to_radians());
    Sample {
        ax: -p.cos() * r.sin(),
        ay: p.sin(),
        az: p.cos() * r.cos(),
        gx: (next.pitch - prev.pitch) / dt,
        gy: (next.roll - prev.roll) / dt,
        gz: 0.0,
    }
}

impl MotionSensor for ScriptedWand {
    type Error = Infallible;

    fn wake(&mut self, _address: u8) -> Result<(), Infallible> {
        Ok(())
    }

    fn read(&mut self, _address: u8) -> Result<Sample, Infallible> {
        let next = self.poses.pop_front().unwrap_or(self.last);
        let sample = sample_between(self.last, next);
        self.last = next;
        Ok(sample)
    }
}

/// Button replaying levels; idle high once the script runs out.
struct ScriptedButton(VecDeque<Level>);

impl ToggleInput for ScriptedButton {
    type Error = Infallible;

    fn enable_pull_up(&mut self, _pin: u8) -> Result<(), Infallible> {
        Ok(())
    }

    fn level(&mut self, _pin: u8) -> Level {
        self.0.pop_front().unwrap_or(Level::High)
    }
}

#[derive(Clone)]
struct SharedClock(Rc<Cell<u64>>);

impl Clock for SharedClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

type Device = AirDraw<ScriptedWand, ScriptedButton, SharedClock>;

// =============================================================================
// GESTURE GENERATORS
// =============================================================================

/// Pose that lands on canvas point `(x, y)` at the default gain.
fn pose_at(x: f64, y: f64) -> OrientationState {
    OrientationState {
        pitch: (500.0 - y) / GAIN,
        roll: (x - 500.0) / GAIN,
    }
}

/// `n` poses tracing a closed circle of canvas radius `radius`.
fn circle_poses(n: usize, radius: f64) -> Vec<OrientationState> {
    (0..n)
        .map(|i| {
            let a = TAU * i as f64 / (n - 1) as f64;
            pose_at(500.0 + radius * a.cos(), 500.0 + radius * a.sin())
        })
        .collect()
}

/// `n` poses walking a canvas polyline at constant speed.
fn polyline_poses(vertices: &[(f64, f64)], n: usize) -> Vec<OrientationState> {
    let lengths: Vec<f64> = vertices
        .windows(2)
        .map(|w| (w[1].0 - w[0].0).hypot(w[1].1 - w[0].1))
        .collect();
    let total: f64 = lengths.iter().sum();

    (0..n)
        .map(|i| {
            let mut remaining = total * i as f64 / (n - 1) as f64;
            for (w, len) in vertices.windows(2).zip(&lengths) {
                if remaining <= *len {
                    let f = remaining / len;
                    return pose_at(w[0].0 + (w[1].0 - w[0].0) * f, w[0].1 + (w[1].1 - w[0].1) * f);
                }
                remaining -= len;
            }
            let (x, y) = vertices[vertices.len() - 1];
            pose_at(x, y)
        })
        .collect()
}

// =============================================================================
// SESSION DRIVER
// =============================================================================

/// Run a full session: begin, press, draw every pose, press again.
fn run_session(poses: Vec<OrientationState>, config: GestureConfig) -> (Device, Rc<Cell<u64>>) {
    let n = poses.len();
    let first = poses.first().copied().unwrap_or_default();

    // One read for calibration at begin, then one per drawn point
    let mut script = vec![first];
    script.extend(poses);
    let wand = ScriptedWand::new(script);

    let mut levels = vec![Level::Low];
    levels.extend(std::iter::repeat(Level::High).take(n.saturating_sub(1)));
    levels.push(Level::Low);
    let button = ScriptedButton(levels.into());

    let time = Rc::new(Cell::new(0));
    let mut device = AirDraw::new(wand, button, SharedClock(time.clone()), config).unwrap();
    device.begin().unwrap();

    for i in 0..=n {
        time.set(time.get() + TICK_MS);
        let outcome = device.update();
        if i == 0 {
            assert_eq!(outcome, TickOutcome::Started);
        } else if i == n {
            assert_eq!(outcome, TickOutcome::Stopped);
        } else {
            assert_eq!(outcome, TickOutcome::Sampled);
        }
    }

    (device, time)
}

// =============================================================================
// SESSIONS
// =============================================================================

#[test]
fn test_circle_recognized_as_zero() {
    let (device, _) = run_session(circle_poses(50, 300.0), GestureConfig::default());

    let recognizer = device.recognizer();
    assert_eq!(recognizer.state(), CaptureState::Idle);
    assert_eq!(recognizer.stroke().len(), 50);

    let result = recognizer.result().unwrap();
    assert!(result.matched);
    assert_eq!(result.label, '0');
    assert!(result.distance < 60.0);
    assert!(device.has_result());
    assert_eq!(device.result_label(), Some('0'));
}

#[test]
fn test_stroke_follows_orientation() {
    let poses = circle_poses(50, 300.0);
    let (device, _) = run_session(poses, GestureConfig::default());

    let first = device.recognizer().stroke()[0];
    assert!((first.x - 800.0).abs() < 1e-6);
    assert!((first.y - 500.0).abs() < 1e-6);

    let quarter = device.recognizer().stroke()[12];
    let a = TAU * 12.0 / 49.0;
    assert!((quarter.x - (500.0 + 300.0 * a.cos())).abs() < 1e-6);
    assert!((quarter.y - (500.0 + 300.0 * a.sin())).abs() < 1e-6);
}

#[test]
fn test_letters_recognized() {
    let cases: [(&[(f64, f64)], char); 3] = [
        (&[(300.0, 200.0), (300.0, 800.0), (700.0, 800.0)], 'L'),
        (&[(250.0, 250.0), (750.0, 250.0), (250.0, 750.0), (750.0, 750.0)], 'Z'),
        (&[(300.0, 200.0), (700.0, 200.0), (420.0, 800.0)], '7'),
    ];

    for (vertices, expected) in cases {
        let (device, _) = run_session(polyline_poses(vertices, 40), GestureConfig::default());
        assert_eq!(
            device.result_label(),
            Some(expected),
            "result: {:?}",
            device.recognizer().result()
        );
    }
}

#[test]
fn test_short_stroke_gives_no_result() {
    let (device, _) = run_session(circle_poses(5, 300.0), GestureConfig::default());
    assert_eq!(device.recognizer().stroke().len(), 5);
    assert!(!device.has_result());
    assert!(device.result_label().is_none());
    assert!(device.recognizer().result().is_none());
}

#[test]
fn test_long_recording_saturates() {
    // A full circle, then the wand held still past the buffer capacity
    let mut poses = circle_poses(MAX_SAMPLES, 300.0);
    let last = poses[poses.len() - 1];
    poses.extend(std::iter::repeat(last).take(50));

    let (device, _) = run_session(poses, GestureConfig::default());
    assert_eq!(device.recognizer().stroke().len(), MAX_SAMPLES);
    assert_eq!(device.result_label(), Some('0'));
}

#[test]
fn test_next_press_clears_result() {
    let (mut device, time) = run_session(circle_poses(50, 300.0), GestureConfig::default());
    assert!(device.has_result());

    // Button script is exhausted (idle high); press by hand
    device.recognizer_mut().start_recording();
    assert!(!device.has_result());
    time.set(time.get() + TICK_MS);
    assert_eq!(device.update(), TickOutcome::Sampled);
    assert_eq!(device.recognizer().stroke().len(), 1);
}

#[test]
fn test_strict_threshold_rejects_sloppy_letter() {
    let vertices = [(250.0, 250.0), (500.0, 750.0), (750.0, 250.0)];
    let config = GestureConfig::default().with_match_threshold(5.0);
    let (device, _) = run_session(polyline_poses(&vertices, 40), config);

    let result = device.recognizer().result().unwrap();
    assert_eq!(result.label, 'V');
    assert!(!result.matched);
    assert!(device.result_label().is_none());
}

#[test]
fn test_runtime_setters() {
    let (mut device, _) = run_session(circle_poses(10, 200.0), GestureConfig::default());
    assert!(!device.set_sample_interval_ms(4));
    assert!(device.set_sample_interval_ms(50));
    assert!(!device.set_alpha(1.2));
    assert!(device.set_alpha(0.9));
    assert_eq!(device.recognizer().config().sample_interval_ms, 50);
}
