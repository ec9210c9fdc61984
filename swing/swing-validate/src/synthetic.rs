//! Synthetic golf-swing traces for demos and end-to-end tests.
//!
//! The swing is a two-joint shoulder/wrist model driven by fixed harmonic
//! profiles. It is kinematically smooth but not energy conserving, so it
//! exercises the comparator rather than the conservation check.

use std::f64::consts::PI;

use swing_types::{JointLimits, SimulationTrace, Vector3};

/// Gravity used for the potential energy term.
const GRAVITY: f64 = 9.81;

fn shoulder_angle(t: f64, period: f64) -> f64 {
    let phase = 2.0 * PI * t / period;
    -1.2 * phase.cos() + 0.2 * (2.0 * phase).sin()
}

fn wrist_angle(t: f64, period: f64) -> f64 {
    let phase = 2.0 * PI * t / period;
    1.3 * phase.sin() + 0.1 * (3.0 * phase).cos()
}

/// Generate a two-joint swing with `samples` points spanning `duration`.
///
/// Velocities are backward finite differences, so one extra leading point is
/// generated and then dropped. Accelerations and momentum are zero. Both
/// joints carry `[-π, π]` limits.
///
/// # Example
///
/// ```
/// use swing_validate::synthetic::golf_swing_trace;
///
/// let trace = golf_swing_trace("mujoco", 200, 2.0);
/// assert_eq!(trace.len(), 200);
/// assert_eq!(trace.joint_count(), 2);
/// assert!(trace.check_shape().is_ok());
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn golf_swing_trace(engine: &str, samples: usize, duration: f64) -> SimulationTrace {
    if samples == 0 || duration <= 0.0 {
        return SimulationTrace::new(engine);
    }

    let dt = duration / samples as f64;
    let points: Vec<(f64, [f64; 2])> = (0..=samples)
        .map(|i| {
            let t = i as f64 * dt;
            (t, [shoulder_angle(t, duration), wrist_angle(t, duration)])
        })
        .collect();

    let mut time = Vec::with_capacity(samples);
    let mut positions = Vec::with_capacity(samples);
    let mut velocities = Vec::with_capacity(samples);
    let mut kinetic = Vec::with_capacity(samples);
    let mut potential = Vec::with_capacity(samples);

    for pair in points.windows(2) {
        let (_, prev) = pair[0];
        let (t, q) = pair[1];
        let v = [(q[0] - prev[0]) / dt, (q[1] - prev[1]) / dt];

        time.push(t);
        positions.push(q.to_vec());
        velocities.push(v.to_vec());
        kinetic.push(0.5 * (v[0] * v[0] + v[1] * v[1]));
        potential.push(GRAVITY * (q[0].sin() + q[1].sin()));
    }

    let limits = JointLimits::full_revolution();
    SimulationTrace::new(engine)
        .with_time(time)
        .with_joint_positions(positions)
        .with_joint_velocities(velocities)
        .with_joint_accelerations(vec![vec![0.0; 2]; samples])
        .with_energy_split(kinetic, potential)
        .with_linear_momentum(vec![Vector3::zeros(); samples])
        .with_joint_limit(0, limits)
        .with_joint_limit(1, limits)
}

/// Add per-sample offsets to one joint's positions.
///
/// Offsets beyond the trace length are ignored; samples without an offset are
/// left untouched, as are rows too narrow to hold `joint`. Velocities and
/// energies are not recomputed.
pub fn offset_joint_positions(
    trace: &mut SimulationTrace,
    joint: usize,
    offsets: impl IntoIterator<Item = f64>,
) {
    for (row, offset) in trace.joint_positions.iter_mut().zip(offsets) {
        if let Some(q) = row.get_mut(joint) {
            *q += offset;
        }
    }
}
