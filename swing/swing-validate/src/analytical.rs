//! Closed-form reference models.
//!
//! These provide conserving baselines against which the validators can be
//! calibrated: a trace produced by [`simulate_pendulum`] should pass the
//! conservation check under default tolerances.

use swing_types::{JointLimits, SimulationTrace, Vector3};

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Ideal point-mass pendulum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticalPendulum {
    /// Rod length in meters.
    pub length: f64,
    /// Bob mass in kilograms.
    pub mass: f64,
    /// Gravitational acceleration in m/s².
    pub gravity: f64,
}

impl Default for AnalyticalPendulum {
    fn default() -> Self {
        Self {
            length: 1.0,
            mass: 1.0,
            gravity: STANDARD_GRAVITY,
        }
    }
}

impl AnalyticalPendulum {
    /// Create a pendulum under standard gravity.
    #[must_use]
    pub fn new(length: f64, mass: f64) -> Self {
        Self {
            length,
            mass,
            gravity: STANDARD_GRAVITY,
        }
    }

    /// Kinetic energy at angular velocity `omega`.
    #[must_use]
    pub fn kinetic_energy(&self, omega: f64) -> f64 {
        0.5 * self.mass * self.length * self.length * omega * omega
    }

    /// Potential energy at angle `theta`, zero at the bottom.
    #[must_use]
    pub fn potential_energy(&self, theta: f64) -> f64 {
        self.mass * self.gravity * self.length * (1.0 - theta.cos())
    }

    /// Total mechanical energy.
    #[must_use]
    pub fn total_energy(&self, theta: f64, omega: f64) -> f64 {
        self.kinetic_energy(omega) + self.potential_energy(theta)
    }

    /// Angular acceleration at angle `theta`.
    #[must_use]
    pub fn angular_acceleration(&self, theta: f64) -> f64 {
        -(self.gravity / self.length) * theta.sin()
    }

    /// Period for small oscillations, `2π √(L/g)`.
    #[must_use]
    pub fn small_angle_period(&self) -> f64 {
        2.0 * std::f64::consts::PI * (self.length / self.gravity).sqrt()
    }
}

/// Point mass in free flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticalBallistic {
    /// Mass in kilograms.
    pub mass: f64,
    /// Gravitational acceleration in m/s².
    pub gravity: f64,
}

impl Default for AnalyticalBallistic {
    fn default() -> Self {
        Self {
            mass: 1.0,
            gravity: STANDARD_GRAVITY,
        }
    }
}

impl AnalyticalBallistic {
    /// Total mechanical energy at `height` moving with speed `velocity`.
    #[must_use]
    pub fn total_energy(&self, height: f64, velocity: f64) -> f64 {
        self.mass * self.gravity * height + 0.5 * self.mass * velocity * velocity
    }

    /// Height and vertical velocity at time `t` after launch.
    #[must_use]
    pub fn state_at(&self, height0: f64, velocity0: f64, t: f64) -> (f64, f64) {
        let height = height0 + velocity0 * t - 0.5 * self.gravity * t * t;
        let velocity = velocity0 - self.gravity * t;
        (height, velocity)
    }
}

/// Integrate a pendulum released from rest at `theta0` with classic RK4.
///
/// Returns `steps + 1` samples starting at `t = 0`, with energies, the
/// acceleration series, zero momentum and `[-π, π]` limits on joint 0.
///
/// # Example
///
/// ```
/// use swing_validate::analytical::{simulate_pendulum, AnalyticalPendulum};
/// use swing_validate::{validate_conservation, ValidationParams};
///
/// let pendulum = AnalyticalPendulum::default();
/// let trace = simulate_pendulum(&pendulum, 0.3, 1e-3, 2000, "pendulum");
///
/// let result = validate_conservation(&trace, &ValidationParams::default());
/// assert!(result.energy_conservation);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn simulate_pendulum(
    pendulum: &AnalyticalPendulum,
    theta0: f64,
    dt: f64,
    steps: usize,
    engine: &str,
) -> SimulationTrace {
    let derivative = |theta: f64, omega: f64| (omega, pendulum.angular_acceleration(theta));

    let mut theta = theta0;
    let mut omega = 0.0;
    let capacity = steps + 1;
    let mut time = Vec::with_capacity(capacity);
    let mut positions = Vec::with_capacity(capacity);
    let mut velocities = Vec::with_capacity(capacity);
    let mut accelerations = Vec::with_capacity(capacity);
    let mut kinetic = Vec::with_capacity(capacity);
    let mut potential = Vec::with_capacity(capacity);

    for step in 0..=steps {
        time.push(step as f64 * dt);
        positions.push(vec![theta]);
        velocities.push(vec![omega]);
        accelerations.push(vec![pendulum.angular_acceleration(theta)]);
        kinetic.push(pendulum.kinetic_energy(omega));
        potential.push(pendulum.potential_energy(theta));

        if step == steps {
            break;
        }

        let (k1t, k1w) = derivative(theta, omega);
        let (k2t, k2w) = derivative(theta + 0.5 * dt * k1t, omega + 0.5 * dt * k1w);
        let (k3t, k3w) = derivative(theta + 0.5 * dt * k2t, omega + 0.5 * dt * k2w);
        let (k4t, k4w) = derivative(theta + dt * k3t, omega + dt * k3w);
        theta += dt / 6.0 * (k1t + 2.0 * k2t + 2.0 * k3t + k4t);
        omega += dt / 6.0 * (k1w + 2.0 * k2w + 2.0 * k3w + k4w);
    }

    SimulationTrace::new(engine)
        .with_time(time)
        .with_joint_positions(positions)
        .with_joint_velocities(velocities)
        .with_joint_accelerations(accelerations)
        .with_energy_split(kinetic, potential)
        .with_linear_momentum(vec![Vector3::zeros(); capacity])
        .with_joint_limit(0, JointLimits::full_revolution())
}

/// Largest absolute deviation of `energies` from `reference`.
///
/// Returns 0.0 for an empty series.
#[must_use]
pub fn max_energy_error(energies: &[f64], reference: f64) -> f64 {
    energies
        .iter()
        .map(|e| (e - reference).abs())
        .fold(0.0, f64::max)
}
