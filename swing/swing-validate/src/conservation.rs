//! Energy and momentum conservation.

use swing_types::SimulationTrace;
use tracing::{info, warn};

use crate::params::ValidationParams;
use crate::result::ConservationResult;

/// Check energy and momentum drift between the first and last sample.
///
/// Energy drift is `|E_final - E_initial| / |E_initial|`; when the initial
/// energy is exactly zero the absolute change is used instead. Momentum drift
/// is `‖p_final - p_initial‖ / (‖p_initial‖ + ε)`.
///
/// A trace missing time or any energy series yields
/// [`ConservationResult::unchecked`] and a warning; this never fails.
///
/// # Example
///
/// ```
/// use swing_types::SimulationTrace;
/// use swing_validate::{validate_conservation, ValidationParams};
///
/// let trace = SimulationTrace::new("pendulum")
///     .with_time(vec![0.0, 0.1, 0.2])
///     .with_energy_split(vec![0.0, 1.0, 2.0], vec![2.0, 1.0, 0.0]);
///
/// let result = validate_conservation(&trace, &ValidationParams::default());
/// assert!(result.energy_conservation);
/// assert_eq!(result.energy_drift, 0.0);
/// ```
#[must_use]
pub fn validate_conservation(trace: &SimulationTrace, params: &ValidationParams) -> ConservationResult {
    if !trace.has_energy() {
        warn!(engine = %trace.engine, "incomplete energy data, skipping conservation check");
        return ConservationResult::unchecked();
    }

    let mut result = ConservationResult::unchecked();

    let energy = &trace.total_energy;
    let initial = energy[0];
    let drift_from_initial = |value: f64| relative_change(initial, value);

    result.energy_drift = drift_from_initial(energy[energy.len() - 1]);
    result.energy_conservation = result.energy_drift < params.relative_tolerance;
    result.max_energy_deviation = energy
        .iter()
        .map(|&e| drift_from_initial(e))
        .fold(0.0, f64::max);

    if let (Some(first), Some(last)) = (trace.linear_momentum.first(), trace.linear_momentum.last()) {
        result.momentum_drift = (last - first).norm() / (first.norm() + params.epsilon);
        result.momentum_conservation = result.momentum_drift < params.relative_tolerance;
    }

    info!(
        engine = %trace.engine,
        energy_drift = result.energy_drift,
        momentum_drift = result.momentum_drift,
        "conservation check complete"
    );

    result
}

/// `|value - initial| / |initial|`, or the absolute change when `initial` is zero.
fn relative_change(initial: f64, value: f64) -> f64 {
    let change = (value - initial).abs();
    if initial == 0.0 {
        change
    } else {
        change / initial.abs()
    }
}
