//! Cross-engine agreement scoring.

use swing_types::SimulationTrace;
use tracing::{debug, info, warn};

use crate::error::ComparisonError;
use crate::metrics::{scalar_agreement, trajectory_agreement};
use crate::params::ValidationParams;
use crate::result::{AgreementMap, ComparisonResult};

/// Default denominator guard for the standalone comparison helpers.
const EPSILON: f64 = 1e-12;

/// Agreement between two joint trajectories, 1.0 meaning identical.
///
/// Both series are truncated to the shorter length. The RMS of the difference
/// is normalised by the RMS magnitude of `first`; the score is
/// `max(0, 1 - normalised_error)`. Any failure (empty input, mismatched joint
/// counts, non-finite values) scores 0.0.
///
/// # Example
///
/// ```
/// use swing_validate::compare_trajectories;
///
/// let swing = vec![vec![0.1, 0.2], vec![0.3, 0.4]];
/// assert_eq!(compare_trajectories(&swing, &swing), 1.0);
/// assert_eq!(compare_trajectories(&swing, &[]), 0.0);
/// ```
#[must_use]
pub fn compare_trajectories(first: &[Vec<f64>], second: &[Vec<f64>]) -> f64 {
    trajectory_agreement(first, second, EPSILON).unwrap_or(0.0)
}

/// Agreement between two scalar series, 1.0 meaning identical.
///
/// Both series are truncated to the shorter length; the score is
/// `max(0, 1 - mean(|a - b| / (|a| + ε)))`. Any failure scores 0.0.
#[must_use]
pub fn compare_scalars(first: &[f64], second: &[f64]) -> f64 {
    scalar_agreement(first, second, EPSILON).unwrap_or(0.0)
}

/// Score one category for one pair; failures are logged and score 0.0.
fn score(pair: &str, category: &str, outcome: Result<f64, ComparisonError>) -> f64 {
    outcome.unwrap_or_else(|err| {
        debug!(pair, category, error = %err, "pairwise comparison failed");
        0.0
    })
}

/// Compare every unordered pair of traces.
///
/// Pairs follow input order and are keyed `"<first>_vs_<second>"`. Positions
/// and velocities use trajectory agreement, total energy uses scalar
/// agreement; a category is scored only when both traces carry it. Overall
/// agreement requires every computed score to exceed
/// `params.agreement_threshold` and at least one score to exist.
///
/// Fewer than two traces yields an empty comparison and a warning.
#[must_use]
pub fn compare_engines(traces: &[SimulationTrace], params: &ValidationParams) -> ComparisonResult {
    let engines: Vec<String> = traces.iter().map(|t| t.engine.clone()).collect();
    if traces.len() < 2 {
        warn!(engines = traces.len(), "need at least 2 engines for comparison");
        return ComparisonResult::empty(engines);
    }

    let mut position_agreement = AgreementMap::new();
    let mut velocity_agreement = AgreementMap::new();
    let mut energy_agreement = AgreementMap::new();

    for (i, first) in traces.iter().enumerate() {
        for second in &traces[i + 1..] {
            let pair = ComparisonResult::pair_key(&first.engine, &second.engine);
            if position_agreement.contains_key(&pair) {
                warn!(pair = %pair, "duplicate engine pair, later comparison replaces earlier one");
            }

            if !first.joint_positions.is_empty() && !second.joint_positions.is_empty() {
                let outcome = trajectory_agreement(&first.joint_positions, &second.joint_positions, params.epsilon);
                position_agreement.insert(pair.clone(), score(&pair, "position", outcome));
            }

            if !first.joint_velocities.is_empty() && !second.joint_velocities.is_empty() {
                let outcome = trajectory_agreement(&first.joint_velocities, &second.joint_velocities, params.epsilon);
                velocity_agreement.insert(pair.clone(), score(&pair, "velocity", outcome));
            }

            if !first.total_energy.is_empty() && !second.total_energy.is_empty() {
                let outcome = scalar_agreement(&first.total_energy, &second.total_energy, params.epsilon);
                energy_agreement.insert(pair.clone(), score(&pair, "energy", outcome));
            }
        }
    }

    let mut result = ComparisonResult {
        engines_compared: engines,
        position_agreement,
        velocity_agreement,
        energy_agreement,
        overall_agreement: false,
    };

    let overall_agreement = {
        let mut scores = result.scores().peekable();
        scores.peek().is_some() && scores.all(|s| s > params.agreement_threshold)
    };
    result.overall_agreement = overall_agreement;

    info!(
        engines = result.engines_compared.len(),
        overall_agreement = result.overall_agreement,
        worst_score = result.worst_score().unwrap_or(0.0),
        "cross-engine comparison complete"
    );

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn trace(engine: &str, offset: f64) -> SimulationTrace {
        let time: Vec<f64> = (0..20).map(|i| f64::from(i) * 0.1).collect();
        let positions = time.iter().map(|t| vec![t.sin() + offset, t.cos()]).collect();
        let velocities = time.iter().map(|t| vec![t.cos(), -t.sin()]).collect();
        SimulationTrace::new(engine)
            .with_time(time)
            .with_joint_velocities(velocities)
            .with_joint_positions(positions)
            .with_energy(vec![1.0; 20], vec![1.0; 20], vec![2.0; 20])
    }

    #[test]
    fn test_identical_trajectories() {
        let t = trace("a", 0.0);
        assert_eq!(compare_trajectories(&t.joint_positions, &t.joint_positions), 1.0);
        assert_eq!(compare_scalars(&t.total_energy, &t.total_energy), 1.0);
    }

    #[test]
    fn test_different_lengths_truncate() {
        let a: Vec<Vec<f64>> = (0..5).map(|i| vec![f64::from(i) + 1.0]).collect();
        let b: Vec<Vec<f64>> = (0..8).map(|i| vec![f64::from(i) + 1.0]).collect();
        assert_eq!(compare_trajectories(&a, &b), 1.0);
        assert_eq!(compare_scalars(&[1.0, 2.0], &[1.0, 2.0, 99.0]), 1.0);
    }

    #[test]
    fn test_mismatched_rows_score_zero() {
        assert_eq!(compare_trajectories(&[vec![1.0, 2.0]], &[vec![1.0]]), 0.0);
    }

    #[test]
    fn test_single_engine() {
        let result = compare_engines(&[trace("mujoco", 0.0)], &ValidationParams::default());
        assert!(!result.overall_agreement);
        assert_eq!(result.engines_compared, vec!["mujoco".to_string()]);
        assert!(result.position_agreement.is_empty());
        assert!(result.velocity_agreement.is_empty());
        assert!(result.energy_agreement.is_empty());
    }

    #[test]
    fn test_three_engines_pairwise() {
        let traces = [trace("mujoco", 0.0), trace("drake", 0.0), trace("pinocchio", 0.0)];
        let result = compare_engines(&traces, &ValidationParams::default());

        assert_eq!(result.position_agreement.len(), 3);
        assert!(result.position_agreement.contains_key("mujoco_vs_drake"));
        assert!(result.position_agreement.contains_key("mujoco_vs_pinocchio"));
        assert!(result.position_agreement.contains_key("drake_vs_pinocchio"));
        assert!(result.overall_agreement);
    }

    #[test]
    fn test_pairs_in_comparison_order() {
        let traces = [trace("mujoco", 0.0), trace("drake", 0.0), trace("pinocchio", 0.0)];
        let result = compare_engines(&traces, &ValidationParams::default());

        let expected = ["mujoco_vs_drake", "mujoco_vs_pinocchio", "drake_vs_pinocchio"];
        for scores in [&result.position_agreement, &result.velocity_agreement, &result.energy_agreement] {
            let keys: Vec<&str> = scores.keys().map(String::as_str).collect();
            assert_eq!(keys, expected);
        }
    }

    #[test]
    fn test_disagreement() {
        let traces = [trace("mujoco", 0.0), trace("drake", 5.0)];
        let result = compare_engines(&traces, &ValidationParams::default());
        assert!(result.position_agreement["mujoco_vs_drake"] < 0.9);
        assert_relative_eq!(result.velocity_agreement["mujoco_vs_drake"], 1.0);
        assert!(!result.overall_agreement);
    }

    #[test]
    fn test_missing_category_skipped() {
        let mut bare = trace("drake", 0.0);
        bare.total_energy.clear();
        let result = compare_engines(&[trace("mujoco", 0.0), bare], &ValidationParams::default());
        assert!(result.energy_agreement.is_empty());
        assert_eq!(result.position_agreement.len(), 1);
        assert!(result.overall_agreement);
    }

    #[test]
    fn test_failed_pair_scores_zero_and_continues() {
        let mut narrow = trace("drake", 0.0);
        for row in &mut narrow.joint_positions {
            row.truncate(1);
        }
        let result = compare_engines(&[trace("mujoco", 0.0), narrow], &ValidationParams::default());
        assert_eq!(result.position_agreement["mujoco_vs_drake"], 0.0);
        assert_relative_eq!(result.velocity_agreement["mujoco_vs_drake"], 1.0);
        assert!(!result.overall_agreement);
    }

    #[test]
    fn test_no_shared_series_means_no_agreement() {
        let a = SimulationTrace::new("a").with_time(vec![0.0]);
        let b = SimulationTrace::new("b").with_time(vec![0.0]);
        let result = compare_engines(&[a, b], &ValidationParams::default());
        assert!(result.scores().next().is_none());
        assert!(!result.overall_agreement);
    }
}
