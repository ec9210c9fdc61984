//! Result types produced by the validators.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Energy and momentum conservation check for one trace.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConservationResult {
    /// Energy drift is below the relative tolerance.
    pub energy_conservation: bool,
    /// Momentum drift is below the relative tolerance.
    pub momentum_conservation: bool,
    /// Relative change in total energy between the first and last sample.
    pub energy_drift: f64,
    /// Relative change in linear momentum between the first and last sample.
    pub momentum_drift: f64,
    /// Largest relative deviation of any sample from the initial energy.
    pub max_energy_deviation: f64,
}

impl ConservationResult {
    /// Result for a trace that could not be checked.
    #[must_use]
    pub fn unchecked() -> Self {
        Self::default()
    }

    /// Both energy and momentum are conserved.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        self.energy_conservation && self.momentum_conservation
    }
}

/// A single joint position outside its limits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintViolation {
    /// Sample index.
    pub timestep: usize,
    /// Joint index.
    pub joint: usize,
    /// Offending position.
    pub position: f64,
    /// Distance outside the limit interval.
    pub violation: f64,
}

/// Joint limit check for one trace.
///
/// # Example
///
/// ```
/// use swing_validate::ConstraintResult;
///
/// let result = ConstraintResult::unchecked();
/// assert!(!result.constraint_satisfaction);
/// assert!(result.violations.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstraintResult {
    /// Violations in (timestep, joint) order.
    pub violations: Vec<ConstraintViolation>,
    /// Largest violation magnitude, 0.0 when there are none.
    pub max_violation: f64,
    /// `max_violation` is below the absolute tolerance.
    pub constraint_satisfaction: bool,
    /// Number of position samples inspected.
    pub samples_checked: usize,
}

impl ConstraintResult {
    /// Result for a trace without limits or positions.
    #[must_use]
    pub fn unchecked() -> Self {
        Self::default()
    }

    /// Number of violating (timestep, joint) pairs.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Violations recorded for one joint.
    pub fn violations_for_joint(&self, joint: usize) -> impl Iterator<Item = &ConstraintViolation> {
        self.violations.iter().filter(move |v| v.joint == joint)
    }
}

/// Velocity/acceleration blow-up check for one trace.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StabilityResult {
    /// Velocities and accelerations stay under their caps and are finite.
    pub stable: bool,
    /// Largest finite |velocity| observed.
    pub max_velocity: f64,
    /// Largest finite |acceleration| observed.
    pub max_acceleration: f64,
    /// Count of `NaN`/`Inf` velocity and acceleration values.
    pub non_finite_samples: usize,
}

impl StabilityResult {
    /// Result for a trace without velocity data.
    #[must_use]
    pub fn unchecked() -> Self {
        Self::default()
    }
}

/// Pairwise agreement scores keyed by `"<first>_vs_<second>"`, in the order
/// the pairs were compared.
pub type AgreementMap = IndexMap<String, f64>;

/// Cross-engine agreement for a set of traces.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComparisonResult {
    /// Engine names in input order.
    pub engines_compared: Vec<String>,
    /// Joint position agreement per pair.
    pub position_agreement: AgreementMap,
    /// Joint velocity agreement per pair.
    pub velocity_agreement: AgreementMap,
    /// Total energy agreement per pair.
    pub energy_agreement: AgreementMap,
    /// Every computed score exceeds the agreement threshold.
    pub overall_agreement: bool,
}

impl ComparisonResult {
    /// Comparison with no pairwise entries.
    #[must_use]
    pub fn empty(engines_compared: Vec<String>) -> Self {
        Self {
            engines_compared,
            ..Default::default()
        }
    }

    /// Key used for a pair of engines.
    #[must_use]
    pub fn pair_key(first: &str, second: &str) -> String {
        format!("{first}_vs_{second}")
    }

    /// All computed scores across categories.
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.position_agreement
            .values()
            .chain(self.velocity_agreement.values())
            .chain(self.energy_agreement.values())
            .copied()
    }

    /// Lowest computed score, if any.
    #[must_use]
    pub fn worst_score(&self) -> Option<f64> {
        self.scores().reduce(f64::min)
    }
}

/// All validations for one engine.
///
/// Sections left `None` were not run and are skipped by the report.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineValidation {
    /// Engine name.
    pub engine: String,
    /// Conservation check.
    pub conservation: Option<ConservationResult>,
    /// Joint constraint check.
    pub constraints: Option<ConstraintResult>,
    /// Stability check.
    pub stability: Option<StabilityResult>,
}

impl EngineValidation {
    /// Empty entry for an engine.
    #[must_use]
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            ..Default::default()
        }
    }

    /// Every section that was run passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.conservation
            .as_ref()
            .is_none_or(|c| c.energy_conservation)
            && self
                .constraints
                .as_ref()
                .is_none_or(|c| c.constraint_satisfaction)
            && self.stability.as_ref().is_none_or(|s| s.stable)
    }
}

/// Full output of a validation suite run.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationReport {
    /// Per-engine results in input order.
    pub engines: Vec<EngineValidation>,
    /// Cross-engine comparison, present when more than one engine ran.
    pub comparison: Option<ComparisonResult>,
}

impl ValidationReport {
    /// Look up the results for an engine by name.
    #[must_use]
    pub fn engine(&self, name: &str) -> Option<&EngineValidation> {
        self.engines.iter().find(|e| e.engine == name)
    }

    /// Every engine passed and, when compared, the engines agree.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.engines.iter().all(EngineValidation::passed)
            && self.comparison.as_ref().is_none_or(|c| c.overall_agreement)
    }

    /// One-line summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let failing = self.engines.iter().filter(|e| !e.passed()).count();
        let mut summary = format!("{} engine(s) validated", self.engines.len());
        if failing > 0 {
            summary.push_str(&format!(", {failing} with issues"));
        }
        match &self.comparison {
            Some(c) if c.overall_agreement => summary.push_str("; engines agree"),
            Some(_) => summary.push_str("; engines disagree"),
            None => {}
        }
        summary
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_unchecked_results_are_negative() {
        assert!(!ConservationResult::unchecked().is_conserved());
        assert!(!ConstraintResult::unchecked().constraint_satisfaction);
        assert!(!StabilityResult::unchecked().stable);
    }

    #[test]
    fn test_violations_for_joint() {
        let result = ConstraintResult {
            violations: vec![
                ConstraintViolation {
                    timestep: 0,
                    joint: 1,
                    position: 4.0,
                    violation: 0.5,
                },
                ConstraintViolation {
                    timestep: 2,
                    joint: 0,
                    position: -4.0,
                    violation: 0.5,
                },
            ],
            max_violation: 0.5,
            constraint_satisfaction: false,
            samples_checked: 3,
        };
        assert_eq!(result.violation_count(), 2);
        assert_eq!(result.violations_for_joint(0).count(), 1);
        assert_eq!(result.violations_for_joint(5).count(), 0);
    }

    #[test]
    fn test_worst_score() {
        let mut comparison = ComparisonResult::empty(vec!["a".into(), "b".into()]);
        assert_eq!(comparison.worst_score(), None);

        let key = ComparisonResult::pair_key("a", "b");
        assert_eq!(key, "a_vs_b");
        comparison.position_agreement.insert(key.clone(), 0.95);
        comparison.energy_agreement.insert(key, 0.5);
        assert_eq!(comparison.worst_score(), Some(0.5));
    }

    #[test]
    fn test_engine_validation_passed() {
        let mut entry = EngineValidation::new("mujoco");
        assert!(entry.passed());

        entry.stability = Some(StabilityResult {
            stable: false,
            ..Default::default()
        });
        assert!(!entry.passed());
    }

    #[test]
    fn test_report_summary() {
        let mut report = ValidationReport {
            engines: vec![EngineValidation::new("mujoco"), EngineValidation::new("drake")],
            comparison: Some(ComparisonResult {
                overall_agreement: true,
                ..Default::default()
            }),
        };
        assert!(report.all_passed());
        assert_eq!(report.summary(), "2 engine(s) validated; engines agree");
        assert!(report.engine("drake").is_some());

        report.engines[1].constraints = Some(ConstraintResult::unchecked());
        assert!(!report.all_passed());
        assert!(report.summary().contains("1 with issues"));
    }
}
