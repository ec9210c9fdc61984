//! Stateful entry point bundling parameters with a tracing span.

use swing_types::SimulationTrace;
use tracing::{info, info_span, Span};

use crate::comparison::compare_engines;
use crate::conservation::validate_conservation;
use crate::constraints::validate_joint_constraints;
use crate::error::ValidationResult;
use crate::params::ValidationParams;
use crate::result::{
    ComparisonResult, ConservationResult, ConstraintResult, EngineValidation, StabilityResult,
    ValidationReport,
};
use crate::stability::validate_numerical_stability;

/// Runs every validator with one set of parameters.
///
/// Each call is logged inside the validator's `physics_validator` span.
///
/// # Example
///
/// ```
/// use swing_validate::synthetic::golf_swing_trace;
/// use swing_validate::PhysicsValidator;
///
/// let traces = vec![
///     golf_swing_trace("mujoco", 100, 2.0),
///     golf_swing_trace("drake", 100, 2.0),
/// ];
///
/// let report = PhysicsValidator::default().run_suite(&traces);
/// assert_eq!(report.engines.len(), 2);
/// assert!(report.comparison.unwrap().overall_agreement);
/// ```
#[derive(Debug, Clone)]
pub struct PhysicsValidator {
    params: ValidationParams,
    span: Span,
}

impl Default for PhysicsValidator {
    fn default() -> Self {
        Self::from_checked(ValidationParams::default())
    }
}

impl PhysicsValidator {
    /// Create a validator after checking the parameters.
    pub fn new(params: ValidationParams) -> ValidationResult<Self> {
        params.validate()?;
        Ok(Self::from_checked(params))
    }

    fn from_checked(params: ValidationParams) -> Self {
        Self {
            params,
            span: info_span!("physics_validator"),
        }
    }

    /// Parameters in use.
    #[must_use]
    pub fn params(&self) -> &ValidationParams {
        &self.params
    }

    /// See [`validate_conservation`].
    #[must_use]
    pub fn validate_conservation(&self, trace: &SimulationTrace) -> ConservationResult {
        let _enter = self.span.enter();
        validate_conservation(trace, &self.params)
    }

    /// See [`validate_joint_constraints`].
    #[must_use]
    pub fn validate_joint_constraints(&self, trace: &SimulationTrace) -> ConstraintResult {
        let _enter = self.span.enter();
        validate_joint_constraints(trace, &self.params)
    }

    /// See [`validate_numerical_stability`].
    #[must_use]
    pub fn validate_numerical_stability(&self, trace: &SimulationTrace) -> StabilityResult {
        let _enter = self.span.enter();
        validate_numerical_stability(trace, &self.params)
    }

    /// See [`compare_engines`].
    #[must_use]
    pub fn compare_engines(&self, traces: &[SimulationTrace]) -> ComparisonResult {
        let _enter = self.span.enter();
        compare_engines(traces, &self.params)
    }

    /// Validate one trace with all three per-engine checks.
    #[must_use]
    pub fn validate_engine(&self, trace: &SimulationTrace) -> EngineValidation {
        EngineValidation {
            engine: trace.engine.clone(),
            conservation: Some(self.validate_conservation(trace)),
            constraints: Some(self.validate_joint_constraints(trace)),
            stability: Some(self.validate_numerical_stability(trace)),
        }
    }

    /// Validate every trace, then compare them when there is more than one.
    #[must_use]
    pub fn run_suite(&self, traces: &[SimulationTrace]) -> ValidationReport {
        let engines: Vec<EngineValidation> =
            traces.iter().map(|trace| self.validate_engine(trace)).collect();
        let comparison = (traces.len() > 1).then(|| self.compare_engines(traces));

        let report = ValidationReport {
            engines,
            comparison,
        };

        let _enter = self.span.enter();
        info!(
            engines = traces.len(),
            all_passed = report.all_passed(),
            "validation suite complete"
        );
        report
    }
}
