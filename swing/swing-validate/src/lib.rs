//! Cross-engine physics validation for golf-swing simulations.
//!
//! This crate checks [`SimulationTrace`]s produced by independent engines for
//! physical plausibility and for agreement with each other:
//!
//! - [`validate_conservation`] - Energy and momentum drift
//! - [`validate_joint_constraints`] - Joint positions against their limits
//! - [`validate_numerical_stability`] - Velocity and acceleration blow-up
//! - [`compare_engines`] - Pairwise position, velocity and energy agreement
//! - [`render_markdown`] - Human-readable report
//!
//! # Failure Model
//!
//! Validators never return errors. Missing or malformed data produces a
//! warning and conservative result flags, so one bad trace cannot abort a
//! whole suite. Only parameter checking and report export are fallible.
//!
//! # Example
//!
//! ```
//! use swing_validate::synthetic::{golf_swing_trace, offset_joint_positions};
//! use swing_validate::{render_markdown, PhysicsValidator};
//!
//! let reference = golf_swing_trace("mujoco", 200, 2.0);
//! let mut perturbed = golf_swing_trace("drake", 200, 2.0);
//! offset_joint_positions(&mut perturbed, 0, (0..200).map(|i| if i % 2 == 0 { 1e-3 } else { -1e-3 }));
//!
//! let report = PhysicsValidator::default().run_suite(&[reference, perturbed]);
//! let comparison = report.comparison.as_ref().unwrap();
//! assert!(comparison.position_agreement["mujoco_vs_drake"] > 0.9);
//! assert!(comparison.overall_agreement);
//!
//! println!("{}", render_markdown(&report));
//! ```
//!
//! [`SimulationTrace`]: swing_types::SimulationTrace

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod analytical;
mod comparison;
mod conservation;
mod constraints;
mod error;
pub mod metrics;
mod params;
mod report;
mod result;
mod stability;
pub mod synthetic;
mod validator;

pub use comparison::{compare_engines, compare_scalars, compare_trajectories};
pub use conservation::validate_conservation;
pub use constraints::validate_joint_constraints;
pub use error::{ComparisonError, ValidationError, ValidationResult};
pub use params::ValidationParams;
pub use report::render_markdown;
pub use result::{
    AgreementMap, ComparisonResult, ConservationResult, ConstraintResult, ConstraintViolation,
    EngineValidation, StabilityResult, ValidationReport,
};
pub use stability::validate_numerical_stability;
pub use validator::PhysicsValidator;
