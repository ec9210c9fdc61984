//! Core types for golf-swing simulation validation.
//!
//! This crate provides the data exchanged between physics engines and the
//! validation suite:
//!
//! - [`SimulationTrace`] - Time series of one engine run (joints, energy, momentum)
//! - [`JointLimits`] - Position interval for a joint
//! - [`EngineType`] / [`EngineCategory`] - Engine catalogue with fixed metadata
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no physics and no validation
//! logic. Engines fill a trace wholesale; validators borrow it read-only.
//!
//! # Example
//!
//! ```
//! use swing_types::{EngineCategory, EngineType, SimulationTrace};
//!
//! let trace = SimulationTrace::new(EngineType::Mujoco.id())
//!     .with_time(vec![0.0, 0.01])
//!     .with_energy_split(vec![0.5, 0.4], vec![1.0, 1.1]);
//!
//! assert_eq!(trace.engine, "mujoco");
//! assert_eq!(EngineType::Mujoco.category(), EngineCategory::Physics);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
)]

mod engine;
mod error;
mod joint;
mod trace;

pub use engine::{EngineCategory, EngineInfo, EngineType, ENGINE_TABLE};
pub use error::TraceError;
pub use joint::JointLimits;
pub use trace::SimulationTrace;

// Re-export math types for convenience
pub use nalgebra::Vector3;

/// Result type for trace operations.
pub type Result<T> = std::result::Result<T, TraceError>;
