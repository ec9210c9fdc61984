//! Multi-engine golf-swing analysis pipeline.
//!
//! This crate chains independent engines into one analysis run:
//!
//! - **Input processing**: video to keypoints (`OpenPose`)
//! - **Biomechanics**: inverse kinematics, inverse dynamics and muscle
//!   analysis (`OpenSim`)
//! - **Muscle fibers**: cross-bridge level simulation (`MyoSim`)
//! - **Physics validation**: replay of the measured motion in a physics
//!   engine (`MuJoCo`, Drake, Pinocchio, ...)
//!
//! Engines plug in as [`PipelineStage`] implementations supplied by an
//! [`EngineManager`]. [`EngineRegistry`] is the provided manager.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//!
//! use swing_pipeline::{
//!     AnalysisPipeline, EngineRegistry, ForwardSimulator, PipelineConfig, StageError,
//!     TrajectoryReplay,
//! };
//! use swing_types::EngineType;
//!
//! struct Hold;
//!
//! impl ForwardSimulator for Hold {
//!     fn simulate(&self, measured: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, StageError> {
//!         Ok(measured.to_vec())
//!     }
//! }
//!
//! let mut registry = EngineRegistry::new();
//! registry
//!     .register_physics(EngineType::Drake, TrajectoryReplay::new(EngineType::Drake, Hold).unwrap())
//!     .unwrap();
//!
//! let pipeline = AnalysisPipeline::new(registry);
//! let config = PipelineConfig::default().with_physics_engine(EngineType::Drake);
//! let result = pipeline.run_full_pipeline(Path::new("swing.json"), &config).unwrap();
//!
//! assert!(result.success);
//! assert!(result.kinematics.is_none());
//! assert_eq!(result.physics_validation.unwrap().engine, EngineType::Drake);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod pipeline;
mod result;
mod stage;
mod stages;

pub use config::{OutputFormat, PipelineConfig};
pub use engine::{EngineManager, EngineRegistry};
pub use error::{PipelineError, Result, StageError, StageKind};
pub use pipeline::AnalysisPipeline;
pub use result::{
    Dynamics, Kinematics, MuscleAnalysis, MuscleFiberData, PhysicsValidation, PipelineResult,
    PoseData,
};
pub use stage::{
    FiberRequest, FiberStage, InverseDynamicsStage, InverseKinematicsStage, LoaderStage,
    MotionData, MotionStage, MuscleAnalysisStage, PhysicsStage, PipelineStage, PoseRequest,
    PoseStage,
};
pub use stages::{ForwardSimulator, JsonKinematicsLoader, TrajectoryReplay};
