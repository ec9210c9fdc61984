//! Built-in stage implementations.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use swing_types::EngineType;
use swing_validate::metrics::{trajectory_error, ErrorStats};
use swing_validate::ComparisonError;
use tracing::debug;

use crate::error::StageError;
use crate::result::{Kinematics, PhysicsValidation};
use crate::stage::{MotionData, PipelineStage};

/// Reads [`Kinematics`] from a JSON file.
///
/// Missing fields default to empty series.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonKinematicsLoader;

impl PipelineStage<Path> for JsonKinematicsLoader {
    type Output = Kinematics;

    fn process(&self, path: &Path) -> Result<Kinematics, StageError> {
        let reader = BufReader::new(File::open(path)?);
        let kinematics: Kinematics = serde_json::from_reader(reader)?;

        if !kinematics.time.is_empty() && kinematics.time.len() != kinematics.joint_angles.len() {
            return Err(StageError::invalid_input(format!(
                "{}: {} time samples but {} frames of joint angles",
                path.display(),
                kinematics.time.len(),
                kinematics.joint_angles.len()
            )));
        }

        debug!(path = %path.display(), frames = kinematics.joint_angles.len(), "kinematics loaded");
        Ok(kinematics)
    }
}

/// Forward dynamics behind a physics validation stage.
pub trait ForwardSimulator {
    /// Simulate the motion implied by `measured`, returning one row per frame.
    fn simulate(&self, measured: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, StageError>;
}

/// Physics validation by replaying measured motion through a simulator and
/// measuring how far the simulation drifts from it.
#[derive(Debug, Clone)]
pub struct TrajectoryReplay<S> {
    engine: EngineType,
    simulator: S,
}

impl<S: ForwardSimulator> TrajectoryReplay<S> {
    /// Create a replay stage for a physics engine.
    pub fn new(engine: EngineType, simulator: S) -> Result<Self, StageError> {
        if !engine.is_physics_engine() {
            return Err(StageError::invalid_input(format!(
                "{engine} cannot run physics validation"
            )));
        }
        Ok(Self { engine, simulator })
    }

    /// Engine this stage reports in its output.
    #[must_use]
    pub fn engine(&self) -> EngineType {
        self.engine
    }
}

impl<S: ForwardSimulator> PipelineStage<MotionData<'_>> for TrajectoryReplay<S> {
    type Output = PhysicsValidation;

    fn process(&self, motion: &MotionData<'_>) -> Result<PhysicsValidation, StageError> {
        let measured = motion.trajectory();
        let simulated = self.simulator.simulate(&measured)?;

        let stats = match trajectory_error(&measured, &simulated) {
            Ok(stats) => stats,
            // Nothing to compare, e.g. no prior stage produced motion.
            Err(ComparisonError::EmptySeries) => ErrorStats::default(),
            Err(err) => return Err(StageError::invalid_input(err.to_string())),
        };

        debug!(
            engine = %self.engine,
            frames = measured.len(),
            rmse = stats.rmse(),
            "trajectory replay complete"
        );

        Ok(PhysicsValidation {
            engine: self.engine,
            rmse: stats.rmse(),
            max_error: stats.max_abs_diff,
            simulated_trajectory: simulated,
            measured_trajectory: measured,
        })
    }
}
