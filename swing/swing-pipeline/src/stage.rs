//! The stage abstraction and the inputs stages receive.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::StageError;
use crate::result::{
    Dynamics, Kinematics, MuscleAnalysis, MuscleFiberData, PhysicsValidation, PoseData,
};

/// One processing step: borrow an input, produce an owned output.
///
/// Stages are pure with respect to the coordinator; they never see the
/// [`PipelineResult`](crate::PipelineResult) or other stages.
pub trait PipelineStage<I: ?Sized> {
    /// Data produced by the stage.
    type Output;

    /// Transform `input` into this stage's output.
    fn process(&self, input: &I) -> Result<Self::Output, StageError>;
}

/// Motion data handed to biomechanics and physics stages.
///
/// The coordinator passes the most specific output available so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionData<'a> {
    /// Joint angles from inverse kinematics or loaded from disk.
    Kinematics(&'a Kinematics),
    /// Raw keypoints from pose estimation.
    Pose(&'a PoseData),
    /// No prior stage produced motion.
    Empty,
}

impl MotionData<'_> {
    /// Frame-major trajectory carried by the motion.
    ///
    /// Kinematics yield joint angles, pose data yields flattened keypoints.
    #[must_use]
    pub fn trajectory(&self) -> Vec<Vec<f64>> {
        match self {
            Self::Kinematics(kinematics) => kinematics.joint_angles.clone(),
            Self::Pose(pose) => pose.flattened_keypoints(),
            Self::Empty => Vec::new(),
        }
    }

    /// True for [`MotionData::Empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Input to pose estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseRequest<'a> {
    /// Video to process.
    pub video: &'a Path,
    /// Pose model name.
    pub model: &'a str,
}

/// Input to muscle-fiber simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiberRequest<'a> {
    /// Muscle analysis to drive the fibers with.
    pub muscles: &'a MuscleAnalysis,
    /// Simulator parameters from the configuration.
    pub parameters: &'a BTreeMap<String, f64>,
}

/// Pose estimator: video to keypoints.
pub type PoseStage = dyn for<'a> PipelineStage<PoseRequest<'a>, Output = PoseData>;

/// Kinematics loader: file to joint angles.
pub type LoaderStage = dyn PipelineStage<Path, Output = Kinematics>;

/// Biomechanics or physics stage consuming motion.
pub type MotionStage<O> = dyn for<'a> PipelineStage<MotionData<'a>, Output = O>;

/// Inverse kinematics stage.
pub type InverseKinematicsStage = MotionStage<Kinematics>;

/// Inverse dynamics stage.
pub type InverseDynamicsStage = MotionStage<Dynamics>;

/// Muscle analysis stage.
pub type MuscleAnalysisStage = MotionStage<MuscleAnalysis>;

/// Physics validation stage.
pub type PhysicsStage = MotionStage<PhysicsValidation>;

/// Muscle-fiber simulator.
pub type FiberStage = dyn for<'a> PipelineStage<FiberRequest<'a>, Output = MuscleFiberData>;
