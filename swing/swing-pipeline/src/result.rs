//! Data produced by each stage and the aggregate run result.
//!
//! Series are frame-major: `joint_angles[f][c]` is coordinate `c` at frame `f`.

use serde::{Deserialize, Serialize};
use swing_types::{EngineType, Vector3};

/// Keypoints from pose estimation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseData {
    /// Image-space `[x, y]` per frame and joint.
    pub keypoints: Vec<Vec<[f64; 2]>>,
    /// Detection confidence per frame and joint.
    pub confidence: Vec<Vec<f64>>,
    /// Video frame rate in Hz.
    pub frame_rate: f64,
    /// Number of frames processed.
    pub num_frames: usize,
    /// Joint names, one per keypoint column.
    pub joint_names: Vec<String>,
}

impl PoseData {
    /// Keypoints flattened to `[x0, y0, x1, y1, ...]` per frame.
    #[must_use]
    pub fn flattened_keypoints(&self) -> Vec<Vec<f64>> {
        self.keypoints
            .iter()
            .map(|frame| frame.iter().flatten().copied().collect())
            .collect()
    }
}

/// Joint angles over time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kinematics {
    /// Frame times in seconds.
    pub time: Vec<f64>,
    /// Coordinate values per frame.
    pub joint_angles: Vec<Vec<f64>>,
    /// Coordinate names, one per column.
    pub coordinate_names: Vec<String>,
    /// RMS marker error per frame.
    pub marker_errors: Vec<f64>,
}

/// Joint moments and reaction loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dynamics {
    /// Generalized forces per frame and coordinate.
    pub joint_moments: Vec<Vec<f64>>,
    /// Ground reaction force and moment components per frame.
    pub ground_reactions: Vec<Vec<f64>>,
    /// Whole-body center of mass per frame.
    pub center_of_mass: Vec<Vector3<f64>>,
}

/// Muscle-level quantities per frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuscleAnalysis {
    /// Muscle names, one per column.
    pub muscle_names: Vec<String>,
    /// Muscle forces.
    pub forces: Vec<Vec<f64>>,
    /// Musculotendon lengths.
    pub lengths: Vec<Vec<f64>>,
    /// Lengthening velocities.
    pub velocities: Vec<Vec<f64>>,
    /// Activations in `[0, 1]`.
    pub activations: Vec<Vec<f64>>,
}

/// Fiber-level muscle simulation output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MuscleFiberData {
    /// Sarcomere forces per frame.
    pub fiber_forces: Vec<Vec<f64>>,
    /// Cross-bridge population distribution per frame.
    pub crossbridge_states: Vec<Vec<f64>>,
    /// Intracellular calcium per frame.
    pub calcium_concentrations: Vec<f64>,
}

/// Measured motion compared against a forward simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsValidation {
    /// Engine that produced the simulated trajectory.
    pub engine: EngineType,
    /// Forward-simulated trajectory.
    pub simulated_trajectory: Vec<Vec<f64>>,
    /// Trajectory the simulation was driven from.
    pub measured_trajectory: Vec<Vec<f64>>,
    /// RMS difference between the trajectories.
    pub rmse: f64,
    /// Largest absolute difference.
    pub max_error: f64,
}

/// Everything a pipeline run produced.
///
/// Stage fields are `None` when the stage did not run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Stage 1 output.
    pub pose_data: Option<PoseData>,
    /// Stage 2 inverse kinematics output.
    pub kinematics: Option<Kinematics>,
    /// Stage 2 inverse dynamics output.
    pub dynamics: Option<Dynamics>,
    /// Stage 2 muscle analysis output.
    pub muscle_analysis: Option<MuscleAnalysis>,
    /// Stage 3 output.
    pub muscle_fiber_data: Option<MuscleFiberData>,
    /// Stage 4 output.
    pub physics_validation: Option<PhysicsValidation>,

    /// Every requested stage completed.
    pub success: bool,
    /// Failure messages; at most one since a failure aborts the run.
    pub errors: Vec<String>,
    /// Non-fatal notes, such as skipped stages.
    pub warnings: Vec<String>,
}

impl PipelineResult {
    /// Number of top-level stages that produced output.
    #[must_use]
    pub fn stages_completed(&self) -> usize {
        [
            self.pose_data.is_some(),
            self.kinematics.is_some() || self.dynamics.is_some() || self.muscle_analysis.is_some(),
            self.muscle_fiber_data.is_some(),
            self.physics_validation.is_some(),
        ]
        .into_iter()
        .filter(|&done| done)
        .count()
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
