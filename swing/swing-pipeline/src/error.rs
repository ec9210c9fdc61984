//! Error types for the analysis pipeline.
//!
//! Stage implementations fail with [`StageError`]. The coordinator tags it
//! with the stage that raised it and, at the top level, wraps everything in
//! [`PipelineError::Execution`] together with the partial result.

use std::fmt;

use swing_types::EngineType;
use thiserror::Error;

use crate::result::PipelineResult;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The stages and sub-steps the coordinator can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// Stage 1: pose estimation from video.
    PoseEstimation,
    /// Stage 2 input: kinematics read from the input path.
    KinematicsLoading,
    /// Stage 2: inverse kinematics.
    InverseKinematics,
    /// Stage 2: inverse dynamics.
    InverseDynamics,
    /// Stage 2: muscle analysis.
    MuscleAnalysis,
    /// Stage 3: muscle-fiber simulation.
    MuscleFiber,
    /// Stage 4: physics validation.
    PhysicsValidation,
}

impl StageKind {
    /// Identifier used in logs and saved file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PoseEstimation => "pose_estimation",
            Self::KinematicsLoading => "kinematics_loading",
            Self::InverseKinematics => "inverse_kinematics",
            Self::InverseDynamics => "inverse_dynamics",
            Self::MuscleAnalysis => "muscle_analysis",
            Self::MuscleFiber => "muscle_fiber",
            Self::PhysicsValidation => "physics_validation",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure inside a single stage implementation.
#[derive(Debug, Error)]
pub enum StageError {
    /// The engine reported a failure.
    #[error("engine failure: {0}")]
    Engine(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stage data could not be parsed or serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The stage received data it cannot process.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl StageError {
    /// Create an engine failure.
    #[must_use]
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Check if this is an I/O error.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

/// Errors raised by the pipeline coordinator.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration rejected before any stage ran.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// A stage needs an engine the manager cannot provide.
    #[error("engine `{engine}` is not available")]
    EngineUnavailable {
        /// The missing engine.
        engine: EngineType,
    },

    /// The engine is available but has no implementation for a sub-step.
    #[error("no implementation registered for {stage}")]
    MissingStage {
        /// The sub-step that could not run.
        stage: StageKind,
    },

    /// A stage implementation failed.
    #[error("{stage} failed")]
    Stage {
        /// The failing stage.
        stage: StageKind,
        /// Underlying failure.
        source: StageError,
    },

    /// The run was aborted; carries the results gathered so far.
    #[error("pipeline execution failed")]
    Execution {
        /// What aborted the run.
        source: Box<PipelineError>,
        /// Partial results, with `success == false` and the message in `errors`.
        result: Box<PipelineResult>,
    },
}

impl PipelineError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Wrap a stage failure.
    #[must_use]
    pub fn stage(stage: StageKind, source: StageError) -> Self {
        Self::Stage { stage, source }
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }

    /// Partial results of an aborted run.
    #[must_use]
    pub fn partial_result(&self) -> Option<&PipelineResult> {
        match self {
            Self::Execution { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The innermost pipeline error, looking through [`PipelineError::Execution`].
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Execution { source, .. } => source.root(),
            other => other,
        }
    }

    /// The stage that failed, if a stage implementation raised the error.
    #[must_use]
    pub fn failed_stage(&self) -> Option<StageKind> {
        match self.root() {
            Self::Stage { stage, .. } | Self::MissingStage { stage } => Some(*stage),
            _ => None,
        }
    }
}

/// Attach a stage to a [`StageError`] result.
pub(crate) trait StageContext<T> {
    fn in_stage(self, stage: StageKind) -> Result<T>;
}

impl<T> StageContext<T> for std::result::Result<T, StageError> {
    fn in_stage(self, stage: StageKind) -> Result<T> {
        self.map_err(|source| PipelineError::stage(stage, source))
    }
}
