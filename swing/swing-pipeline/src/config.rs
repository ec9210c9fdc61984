//! Pipeline configuration.
//!
//! Every stage is gated by a flag; the defaults run nothing except the
//! inverse kinematics and inverse dynamics sub-steps once the biomechanics
//! stage is switched on.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use swing_types::EngineType;

use crate::error::{PipelineError, Result};

/// Format used for saved stage outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
}

impl OutputFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
        }
    }
}

/// Which stages to run and how.
///
/// # Example
///
/// ```
/// use swing_pipeline::PipelineConfig;
/// use swing_types::EngineType;
///
/// let config = PipelineConfig::default()
///     .with_opensim("models/golfer.osim")
///     .with_physics_engine(EngineType::Drake);
///
/// assert!(config.use_opensim);
/// assert!(config.run_inverse_kinematics);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run pose estimation on the input.
    pub use_openpose: bool,
    /// Pose model name passed to the estimator.
    pub pose_model: String,

    /// Run the biomechanics stage.
    pub use_opensim: bool,
    /// Musculoskeletal model used by the biomechanics stage.
    pub opensim_model_path: Option<PathBuf>,
    /// Inverse kinematics sub-step.
    pub run_inverse_kinematics: bool,
    /// Inverse dynamics sub-step.
    pub run_inverse_dynamics: bool,
    /// Muscle analysis sub-step.
    pub run_muscle_analysis: bool,

    /// Run muscle-fiber simulation on the muscle analysis.
    pub use_myosim: bool,
    /// Parameters forwarded to the fiber simulator.
    pub myosim_parameters: BTreeMap<String, f64>,

    /// Run physics validation.
    pub use_physics_engine: bool,
    /// Engine used for physics validation.
    pub physics_engine_type: EngineType,

    /// Write each stage output to the pipeline's output directory.
    pub save_intermediate_results: bool,
    /// Format of saved outputs.
    pub output_format: OutputFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            use_openpose: false,
            pose_model: "body_25".to_string(),
            use_opensim: false,
            opensim_model_path: None,
            run_inverse_kinematics: true,
            run_inverse_dynamics: true,
            run_muscle_analysis: false,
            use_myosim: false,
            myosim_parameters: BTreeMap::new(),
            use_physics_engine: false,
            physics_engine_type: EngineType::Mujoco,
            save_intermediate_results: true,
            output_format: OutputFormat::Json,
        }
    }
}

impl PipelineConfig {
    /// Enable pose estimation.
    #[must_use]
    pub fn with_openpose(mut self) -> Self {
        self.use_openpose = true;
        self
    }

    /// Enable the biomechanics stage with a model.
    #[must_use]
    pub fn with_opensim(mut self, model: impl Into<PathBuf>) -> Self {
        self.use_opensim = true;
        self.opensim_model_path = Some(model.into());
        self
    }

    /// Enable muscle analysis.
    #[must_use]
    pub fn with_muscle_analysis(mut self) -> Self {
        self.run_muscle_analysis = true;
        self
    }

    /// Enable muscle-fiber simulation.
    #[must_use]
    pub fn with_myosim(mut self, parameters: BTreeMap<String, f64>) -> Self {
        self.use_myosim = true;
        self.myosim_parameters = parameters;
        self
    }

    /// Enable physics validation on an engine.
    #[must_use]
    pub fn with_physics_engine(mut self, engine: EngineType) -> Self {
        self.use_physics_engine = true;
        self.physics_engine_type = engine;
        self
    }

    /// Toggle saving of stage outputs.
    #[must_use]
    pub fn save_intermediate_results(mut self, save: bool) -> Self {
        self.save_intermediate_results = save;
        self
    }

    /// Check the configuration before any stage runs.
    pub fn validate(&self) -> Result<()> {
        if self.use_physics_engine && !self.physics_engine_type.is_physics_engine() {
            return Err(PipelineError::invalid_config(format!(
                "{} is not a physics engine",
                self.physics_engine_type
            )));
        }
        if self.use_openpose && self.pose_model.trim().is_empty() {
            return Err(PipelineError::invalid_config("pose model name is empty"));
        }
        if let Some((name, value)) = self.myosim_parameters.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PipelineError::invalid_config(format!(
                "myosim parameter `{name}` is not finite ({value})"
            )));
        }
        Ok(())
    }
}
