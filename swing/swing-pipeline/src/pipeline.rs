//! The analysis pipeline coordinator.

use std::error::Error as StdError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use swing_types::EngineType;
use tracing::{debug, error, info, info_span, warn, Span};

use crate::config::{OutputFormat, PipelineConfig};
use crate::engine::EngineManager;
use crate::error::{PipelineError, Result, StageContext, StageError, StageKind};
use crate::result::{Kinematics, MuscleAnalysis, MuscleFiberData, PhysicsValidation, PipelineResult, PoseData};
use crate::stage::{FiberRequest, MotionData, MotionStage, PipelineStage, PoseRequest};
use crate::stages::JsonKinematicsLoader;

/// Chains engines into a four-stage analysis run.
///
/// 1. Pose estimation: input path to [`PoseData`].
/// 2. Biomechanics: inverse kinematics, inverse dynamics and muscle analysis.
/// 3. Muscle-fiber simulation on the muscle analysis.
/// 4. Physics validation of the most specific motion available.
///
/// Each stage runs only when enabled in the [`PipelineConfig`]; each stage
/// input is the most specific output produced before it. The first failure
/// aborts the run.
#[derive(Debug)]
pub struct AnalysisPipeline<M> {
    manager: M,
    output_dir: Option<PathBuf>,
    span: Span,
}

impl<M: EngineManager> AnalysisPipeline<M> {
    /// Create a pipeline drawing stages from `manager`.
    pub fn new(manager: M) -> Self {
        Self {
            manager,
            output_dir: None,
            span: info_span!("analysis_pipeline"),
        }
    }

    /// Directory for stage outputs when `save_intermediate_results` is set.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// The engine manager.
    pub fn manager(&self) -> &M {
        &self.manager
    }

    /// Run every stage enabled in `config` on `input_path`.
    ///
    /// Configuration errors are returned before any stage runs. Any later
    /// failure is returned as [`PipelineError::Execution`] carrying the cause
    /// and the partial result, whose `success` is `false` and whose `errors`
    /// holds the failure message.
    pub fn run_full_pipeline(&self, input_path: &Path, config: &PipelineConfig) -> Result<PipelineResult> {
        let _enter = self.span.enter();
        config.validate()?;

        let mut result = PipelineResult::default();
        match self.execute(input_path, config, &mut result) {
            Ok(()) => {
                result.success = true;
                info!(
                    stages = result.stages_completed(),
                    warnings = result.warnings.len(),
                    "pipeline completed"
                );
                Ok(result)
            }
            Err(err) => {
                let message = error_chain(&err);
                error!(error = %message, "pipeline failed");
                result.success = false;
                result.errors.push(message);
                Err(PipelineError::Execution {
                    source: Box::new(err),
                    result: Box::new(result),
                })
            }
        }
    }

    /// Video to pose to biomechanics.
    pub fn run_openpose_to_opensim(&self, video_path: &Path, opensim_model: &Path) -> Result<PipelineResult> {
        let config = PipelineConfig::default()
            .with_openpose()
            .with_opensim(opensim_model);
        self.run_full_pipeline(video_path, &config)
    }

    /// Kinematics to biomechanics to `MuJoCo` physics validation.
    pub fn run_opensim_to_mujoco(&self, kinematics_path: &Path, opensim_model: &Path) -> Result<PipelineResult> {
        let config = PipelineConfig::default()
            .with_opensim(opensim_model)
            .with_physics_engine(EngineType::Mujoco);
        self.run_full_pipeline(kinematics_path, &config)
    }

    fn execute(&self, input_path: &Path, config: &PipelineConfig, result: &mut PipelineResult) -> Result<()> {
        if config.use_openpose {
            info!(stage = 1, input = %input_path.display(), model = %config.pose_model, "running pose estimation");
            let pose = self.estimate_pose(input_path, config)?;
            self.save(config, StageKind::PoseEstimation, &pose)?;
            result.pose_data = Some(pose);
        }

        if config.use_opensim {
            info!(stage = 2, model = ?config.opensim_model_path, "running biomechanics analysis");
            self.run_biomechanics(input_path, config, result)?;
        }

        if config.use_myosim {
            match &result.muscle_analysis {
                Some(muscles) => {
                    info!(stage = 3, muscles = muscles.muscle_names.len(), "running muscle fiber simulation");
                    let fibers = self.simulate_fibers(muscles, config)?;
                    self.save(config, StageKind::MuscleFiber, &fibers)?;
                    result.muscle_fiber_data = Some(fibers);
                }
                None => {
                    let note = "muscle fiber simulation skipped: no muscle analysis available";
                    warn!(stage = 3, "{note}");
                    result.warnings.push(note.to_string());
                }
            }
        }

        if config.use_physics_engine {
            let engine = config.physics_engine_type;
            let motion = match (&result.kinematics, &result.pose_data) {
                (Some(kinematics), _) => MotionData::Kinematics(kinematics),
                (None, Some(pose)) => MotionData::Pose(pose),
                (None, None) => MotionData::Empty,
            };
            info!(stage = 4, engine = %engine, empty_input = motion.is_empty(), "running physics validation");
            let validation = self.validate_physics(engine, &motion)?;
            self.save(config, StageKind::PhysicsValidation, &validation)?;
            result.physics_validation = Some(validation);
        }

        Ok(())
    }

    fn require(&self, engine: EngineType) -> Result<()> {
        if self.manager.is_engine_available(engine) {
            Ok(())
        } else {
            Err(PipelineError::EngineUnavailable { engine })
        }
    }

    fn estimate_pose(&self, video: &Path, config: &PipelineConfig) -> Result<PoseData> {
        self.require(EngineType::OpenPose)?;
        let stage = self.manager.pose_estimator().ok_or(PipelineError::MissingStage {
            stage: StageKind::PoseEstimation,
        })?;
        let request = PoseRequest {
            video,
            model: &config.pose_model,
        };
        stage.process(&request).in_stage(StageKind::PoseEstimation)
    }

    fn load_kinematics(&self, path: &Path) -> Result<Kinematics> {
        let outcome = match self.manager.kinematics_loader() {
            Some(loader) => loader.process(path),
            None => JsonKinematicsLoader.process(path),
        };
        outcome.in_stage(StageKind::KinematicsLoading)
    }

    fn run_biomechanics(&self, input_path: &Path, config: &PipelineConfig, result: &mut PipelineResult) -> Result<()> {
        self.require(EngineType::OpenSim)?;

        let loaded;
        let stage_input = match &result.pose_data {
            Some(pose) => MotionData::Pose(pose),
            None => {
                loaded = self.load_kinematics(input_path)?;
                MotionData::Kinematics(&loaded)
            }
        };

        let kinematics = config
            .run_inverse_kinematics
            .then(|| {
                motion_step(
                    self.manager.inverse_kinematics(),
                    StageKind::InverseKinematics,
                    &stage_input,
                )
            })
            .transpose()?;

        // Later sub-steps prefer fresh inverse kinematics over the stage input.
        let motion = kinematics.as_ref().map_or(stage_input, MotionData::Kinematics);

        let dynamics = config
            .run_inverse_dynamics
            .then(|| motion_step(self.manager.inverse_dynamics(), StageKind::InverseDynamics, &motion))
            .transpose()?;
        let muscles: Option<MuscleAnalysis> = config
            .run_muscle_analysis
            .then(|| motion_step(self.manager.muscle_analysis(), StageKind::MuscleAnalysis, &motion))
            .transpose()?;

        if let Some(kinematics) = &kinematics {
            self.save(config, StageKind::InverseKinematics, kinematics)?;
        }
        if let Some(dynamics) = &dynamics {
            self.save(config, StageKind::InverseDynamics, dynamics)?;
        }
        if let Some(muscles) = &muscles {
            self.save(config, StageKind::MuscleAnalysis, muscles)?;
        }

        result.kinematics = kinematics;
        result.dynamics = dynamics;
        result.muscle_analysis = muscles;
        Ok(())
    }

    fn simulate_fibers(&self, muscles: &MuscleAnalysis, config: &PipelineConfig) -> Result<MuscleFiberData> {
        self.require(EngineType::MyoSim)?;
        let stage = self.manager.muscle_fiber_simulator().ok_or(PipelineError::MissingStage {
            stage: StageKind::MuscleFiber,
        })?;
        let request = FiberRequest {
            muscles,
            parameters: &config.myosim_parameters,
        };
        stage.process(&request).in_stage(StageKind::MuscleFiber)
    }

    fn validate_physics(&self, engine: EngineType, motion: &MotionData<'_>) -> Result<PhysicsValidation> {
        self.require(engine)?;
        motion_step(
            self.manager.physics_validator(engine),
            StageKind::PhysicsValidation,
            motion,
        )
    }

    fn save<T: Serialize>(&self, config: &PipelineConfig, stage: StageKind, data: &T) -> Result<()> {
        let Some(dir) = self
            .output_dir
            .as_deref()
            .filter(|_| config.save_intermediate_results)
        else {
            return Ok(());
        };

        let path = dir.join(format!("{stage}.{}", config.output_format.extension()));
        write_output(dir, &path, data, config.output_format).in_stage(stage)?;
        debug!(stage = %stage, path = %path.display(), "stage output saved");
        Ok(())
    }
}

fn motion_step<O>(stage: Option<&MotionStage<O>>, kind: StageKind, motion: &MotionData<'_>) -> Result<O> {
    let stage = stage.ok_or(PipelineError::MissingStage { stage: kind })?;
    debug!(stage = %kind, "running sub-step");
    stage.process(motion).in_stage(kind)
}

fn write_output<T: Serialize>(
    dir: &Path,
    path: &Path,
    data: &T,
    format: OutputFormat,
) -> std::result::Result<(), StageError> {
    fs::create_dir_all(dir)?;
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Json => serde_json::to_writer_pretty(&mut writer, data)?,
    }
    writer.flush()?;
    Ok(())
}

/// `outer: cause: root cause`
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
