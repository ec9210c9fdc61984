//! Engine availability and stage lookup.

use std::collections::BTreeMap;
use std::fmt;

use swing_types::EngineType;

use crate::error::{PipelineError, Result};
use crate::result::{Dynamics, Kinematics, MuscleAnalysis, MuscleFiberData, PhysicsValidation, PoseData};
use crate::stage::{
    FiberRequest, FiberStage, InverseDynamicsStage, InverseKinematicsStage, LoaderStage,
    MotionData, MuscleAnalysisStage, PhysicsStage, PipelineStage, PoseRequest, PoseStage,
};

/// Source of stage implementations for the pipeline.
///
/// The coordinator checks [`EngineManager::is_engine_available`] before a
/// stage runs, then asks for the implementation of each sub-step it needs.
pub trait EngineManager {
    /// Whether the engine can be used at all.
    fn is_engine_available(&self, engine: EngineType) -> bool;

    /// Pose estimator backing `OpenPose`.
    fn pose_estimator(&self) -> Option<&PoseStage>;

    /// Loader for kinematics files. The pipeline falls back to JSON when `None`.
    fn kinematics_loader(&self) -> Option<&LoaderStage> {
        None
    }

    /// Inverse kinematics backing `OpenSim`.
    fn inverse_kinematics(&self) -> Option<&InverseKinematicsStage>;

    /// Inverse dynamics backing `OpenSim`.
    fn inverse_dynamics(&self) -> Option<&InverseDynamicsStage>;

    /// Muscle analysis backing `OpenSim`.
    fn muscle_analysis(&self) -> Option<&MuscleAnalysisStage>;

    /// Fiber simulator backing `MyoSim`.
    fn muscle_fiber_simulator(&self) -> Option<&FiberStage>;

    /// Physics validation stage for a physics engine.
    fn physics_validator(&self, engine: EngineType) -> Option<&PhysicsStage>;
}

/// [`EngineManager`] backed by registered stage objects.
///
/// An engine is available once at least one of its stages is registered.
///
/// # Example
///
/// ```
/// use swing_pipeline::{EngineManager, EngineRegistry, ForwardSimulator, StageError, TrajectoryReplay};
/// use swing_types::EngineType;
///
/// struct Hold;
///
/// impl ForwardSimulator for Hold {
///     fn simulate(&self, measured: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, StageError> {
///         Ok(measured.to_vec())
///     }
/// }
///
/// let mut registry = EngineRegistry::new();
/// registry
///     .register_physics(EngineType::Mujoco, TrajectoryReplay::new(EngineType::Mujoco, Hold).unwrap())
///     .unwrap();
///
/// assert!(registry.is_engine_available(EngineType::Mujoco));
/// assert!(!registry.is_engine_available(EngineType::OpenSim));
/// ```
#[derive(Default)]
pub struct EngineRegistry {
    pose_estimator: Option<Box<PoseStage>>,
    kinematics_loader: Option<Box<LoaderStage>>,
    inverse_kinematics: Option<Box<InverseKinematicsStage>>,
    inverse_dynamics: Option<Box<InverseDynamicsStage>>,
    muscle_analysis: Option<Box<MuscleAnalysisStage>>,
    fiber_simulator: Option<Box<FiberStage>>,
    physics: BTreeMap<EngineType, Box<PhysicsStage>>,
}

impl EngineRegistry {
    /// Registry with no engines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the pose estimator.
    pub fn register_pose_estimator(
        &mut self,
        stage: impl for<'a> PipelineStage<PoseRequest<'a>, Output = PoseData> + 'static,
    ) -> &mut Self {
        self.pose_estimator = Some(Box::new(stage));
        self
    }

    /// Register a kinematics file loader.
    pub fn register_kinematics_loader(
        &mut self,
        stage: impl PipelineStage<std::path::Path, Output = Kinematics> + 'static,
    ) -> &mut Self {
        self.kinematics_loader = Some(Box::new(stage));
        self
    }

    /// Register the inverse kinematics sub-step.
    pub fn register_inverse_kinematics(
        &mut self,
        stage: impl for<'a> PipelineStage<MotionData<'a>, Output = Kinematics> + 'static,
    ) -> &mut Self {
        self.inverse_kinematics = Some(Box::new(stage));
        self
    }

    /// Register the inverse dynamics sub-step.
    pub fn register_inverse_dynamics(
        &mut self,
        stage: impl for<'a> PipelineStage<MotionData<'a>, Output = Dynamics> + 'static,
    ) -> &mut Self {
        self.inverse_dynamics = Some(Box::new(stage));
        self
    }

    /// Register the muscle analysis sub-step.
    pub fn register_muscle_analysis(
        &mut self,
        stage: impl for<'a> PipelineStage<MotionData<'a>, Output = MuscleAnalysis> + 'static,
    ) -> &mut Self {
        self.muscle_analysis = Some(Box::new(stage));
        self
    }

    /// Register the muscle-fiber simulator.
    pub fn register_muscle_fiber_simulator(
        &mut self,
        stage: impl for<'a> PipelineStage<FiberRequest<'a>, Output = MuscleFiberData> + 'static,
    ) -> &mut Self {
        self.fiber_simulator = Some(Box::new(stage));
        self
    }

    /// Register physics validation for a physics engine, replacing any
    /// previous registration.
    pub fn register_physics(
        &mut self,
        engine: EngineType,
        stage: impl for<'a> PipelineStage<MotionData<'a>, Output = PhysicsValidation> + 'static,
    ) -> Result<&mut Self> {
        if !engine.is_physics_engine() {
            return Err(PipelineError::invalid_config(format!(
                "{engine} cannot be registered as a physics engine"
            )));
        }
        self.physics.insert(engine, Box::new(stage));
        Ok(self)
    }

    /// Engines currently available, in catalogue order.
    #[must_use]
    pub fn available_engines(&self) -> Vec<EngineType> {
        swing_types::ENGINE_TABLE
            .iter()
            .map(|info| info.engine)
            .filter(|&engine| self.is_engine_available(engine))
            .collect()
    }
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("available", &self.available_engines())
            .field("kinematics_loader", &self.kinematics_loader.is_some())
            .finish()
    }
}

impl EngineManager for EngineRegistry {
    fn is_engine_available(&self, engine: EngineType) -> bool {
        match engine {
            EngineType::OpenPose => self.pose_estimator.is_some(),
            EngineType::OpenSim => {
                self.inverse_kinematics.is_some()
                    || self.inverse_dynamics.is_some()
                    || self.muscle_analysis.is_some()
            }
            EngineType::MyoSim => self.fiber_simulator.is_some(),
            physics => self.physics.contains_key(&physics),
        }
    }

    fn pose_estimator(&self) -> Option<&PoseStage> {
        self.pose_estimator.as_deref()
    }

    fn kinematics_loader(&self) -> Option<&LoaderStage> {
        self.kinematics_loader.as_deref()
    }

    fn inverse_kinematics(&self) -> Option<&InverseKinematicsStage> {
        self.inverse_kinematics.as_deref()
    }

    fn inverse_dynamics(&self) -> Option<&InverseDynamicsStage> {
        self.inverse_dynamics.as_deref()
    }

    fn muscle_analysis(&self) -> Option<&MuscleAnalysisStage> {
        self.muscle_analysis.as_deref()
    }

    fn muscle_fiber_simulator(&self) -> Option<&FiberStage> {
        self.fiber_simulator.as_deref()
    }

    fn physics_validator(&self, engine: EngineType) -> Option<&PhysicsStage> {
        self.physics.get(&engine).map(Box::as_ref)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::StageError;

    struct NoDynamics;

    impl PipelineStage<MotionData<'_>> for NoDynamics {
        type Output = Dynamics;

        fn process(&self, _: &MotionData<'_>) -> std::result::Result<Dynamics, StageError> {
            Ok(Dynamics::default())
        }
    }

    struct Replay(EngineType);

    impl PipelineStage<MotionData<'_>> for Replay {
        type Output = PhysicsValidation;

        fn process(&self, motion: &MotionData<'_>) -> std::result::Result<PhysicsValidation, StageError> {
            Ok(PhysicsValidation {
                engine: self.0,
                simulated_trajectory: motion.trajectory(),
                measured_trajectory: motion.trajectory(),
                rmse: 0.0,
                max_error: 0.0,
            })
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = EngineRegistry::new();
        for info in &swing_types::ENGINE_TABLE {
            assert!(!registry.is_engine_available(info.engine));
        }
        assert!(registry.available_engines().is_empty());
        assert!(registry.physics_validator(EngineType::Mujoco).is_none());
    }

    #[test]
    fn test_opensim_available_with_any_substep() {
        let mut registry = EngineRegistry::new();
        registry.register_inverse_dynamics(NoDynamics);
        assert!(registry.is_engine_available(EngineType::OpenSim));
        assert!(registry.inverse_kinematics().is_none());
        assert!(registry.inverse_dynamics().is_some());
    }

    #[test]
    fn test_physics_registration() {
        let mut registry = EngineRegistry::new();
        registry.register_physics(EngineType::Drake, Replay(EngineType::Drake)).unwrap();
        assert_eq!(registry.available_engines(), vec![EngineType::Drake]);

        let stage = registry.physics_validator(EngineType::Drake).unwrap();
        assert_eq!(stage.process(&MotionData::Empty).unwrap().engine, EngineType::Drake);

        let err = registry
            .register_physics(EngineType::OpenPose, Replay(EngineType::OpenPose))
            .unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_debug_lists_engines() {
        let mut registry = EngineRegistry::new();
        registry.register_inverse_dynamics(NoDynamics);
        assert!(format!("{registry:?}").contains("OpenSim"));
    }
}
