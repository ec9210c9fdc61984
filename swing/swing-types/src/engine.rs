//! Engine catalogue.
//!
//! Every engine the suite can drive has a fixed record in [`ENGINE_TABLE`]:
//! its identifier, functional category and display name. Category queries are
//! plain lookups over that table.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// Functional category of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EngineCategory {
    /// Forward dynamics simulation.
    Physics,
    /// Musculoskeletal modeling.
    Biomechanics,
    /// Motion capture and pose estimation.
    InputProcessing,
}

impl EngineCategory {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Physics, Self::Biomechanics, Self::InputProcessing];

    /// Stable identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Physics => "physics",
            Self::Biomechanics => "biomechanics",
            Self::InputProcessing => "input_processing",
        }
    }

    /// Human-readable heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Physics => "Physics Engines",
            Self::Biomechanics => "Biomechanics Engines",
            Self::InputProcessing => "Input Processing",
        }
    }
}

impl fmt::Display for EngineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engines known to the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EngineType {
    /// `MuJoCo` contact dynamics.
    #[cfg_attr(feature = "serde", serde(rename = "mujoco"))]
    Mujoco,
    /// Drake multibody plant.
    #[cfg_attr(feature = "serde", serde(rename = "drake"))]
    Drake,
    /// Pinocchio rigid-body algorithms.
    #[cfg_attr(feature = "serde", serde(rename = "pinocchio"))]
    Pinocchio,
    /// MATLAB 2D Simscape model.
    #[cfg_attr(feature = "serde", serde(rename = "matlab_2d"))]
    Matlab2d,
    /// MATLAB 3D Simscape model.
    #[cfg_attr(feature = "serde", serde(rename = "matlab_3d"))]
    Matlab3d,
    /// Simplified double pendulum.
    #[cfg_attr(feature = "serde", serde(rename = "pendulum"))]
    Pendulum,
    /// `OpenSim` musculoskeletal model.
    #[cfg_attr(feature = "serde", serde(rename = "opensim"))]
    OpenSim,
    /// `MyoSim` muscle fiber model.
    #[cfg_attr(feature = "serde", serde(rename = "myosim"))]
    MyoSim,
    /// `OpenPose` pose estimation.
    #[cfg_attr(feature = "serde", serde(rename = "openpose"))]
    OpenPose,
}

/// Fixed metadata attached to an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineInfo {
    /// The engine described.
    pub engine: EngineType,
    /// Unique identifier, e.g. `"opensim"`.
    pub id: &'static str,
    /// Functional category.
    pub category: EngineCategory,
    /// Name shown to users.
    pub display_name: &'static str,
}

/// One record per [`EngineType`], in declaration order.
pub static ENGINE_TABLE: [EngineInfo; 9] = [
    EngineInfo {
        engine: EngineType::Mujoco,
        id: "mujoco",
        category: EngineCategory::Physics,
        display_name: "MuJoCo Contact Dynamics",
    },
    EngineInfo {
        engine: EngineType::Drake,
        id: "drake",
        category: EngineCategory::Physics,
        display_name: "Drake Trajectory Optimization",
    },
    EngineInfo {
        engine: EngineType::Pinocchio,
        id: "pinocchio",
        category: EngineCategory::Physics,
        display_name: "Pinocchio Rigid Body",
    },
    EngineInfo {
        engine: EngineType::Matlab2d,
        id: "matlab_2d",
        category: EngineCategory::Physics,
        display_name: "MATLAB 2D Simscape",
    },
    EngineInfo {
        engine: EngineType::Matlab3d,
        id: "matlab_3d",
        category: EngineCategory::Physics,
        display_name: "MATLAB 3D Simscape",
    },
    EngineInfo {
        engine: EngineType::Pendulum,
        id: "pendulum",
        category: EngineCategory::Physics,
        display_name: "Simplified Pendulum",
    },
    EngineInfo {
        engine: EngineType::OpenSim,
        id: "opensim",
        category: EngineCategory::Biomechanics,
        display_name: "OpenSim Musculoskeletal",
    },
    EngineInfo {
        engine: EngineType::MyoSim,
        id: "myosim",
        category: EngineCategory::Biomechanics,
        display_name: "MyoSim Muscle Fiber",
    },
    EngineInfo {
        engine: EngineType::OpenPose,
        id: "openpose",
        category: EngineCategory::InputProcessing,
        display_name: "OpenPose Motion Capture",
    },
];

impl EngineType {
    /// Table record for this engine.
    #[must_use]
    pub fn info(self) -> &'static EngineInfo {
        // Table rows follow declaration order.
        &ENGINE_TABLE[self as usize]
    }

    /// Unique identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        self.info().id
    }

    /// Functional category.
    #[must_use]
    pub fn category(self) -> EngineCategory {
        self.info().category
    }

    /// Name shown to users.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    /// Check if this is a physics simulation engine.
    #[must_use]
    pub fn is_physics_engine(self) -> bool {
        self.category() == EngineCategory::Physics
    }

    /// Check if this is a biomechanics modeling engine.
    #[must_use]
    pub fn is_biomechanics_engine(self) -> bool {
        self.category() == EngineCategory::Biomechanics
    }

    /// Check if this is an input processing engine.
    #[must_use]
    pub fn is_input_processor(self) -> bool {
        self.category() == EngineCategory::InputProcessing
    }

    /// All engines in a category, in table order.
    pub fn by_category(category: EngineCategory) -> impl Iterator<Item = Self> {
        ENGINE_TABLE
            .iter()
            .filter(move |info| info.category == category)
            .map(|info| info.engine)
    }

    /// All physics simulation engines.
    pub fn physics_engines() -> impl Iterator<Item = Self> {
        Self::by_category(EngineCategory::Physics)
    }

    /// All biomechanics modeling engines.
    pub fn biomechanics_engines() -> impl Iterator<Item = Self> {
        Self::by_category(EngineCategory::Biomechanics)
    }

    /// All input processing engines.
    pub fn input_processors() -> impl Iterator<Item = Self> {
        Self::by_category(EngineCategory::InputProcessing)
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for EngineType {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ENGINE_TABLE
            .iter()
            .find(|info| info.id == needle)
            .map(|info| info.engine)
            .ok_or_else(|| TraceError::unknown_engine(s))
    }
}
