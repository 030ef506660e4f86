//! Entity configuration assembly for rigcfg.
//!
//! Bundles an initial state, position-actuator groups and collision groups
//! into an immutable [`EntityConfiguration`], resolves them against a model's
//! joint and geometry names, and derives per-pattern action scales. Model
//! loading and task bookkeeping are external capabilities expressed as the
//! [`ModelLoader`] and [`TaskRegistry`] traits.

pub mod action_scale;
pub mod actuator;
pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod init_state;
pub mod loader;
pub mod registry;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use action_scale::ActionScaleMap;
pub use actuator::{resolve_actuators, ActuatorGroup, ResolvedJoint};
pub use collision::{CollisionDefaults, CollisionGroup, CollisionResolution, ResolvedGeom};
pub use config::EntityConfigFile;
pub use entity::{soft_joint_limits, EntityConfiguration};
pub use error::{LoadError, RegistryError};
pub use init_state::InitialState;
pub use loader::{collect_assets, AssetMap, ModelLoader, ModelSpec, StructuralElements};
pub use registry::{
    EnvConfigFactory, PpoRunnerConfig, RunnerKind, TaskRegistration, TaskRegistry, TerrainKind,
    VelocityEnvConfig,
};
