//! Velocity-tracking task registrations for the Go2.

use std::sync::Arc;

use rigcfg_core::RigError;
use rigcfg_entity::{
    ModelLoader, PpoRunnerConfig, RegistryError, RunnerKind, TaskRegistration, TaskRegistry,
    TerrainKind, VelocityEnvConfig,
};
use tracing::debug;

use crate::go2;

pub const ROUGH_TASK_ID: &str = "Mjlab-Velocity-Rough-Unitree-Go2";
pub const FLAT_TASK_ID: &str = "Mjlab-Velocity-Flat-Unitree-Go2";

/// PPO settings shared by both Go2 tasks.
pub fn go2_ppo_runner_cfg() -> PpoRunnerConfig {
    PpoRunnerConfig::new("go2_velocity")
}

/// Go2 velocity environment on `terrain`.
pub fn go2_velocity_env_cfg(
    loader: Arc<dyn ModelLoader>,
    terrain: TerrainKind,
) -> Result<VelocityEnvConfig, RigError> {
    Ok(VelocityEnvConfig {
        entity: go2::go2_robot_cfg(loader)?,
        terrain,
        action_scale: go2::go2_action_scale()?,
    })
}

/// Register the rough and flat Go2 velocity tasks.
///
/// Environment configurations are built lazily by each registration's
/// factory, so registering never touches the model.
pub fn register_go2_tasks<R>(
    registry: &mut R,
    loader: &Arc<dyn ModelLoader>,
) -> Result<(), RegistryError>
where
    R: TaskRegistry + ?Sized,
{
    for (task_id, terrain) in [
        (ROUGH_TASK_ID, TerrainKind::Rough),
        (FLAT_TASK_ID, TerrainKind::Flat),
    ] {
        let loader = Arc::clone(loader);
        registry.register(TaskRegistration {
            task_id: task_id.to_owned(),
            env_cfg: Arc::new(move || go2_velocity_env_cfg(Arc::clone(&loader), terrain)),
            rl_cfg: go2_ppo_runner_cfg(),
            runner: RunnerKind::VelocityOnPolicy,
        })?;
        debug!(task_id, ?terrain, "registered task");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
