//! Task registration payloads and the external registry capability.

use std::fmt;
use std::sync::Arc;

use rigcfg_core::RigError;

use crate::action_scale::ActionScaleMap;
use crate::entity::EntityConfiguration;
use crate::error::RegistryError;

/// Terrain an environment is generated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainKind {
    Flat,
    Rough,
}

/// Environment configuration for a velocity-tracking task.
#[derive(Debug, Clone)]
pub struct VelocityEnvConfig {
    pub entity: EntityConfiguration,
    pub terrain: TerrainKind,
    pub action_scale: ActionScaleMap,
}

/// Builds a fresh environment configuration on every call.
pub type EnvConfigFactory = Arc<dyn Fn() -> Result<VelocityEnvConfig, RigError> + Send + Sync>;

/// Training loop implementation a task runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerKind {
    /// On-policy runner with velocity-command logging.
    VelocityOnPolicy,
}

/// PPO runner settings shared by the tasks of one robot.
#[derive(Debug, Clone, PartialEq)]
pub struct PpoRunnerConfig {
    pub experiment_name: String,
    pub num_steps_per_env: u32,
    pub max_iterations: u32,
    pub save_interval: u32,
}

impl PpoRunnerConfig {
    pub fn new(experiment_name: impl Into<String>) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            num_steps_per_env: 24,
            max_iterations: 10_000,
            save_interval: 50,
        }
    }

    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

// ---------------------------------------------------------------------------
// TaskRegistration
// ---------------------------------------------------------------------------

/// One task: identifier, environment factory, training config and runner.
#[derive(Clone)]
pub struct TaskRegistration {
    pub task_id: String,
    pub env_cfg: EnvConfigFactory,
    pub rl_cfg: PpoRunnerConfig,
    pub runner: RunnerKind,
}

impl fmt::Debug for TaskRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRegistration")
            .field("task_id", &self.task_id)
            .field("rl_cfg", &self.rl_cfg)
            .field("runner", &self.runner)
            .finish_non_exhaustive()
    }
}

impl TaskRegistration {
    /// Run the environment factory.
    pub fn build_env(&self) -> Result<VelocityEnvConfig, RigError> {
        (self.env_cfg)()
    }
}

/// Externally supplied task registry.
pub trait TaskRegistry {
    /// Record a task. Identifiers must be non-empty and unique.
    fn register(&mut self, registration: TaskRegistration) -> Result<(), RegistryError>;

    /// Look up a task by identifier.
    fn get(&self, task_id: &str) -> Option<&TaskRegistration>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
