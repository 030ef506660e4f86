//! TOML entity description.
//!
//! ```toml
//! soft_joint_pos_limit_factor = 0.9
//!
//! [init_state]
//! pos = [0.0, 0.0, 0.445]
//! joint_pos = { ".*thigh_joint" = 0.9, ".*calf_joint" = -1.8 }
//!
//! [[actuators]]
//! joints = [".*_hip_joint", ".*_thigh_joint"]
//! rotor_inertia = 0.000111842
//! gear_ratio = 6.0
//! velocity_limit = 30.1
//! effort_limit = 23.7
//!
//! [[collisions]]
//! geoms = [".*_collision"]
//! condim = { "^[FR][LR]_foot_collision$" = 3, ".*_collision" = 1 }
//! ```

use std::path::Path;
use std::sync::Arc;

use rigcfg_actuator::electric::ElectricActuator;
use rigcfg_actuator::gains::{derive_gains, natural_frequency_from_hz};
use rigcfg_core::config::{compile_optional, compile_selector, OverrideSpec};
use rigcfg_core::{ConfigError, Override, RigError};
use serde::{Deserialize, Serialize};

use crate::action_scale::ActionScaleMap;
use crate::actuator::ActuatorGroup;
use crate::collision::CollisionGroup;
use crate::entity::EntityConfiguration;
use crate::init_state::InitialState;
use crate::loader::ModelLoader;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_soft_limit_factor() -> f64 {
    1.0
}
const fn default_action_scale_multiplier() -> f64 {
    0.25
}
const fn default_natural_freq_hz() -> f64 {
    10.0
}
const fn default_damping_ratio() -> f64 {
    2.0
}
const fn default_rot() -> [f64; 4] {
    [1.0, 0.0, 0.0, 0.0]
}
const fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// `[init_state]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitStateConfig {
    #[serde(default)]
    pub pos: [f64; 3],
    #[serde(default = "default_rot")]
    pub rot: [f64; 4],
    #[serde(default)]
    pub joint_pos: Option<OverrideSpec<f64>>,
    #[serde(default)]
    pub joint_vel: Option<OverrideSpec<f64>>,
}

impl Default for InitStateConfig {
    fn default() -> Self {
        Self {
            pos: [0.0; 3],
            rot: default_rot(),
            joint_pos: None,
            joint_vel: None,
        }
    }
}

/// One `[[actuators]]` entry: a gearbox motor driving the matched joints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorConfig {
    pub joints: Vec<String>,
    pub rotor_inertia: f64,
    pub gear_ratio: f64,
    pub velocity_limit: f64,
    pub effort_limit: f64,
    #[serde(default = "default_natural_freq_hz")]
    pub natural_freq_hz: f64,
    #[serde(default = "default_damping_ratio")]
    pub damping_ratio: f64,
    #[serde(default)]
    pub frictionloss: f64,
}

/// One `[[collisions]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionConfig {
    pub geoms: Vec<String>,
    #[serde(default)]
    pub contype: Option<OverrideSpec<i32>>,
    #[serde(default)]
    pub conaffinity: Option<OverrideSpec<i32>>,
    #[serde(default)]
    pub condim: Option<OverrideSpec<i32>>,
    #[serde(default)]
    pub priority: Option<OverrideSpec<i32>>,
    #[serde(default)]
    pub friction: Option<OverrideSpec<Vec<f64>>>,
    #[serde(default)]
    pub solref: Option<OverrideSpec<Vec<f64>>>,
    #[serde(default)]
    pub solimp: Option<OverrideSpec<Vec<f64>>>,
    #[serde(default)]
    pub margin: Option<OverrideSpec<f64>>,
    #[serde(default)]
    pub gap: Option<OverrideSpec<f64>>,
    #[serde(default = "default_true")]
    pub disable_other_geoms: bool,
}

// ---------------------------------------------------------------------------
// EntityConfigFile
// ---------------------------------------------------------------------------

/// File form of an [`EntityConfiguration`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfigFile {
    #[serde(default)]
    pub init_state: InitStateConfig,
    #[serde(default)]
    pub actuators: Vec<ActuatorConfig>,
    #[serde(default)]
    pub collisions: Vec<CollisionConfig>,
    #[serde(default = "default_soft_limit_factor")]
    pub soft_joint_pos_limit_factor: f64,
    #[serde(default = "default_action_scale_multiplier")]
    pub action_scale_multiplier: f64,
}

impl Default for EntityConfigFile {
    fn default() -> Self {
        Self {
            init_state: InitStateConfig::default(),
            actuators: Vec::new(),
            collisions: Vec::new(),
            soft_joint_pos_limit_factor: default_soft_limit_factor(),
            action_scale_multiplier: default_action_scale_multiplier(),
        }
    }
}

impl EntityConfigFile {
    /// Structural checks that need no pattern compilation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factor = self.soft_joint_pos_limit_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(invalid(
                "soft_joint_pos_limit_factor",
                format!("must be in (0, 1], got {factor}"),
            ));
        }
        let multiplier = self.action_scale_multiplier;
        if !(multiplier.is_finite() && multiplier > 0.0) {
            return Err(invalid(
                "action_scale_multiplier",
                format!("must be > 0, got {multiplier}"),
            ));
        }
        for (i, a) in self.actuators.iter().enumerate() {
            if a.joints.is_empty() {
                return Err(invalid(
                    &format!("actuators[{i}].joints"),
                    "must not be empty".into(),
                ));
            }
        }
        for (i, c) in self.collisions.iter().enumerate() {
            if c.geoms.is_empty() {
                return Err(invalid(
                    &format!("collisions[{i}].geoms"),
                    "must not be empty".into(),
                ));
            }
        }
        Ok(())
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Compile patterns, derive gains and assemble the entity.
    pub fn build(&self, loader: Arc<dyn ModelLoader>) -> Result<EntityConfiguration, RigError> {
        self.validate()?;
        let actuators = self
            .actuators
            .iter()
            .map(ActuatorConfig::to_group)
            .collect::<Result<Vec<_>, _>>()?;
        let collisions = self
            .collisions
            .iter()
            .map(CollisionConfig::to_group)
            .collect::<Result<Vec<_>, _>>()?;
        EntityConfiguration::assemble(
            self.init_state.to_state()?,
            actuators,
            collisions,
            self.soft_joint_pos_limit_factor,
            loader,
        )
    }

    /// [`build`](Self::build), plus the action scales under this file's
    /// `action_scale_multiplier`.
    pub fn build_with_action_scale(
        &self,
        loader: Arc<dyn ModelLoader>,
    ) -> Result<(EntityConfiguration, ActionScaleMap), RigError> {
        let entity = self.build(loader)?;
        let scale = entity.action_scale(self.action_scale_multiplier)?;
        Ok((entity, scale))
    }
}

impl InitStateConfig {
    fn to_state(&self) -> Result<InitialState, RigError> {
        let mut state = InitialState::default()
            .with_pos(self.pos)
            .with_rot(self.rot);
        if let Some(pos) = compile_optional(self.joint_pos.clone())? {
            state = state.with_joint_pos(pos);
        }
        if let Some(vel) = compile_optional(self.joint_vel.clone())? {
            state = state.with_joint_vel(vel);
        }
        Ok(state)
    }
}

impl ActuatorConfig {
    fn to_group(&self) -> Result<ActuatorGroup, RigError> {
        let actuator = ElectricActuator::from_gearbox(
            self.rotor_inertia,
            self.gear_ratio,
            self.velocity_limit,
            self.effort_limit,
        )?;
        let gains = derive_gains(
            &actuator,
            natural_frequency_from_hz(self.natural_freq_hz),
            self.damping_ratio,
        )?;
        Ok(
            ActuatorGroup::from_actuator(compile_selector(&self.joints)?, &actuator, gains)
                .with_frictionloss(self.frictionloss),
        )
    }
}

impl CollisionConfig {
    fn to_group(&self) -> Result<CollisionGroup, RigError> {
        Ok(CollisionGroup {
            geoms: compile_selector(&self.geoms)?,
            contype: compile(self.contype.as_ref())?,
            conaffinity: compile(self.conaffinity.as_ref())?,
            condim: compile(self.condim.as_ref())?,
            priority: compile(self.priority.as_ref())?,
            friction: compile(self.friction.as_ref())?,
            solref: compile(self.solref.as_ref())?,
            solimp: compile(self.solimp.as_ref())?,
            margin: compile(self.margin.as_ref())?,
            gap: compile(self.gap.as_ref())?,
            disable_other_geoms: self.disable_other_geoms,
        })
    }
}

fn compile<T: Clone>(spec: Option<&OverrideSpec<T>>) -> Result<Option<Override<T>>, RigError> {
    Ok(compile_optional(spec.cloned())?)
}

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        message,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
