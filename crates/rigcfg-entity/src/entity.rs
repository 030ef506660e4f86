//! Immutable entity configuration.

use std::fmt;
use std::sync::Arc;

use rigcfg_core::{AssemblyError, ResolveError, ResolveOptions, RigError};
use tracing::{debug, warn};

use crate::action_scale::ActionScaleMap;
use crate::actuator::{resolve_actuators, ActuatorGroup, ResolvedJoint};
use crate::collision::{CollisionDefaults, CollisionGroup, CollisionResolution};
use crate::init_state::InitialState;
use crate::loader::ModelLoader;

/// Shrink `[lower, upper]` about its midpoint to `factor` of its width.
pub fn soft_joint_limits(lower: f64, upper: f64, factor: f64) -> (f64, f64) {
    let mid = 0.5 * (lower + upper);
    let half = 0.5 * (upper - lower) * factor;
    (mid - half, mid + half)
}

// ---------------------------------------------------------------------------
// EntityConfiguration
// ---------------------------------------------------------------------------

/// Everything a simulator needs to instantiate one articulated entity.
///
/// Built once by [`EntityConfiguration::assemble`] and never mutated. The
/// model itself is not loaded here; resolution against concrete element names
/// happens on demand through [`resolve_actuators`](Self::resolve_actuators) and
/// [`resolve_collisions`](Self::resolve_collisions).
#[derive(Clone)]
pub struct EntityConfiguration {
    init_state: InitialState,
    actuators: Vec<ActuatorGroup>,
    collisions: Vec<CollisionGroup>,
    soft_joint_pos_limit_factor: f64,
    loader: Arc<dyn ModelLoader>,
}

impl fmt::Debug for EntityConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityConfiguration")
            .field("init_state", &self.init_state)
            .field("actuators", &self.actuators)
            .field("collisions", &self.collisions)
            .field("soft_joint_pos_limit_factor", &self.soft_joint_pos_limit_factor)
            .finish_non_exhaustive()
    }
}

impl EntityConfiguration {
    /// Validate and bundle the parts of an entity.
    ///
    /// Selectors that match nothing in the loader's sample elements are
    /// logged, not rejected.
    pub fn assemble(
        init_state: InitialState,
        actuators: Vec<ActuatorGroup>,
        collisions: Vec<CollisionGroup>,
        soft_joint_pos_limit_factor: f64,
        loader: Arc<dyn ModelLoader>,
    ) -> Result<Self, RigError> {
        for (index, group) in actuators.iter().enumerate() {
            group.validate(index)?;
        }
        for group in &collisions {
            group.validate()?;
        }
        if !(soft_joint_pos_limit_factor > 0.0 && soft_joint_pos_limit_factor <= 1.0) {
            let factor = soft_joint_pos_limit_factor;
            return Err(AssemblyError::SoftLimitFactorOutOfRange(factor).into());
        }

        if let Some(sample) = loader.sample_elements() {
            for (index, group) in actuators.iter().enumerate() {
                if group.joints.select(&sample.joints).is_empty() {
                    let patterns: Vec<&str> = group.joints.sources().collect();
                    warn!(group = index, ?patterns, "actuator group matches no sample joint");
                }
            }
            for (index, group) in collisions.iter().enumerate() {
                if group.geoms.select(&sample.geoms).is_empty() {
                    let patterns: Vec<&str> = group.geoms.sources().collect();
                    warn!(group = index, ?patterns, "collision group matches no sample geometry");
                }
            }
        }

        debug!(
            actuators = actuators.len(),
            collisions = collisions.len(),
            soft_joint_pos_limit_factor,
            "assembled entity configuration"
        );
        Ok(Self {
            init_state,
            actuators,
            collisions,
            soft_joint_pos_limit_factor,
            loader,
        })
    }

    pub const fn init_state(&self) -> &InitialState {
        &self.init_state
    }

    pub fn actuators(&self) -> &[ActuatorGroup] {
        &self.actuators
    }

    pub fn collisions(&self) -> &[CollisionGroup] {
        &self.collisions
    }

    pub const fn soft_joint_pos_limit_factor(&self) -> f64 {
        self.soft_joint_pos_limit_factor
    }

    /// The model loader handle, shared with whoever builds the simulation.
    pub fn loader(&self) -> &Arc<dyn ModelLoader> {
        &self.loader
    }

    /// Per-joint actuator parameters for `joint_names`.
    pub fn resolve_actuators<S: AsRef<str>>(
        &self,
        joint_names: &[S],
        options: ResolveOptions,
    ) -> Result<Vec<ResolvedJoint>, RigError> {
        resolve_actuators(joint_names, &self.actuators, options)
    }

    /// Apply every collision group to `geom_names`, in group order.
    pub fn resolve_collisions<S: AsRef<str>>(
        &self,
        geom_names: &[S],
        options: ResolveOptions,
    ) -> Result<Vec<CollisionResolution>, ResolveError> {
        let defaults = CollisionDefaults::default();
        self.collisions
            .iter()
            .map(|group| group.resolve(geom_names, &defaults, options))
            .collect()
    }

    /// Action scales derived from this entity's actuator groups.
    pub fn action_scale(&self, multiplier: f64) -> Result<ActionScaleMap, RigError> {
        ActionScaleMap::derive(&self.actuators, multiplier)
    }

    /// Soft limits for a joint range under this entity's factor.
    pub fn soft_limits(&self, lower: f64, upper: f64) -> (f64, f64) {
        soft_joint_limits(lower, upper, self.soft_joint_pos_limit_factor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
