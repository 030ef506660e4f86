//! Position-servo actuator groups and their per-joint expansion.

use rigcfg_actuator::electric::ElectricActuator;
use rigcfg_actuator::gains::GainPair;
use rigcfg_core::{AssemblyError, ResolveError, ResolveOptions, RigError, Selector};

// ---------------------------------------------------------------------------
// ActuatorGroup
// ---------------------------------------------------------------------------

/// Simulator-builtin PD position actuator applied to every joint its selector
/// matches.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorGroup {
    /// Joint name patterns.
    pub joints: Selector,
    /// Proportional gain (`Nm/rad`).
    pub stiffness: f64,
    /// Derivative gain (`Nm·s/rad`).
    pub damping: f64,
    /// Torque limit (Nm). `None` leaves the joint unlimited.
    pub effort_limit: Option<f64>,
    /// Velocity limit (rad/s), informational for consumers.
    pub velocity_limit: Option<f64>,
    /// Reflected rotor inertia added to the joint (kg·m²).
    pub armature: f64,
    /// Dry friction loss (Nm).
    pub frictionloss: f64,
}

impl ActuatorGroup {
    /// Group with the given gains and no limits or armature.
    pub fn new(joints: Selector, gains: GainPair) -> Self {
        Self {
            joints,
            stiffness: gains.stiffness,
            damping: gains.damping,
            effort_limit: None,
            velocity_limit: None,
            armature: 0.0,
            frictionloss: 0.0,
        }
    }

    /// Group driven by `actuator`: limits come from the actuator and the
    /// armature is its reflected inertia.
    pub fn from_actuator(joints: Selector, actuator: &ElectricActuator, gains: GainPair) -> Self {
        Self {
            effort_limit: Some(actuator.effort_limit),
            velocity_limit: Some(actuator.velocity_limit),
            armature: actuator.armature(),
            ..Self::new(joints, gains)
        }
    }

    #[must_use]
    pub fn with_effort_limit(mut self, limit: Option<f64>) -> Self {
        self.effort_limit = limit;
        self
    }

    #[must_use]
    pub fn with_armature(mut self, armature: f64) -> Self {
        self.armature = armature;
        self
    }

    #[must_use]
    pub fn with_frictionloss(mut self, frictionloss: f64) -> Self {
        self.frictionloss = frictionloss;
        self
    }

    /// Validate as group number `index` of an entity.
    pub fn validate(&self, index: usize) -> Result<(), AssemblyError> {
        if self.joints.is_empty() {
            return Err(AssemblyError::EmptyJointSelector { group: index });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ResolvedJoint
// ---------------------------------------------------------------------------

/// Concrete actuator parameters for one joint.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedJoint {
    pub name: String,
    /// Index of the owning actuator group.
    pub group: usize,
    pub stiffness: f64,
    pub damping: f64,
    pub effort_limit: Option<f64>,
    pub velocity_limit: Option<f64>,
    pub armature: f64,
    pub frictionloss: f64,
}

/// Expand actuator groups over `joint_names`, in joint order.
///
/// A joint selected by two groups is an error. Joints no group selects are
/// skipped, or rejected under strict coverage.
pub fn resolve_actuators<S: AsRef<str>>(
    joint_names: &[S],
    groups: &[ActuatorGroup],
    options: ResolveOptions,
) -> Result<Vec<ResolvedJoint>, RigError> {
    let mut resolved = Vec::with_capacity(joint_names.len());
    for name in joint_names.iter().map(|n| n.as_ref()) {
        let mut owners = groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.joints.matches(name));
        let Some((index, group)) = owners.next() else {
            if options.strict_coverage {
                return Err(ResolveError::UnmatchedElement {
                    element: name.to_owned(),
                }
                .into());
            }
            continue;
        };
        if let Some((second, _)) = owners.next() {
            return Err(AssemblyError::MultipleActuatorsForJoint {
                joint: name.to_owned(),
                first: index,
                second,
            }
            .into());
        }
        resolved.push(ResolvedJoint {
            name: name.to_owned(),
            group: index,
            stiffness: group.stiffness,
            damping: group.damping,
            effort_limit: group.effort_limit,
            velocity_limit: group.velocity_limit,
            armature: group.armature,
            frictionloss: group.frictionloss,
        });
    }
    Ok(resolved)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
