//! Per-joint-pattern action scaling for position actions.
//!
//! A policy output `a` maps to the target `default_pos + scale * a`, with
//! `scale = multiplier * effort_limit / stiffness`: a unit action asks for the
//! joint offset at which the PD loop saturates the actuator, times the
//! multiplier.

use rigcfg_core::{AssemblyError, DomainError, RigError};

use crate::actuator::ActuatorGroup;

/// Joint pattern → action scale, in group-then-pattern order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionScaleMap {
    entries: Vec<(String, f64)>,
}

impl ActionScaleMap {
    /// Derive a scale for every joint pattern of every actuator group.
    pub fn derive(actuators: &[ActuatorGroup], multiplier: f64) -> Result<Self, RigError> {
        DomainError::require_positive("action scale multiplier", multiplier)?;

        let mut entries: Vec<(String, f64)> = Vec::new();
        for (group, actuator) in actuators.iter().enumerate() {
            let effort = actuator
                .effort_limit
                .filter(|e| e.is_finite() && *e > 0.0)
                .ok_or(AssemblyError::MissingDependentValue {
                    group,
                    field: "effort_limit",
                })?;
            if !(actuator.stiffness.is_finite() && actuator.stiffness > 0.0) {
                return Err(AssemblyError::MissingDependentValue {
                    group,
                    field: "stiffness",
                }
                .into());
            }
            let scale = multiplier * effort / actuator.stiffness;
            for pattern in actuator.joints.sources() {
                if entries.iter().any(|(p, _)| p == pattern) {
                    let pattern = pattern.to_owned();
                    return Err(AssemblyError::DuplicateActionScalePattern(pattern).into());
                }
                entries.push((pattern.to_owned(), scale));
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, pattern: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(p, _)| p == pattern)
            .map(|&(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(p, s)| (p.as_str(), *s))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
