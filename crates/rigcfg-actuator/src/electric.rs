//! Electric actuator model: reflected inertia and joint-side limits.
//!
//! # Gear Ratio Convention
//!
//! `gear_ratio = N_output / N_input`. A rotor of inertia `J` seen through the
//! reduction appears at the joint as `J × gear_ratio²`; this is the armature
//! a simulator adds to the joint.

use rigcfg_core::DomainError;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// reflected_inertia
// ---------------------------------------------------------------------------

/// Rotor inertia reflected through a gear reduction: `rotor_inertia × gear_ratio²`.
///
/// Fails when `gear_ratio <= 0`, `rotor_inertia < 0`, or either is not finite.
pub fn reflected_inertia(rotor_inertia: f64, gear_ratio: f64) -> Result<f64, DomainError> {
    DomainError::require_non_negative("rotor_inertia", rotor_inertia)?;
    DomainError::require_positive("gear_ratio", gear_ratio)?;
    Ok(reflect(rotor_inertia, gear_ratio))
}

/// Unchecked formula shared with compile-time presets.
pub(crate) const fn reflect(rotor_inertia: f64, gear_ratio: f64) -> f64 {
    rotor_inertia * gear_ratio * gear_ratio
}

// ---------------------------------------------------------------------------
// ElectricActuator
// ---------------------------------------------------------------------------

/// Joint-side view of a geared electric motor.
///
/// All fields are strictly positive; construct through [`ElectricActuator::new`]
/// or [`ElectricActuator::from_gearbox`] to have that checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricActuator {
    /// Reflected rotor inertia (kg·m²).
    pub reflected_inertia: f64,
    /// Maximum joint velocity (rad/s).
    pub velocity_limit: f64,
    /// Maximum joint torque (Nm).
    pub effort_limit: f64,
}

impl ElectricActuator {
    /// Create an actuator from an already reflected inertia.
    pub fn new(
        reflected_inertia: f64,
        velocity_limit: f64,
        effort_limit: f64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            reflected_inertia: DomainError::require_positive(
                "reflected_inertia",
                reflected_inertia,
            )?,
            velocity_limit: DomainError::require_positive("velocity_limit", velocity_limit)?,
            effort_limit: DomainError::require_positive("effort_limit", effort_limit)?,
        })
    }

    /// Create an actuator from rotor inertia and gear ratio.
    pub fn from_gearbox(
        rotor_inertia: f64,
        gear_ratio: f64,
        velocity_limit: f64,
        effort_limit: f64,
    ) -> Result<Self, DomainError> {
        Self::new(
            reflected_inertia(rotor_inertia, gear_ratio)?,
            velocity_limit,
            effort_limit,
        )
    }

    /// Compile-time constructor for fixed hardware constants.
    ///
    /// Performs no validation; only use with known-good literals.
    pub(crate) const fn from_constants(
        rotor_inertia: f64,
        gear_ratio: f64,
        velocity_limit: f64,
        effort_limit: f64,
    ) -> Self {
        Self {
            reflected_inertia: reflect(rotor_inertia, gear_ratio),
            velocity_limit,
            effort_limit,
        }
    }

    /// Armature value to hand to the simulator (equal to the reflected inertia).
    pub const fn armature(&self) -> f64 {
        self.reflected_inertia
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reflected_inertia_scales_with_ratio_squared() {
        let j = reflected_inertia(0.000_111_842, 6.0).unwrap();
        assert_relative_eq!(j, 0.000_111_842 * 36.0, max_relative = 1e-12);
    }

    #[test]
    fn reflected_inertia_zero_rotor_is_allowed() {
        assert!(reflected_inertia(0.0, 10.0).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn reflected_inertia_rejects_bad_inputs() {
        assert!(matches!(
            reflected_inertia(1e-4, 0.0),
            Err(DomainError::NonPositive {
                quantity: "gear_ratio",
                ..
            })
        ));
        assert!(matches!(
            reflected_inertia(1e-4, -2.0),
            Err(DomainError::NonPositive { .. })
        ));
        assert!(matches!(
            reflected_inertia(-1e-4, 2.0),
            Err(DomainError::Negative {
                quantity: "rotor_inertia",
                ..
            })
        ));
        assert!(matches!(
            reflected_inertia(f64::NAN, 2.0),
            Err(DomainError::NonFinite { .. })
        ));
    }

    #[test]
    fn reflected_inertia_strictly_increasing() {
        let ratios = [0.5, 1.0, 6.0, 12.0, 50.0];
        let inertias = [1e-6, 1e-4, 0.01, 1.0];
        for &j in &inertias {
            for pair in ratios.windows(2) {
                let lo = reflected_inertia(j, pair[0]).unwrap();
                let hi = reflected_inertia(j, pair[1]).unwrap();
                assert!(hi > lo, "ratio {} -> {}", pair[0], pair[1]);
            }
        }
        for &n in &ratios {
            for pair in inertias.windows(2) {
                let lo = reflected_inertia(pair[0], n).unwrap();
                let hi = reflected_inertia(pair[1], n).unwrap();
                assert!(hi > lo, "inertia {} -> {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn actuator_new_validates_fields() {
        assert!(ElectricActuator::new(0.004, 30.1, 23.7).is_ok());
        assert!(matches!(
            ElectricActuator::new(0.0, 30.1, 23.7),
            Err(DomainError::NonPositive {
                quantity: "reflected_inertia",
                ..
            })
        ));
        assert!(matches!(
            ElectricActuator::new(0.004, -1.0, 23.7),
            Err(DomainError::NonPositive {
                quantity: "velocity_limit",
                ..
            })
        ));
        assert!(matches!(
            ElectricActuator::new(0.004, 30.1, 0.0),
            Err(DomainError::NonPositive {
                quantity: "effort_limit",
                ..
            })
        ));
    }

    #[test]
    fn from_gearbox_rejects_zero_rotor() {
        // Zero rotor inertia is a valid input to the formula but not a valid
        // actuator, whose reflected inertia must be strictly positive.
        assert!(ElectricActuator::from_gearbox(0.0, 6.0, 30.1, 23.7).is_err());
    }

    #[test]
    fn from_constants_matches_checked_path() {
        let a = ElectricActuator::from_constants(0.000_111_842, 12.0, 15.7, 45.43);
        let b = ElectricActuator::from_gearbox(0.000_111_842, 12.0, 15.7, 45.43).unwrap();
        assert_eq!(a, b);
        assert_relative_eq!(a.armature(), a.reflected_inertia);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn actuator_is_send_sync() {
        assert_send_sync::<ElectricActuator>();
    }
}
