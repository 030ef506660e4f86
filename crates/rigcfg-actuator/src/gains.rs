//! PD gains for position-servo actuators from second-order targets.
//!
//! A position servo driving a joint of inertia `I` behaves like
//! `I·q̈ + kd·q̇ + kp·q = kp·q_target`. Choosing a natural frequency `ω` and
//! damping ratio `ζ` fixes the gains:
//!
//! - `stiffness (kp) = I · ω²` in `Nm/rad`
//! - `damping   (kd) = 2 · ζ · I · ω` in `Nm·s/rad`
//!
//! Because both gains are linear in `I`, two actuators sharing `(ω, ζ)` get
//! gains in the ratio of their reflected inertias.

use std::f64::consts::TAU;

use rigcfg_core::DomainError;
use serde::{Deserialize, Serialize};

use crate::electric::ElectricActuator;

// ---------------------------------------------------------------------------
// GainPair
// ---------------------------------------------------------------------------

/// Stiffness/damping pair for a position actuator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainPair {
    /// Proportional gain (`Nm/rad`), `> 0`.
    pub stiffness: f64,
    /// Derivative gain (`Nm·s/rad`), `>= 0`.
    pub damping: f64,
}

/// Convert a frequency in Hz to rad/s.
pub const fn natural_frequency_from_hz(hz: f64) -> f64 {
    hz * TAU
}

/// Derive gains for `actuator` from a natural frequency (rad/s) and damping
/// ratio.
///
/// `damping_ratio` of 0 is undamped, 1 critically damped; larger values are
/// accepted without an upper bound.
pub fn derive_gains(
    actuator: &ElectricActuator,
    natural_freq_rad_s: f64,
    damping_ratio: f64,
) -> Result<GainPair, DomainError> {
    DomainError::require_positive("natural_freq_rad_s", natural_freq_rad_s)?;
    DomainError::require_non_negative("damping_ratio", damping_ratio)?;
    DomainError::require_positive("reflected_inertia", actuator.reflected_inertia)?;
    Ok(second_order_gains(
        actuator.reflected_inertia,
        natural_freq_rad_s,
        damping_ratio,
    ))
}

/// Unchecked closed form shared with compile-time presets.
pub(crate) const fn second_order_gains(inertia: f64, omega: f64, zeta: f64) -> GainPair {
    GainPair {
        stiffness: inertia * (omega * omega),
        damping: 2.0 * zeta * inertia * omega,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
