//! Electric actuator model and position-servo gain derivation.
//!
//! Pure Rust library with no simulator dependencies. Converts raw motor
//! constants into the joint-side quantities a simulator needs.
//!
//! # Derivation Pipeline
//!
//! ```text
//! rotor inertia, gear ratio → reflected inertia → (ω, ζ) → stiffness, damping
//!                             (armature)                   (kp, kd)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use rigcfg_actuator::prelude::*;
//!
//! let actuator = ElectricActuator::from_gearbox(0.000_111_842, 6.0, 30.1, 23.7).unwrap();
//! let gains = derive_gains(&actuator, natural_frequency_from_hz(10.0), 2.0).unwrap();
//! assert!(gains.stiffness > 0.0);
//! ```

pub mod electric;
pub mod gains;
pub mod presets;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::electric::{reflected_inertia, ElectricActuator};
    pub use crate::gains::{derive_gains, natural_frequency_from_hz, GainPair};
    pub use crate::presets;
}
