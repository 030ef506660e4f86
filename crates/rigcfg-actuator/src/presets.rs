//! Actuator presets based on real robot hardware.
//!
//! Presets are `const` values computed at compile time, so every reader sees
//! the same immutable instance without initialization order concerns.

/// Unitree Go2 quadruped (motor constants shared with the Go1).
pub mod go2 {
    use crate::electric::ElectricActuator;
    use crate::gains::{natural_frequency_from_hz, second_order_gains, GainPair};

    /// Rotor inertia (kg·m²).
    pub const ROTOR_INERTIA: f64 = 0.000_111_842;

    /// Hip and thigh gear ratio.
    pub const HIP_GEAR_RATIO: f64 = 6.0;

    /// Knee (calf) gear ratio.
    pub const KNEE_GEAR_RATIO: f64 = 12.0;

    /// Target natural frequency: 10 Hz.
    pub const NATURAL_FREQ: f64 = natural_frequency_from_hz(10.0);

    /// Target damping ratio (overdamped).
    pub const DAMPING_RATIO: f64 = 2.0;

    /// Hip/thigh actuator.
    pub const HIP_ACTUATOR: ElectricActuator =
        ElectricActuator::from_constants(ROTOR_INERTIA, HIP_GEAR_RATIO, 30.1, 23.7);

    /// Knee actuator.
    pub const KNEE_ACTUATOR: ElectricActuator =
        ElectricActuator::from_constants(ROTOR_INERTIA, KNEE_GEAR_RATIO, 15.70, 45.43);

    /// Hip/thigh PD gains.
    pub const HIP_GAINS: GainPair =
        second_order_gains(HIP_ACTUATOR.reflected_inertia, NATURAL_FREQ, DAMPING_RATIO);

    /// Knee PD gains.
    pub const KNEE_GAINS: GainPair =
        second_order_gains(KNEE_ACTUATOR.reflected_inertia, NATURAL_FREQ, DAMPING_RATIO);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
