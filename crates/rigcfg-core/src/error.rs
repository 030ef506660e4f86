use thiserror::Error;

/// Top-level error type for rigcfg.
///
/// Every failure is raised while a configuration is being constructed, never
/// later while it is consumed.
#[derive(Debug, Error)]
pub enum RigError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Invalid numeric input to a derivation function.
///
/// Copy + static quantity names for cheap propagation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    #[error("{quantity} must be > 0, got {value}")]
    NonPositive { quantity: &'static str, value: f64 },

    #[error("{quantity} must be >= 0, got {value}")]
    Negative { quantity: &'static str, value: f64 },

    #[error("{quantity} must be finite, got {value}")]
    NonFinite { quantity: &'static str, value: f64 },
}

impl DomainError {
    /// Check `value > 0` and finite.
    pub fn require_positive(quantity: &'static str, value: f64) -> Result<f64, Self> {
        Self::require_finite(quantity, value)?;
        if value <= 0.0 {
            return Err(Self::NonPositive { quantity, value });
        }
        Ok(value)
    }

    /// Check `value >= 0` and finite.
    pub fn require_non_negative(quantity: &'static str, value: f64) -> Result<f64, Self> {
        Self::require_finite(quantity, value)?;
        if value < 0.0 {
            return Err(Self::Negative { quantity, value });
        }
        Ok(value)
    }

    /// Check that `value` is neither NaN nor infinite.
    pub fn require_finite(quantity: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { quantity, value })
        }
    }
}

/// Pattern compilation and override resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Unmatched element: '{element}' is not covered by any selector pattern")]
    UnmatchedElement { element: String },

    #[error("Override conflict on '{element}': '{first}' and '{second}' share priority {priority} but disagree")]
    OverrideConflict {
        element: String,
        first: String,
        second: String,
        priority: i32,
    },

    #[error("No override defined for matched element '{element}'")]
    NoOverride { element: String },
}

/// Entity assembly errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssemblyError {
    #[error("Actuator group {group} has an empty joint selector")]
    EmptyJointSelector { group: usize },

    #[error("soft_joint_pos_limit_factor must be in (0, 1], got {0}")]
    SoftLimitFactorOutOfRange(f64),

    #[error("Missing dependent value: actuator group {group} needs a valid {field}")]
    MissingDependentValue { group: usize, field: &'static str },

    #[error("Joint pattern '{0}' appears in more than one actuator group")]
    DuplicateActionScalePattern(String),

    #[error("Joint '{joint}' is claimed by actuator groups {first} and {second}")]
    MultipleActuatorsForJoint {
        joint: String,
        first: usize,
        second: usize,
    },

    #[error("Invalid collision value for {field}: {message}")]
    InvalidCollisionValue { field: &'static str, message: String },
}

/// File-based configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rig_error_from_domain_error() {
        let err = DomainError::NonPositive {
            quantity: "gear_ratio",
            value: -1.0,
        };
        let rig_err: RigError = err.into();
        assert!(matches!(rig_err, RigError::Domain(_)));
        assert!(rig_err.to_string().contains("-1"));
    }

    #[test]
    fn rig_error_from_resolve_error() {
        let err = ResolveError::NoOverride {
            element: "FL_calf_collision".into(),
        };
        let rig_err: RigError = err.into();
        assert!(matches!(rig_err, RigError::Resolve(_)));
        assert!(rig_err.to_string().contains("FL_calf_collision"));
    }

    #[test]
    fn rig_error_from_assembly_error() {
        let err = AssemblyError::SoftLimitFactorOutOfRange(1.5);
        let rig_err: RigError = err.into();
        assert!(matches!(rig_err, RigError::Assembly(_)));
        assert!(rig_err.to_string().contains("1.5"));
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::Io(_)));
        let rig_err: RigError = config_err.into();
        assert!(matches!(rig_err, RigError::Config(_)));
    }

    #[test]
    fn config_error_variants_from_parsing_and_validation() {
        let toml_err = toml::from_str::<toml::Table>("a = ").unwrap_err();
        let config_err: ConfigError = toml_err.into();
        assert!(config_err.to_string().starts_with("TOML parse error:"));
        let invalid = ConfigError::InvalidValue {
            field: "actuators[0].joints".into(),
            message: "must not be empty".into(),
        };
        assert_eq!(
            invalid.to_string(),
            "Invalid value for actuators[0].joints: must not be empty"
        );
    }

    #[test]
    fn require_positive_rejects_zero_and_nan() {
        assert!(DomainError::require_positive("x", 1.0).is_ok());
        assert_eq!(
            DomainError::require_positive("x", 0.0),
            Err(DomainError::NonPositive {
                quantity: "x",
                value: 0.0
            })
        );
        assert!(matches!(
            DomainError::require_positive("x", f64::NAN),
            Err(DomainError::NonFinite { .. })
        ));
    }

    #[test]
    fn require_non_negative_accepts_zero() {
        assert!(DomainError::require_non_negative("zeta", 0.0).is_ok());
        assert!(matches!(
            DomainError::require_non_negative("zeta", -0.1),
            Err(DomainError::Negative { .. })
        ));
        assert!(matches!(
            DomainError::require_non_negative("zeta", f64::INFINITY),
            Err(DomainError::NonFinite { .. })
        ));
    }

    #[test]
    fn domain_error_display_messages() {
        assert_eq!(
            DomainError::NonPositive {
                quantity: "gear_ratio",
                value: 0.0
            }
            .to_string(),
            "gear_ratio must be > 0, got 0"
        );
        assert_eq!(
            DomainError::Negative {
                quantity: "rotor_inertia",
                value: -2.0
            }
            .to_string(),
            "rotor_inertia must be >= 0, got -2"
        );
    }

    #[test]
    fn resolve_error_display_messages() {
        assert_eq!(
            ResolveError::UnmatchedElement {
                element: "base".into()
            }
            .to_string(),
            "Unmatched element: 'base' is not covered by any selector pattern"
        );
        assert_eq!(
            ResolveError::OverrideConflict {
                element: "A".into(),
                first: "^A$".into(),
                second: "A".into(),
                priority: 1,
            }
            .to_string(),
            "Override conflict on 'A': '^A$' and 'A' share priority 1 but disagree"
        );
        assert_eq!(
            ResolveError::InvalidPattern {
                pattern: "(".into(),
                message: "unclosed group".into()
            }
            .to_string(),
            "Invalid pattern '(': unclosed group"
        );
    }

    #[test]
    fn assembly_error_display_messages() {
        assert_eq!(
            AssemblyError::EmptyJointSelector { group: 2 }.to_string(),
            "Actuator group 2 has an empty joint selector"
        );
        assert_eq!(
            AssemblyError::MissingDependentValue {
                group: 0,
                field: "effort_limit"
            }
            .to_string(),
            "Missing dependent value: actuator group 0 needs a valid effort_limit"
        );
        assert_eq!(
            AssemblyError::DuplicateActionScalePattern(".*_hip_joint".into()).to_string(),
            "Joint pattern '.*_hip_joint' appears in more than one actuator group"
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn errors_are_send_sync() {
        assert_send_sync::<RigError>();
        assert_send_sync::<ResolveError>();
    }
}
