//! Initial base pose and pattern-keyed joint state.

use rigcfg_core::{resolve, Override, ResolveError, ResolveOptions, ResolvedMap, Selector};

/// Initial state of an entity at reset.
///
/// Joint positions and velocities stay pattern-keyed until a joint list is
/// available; [`InitialState::resolve_joint_pos`] expands them.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialState {
    /// Base position (m).
    pub pos: [f64; 3],
    /// Base orientation quaternion `[w, x, y, z]`.
    pub rot: [f64; 4],
    /// Joint positions (rad).
    pub joint_pos: Override<f64>,
    /// Joint velocities (rad/s).
    pub joint_vel: Override<f64>,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            pos: [0.0; 3],
            rot: [1.0, 0.0, 0.0, 0.0],
            joint_pos: Override::scalar(0.0),
            joint_vel: Override::scalar(0.0),
        }
    }
}

impl InitialState {
    #[must_use]
    pub const fn with_pos(mut self, pos: [f64; 3]) -> Self {
        self.pos = pos;
        self
    }

    #[must_use]
    pub const fn with_rot(mut self, rot: [f64; 4]) -> Self {
        self.rot = rot;
        self
    }

    #[must_use]
    pub fn with_joint_pos(mut self, joint_pos: impl Into<Override<f64>>) -> Self {
        self.joint_pos = joint_pos.into();
        self
    }

    #[must_use]
    pub fn with_joint_vel(mut self, joint_vel: impl Into<Override<f64>>) -> Self {
        self.joint_vel = joint_vel.into();
        self
    }

    /// Position of every joint; joints no pattern names start at `0.0`.
    pub fn resolve_joint_pos<S: AsRef<str>>(
        &self,
        joint_names: &[S],
    ) -> Result<ResolvedMap<f64>, ResolveError> {
        resolve_all(joint_names, &self.joint_pos)
    }

    /// Velocity of every joint; joints no pattern names start at rest.
    pub fn resolve_joint_vel<S: AsRef<str>>(
        &self,
        joint_names: &[S],
    ) -> Result<ResolvedMap<f64>, ResolveError> {
        resolve_all(joint_names, &self.joint_vel)
    }
}

fn resolve_all<S: AsRef<str>>(
    joint_names: &[S],
    property: &Override<f64>,
) -> Result<ResolvedMap<f64>, ResolveError> {
    let every = Selector::new([".*"])?;
    resolve(joint_names, &every, property, Some(&0.0), ResolveOptions::STRICT)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rigcfg_core::ValueSource;

    fn standing() -> InitialState {
        InitialState::default()
            .with_pos([0.0, 0.0, 0.445])
            .with_joint_pos(
                Override::patterned([
                    (".*thigh_joint", 0.9),
                    (".*calf_joint", -1.8),
                    (".*R_hip_joint", 0.1),
                    (".*L_hip_joint", -0.1),
                ])
                .unwrap(),
            )
    }

    #[test]
    fn default_is_identity_pose_at_rest() {
        let s = InitialState::default();
        assert_eq!(s.pos, [0.0; 3]);
        assert_eq!(s.rot, [1.0, 0.0, 0.0, 0.0]);
        let vel = s.resolve_joint_vel(&["a", "b"]).unwrap();
        assert_eq!(vel.value("b"), Some(&0.0));
    }

    #[test]
    fn joint_pos_by_pattern() {
        let pos = standing()
            .resolve_joint_pos(&[
                "FL_hip_joint",
                "FR_hip_joint",
                "FL_thigh_joint",
                "RR_calf_joint",
            ])
            .unwrap();
        assert_eq!(pos.value("FL_hip_joint"), Some(&-0.1));
        assert_eq!(pos.value("FR_hip_joint"), Some(&0.1));
        assert_eq!(pos.value("FL_thigh_joint"), Some(&0.9));
        assert_eq!(pos.value("RR_calf_joint"), Some(&-1.8));
    }

    #[test]
    fn unnamed_joint_defaults_to_zero() {
        let pos = standing().resolve_joint_pos(&["tail_joint"]).unwrap();
        let tail = pos.get("tail_joint").unwrap();
        assert_eq!(tail.value, 0.0);
        assert_eq!(tail.source, ValueSource::Default);
    }

    #[test]
    fn no_joints() {
        let empty: [&str; 0] = [];
        assert!(standing().resolve_joint_pos(&empty).unwrap().is_empty());
    }
}
