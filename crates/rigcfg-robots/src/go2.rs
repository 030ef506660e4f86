//! Unitree Go2 quadruped.
//!
//! Hip and thigh joints share one motor/gearbox, the calf (knee) joints a
//! second one with twice the reduction. Gains target a 10 Hz, overdamped
//! position response.

use std::path::Path;
use std::sync::Arc;

use rigcfg_actuator::presets::go2;
use rigcfg_core::{Override, ResolveError, RigError, Selector};
use rigcfg_entity::{
    collect_assets, ActionScaleMap, ActuatorGroup, AssetMap, CollisionGroup, EntityConfiguration,
    InitialState, LoadError, ModelLoader,
};
use tracing::debug;

/// Matches the four foot collision spheres.
pub const FOOT_REGEX: &str = "^[FR][LR]_foot_collision$";

/// Joint patterns driven by the hip actuator.
pub const HIP_JOINTS: [&str; 2] = [".*_hip_joint", ".*_thigh_joint"];

/// Joint patterns driven by the knee actuator.
pub const KNEE_JOINTS: [&str; 1] = [".*_calf_joint"];

/// Trunk height of the standing pose (m).
pub const STANDING_HEIGHT: f64 = 0.445;

pub const SOFT_JOINT_POS_LIMIT_FACTOR: f64 = 0.9;

/// 0.25 is conservative; agile maneuvers may want 0.5 or more.
pub const ACTION_SCALE_MULTIPLIER: f64 = 0.25;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

pub fn hip_actuator_cfg() -> Result<ActuatorGroup, ResolveError> {
    Ok(ActuatorGroup::from_actuator(
        Selector::new(HIP_JOINTS)?,
        &go2::HIP_ACTUATOR,
        go2::HIP_GAINS,
    ))
}

pub fn knee_actuator_cfg() -> Result<ActuatorGroup, ResolveError> {
    Ok(ActuatorGroup::from_actuator(
        Selector::new(KNEE_JOINTS)?,
        &go2::KNEE_ACTUATOR,
        go2::KNEE_GAINS,
    ))
}

/// Hip group then knee group.
pub fn actuators() -> Result<Vec<ActuatorGroup>, ResolveError> {
    Ok(vec![hip_actuator_cfg()?, knee_actuator_cfg()?])
}

// ---------------------------------------------------------------------------
// Initial state
// ---------------------------------------------------------------------------

/// Crouched standing keyframe.
pub fn init_state() -> Result<InitialState, ResolveError> {
    Ok(InitialState::default()
        .with_pos([0.0, 0.0, STANDING_HEIGHT])
        .with_joint_pos(Override::patterned([
            (".*thigh_joint", 0.9),
            (".*calf_joint", -1.8),
            (".*R_hip_joint", 0.1),
            (".*L_hip_joint", -0.1),
        ])?)
        .with_joint_vel(Override::patterned([(".*", 0.0)])?))
}

// ---------------------------------------------------------------------------
// Collisions
// ---------------------------------------------------------------------------

/// Only the feet collide, and only against the environment.
pub fn feet_only_collision() -> Result<CollisionGroup, ResolveError> {
    Ok(CollisionGroup::new(Selector::new([FOOT_REGEX])?)
        .with_contype(0)
        .with_conaffinity(1)
        .with_condim(3)
        .with_priority(1)
        .with_friction(vec![0.6])
        .with_solimp(vec![0.9, 0.95, 0.023]))
}

/// Every collision geometry; feet get frictional contacts, the rest
/// frictionless ones.
pub fn full_collision() -> Result<CollisionGroup, ResolveError> {
    Ok(CollisionGroup::new(Selector::new([".*_collision"])?)
        .with_condim(Override::patterned([(FOOT_REGEX, 3), (".*_collision", 1)])?)
        .with_priority(Override::patterned([(FOOT_REGEX, 1)])?)
        .with_friction(Override::patterned([(FOOT_REGEX, vec![0.6])])?)
        .with_solimp(Override::patterned([(FOOT_REGEX, vec![0.9, 0.95, 0.023])])?)
        .with_contype(1)
        .with_conaffinity(0))
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A fresh Go2 configuration with full collisions.
pub fn go2_robot_cfg(loader: Arc<dyn ModelLoader>) -> Result<EntityConfiguration, RigError> {
    EntityConfiguration::assemble(
        init_state()?,
        actuators()?,
        vec![full_collision()?],
        SOFT_JOINT_POS_LIMIT_FACTOR,
        loader,
    )
}

/// `0.25 * effort_limit / stiffness` for every Go2 joint pattern.
pub fn go2_action_scale() -> Result<ActionScaleMap, RigError> {
    ActionScaleMap::derive(&actuators()?, ACTION_SCALE_MULTIPLIER)
}

/// Read the mesh and texture files in `asset_dir`, keyed under `meshdir`.
pub fn load_assets(asset_dir: &Path, meshdir: Option<&str>) -> Result<AssetMap, LoadError> {
    let mut assets = AssetMap::new();
    collect_assets(&mut assets, asset_dir, meshdir, false)?;
    debug!(count = assets.len(), dir = %asset_dir.display(), "loaded Go2 assets");
    Ok(assets)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rigcfg_core::ResolveOptions;
    use rigcfg_test_utils::{go2_geom_names, go2_joint_names, StaticModelLoader};

    #[test]
    fn actuator_groups() {
        let groups = actuators().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].joints.sources().collect::<Vec<_>>(), HIP_JOINTS);
        assert_eq!(groups[0].effort_limit, Some(23.7));
        assert_eq!(groups[1].effort_limit, Some(45.43));
        assert_relative_eq!(groups[1].armature, 0.000_111_842 * 144.0, max_relative = 1e-12);
    }

    #[test]
    fn feet_only_covers_feet() {
        let res = feet_only_collision()
            .unwrap()
            .resolve(&go2_geom_names(), &Default::default(), ResolveOptions::LENIENT)
            .unwrap();
        assert_eq!(res.selected.len(), 4);
        for geom in &res.selected {
            assert_eq!(geom.contype.value, 0);
            assert_eq!(geom.conaffinity.value, 1);
            assert_eq!(geom.friction.value, vec![0.6]);
        }
        assert!(res.disabled.contains(&"base_collision".to_owned()));
    }

    #[test]
    fn presets_validate() {
        assert!(feet_only_collision().unwrap().validate().is_ok());
        assert!(full_collision().unwrap().validate().is_ok());
    }

    #[test]
    fn robot_cfg() {
        let cfg = go2_robot_cfg(Arc::new(StaticModelLoader::go2())).unwrap();
        assert_relative_eq!(cfg.soft_joint_pos_limit_factor(), 0.9);
        assert_eq!(cfg.collisions().len(), 1);
        let joints = cfg
            .resolve_actuators(&go2_joint_names(), ResolveOptions::STRICT)
            .unwrap();
        assert_eq!(joints.len(), 12);
    }

    #[test]
    fn action_scale_has_every_pattern() {
        let map = go2_action_scale().unwrap();
        assert_eq!(map.len(), 3);
        assert_relative_eq!(
            map.get(".*_calf_joint").unwrap(),
            0.25 * 45.43 / go2::KNEE_GAINS.stiffness,
            max_relative = 1e-9
        );
    }

    #[test]
    fn missing_asset_dir() {
        let err = load_assets(Path::new("/nonexistent/go2/assets"), Some("assets")).unwrap_err();
        assert!(matches!(err, LoadError::MissingAssetDir(_)));
    }
}
