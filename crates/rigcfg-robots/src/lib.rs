//! Robot asset zoo for rigcfg.
//!
//! Each robot module exposes its actuator groups, keyframe, collision
//! presets and a fresh-configuration constructor. [`tasks`] registers the
//! training tasks built on them.

pub mod go2;
pub mod tasks;

pub use go2::{go2_action_scale, go2_robot_cfg};
pub use tasks::{register_go2_tasks, FLAT_TASK_ID, ROUGH_TASK_ID};
