//! Shared test fixtures and mocks for rigcfg crates.
//!
//! Provides a fixed-name model loader, an in-memory task registry, and the
//! Go2 joint and geometry name lists.

pub mod fixtures;
pub mod mocks;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use fixtures::{go2_geom_names, go2_joint_names};
pub use mocks::{InMemoryTaskRegistry, StaticModelLoader};
