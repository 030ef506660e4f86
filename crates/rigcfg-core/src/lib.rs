// rigcfg-core: Errors, name patterns, selectors and override resolution for rigcfg.

pub mod config;
pub mod error;
pub mod pattern;
pub mod resolve;

pub use error::{AssemblyError, ConfigError, DomainError, ResolveError, RigError};
pub use pattern::{Pattern, Selector};
pub use resolve::{
    resolve, Override, PatternOverride, Resolved, ResolveOptions, ResolvedMap, ValueSource,
};
