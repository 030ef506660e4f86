//! Error types for the external model-loading and task-registry capabilities.

use std::path::PathBuf;

/// Errors raised by a [`ModelLoader`](crate::loader::ModelLoader).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Failed to read a model or asset file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The model description could not be interpreted.
    #[error("model parse error: {0}")]
    Parse(String),

    /// An asset directory does not exist.
    #[error("missing asset directory: {0}")]
    MissingAssetDir(PathBuf),
}

/// Errors raised by a [`TaskRegistry`](crate::registry::TaskRegistry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A task with this identifier is already registered.
    #[error("task already registered: {0}")]
    DuplicateTask(String),

    /// Task identifiers must be non-empty.
    #[error("empty task id")]
    EmptyTaskId,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
