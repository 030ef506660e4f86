//! Model-loader capability and asset collection.
//!
//! The assembler never loads a model. Loading is delegated to an external
//! [`ModelLoader`] which must be able to:
//! - produce a [`ModelSpec`] exposing ordered joint and geometry names and a
//!   mesh directory,
//! - read the mesh/texture assets for that directory,
//! - optionally offer a cheap sample of element names for validation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::LoadError;

/// Asset name → raw file content.
pub type AssetMap = BTreeMap<String, Vec<u8>>;

// ---------------------------------------------------------------------------
// StructuralElements
// ---------------------------------------------------------------------------

/// Ordered element names of a loaded model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralElements {
    /// Joint names in model order.
    pub joints: Vec<String>,
    /// Geometry names in model order.
    pub geoms: Vec<String>,
}

impl StructuralElements {
    pub fn new<J, G>(joints: J, geoms: G) -> Self
    where
        J: IntoIterator,
        J::Item: Into<String>,
        G: IntoIterator,
        G::Item: Into<String>,
    {
        Self {
            joints: joints.into_iter().map(Into::into).collect(),
            geoms: geoms.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty() && self.geoms.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ModelSpec
// ---------------------------------------------------------------------------

/// A loaded model description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSpec {
    /// Mesh directory declared by the model, relative to the model file.
    pub meshdir: Option<String>,
    /// Attached assets; empty until [`ModelLoader::load_ready`] fills it.
    pub assets: AssetMap,
    /// Joint and geometry names.
    pub elements: StructuralElements,
}

impl ModelSpec {
    /// Whether assets have been attached.
    pub fn has_assets(&self) -> bool {
        !self.assets.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ModelLoader
// ---------------------------------------------------------------------------

/// Externally supplied model-loading capability.
pub trait ModelLoader: Send + Sync {
    /// Load the structural model description (without assets).
    fn load_spec(&self) -> Result<ModelSpec, LoadError>;

    /// Read the mesh/texture assets, keyed as the model references them.
    fn load_assets(&self, meshdir: Option<&str>) -> Result<AssetMap, LoadError>;

    /// Element names available without a full load, if any.
    fn sample_elements(&self) -> Option<StructuralElements> {
        None
    }

    /// Load the model and attach its assets.
    fn load_ready(&self) -> Result<ModelSpec, LoadError> {
        let mut spec = self.load_spec()?;
        spec.assets = self.load_assets(spec.meshdir.as_deref())?;
        Ok(spec)
    }
}

// ---------------------------------------------------------------------------
// collect_assets
// ---------------------------------------------------------------------------

/// Read every file in `dir` into `assets`.
///
/// Keys are `meshdir/file_name` (or just `file_name` without a meshdir).
/// Subdirectories are descended only when `recursive` is set; their files are
/// still keyed by file name alone, matching how models reference meshes.
pub fn collect_assets(
    assets: &mut AssetMap,
    dir: &Path,
    meshdir: Option<&str>,
    recursive: bool,
) -> Result<(), LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingAssetDir(dir.to_path_buf()));
    }
    let dir_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(dir_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, std::io::Error>>()
        .map_err(dir_err)?;
    entries.sort();

    for path in entries {
        if path.is_file() {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                warn!(path = %path.display(), "skipping asset with non-UTF-8 file name");
                continue;
            };
            let key = match meshdir {
                Some(prefix) => format!("{}/{name}", prefix.trim_end_matches('/')),
                None => name.to_owned(),
            };
            let bytes = std::fs::read(&path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            assets.insert(key, bytes);
        } else if recursive && path.is_dir() {
            collect_assets(assets, &path, meshdir, recursive)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
