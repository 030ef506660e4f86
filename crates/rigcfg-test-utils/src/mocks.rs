//! Mock implementations of the external capabilities.

use std::sync::atomic::{AtomicUsize, Ordering};

use rigcfg_entity::{
    AssetMap, LoadError, ModelLoader, ModelSpec, RegistryError, StructuralElements,
    TaskRegistration, TaskRegistry,
};

use crate::fixtures::{go2_geom_names, go2_joint_names};

// ---------------------------------------------------------------------------
// StaticModelLoader
// ---------------------------------------------------------------------------

/// A loader that serves fixed element names and assets and counts how often
/// the model is loaded.
#[derive(Debug, Default)]
pub struct StaticModelLoader {
    elements: StructuralElements,
    meshdir: Option<String>,
    assets: AssetMap,
    offer_sample: bool,
    loads: AtomicUsize,
}

impl StaticModelLoader {
    /// Serve `elements`, also offered as the sample.
    pub fn new(elements: StructuralElements) -> Self {
        Self {
            elements,
            offer_sample: true,
            ..Self::default()
        }
    }

    /// Loader for the Go2 fixture names.
    pub fn go2() -> Self {
        Self::new(StructuralElements::new(go2_joint_names(), go2_geom_names()))
    }

    #[must_use]
    pub fn with_assets(mut self, meshdir: &str, assets: AssetMap) -> Self {
        self.meshdir = Some(meshdir.to_owned());
        self.assets = assets;
        self
    }

    #[must_use]
    pub const fn without_sample(mut self) -> Self {
        self.offer_sample = false;
        self
    }

    /// Number of `load_spec` calls so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ModelLoader for StaticModelLoader {
    fn load_spec(&self) -> Result<ModelSpec, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(ModelSpec {
            meshdir: self.meshdir.clone(),
            assets: AssetMap::new(),
            elements: self.elements.clone(),
        })
    }

    fn load_assets(&self, _meshdir: Option<&str>) -> Result<AssetMap, LoadError> {
        Ok(self.assets.clone())
    }

    fn sample_elements(&self) -> Option<StructuralElements> {
        self.offer_sample.then(|| self.elements.clone())
    }
}

// ---------------------------------------------------------------------------
// InMemoryTaskRegistry
// ---------------------------------------------------------------------------

/// Registry backed by a vector, in registration order.
#[derive(Debug, Default)]
pub struct InMemoryTaskRegistry {
    tasks: Vec<TaskRegistration>,
}

impl InMemoryTaskRegistry {
    pub fn task_ids(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.task_id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl TaskRegistry for InMemoryTaskRegistry {
    fn register(&mut self, registration: TaskRegistration) -> Result<(), RegistryError> {
        if registration.task_id.is_empty() {
            return Err(RegistryError::EmptyTaskId);
        }
        if self.get(&registration.task_id).is_some() {
            return Err(RegistryError::DuplicateTask(registration.task_id));
        }
        self.tasks.push(registration);
        Ok(())
    }

    fn get(&self, task_id: &str) -> Option<&TaskRegistration> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rigcfg_core::{AssemblyError, RigError};
    use rigcfg_entity::{PpoRunnerConfig, RunnerKind, VelocityEnvConfig};
    use std::sync::Arc;

    fn registration(id: &str) -> TaskRegistration {
        TaskRegistration {
            task_id: id.into(),
            env_cfg: Arc::new(|| -> Result<VelocityEnvConfig, RigError> {
                Err(AssemblyError::SoftLimitFactorOutOfRange(0.0).into())
            }),
            rl_cfg: PpoRunnerConfig::new("test"),
            runner: RunnerKind::VelocityOnPolicy,
        }
    }

    #[test]
    fn loader_counts_loads() {
        let loader = StaticModelLoader::go2();
        assert_eq!(loader.load_count(), 0);
        let spec = loader.load_ready().unwrap();
        assert_eq!(spec.elements.joints.len(), 12);
        assert_eq!(loader.load_count(), 1);
    }

    #[test]
    fn loader_sample_is_optional() {
        assert!(StaticModelLoader::go2().sample_elements().is_some());
        assert!(StaticModelLoader::go2().without_sample().sample_elements().is_none());
    }

    #[test]
    fn loader_serves_assets() {
        let mut assets = AssetMap::new();
        assets.insert("assets/base.obj".into(), vec![1]);
        let spec = StaticModelLoader::go2()
            .with_assets("assets", assets)
            .load_ready()
            .unwrap();
        assert_eq!(spec.meshdir.as_deref(), Some("assets"));
        assert!(spec.has_assets());
    }

    #[test]
    fn registry_rejects_duplicates_and_empty_ids() {
        let mut registry = InMemoryTaskRegistry::default();
        registry.register(registration("a")).unwrap();
        assert_eq!(
            registry.register(registration("a")).unwrap_err(),
            RegistryError::DuplicateTask("a".into())
        );
        assert_eq!(
            registry.register(registration("")).unwrap_err(),
            RegistryError::EmptyTaskId
        );
        assert_eq!(registry.len(), 1);
        assert!(registry.get("b").is_none());
    }
}
