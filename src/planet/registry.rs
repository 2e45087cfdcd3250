//! Shared, thread-safe store of planet models keyed by name.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::error::PlanetError;
use crate::core::Result;
use crate::planet::config::PlanetConfig;
use crate::planet::model::PlanetModel;

/// Result of looking a planet up by name.
#[derive(Clone)]
pub enum ModelState {
    /// No model registered under the name; callers fall back to flat terrain
    Absent,
    Ready(Arc<PlanetModel>),
}

impl ModelState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }

    pub fn model(&self) -> Option<&PlanetModel> {
        match self {
            ModelState::Ready(model) => Some(model),
            ModelState::Absent => None,
        }
    }
}

/// Name-keyed planet models. Models are immutable once inserted and handed
/// out as `Arc`s, so readers never block on generation.
#[derive(Default)]
pub struct PlanetRegistry {
    models: RwLock<HashMap<String, Arc<PlanetModel>>>,
}

impl PlanetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means a writer panicked; the map itself is never
    // left half-updated, so keep serving it.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<PlanetModel>>> {
        self.models.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<PlanetModel>>> {
        self.models.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Build and insert a model. Fails if the name is taken or the config is invalid.
    pub fn register(&self, config: PlanetConfig) -> Result<Arc<PlanetModel>> {
        if self.read().contains_key(&config.name) {
            return Err(PlanetError::AlreadyRegistered(config.name));
        }

        // Derive outside the lock; re-check on insert in case another thread won.
        let model = Arc::new(PlanetModel::new(config)?);
        let mut models = self.write();
        if models.contains_key(model.name()) {
            return Err(PlanetError::AlreadyRegistered(model.name().to_string()));
        }
        models.insert(model.name().to_string(), Arc::clone(&model));
        log::debug!("Registered planet '{}' ({} total)", model.name(), models.len());
        Ok(model)
    }

    /// Return the existing model for the config's name, or build and insert one.
    pub fn get_or_create(&self, config: PlanetConfig) -> Result<Arc<PlanetModel>> {
        if let Some(model) = self.read().get(&config.name) {
            return Ok(Arc::clone(model));
        }

        let model = Arc::new(PlanetModel::new(config)?);
        let mut models = self.write();
        let entry = models
            .entry(model.name().to_string())
            .or_insert_with(|| Arc::clone(&model));
        Ok(Arc::clone(entry))
    }

    pub fn lookup(&self, name: &str) -> ModelState {
        match self.read().get(name) {
            Some(model) => ModelState::Ready(Arc::clone(model)),
            None => ModelState::Absent,
        }
    }

    pub fn remove(&self, name: &str) -> Option<Arc<PlanetModel>> {
        let removed = self.write().remove(name);
        if removed.is_some() {
            log::debug!("Removed planet '{}'", name);
        }
        removed
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
