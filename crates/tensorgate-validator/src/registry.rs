//! In-memory contract registry

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tensorgate_interfaces::ContractProvider;
use tensorgate_types::{ContractFile, GateError, ModelContract, ModelName, ModelVersion, Result};
use tracing::{debug, info};

type VersionMap = BTreeMap<ModelVersion, Arc<ModelContract>>;

/// Contracts of every served model version.
///
/// Lookups hand out `Arc` snapshots; registering a contract for an existing
/// version replaces the snapshot without affecting holders of the old one.
#[derive(Debug, Default)]
pub struct ContractRegistry {
    models: RwLock<HashMap<String, VersionMap>>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the models of a contract file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let registry = Self::new();
        let contracts = ContractFile::load(path).await?.into_contracts()?;
        for contract in contracts {
            registry.register(contract)?;
        }
        Ok(registry)
    }

    /// Register (or replace) a checked contract, returning the previous one
    pub fn register(&self, contract: ModelContract) -> Result<Option<Arc<ModelContract>>> {
        contract.check()?;
        let name = contract.name.to_string();
        let version = contract.version;
        let previous = self
            .models
            .write()
            .entry(name.clone())
            .or_default()
            .insert(version, Arc::new(contract));

        if previous.is_some() {
            info!("Replaced contract of model {} version {}", name, version);
        } else {
            debug!("Registered contract of model {} version {}", name, version);
        }
        Ok(previous)
    }

    pub fn remove(&self, name: &str, version: ModelVersion) -> Option<Arc<ModelContract>> {
        let mut models = self.models.write();
        let versions = models.get_mut(name)?;
        let removed = versions.remove(&version);
        if versions.is_empty() {
            models.remove(name);
        }
        removed
    }

    /// Every registered (model, version) pair, sorted
    pub fn list(&self) -> Vec<(ModelName, ModelVersion)> {
        let models = self.models.read();
        let mut entries: Vec<_> = models
            .iter()
            .flat_map(|(name, versions)| {
                versions
                    .keys()
                    .map(move |version| (ModelName::new(name.as_str()), *version))
            })
            .collect();
        entries.sort();
        entries
    }

    pub fn len(&self) -> usize {
        self.models.read().values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }
}

impl ContractProvider for ContractRegistry {
    fn resolve(&self, name: &str, version: ModelVersion) -> Result<Arc<ModelContract>> {
        let models = self.models.read();
        let versions = models.get(name).ok_or_else(|| {
            GateError::model_name_missing(format!("Model {} is not registered", name))
        })?;
        let contract = if version.is_latest() {
            versions.values().next_back()
        } else {
            versions.get(&version)
        };
        contract.cloned().ok_or_else(|| {
            GateError::model_version_missing(format!(
                "Model {} has no version {}",
                name, version
            ))
        })
    }

    fn versions(&self, name: &str) -> Vec<ModelVersion> {
        self.models
            .read()
            .get(name)
            .map(|versions| versions.keys().copied().collect())
            .unwrap_or_default()
    }
}
