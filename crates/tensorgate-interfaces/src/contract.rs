//! Model contract lookup

use std::sync::Arc;
use tensorgate_types::{ModelContract, ModelVersion, Result};

/// Source of model input contracts.
///
/// Returned contracts are immutable snapshots; a reconfigured model is
/// published as a new snapshot while in-flight validations keep the old one.
pub trait ContractProvider: Send + Sync {
    /// Resolve the contract of a model version; version `0` selects the latest
    fn resolve(&self, name: &str, version: ModelVersion) -> Result<Arc<ModelContract>>;

    /// Registered versions of a model, ascending
    fn versions(&self, name: &str) -> Vec<ModelVersion>;
}
