//! Model contract files
//!
//! Contracts are described in TOML:
//!
//! ```toml
//! [[models]]
//! name = "resnet"
//! version = 1
//! batching_mode = "fixed"
//! optional_inputs = ["mask"]
//!
//! [models.shape_modes]
//! "*" = "auto"
//!
//! [[models.inputs]]
//! name = "data"
//! precision = "FP32"
//! shape = "(1:8,3,224,224)"
//! layout = "NCHW"
//! ```

use crate::{
    GateError, Mode, ModelContract, Result, ShapeModes, TensorInfo, ANONYMOUS_INPUT_NAME,
    WILDCARD_INPUT_NAME,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::fs;

/// Parsed contract file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractFile {
    /// Model entries
    #[serde(default)]
    pub models: Vec<ModelConfigEntry>,
}

/// One model version inside a contract file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfigEntry {
    pub name: String,
    pub version: u64,

    #[serde(default)]
    pub batching_mode: Mode,

    #[serde(default)]
    pub optional_inputs: Vec<String>,

    /// Per-input shape modes, `"*"` applies to every other input
    #[serde(default)]
    pub shape_modes: HashMap<String, Mode>,

    #[serde(default)]
    pub inputs: Vec<TensorInfo>,
}

impl ContractFile {
    /// Load a contract file from disk
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            GateError::io(format!(
                "Failed to read contract file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a contract file from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| GateError::config(format!("Failed to parse contract file: {}", e)))
    }

    /// Render back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| GateError::config(format!("Failed to serialize contract file: {}", e)))
    }

    /// Convert every entry into a checked [`ModelContract`]
    pub fn into_contracts(self) -> Result<Vec<ModelContract>> {
        let mut seen = HashSet::new();
        let mut contracts = Vec::with_capacity(self.models.len());
        for entry in self.models {
            if !seen.insert((entry.name.clone(), entry.version)) {
                return Err(GateError::config(format!(
                    "Model {} version {} is declared more than once",
                    entry.name, entry.version
                )));
            }
            contracts.push(entry.into_contract()?);
        }
        Ok(contracts)
    }
}

impl ModelConfigEntry {
    pub fn into_contract(self) -> Result<ModelContract> {
        let shape_modes: ShapeModes = self.shape_modes.into_iter().collect();
        let mut contract = ModelContract::new(self.name, self.version)
            .with_batching_mode(self.batching_mode)
            .with_shape_modes(shape_modes);

        for input in self.inputs {
            if contract.inputs.contains(&input.name) {
                return Err(GateError::config(format!(
                    "Duplicate input {} in model {}",
                    input.name, contract.name
                )));
            }
            contract.inputs.insert(input);
        }
        for name in self.optional_inputs {
            contract.optional_inputs.insert(name);
        }

        contract.check()?;
        Ok(contract)
    }
}

impl From<&ModelContract> for ModelConfigEntry {
    fn from(contract: &ModelContract) -> Self {
        Self {
            name: contract.name.to_string(),
            version: contract.version.get(),
            batching_mode: contract.batching_mode,
            shape_modes: contract
                .shape_modes
                .iter()
                .map(|(name, mode)| {
                    let name = if name == ANONYMOUS_INPUT_NAME {
                        WILDCARD_INPUT_NAME
                    } else {
                        name
                    };
                    (name.to_string(), mode)
                })
                .collect(),
            optional_inputs: contract.optional_inputs.iter().cloned().collect(),
            inputs: contract.inputs.iter().map(|i| (**i).clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESNET: &str = r#"
[[models]]
name = "resnet"
version = 1
batching_mode = "auto"

[models.shape_modes]
"*" = "auto"

[[models.inputs]]
name = "data"
precision = "FP32"
shape = "(1:8,3,224,224)"
layout = "NCHW"
"#;

    #[test]
    fn parses_contract() {
        let contracts = ContractFile::from_toml_str(RESNET)
            .unwrap()
            .into_contracts()
            .unwrap();
        assert_eq!(contracts.len(), 1);
        let c = &contracts[0];
        assert_eq!(c.batching_mode, Mode::Auto);
        assert_eq!(c.shape_modes.resolve("data"), Mode::Auto);
        let data = c.inputs.get("data").unwrap();
        assert_eq!(data.shape.to_string(), "(1:8,3,224,224)");
        assert_eq!(data.batch_index(), Some(0));
    }

    #[test]
    fn duplicate_inputs_rejected() {
        let text = r#"
[[models]]
name = "m"
version = 1
[[models.inputs]]
name = "a"
precision = "FP32"
shape = "(1)"
[[models.inputs]]
name = "a"
precision = "FP32"
shape = "(1)"
"#;
        let err = ContractFile::from_toml_str(text)
            .unwrap()
            .into_contracts()
            .unwrap_err();
        assert!(matches!(err, GateError::Config { .. }));
    }

    #[test]
    fn bad_shape_is_config_error() {
        let text = RESNET.replace("(1:8,3,224,224)", "(8:1,3)");
        assert!(ContractFile::from_toml_str(&text).is_err());
    }
}
