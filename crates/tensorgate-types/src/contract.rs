//! Model input contracts

use crate::{GateError, Mode, ModelName, ModelVersion, Result, ShapeModes, TensorInfo, TensorMap};
use std::collections::BTreeSet;

/// Everything a validator needs to know about one servable version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelContract {
    pub name: ModelName,
    pub version: ModelVersion,
    /// Declared inputs, in declaration order
    pub inputs: TensorMap,
    /// Whether the batch axis may trigger a batch size change
    pub batching_mode: Mode,
    /// Per-input shape modes
    pub shape_modes: ShapeModes,
    /// Inputs that requests may carry on top of the declared ones
    pub optional_inputs: BTreeSet<String>,
}

impl ModelContract {
    pub fn new(name: impl Into<ModelName>, version: impl Into<ModelVersion>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            inputs: TensorMap::new(),
            batching_mode: Mode::Fixed,
            shape_modes: ShapeModes::new(),
            optional_inputs: BTreeSet::new(),
        }
    }

    pub fn with_input(mut self, input: TensorInfo) -> Self {
        self.inputs.insert(input);
        self
    }

    pub fn with_batching_mode(mut self, mode: Mode) -> Self {
        self.batching_mode = mode;
        self
    }

    pub fn with_shape_modes(mut self, modes: ShapeModes) -> Self {
        self.shape_modes = modes;
        self
    }

    pub fn with_optional_input(mut self, name: impl Into<String>) -> Self {
        self.optional_inputs.insert(name.into());
        self
    }

    /// Check the metadata itself is well formed.
    ///
    /// Every input needs a batch axis inside its declared shape and optional
    /// inputs must not shadow declared ones.
    pub fn check(&self) -> Result<()> {
        if self.version.is_latest() {
            return Err(GateError::config(format!(
                "Model {} must have a version greater than 0",
                self.name
            )));
        }
        for input in self.inputs.iter() {
            let batch_index = input.batch_index().ok_or_else(|| {
                GateError::config(format!(
                    "Missing batch index in input: {} layout: {}",
                    input.name, input.layout
                ))
            })?;
            if batch_index >= input.shape.len() {
                return Err(GateError::config(format!(
                    "Batch index out of shape range for input: {} layout: {} shape: {}",
                    input.name, input.layout, input.shape
                )));
            }
        }
        if let Some(shadowed) = self.optional_inputs.iter().find(|n| self.inputs.contains(n)) {
            return Err(GateError::config(format!(
                "Optional input {} is also declared as a regular input",
                shadowed
            )));
        }
        Ok(())
    }
}
