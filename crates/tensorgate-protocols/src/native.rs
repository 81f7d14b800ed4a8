//! In-process inference requests
//!
//! Requests are assembled through a typed builder API; every mutation that
//! would leave the request ambiguous (a second tensor with the same name, a
//! second buffer for one tensor) is rejected with a dedicated error.

use serde::{Deserialize, Serialize};
use std::fmt;
use tensorgate_interfaces::{BufferKind, BufferPlacement, ShapeAccessor};
use tensorgate_types::{DimensionValue, GateError, ModelVersion, Precision, Result};
use tracing::debug;

/// Element type of native tensors and parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeDataType {
    BF16,
    FP64,
    FP32,
    FP16,
    I64,
    I32,
    I16,
    I8,
    I4,
    U64,
    U32,
    U16,
    U8,
    U4,
    U1,
    BOOL,
    STRING,
    UNDEFINED,
}

impl NativeDataType {
    pub fn from_precision(precision: Precision) -> Self {
        match precision {
            Precision::BF16 => Self::BF16,
            Precision::FP64 => Self::FP64,
            Precision::FP32 => Self::FP32,
            Precision::FP16 => Self::FP16,
            Precision::I64 => Self::I64,
            Precision::I32 => Self::I32,
            Precision::I16 => Self::I16,
            Precision::I8 => Self::I8,
            Precision::I4 => Self::I4,
            Precision::U64 => Self::U64,
            Precision::U32 => Self::U32,
            Precision::U16 => Self::U16,
            Precision::U8 => Self::U8,
            Precision::U4 => Self::U4,
            Precision::U1 => Self::U1,
            Precision::BOOL => Self::BOOL,
            Precision::STRING => Self::STRING,
            Precision::UNDEFINED => Self::UNDEFINED,
        }
    }

    pub fn to_precision(self) -> Precision {
        match self {
            Self::BF16 => Precision::BF16,
            Self::FP64 => Precision::FP64,
            Self::FP32 => Precision::FP32,
            Self::FP16 => Precision::FP16,
            Self::I64 => Precision::I64,
            Self::I32 => Precision::I32,
            Self::I16 => Precision::I16,
            Self::I8 => Precision::I8,
            Self::I4 => Precision::I4,
            Self::U64 => Precision::U64,
            Self::U32 => Precision::U32,
            Self::U16 => Precision::U16,
            Self::U8 => Precision::U8,
            Self::U4 => Precision::U4,
            Self::U1 => Precision::U1,
            Self::BOOL => Precision::BOOL,
            Self::STRING => Precision::STRING,
            Self::UNDEFINED => Precision::UNDEFINED,
        }
    }
}

impl fmt::Display for NativeDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_precision().as_str())
    }
}

/// Data attached to a native tensor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buffer {
    pub data: Vec<u8>,
    /// Raw buffer type code; see [`BufferKind`]
    pub buffer_type: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<u32>,
}

impl Buffer {
    pub fn new(data: Vec<u8>, kind: BufferKind, device_id: Option<u32>) -> Self {
        Self {
            data,
            buffer_type: kind.code(),
            device_id,
        }
    }

    /// Plain host memory buffer
    pub fn cpu(data: Vec<u8>) -> Self {
        Self::new(data, BufferKind::Cpu, None)
    }

    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    pub fn placement(&self) -> BufferPlacement {
        BufferPlacement {
            code: self.buffer_type,
            device_id: self.device_id,
        }
    }
}

/// Named input tensor of an [`InferenceRequest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceTensor {
    pub name: String,
    pub datatype: NativeDataType,
    pub shape: Vec<DimensionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer: Option<Buffer>,
}

impl InferenceTensor {
    pub fn buffer(&self) -> Option<&Buffer> {
        self.buffer.as_ref()
    }
}

impl ShapeAccessor for InferenceTensor {
    fn axis_count(&self) -> usize {
        self.shape.len()
    }

    fn axis_value(&self, index: usize) -> DimensionValue {
        self.shape[index]
    }
}

/// Request-level parameter such as a sequence id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceParameter {
    pub name: String,
    pub datatype: NativeDataType,
    pub data: Vec<u8>,
}

/// Inference request built in process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub servable_name: String,
    pub servable_version: ModelVersion,
    #[serde(default)]
    inputs: Vec<InferenceTensor>,
    #[serde(default)]
    parameters: Vec<InferenceParameter>,
}

impl InferenceRequest {
    pub fn new(servable_name: impl Into<String>, servable_version: impl Into<ModelVersion>) -> Self {
        Self {
            servable_name: servable_name.into(),
            servable_version: servable_version.into(),
            inputs: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Declare an input without data
    pub fn add_input(
        &mut self,
        name: impl Into<String>,
        datatype: NativeDataType,
        shape: &[DimensionValue],
    ) -> Result<()> {
        let name = name.into();
        if self.get_input(&name).is_some() {
            debug!(servable = %self.servable_name, input = %name, "Rejected second input with the same name");
            return Err(GateError::double_tensor_insert(format!("input name: {}", name)));
        }
        self.inputs.push(InferenceTensor {
            name,
            datatype,
            shape: shape.to_vec(),
            buffer: None,
        });
        Ok(())
    }

    /// Attach data to a declared input
    pub fn set_input_data(
        &mut self,
        name: &str,
        data: Vec<u8>,
        buffer_type: i32,
        device_id: Option<u32>,
    ) -> Result<()> {
        let tensor = self
            .inputs
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| {
                GateError::nonexistent_tensor_for_set_buffer(format!("input name: {}", name))
            })?;
        if tensor.buffer.is_some() {
            return Err(GateError::double_buffer_set(format!("input name: {}", name)));
        }
        tensor.buffer = Some(Buffer {
            data,
            buffer_type,
            device_id,
        });
        Ok(())
    }

    /// Detach the data of an input, returning it
    pub fn remove_input_data(&mut self, name: &str) -> Result<Buffer> {
        self.inputs
            .iter_mut()
            .find(|t| t.name == name)
            .and_then(|t| t.buffer.take())
            .ok_or_else(|| {
                GateError::nonexistent_buffer_for_removal(format!("input name: {}", name))
            })
    }

    pub fn remove_input(&mut self, name: &str) -> Result<InferenceTensor> {
        let position = self
            .inputs
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| {
                GateError::nonexistent_tensor_for_removal(format!("input name: {}", name))
            })?;
        Ok(self.inputs.remove(position))
    }

    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        datatype: NativeDataType,
        data: Vec<u8>,
    ) -> Result<()> {
        let name = name.into();
        if self.get_parameter(&name).is_some() {
            return Err(GateError::double_parameter_insert(format!(
                "parameter name: {}",
                name
            )));
        }
        self.parameters.push(InferenceParameter {
            name,
            datatype,
            data,
        });
        Ok(())
    }

    pub fn remove_parameter(&mut self, name: &str) -> Result<InferenceParameter> {
        let position = self
            .parameters
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| {
                GateError::nonexistent_parameter_for_removal(format!("parameter name: {}", name))
            })?;
        Ok(self.parameters.remove(position))
    }

    pub fn get_parameter(&self, name: &str) -> Option<&InferenceParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn get_input(&self, name: &str) -> Option<&InferenceTensor> {
        self.inputs.iter().find(|t| t.name == name)
    }

    /// Inputs in insertion order
    pub fn inputs(&self) -> &[InferenceTensor] {
        &self.inputs
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn parameters(&self) -> &[InferenceParameter] {
        &self.parameters
    }
}
