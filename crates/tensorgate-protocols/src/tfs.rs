//! TensorFlow Serving style prediction requests

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tensorgate_interfaces::ShapeAccessor;
use tensorgate_types::{DimensionValue, Precision};

/// Tensor element type as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TfDataType {
    #[default]
    #[serde(rename = "DT_INVALID")]
    Invalid,
    #[serde(rename = "DT_FLOAT")]
    Float,
    #[serde(rename = "DT_DOUBLE")]
    Double,
    #[serde(rename = "DT_INT32")]
    Int32,
    #[serde(rename = "DT_UINT8")]
    Uint8,
    #[serde(rename = "DT_INT16")]
    Int16,
    #[serde(rename = "DT_INT8")]
    Int8,
    #[serde(rename = "DT_STRING")]
    String,
    #[serde(rename = "DT_INT64")]
    Int64,
    #[serde(rename = "DT_BOOL")]
    Bool,
    #[serde(rename = "DT_BFLOAT16")]
    Bfloat16,
    #[serde(rename = "DT_UINT16")]
    Uint16,
    #[serde(rename = "DT_HALF")]
    Half,
    #[serde(rename = "DT_UINT32")]
    Uint32,
    #[serde(rename = "DT_UINT64")]
    Uint64,
}

impl TfDataType {
    /// Wire datatype encoding a precision, if the format has one
    pub fn from_precision(precision: Precision) -> Option<Self> {
        let dtype = match precision {
            Precision::FP32 => Self::Float,
            Precision::FP64 => Self::Double,
            Precision::FP16 => Self::Half,
            Precision::BF16 => Self::Bfloat16,
            Precision::I64 => Self::Int64,
            Precision::I32 => Self::Int32,
            Precision::I16 => Self::Int16,
            Precision::I8 => Self::Int8,
            Precision::U64 => Self::Uint64,
            Precision::U32 => Self::Uint32,
            Precision::U16 => Self::Uint16,
            Precision::U8 => Self::Uint8,
            Precision::BOOL => Self::Bool,
            Precision::STRING => Self::String,
            Precision::I4 | Precision::U4 | Precision::U1 | Precision::UNDEFINED => return None,
        };
        Some(dtype)
    }

    /// Precision encoded by this datatype
    pub fn to_precision(self) -> Precision {
        match self {
            Self::Float => Precision::FP32,
            Self::Double => Precision::FP64,
            Self::Half => Precision::FP16,
            Self::Bfloat16 => Precision::BF16,
            Self::Int64 => Precision::I64,
            Self::Int32 => Precision::I32,
            Self::Int16 => Precision::I16,
            Self::Int8 => Precision::I8,
            Self::Uint64 => Precision::U64,
            Self::Uint32 => Precision::U32,
            Self::Uint16 => Precision::U16,
            Self::Uint8 => Precision::U8,
            Self::Bool => Precision::BOOL,
            Self::String => Precision::STRING,
            Self::Invalid => Precision::UNDEFINED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invalid => "DT_INVALID",
            Self::Float => "DT_FLOAT",
            Self::Double => "DT_DOUBLE",
            Self::Int32 => "DT_INT32",
            Self::Uint8 => "DT_UINT8",
            Self::Int16 => "DT_INT16",
            Self::Int8 => "DT_INT8",
            Self::String => "DT_STRING",
            Self::Int64 => "DT_INT64",
            Self::Bool => "DT_BOOL",
            Self::Bfloat16 => "DT_BFLOAT16",
            Self::Uint16 => "DT_UINT16",
            Self::Half => "DT_HALF",
            Self::Uint32 => "DT_UINT32",
            Self::Uint64 => "DT_UINT64",
        }
    }
}

impl fmt::Display for TfDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One axis of a tensor shape
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dim {
    pub size: DimensionValue,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TensorShapeProto {
    #[serde(default)]
    pub dim: Vec<Dim>,
}

impl TensorShapeProto {
    pub fn new(sizes: &[DimensionValue]) -> Self {
        Self {
            dim: sizes
                .iter()
                .map(|&size| Dim {
                    size,
                    name: String::new(),
                })
                .collect(),
        }
    }
}

/// Tensor as carried by a [`PredictRequest`].
///
/// Numeric data normally travels in `tensor_content`; `DT_UINT16` uses
/// `int_val`, `DT_HALF` uses `half_val` and `DT_STRING` carries one encoded
/// blob per batch element in `string_val`. `float_val` is carried for
/// completeness but never consulted when measuring content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TensorProto {
    #[serde(default)]
    pub dtype: TfDataType,
    #[serde(default)]
    pub tensor_shape: TensorShapeProto,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tensor_content: Vec<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub float_val: Vec<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub int_val: Vec<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub half_val: Vec<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub string_val: Vec<Vec<u8>>,
}

impl TensorProto {
    /// Tensor whose data lives in `tensor_content`
    pub fn with_content(dtype: TfDataType, shape: &[DimensionValue], content: Vec<u8>) -> Self {
        Self {
            dtype,
            tensor_shape: TensorShapeProto::new(shape),
            tensor_content: content,
            ..Default::default()
        }
    }

    /// Binary tensor with one encoded blob per batch element
    pub fn with_blobs(blobs: Vec<Vec<u8>>) -> Self {
        Self {
            dtype: TfDataType::String,
            tensor_shape: TensorShapeProto::new(&[blobs.len() as DimensionValue]),
            string_val: blobs,
            ..Default::default()
        }
    }
}

impl ShapeAccessor for TensorProto {
    fn axis_count(&self) -> usize {
        self.tensor_shape.dim.len()
    }

    fn axis_value(&self, index: usize) -> DimensionValue {
        self.tensor_shape.dim[index].size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModelSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub signature_name: String,
}

/// Prediction request keyed by input name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub model_spec: ModelSpec,
    #[serde(default)]
    pub inputs: HashMap<String, TensorProto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_filter: Vec<String>,
}

impl PredictRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model_spec: ModelSpec {
                name: model.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, tensor: TensorProto) -> Self {
        self.inputs.insert(name.into(), tensor);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_table_is_consistent() {
        for p in [
            Precision::FP32,
            Precision::FP16,
            Precision::U16,
            Precision::I8,
            Precision::BOOL,
            Precision::STRING,
        ] {
            assert_eq!(TfDataType::from_precision(p).unwrap().to_precision(), p);
        }
        assert_eq!(TfDataType::from_precision(Precision::U1), None);
    }

    #[test]
    fn json_uses_wire_names() {
        let json = r#"{"dtype":"DT_FLOAT","tensor_shape":{"dim":[{"size":1},{"size":3}]}}"#;
        let tensor: TensorProto = serde_json::from_str(json).unwrap();
        assert_eq!(tensor.dtype, TfDataType::Float);
        assert_eq!(tensor.display_shape(), "(1,3)");
    }
}
