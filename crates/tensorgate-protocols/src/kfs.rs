//! KServe v2 style inference requests

use serde::{Deserialize, Serialize};
use tensorgate_interfaces::ShapeAccessor;
use tensorgate_types::{DimensionValue, Precision};

/// Datatype string of binary (encoded file) inputs
pub const BYTES_DATATYPE: &str = "BYTES";

/// Wire datatype string encoding a precision, if the format has one
pub fn precision_to_datatype(precision: Precision) -> Option<&'static str> {
    let datatype = match precision {
        Precision::FP64 => "FP64",
        Precision::FP32 => "FP32",
        Precision::FP16 => "FP16",
        Precision::I64 => "INT64",
        Precision::I32 => "INT32",
        Precision::I16 => "INT16",
        Precision::I8 => "INT8",
        Precision::U64 => "UINT64",
        Precision::U32 => "UINT32",
        Precision::U16 => "UINT16",
        Precision::U8 => "UINT8",
        Precision::BOOL => "BOOL",
        _ => return None,
    };
    Some(datatype)
}

/// Precision encoded by a wire datatype string
pub fn datatype_to_precision(datatype: &str) -> Precision {
    match datatype {
        "FP64" => Precision::FP64,
        "FP32" => Precision::FP32,
        "FP16" => Precision::FP16,
        "INT64" => Precision::I64,
        "INT32" => Precision::I32,
        "INT16" => Precision::I16,
        "INT8" => Precision::I8,
        "UINT64" => Precision::U64,
        "UINT32" => Precision::U32,
        "UINT16" => Precision::U16,
        "UINT8" => Precision::U8,
        "BOOL" => Precision::BOOL,
        _ => Precision::UNDEFINED,
    }
}

/// Typed value containers of an input
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InferTensorContents {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bool_contents: Vec<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub int_contents: Vec<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub int64_contents: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uint_contents: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uint64_contents: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fp32_contents: Vec<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fp64_contents: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bytes_contents: Vec<Vec<u8>>,
}

impl InferTensorContents {
    /// Number of values in the container selected by a precision.
    ///
    /// Precisions without a typed container (FP16, BF16, sub-byte types)
    /// report zero.
    pub fn value_count(&self, precision: Precision) -> usize {
        match precision {
            Precision::BOOL => self.bool_contents.len(),
            Precision::I8 | Precision::I16 | Precision::I32 => self.int_contents.len(),
            Precision::I64 => self.int64_contents.len(),
            Precision::U8 | Precision::U16 | Precision::U32 => self.uint_contents.len(),
            Precision::U64 => self.uint64_contents.len(),
            Precision::FP32 => self.fp32_contents.len(),
            Precision::FP64 => self.fp64_contents.len(),
            _ => 0,
        }
    }
}

/// One input of a [`ModelInferRequest`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InferInputTensor {
    pub name: String,
    pub datatype: String,
    #[serde(default)]
    pub shape: Vec<DimensionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<InferTensorContents>,
}

impl InferInputTensor {
    pub fn new(
        name: impl Into<String>,
        datatype: impl Into<String>,
        shape: &[DimensionValue],
    ) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
            shape: shape.to_vec(),
            contents: None,
        }
    }

    pub fn with_contents(mut self, contents: InferTensorContents) -> Self {
        self.contents = Some(contents);
        self
    }

    pub fn has_contents(&self) -> bool {
        self.contents.is_some()
    }

    pub fn is_bytes(&self) -> bool {
        self.datatype == BYTES_DATATYPE
    }

    /// Number of encoded blobs carried in `bytes_contents`
    pub fn blob_count(&self) -> usize {
        self.contents
            .as_ref()
            .map(|c| c.bytes_contents.len())
            .unwrap_or(0)
    }
}

impl ShapeAccessor for InferInputTensor {
    fn axis_count(&self) -> usize {
        self.shape.len()
    }

    fn axis_value(&self, index: usize) -> DimensionValue {
        self.shape[index]
    }
}

/// Inference request with positional inputs.
///
/// Input data travels either in each input's typed `contents` or, in the
/// same order as `inputs`, in `raw_input_contents`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelInferRequest {
    pub model_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model_version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub inputs: Vec<InferInputTensor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_input_contents: Vec<Vec<u8>>,
}

impl ModelInferRequest {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, input: InferInputTensor) -> Self {
        self.inputs.push(input);
        self
    }

    /// Append an input whose bytes travel in `raw_input_contents`
    pub fn with_raw_input(mut self, input: InferInputTensor, raw: Vec<u8>) -> Self {
        self.inputs.push(input);
        self.raw_input_contents.push(raw);
        self
    }

    /// Position and value of the first input with this name
    pub fn find_input(&self, name: &str) -> Option<(usize, &InferInputTensor)> {
        self.inputs.iter().enumerate().find(|(_, i)| i.name == name)
    }
}
