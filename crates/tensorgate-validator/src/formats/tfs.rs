//! Binding for TensorFlow Serving style requests

use std::collections::BTreeSet;
use tensorgate_interfaces::{ContentMeasure, InputRef, RequestFormat};
use tensorgate_protocols::{PredictRequest, TensorProto, TfDataType};
use tensorgate_types::Precision;

/// [`PredictRequest`] seen through [`RequestFormat`]
#[derive(Debug, Clone, Copy)]
pub struct TfsRequest<'r> {
    request: &'r PredictRequest,
}

impl<'r> TfsRequest<'r> {
    pub fn new(request: &'r PredictRequest) -> Self {
        Self { request }
    }
}

impl RequestFormat for TfsRequest<'_> {
    type Tensor = TensorProto;
    const FORMAT: &'static str = "tfs";

    fn input_count(&self) -> usize {
        self.request.inputs.len()
    }

    fn optional_inputs_present(&self, optional: &BTreeSet<String>) -> usize {
        optional
            .iter()
            .filter(|name| self.request.inputs.contains_key(name.as_str()))
            .count()
    }

    fn find_input(&self, name: &str) -> Option<InputRef<'_, TensorProto>> {
        self.request
            .inputs
            .get(name)
            .map(|tensor| InputRef::new(tensor, 0))
    }

    fn binary_blob_count(&self, tensor: &TensorProto) -> Option<usize> {
        (tensor.dtype == TfDataType::String).then_some(tensor.string_val.len())
    }

    fn datatype_matches(&self, tensor: &TensorProto, expected: Precision) -> bool {
        TfDataType::from_precision(expected) == Some(tensor.dtype)
    }

    fn datatype_name(&self, tensor: &TensorProto) -> String {
        tensor.dtype.to_string()
    }

    /// `DT_UINT16` and `DT_HALF` travel as typed values, everything else as
    /// raw bytes in `tensor_content`
    fn content(&self, input: InputRef<'_, TensorProto>, _precision: Precision) -> ContentMeasure {
        let tensor = input.tensor;
        match tensor.dtype {
            TfDataType::Uint16 => ContentMeasure::Values(tensor.int_val.len()),
            TfDataType::Half => ContentMeasure::Values(tensor.half_val.len()),
            _ => ContentMeasure::Bytes(tensor.tensor_content.len()),
        }
    }
}
