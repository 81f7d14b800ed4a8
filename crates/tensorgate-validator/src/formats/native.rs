//! Binding for in-process requests

use std::collections::BTreeSet;
use tensorgate_interfaces::{BufferPlacement, ContentMeasure, InputRef, RequestFormat};
use tensorgate_protocols::{Buffer, InferenceRequest, InferenceTensor, NativeDataType};
use tensorgate_types::Precision;

/// [`InferenceRequest`] seen through [`RequestFormat`].
///
/// In-process callers cannot pass optional inputs and never send encoded
/// binary content.
#[derive(Debug, Clone, Copy)]
pub struct NativeRequest<'r> {
    request: &'r InferenceRequest,
}

impl<'r> NativeRequest<'r> {
    pub fn new(request: &'r InferenceRequest) -> Self {
        Self { request }
    }
}

impl RequestFormat for NativeRequest<'_> {
    type Tensor = InferenceTensor;
    const FORMAT: &'static str = "native";

    fn input_count(&self) -> usize {
        self.request.input_count()
    }

    fn optional_inputs_present(&self, _optional: &BTreeSet<String>) -> usize {
        0
    }

    fn find_input(&self, name: &str) -> Option<InputRef<'_, InferenceTensor>> {
        self.request
            .inputs()
            .iter()
            .enumerate()
            .find(|(_, tensor)| tensor.name == name)
            .map(|(index, tensor)| InputRef::new(tensor, index))
    }

    fn binary_blob_count(&self, _tensor: &InferenceTensor) -> Option<usize> {
        None
    }

    fn datatype_matches(&self, tensor: &InferenceTensor, expected: Precision) -> bool {
        tensor.datatype == NativeDataType::from_precision(expected)
    }

    fn datatype_name(&self, tensor: &InferenceTensor) -> String {
        tensor.datatype.to_string()
    }

    fn content(&self, input: InputRef<'_, InferenceTensor>, _precision: Precision) -> ContentMeasure {
        match input.tensor.buffer() {
            Some(buffer) => ContentMeasure::Bytes(buffer.byte_size()),
            None => ContentMeasure::Missing,
        }
    }

    fn buffer_placement(&self, tensor: &InferenceTensor) -> Option<BufferPlacement> {
        tensor.buffer().map(Buffer::placement)
    }
}
