//! Binding for KServe v2 style requests

use std::collections::BTreeSet;
use tensorgate_interfaces::{ContentMeasure, InputRef, RequestFormat};
use tensorgate_protocols::kfs::precision_to_datatype;
use tensorgate_protocols::{InferInputTensor, ModelInferRequest};
use tensorgate_types::{GateError, Precision, Result};

/// [`ModelInferRequest`] seen through [`RequestFormat`]
#[derive(Debug, Clone, Copy)]
pub struct KfsRequest<'r> {
    request: &'r ModelInferRequest,
}

impl<'r> KfsRequest<'r> {
    pub fn new(request: &'r ModelInferRequest) -> Self {
        Self { request }
    }

    fn uses_raw_contents(&self) -> bool {
        !self.request.raw_input_contents.is_empty()
    }
}

impl RequestFormat for KfsRequest<'_> {
    type Tensor = InferInputTensor;
    const FORMAT: &'static str = "kfs";
    const VALUE_COUNT_UNIT: &'static str = " values";

    fn input_count(&self) -> usize {
        self.request.inputs.len()
    }

    fn optional_inputs_present(&self, optional: &BTreeSet<String>) -> usize {
        if optional.is_empty() {
            return 0;
        }
        self.request
            .inputs
            .iter()
            .filter(|input| optional.contains(&input.name))
            .count()
    }

    fn find_input(&self, name: &str) -> Option<InputRef<'_, InferInputTensor>> {
        self.request
            .find_input(name)
            .map(|(index, tensor)| InputRef::new(tensor, index))
    }

    /// Data may travel in typed contents or in raw buffers, never both
    fn check_coherency(&self) -> Result<()> {
        if !self.uses_raw_contents() {
            return Ok(());
        }
        match self.request.inputs.iter().find(|i| i.has_contents()) {
            Some(input) => Err(GateError::invalid_message_structure(format!(
                "Passing buffers both in InferInputTensor contents and in raw_input_contents is not allowed. Detected buffer in InferInputTensor contents for input: {}",
                input.name
            ))),
            None => Ok(()),
        }
    }

    fn binary_blob_count(&self, tensor: &InferInputTensor) -> Option<usize> {
        tensor.is_bytes().then(|| tensor.blob_count())
    }

    fn binary_batch_checks_allowed(&self) -> bool {
        !self.uses_raw_contents()
    }

    fn datatype_matches(&self, tensor: &InferInputTensor, expected: Precision) -> bool {
        precision_to_datatype(expected) == Some(tensor.datatype.as_str())
    }

    fn datatype_name(&self, tensor: &InferInputTensor) -> String {
        tensor.datatype.clone()
    }

    fn content(
        &self,
        input: InputRef<'_, InferInputTensor>,
        precision: Precision,
    ) -> ContentMeasure {
        if self.uses_raw_contents() {
            let size = self
                .request
                .raw_input_contents
                .get(input.buffer_index)
                .map(Vec::len)
                .unwrap_or(0);
            return ContentMeasure::Bytes(size);
        }
        let count = input
            .tensor
            .contents
            .as_ref()
            .map(|c| c.value_count(precision))
            .unwrap_or(0);
        ContentMeasure::Values(count)
    }
}
