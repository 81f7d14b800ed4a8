//! Request validation core
//!
//! One pass over the declared inputs, in declaration order. The first hard
//! error ends the pass; reconfiguration signals are accumulated and reported
//! with a successful outcome.

use crate::outcome::{PendingSignal, Signal, ValidationResult};
use std::collections::BTreeSet;
use tensorgate_interfaces::{BufferKind, ContentMeasure, InputRef, RequestFormat, ShapeAccessor};
use tensorgate_types::{
    Dimension, GateError, Mode, ModelContract, ModelVersion, Result, ShapeModes, TensorInfo,
    TensorMap,
};
use tracing::{debug, debug_span};

/// Everything a validation call reads besides the request itself
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub inputs: &'a TensorMap,
    pub servable_name: &'a str,
    pub servable_version: ModelVersion,
    pub optional_inputs: &'a BTreeSet<String>,
    pub batching_mode: Mode,
    pub shape_modes: &'a ShapeModes,
}

impl<'a> ValidationContext<'a> {
    pub fn new(contract: &'a ModelContract) -> Self {
        Self {
            inputs: &contract.inputs,
            servable_name: contract.name.as_str(),
            servable_version: contract.version,
            optional_inputs: &contract.optional_inputs,
            batching_mode: contract.batching_mode,
            shape_modes: &contract.shape_modes,
        }
    }
}

impl<'a> From<&'a ModelContract> for ValidationContext<'a> {
    fn from(contract: &'a ModelContract) -> Self {
        Self::new(contract)
    }
}

/// Validate a request against a model contract
pub fn validate<R>(request: &R, ctx: &ValidationContext<'_>) -> ValidationResult
where
    R: RequestFormat + ?Sized,
{
    let span = debug_span!(
        "validate",
        format = R::FORMAT,
        servable = ctx.servable_name,
        version = %ctx.servable_version
    );
    let _enter = span.enter();

    RequestValidator { request, ctx }.run().map_err(|err| {
        debug!(
            servable = ctx.servable_name,
            version = %ctx.servable_version,
            code = %err.code(),
            "{}",
            err
        );
        err
    })
}

struct RequestValidator<'a, R: ?Sized> {
    request: &'a R,
    ctx: &'a ValidationContext<'a>,
}

impl<'a, R> RequestValidator<'a, R>
where
    R: RequestFormat + ?Sized,
{
    fn run(&self) -> ValidationResult {
        self.check_input_count()?;
        self.request.check_coherency()?;

        let mut pending = PendingSignal::new();
        for info in self.ctx.inputs.iter() {
            pending = self.check_input(info, pending)?;
        }
        Ok(pending.into_outcome())
    }

    fn check_input_count(&self) -> Result<()> {
        let expected = self.ctx.inputs.len()
            + self
                .request
                .optional_inputs_present(self.ctx.optional_inputs);
        let actual = self.request.input_count();
        if actual > 0 && actual == expected {
            return Ok(());
        }
        Err(GateError::invalid_no_of_inputs(format!(
            "Expected: {}; Actual: {}",
            expected, actual
        )))
    }

    fn check_input(&self, info: &TensorInfo, pending: PendingSignal) -> Result<PendingSignal> {
        let input = self.request.find_input(&info.name).ok_or_else(|| {
            GateError::invalid_missing_input(format!("Required input: {}", info.name))
        })?;
        let tensor = input.tensor;

        check_positive_axes(info, tensor)?;
        let batch_index = declared_batch_index(info)?;
        let batch_dim = &info.shape[batch_index];
        let shape_mode = self.ctx.shape_modes.resolve(&info.name);

        if let Some(blobs) = self.request.binary_blob_count(tensor) {
            debug!(
                input = %info.name,
                batch_size = blobs,
                "Received request containing binary input"
            );
            return self.check_binary_input(info, tensor, blobs, batch_dim, shape_mode, pending);
        }

        self.check_precision(info, tensor)?;
        check_rank(info, tensor)?;
        let pending = self.check_batch_size(info, tensor, batch_index, shape_mode, pending)?;
        let pending = self.check_shape(info, tensor, batch_index, shape_mode, pending)?;
        self.check_content(info, input)?;
        self.check_buffer(info, tensor)?;
        Ok(pending)
    }

    fn check_binary_input(
        &self,
        info: &TensorInfo,
        tensor: &R::Tensor,
        blobs: usize,
        batch_dim: &Dimension,
        shape_mode: Mode,
        pending: PendingSignal,
    ) -> Result<PendingSignal> {
        if tensor.axis_count() != 1 {
            return Err(GateError::invalid_no_of_shape_dimensions(format!(
                "Expected number of binary input shape dimensions: 1; Actual: {}; input name: {}",
                tensor.axis_count(),
                info.name
            )));
        }

        if !self.request.binary_batch_checks_allowed() {
            if *batch_dim != 1i64 {
                return Err(GateError::invalid_batch_size(format!(
                    "When the image is placed in raw_input_contents batch size cannot be bigger than 1; input name: {}",
                    info.name
                )));
            }
            return Ok(pending);
        }

        if blobs == 0 {
            return Err(GateError::invalid_batch_size(format!(
                "Batch size must be positive; input name: {}",
                info.name
            )));
        }
        if batch_dim.matches(tensor.axis_value(0)) {
            return Ok(pending);
        }
        self.batch_mismatch(info, batch_dim, blobs as i64, shape_mode, pending)
    }

    fn check_precision(&self, info: &TensorInfo, tensor: &R::Tensor) -> Result<()> {
        if self.request.datatype_matches(tensor, info.precision) {
            return Ok(());
        }
        Err(GateError::invalid_precision(format!(
            "Expected: {}; Actual: {}; input name: {}",
            info.precision,
            self.request.datatype_name(tensor),
            info.name
        )))
    }

    fn check_batch_size(
        &self,
        info: &TensorInfo,
        tensor: &R::Tensor,
        batch_index: usize,
        shape_mode: Mode,
        pending: PendingSignal,
    ) -> Result<PendingSignal> {
        let batch_dim = &info.shape[batch_index];
        let observed = tensor.axis_value(batch_index);
        if batch_dim.matches(observed) {
            return Ok(pending);
        }
        self.batch_mismatch(info, batch_dim, observed, shape_mode, pending)
    }

    /// Batch axis mismatch: a signal under auto batching, an error under a
    /// fixed shape, tolerated under an auto shape with fixed batching
    fn batch_mismatch(
        &self,
        info: &TensorInfo,
        batch_dim: &Dimension,
        observed: i64,
        shape_mode: Mode,
        pending: PendingSignal,
    ) -> Result<PendingSignal> {
        if self.ctx.batching_mode.is_auto() {
            return Ok(pending.record(Signal::BatchSizeChangeRequired));
        }
        if !shape_mode.is_auto() {
            return Err(GateError::invalid_batch_size(format!(
                "Expected: {}; Actual: {}; input name: {}",
                batch_dim, observed, info.name
            )));
        }
        Ok(pending)
    }

    fn check_shape(
        &self,
        info: &TensorInfo,
        tensor: &R::Tensor,
        batch_index: usize,
        shape_mode: Mode,
        pending: PendingSignal,
    ) -> Result<PendingSignal> {
        let skip_batch = self.ctx.batching_mode.is_auto();
        let mismatch = info
            .shape
            .iter()
            .enumerate()
            .filter(|(i, _)| !(skip_batch && *i == batch_index))
            .any(|(i, dim)| !dim.matches(tensor.axis_value(i)));
        if !mismatch {
            return Ok(pending);
        }
        if shape_mode.is_auto() {
            return Ok(pending.record(Signal::ReshapeRequired));
        }
        Err(GateError::invalid_shape(format!(
            "Expected: {}; Actual: {}; input name: {}",
            info.shape,
            tensor.display_shape(),
            info.name
        )))
    }

    fn check_content(&self, info: &TensorInfo, input: InputRef<'_, R::Tensor>) -> Result<()> {
        let elements = input.tensor.element_count();
        match self.request.content(input, info.precision) {
            ContentMeasure::Values(count) if count != elements => {
                Err(GateError::invalid_value_count(format!(
                    "Expected: {}{unit}; Actual: {}{unit}; input name: {}",
                    elements,
                    count,
                    info.name,
                    unit = R::VALUE_COUNT_UNIT
                )))
            }
            ContentMeasure::Bytes(size) => {
                let expected = elements.saturating_mul(info.precision.size_bytes());
                if size == expected {
                    return Ok(());
                }
                Err(GateError::invalid_content_size(format!(
                    "Expected: {} bytes; Actual: {} bytes; input name: {}",
                    expected, size, info.name
                )))
            }
            ContentMeasure::Missing => Err(GateError::invalid_content_size(format!(
                "Servable: {}; version: {}; is missing buffer for input: {}",
                self.ctx.servable_name, self.ctx.servable_version, info.name
            ))),
            ContentMeasure::Values(_) => Ok(()),
        }
    }

    fn check_buffer(&self, info: &TensorInfo, tensor: &R::Tensor) -> Result<()> {
        let Some(placement) = self.request.buffer_placement(tensor) else {
            return Ok(());
        };
        match placement.kind() {
            None => Err(GateError::invalid_buffer_type(format!(
                "Unrecognised buffer type: {}; input name: {}",
                placement.code, info.name
            ))),
            Some(BufferKind::Cpu) => match placement.device_id {
                Some(id) if id != 0 => Err(GateError::invalid_device_id(format!(
                    "CPU buffer must not name device: {}; input name: {}",
                    id, info.name
                ))),
                _ => Ok(()),
            },
            Some(kind) => Err(GateError::invalid_buffer_type(format!(
                "Unsupported buffer type: {}; input name: {}",
                kind, info.name
            ))),
        }
    }
}

fn check_positive_axes<T: ShapeAccessor + ?Sized>(info: &TensorInfo, tensor: &T) -> Result<()> {
    if !tensor.has_non_positive_axis() {
        return Ok(());
    }
    Err(GateError::invalid_shape(format!(
        "Negative or zero dimension size is not acceptable: {}; input name: {}",
        tensor.display_shape(),
        info.name
    )))
}

/// Batch axis of a declared input; a layout without one is broken metadata
fn declared_batch_index(info: &TensorInfo) -> Result<usize> {
    let index = info.batch_index().ok_or_else(|| {
        GateError::internal(format!(
            "Missing batch index in input: {} layout: {}",
            info.name, info.layout
        ))
    })?;
    if index >= info.shape.len() {
        return Err(GateError::internal(format!(
            "Batch index out of shape range for input: {} layout: {} shape: {}",
            info.name, info.layout, info.shape
        )));
    }
    Ok(index)
}

fn check_rank<T: ShapeAccessor + ?Sized>(info: &TensorInfo, tensor: &T) -> Result<()> {
    let rank = tensor.axis_count();
    if rank > 0 && rank == info.shape.len() {
        return Ok(());
    }
    Err(GateError::invalid_no_of_shape_dimensions(format!(
        "Expected: {}; Actual: {}; input name: {}",
        info.shape,
        tensor.display_shape(),
        info.name
    )))
}
