//! Request format abstraction
//!
//! A [`RequestFormat`] is everything the validator needs from one wire
//! format: input counting, name lookup, binary-input detection and content
//! measurement. The algorithm itself is written once against this trait.

use crate::ShapeAccessor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tensorgate_types::{Precision, Result};

/// Result of looking a declared input up in a request
#[derive(Debug)]
pub struct InputRef<'r, T: ?Sized> {
    /// The observed tensor
    pub tensor: &'r T,
    /// Position of the input inside the request, used to address
    /// side-channel buffers
    pub buffer_index: usize,
}

impl<'r, T: ?Sized> Clone for InputRef<'r, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'r, T: ?Sized> Copy for InputRef<'r, T> {}

impl<'r, T: ?Sized> InputRef<'r, T> {
    pub fn new(tensor: &'r T, buffer_index: usize) -> Self {
        Self {
            tensor,
            buffer_index,
        }
    }
}

/// How the content of one input is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMeasure {
    /// A typed value container holding this many values
    Values(usize),
    /// A flat byte buffer of this length
    Bytes(usize),
    /// No content attached at all
    Missing,
}

/// Location kind of a native buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferKind {
    Cpu,
    CpuPinned,
    Gpu,
    Hddl,
}

impl BufferKind {
    /// Decode a raw buffer type code; codes outside the known range yield `None`
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Cpu),
            2 => Some(Self::CpuPinned),
            3 => Some(Self::Gpu),
            4 => Some(Self::Hddl),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Cpu => 1,
            Self::CpuPinned => 2,
            Self::Gpu => 3,
            Self::Hddl => 4,
        }
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cpu => "CPU",
            Self::CpuPinned => "CPU_PINNED",
            Self::Gpu => "GPU",
            Self::Hddl => "HDDL",
        };
        f.write_str(name)
    }
}

/// Where the data of a native input lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferPlacement {
    /// Raw buffer type code as supplied by the caller
    pub code: i32,
    pub device_id: Option<u32>,
}

impl BufferPlacement {
    pub fn kind(&self) -> Option<BufferKind> {
        BufferKind::from_code(self.code)
    }
}

/// Format-specific primitives used by the request validator
pub trait RequestFormat: Send + Sync {
    /// Observed tensor type
    type Tensor: ShapeAccessor + ?Sized;

    /// Short format name used in logs
    const FORMAT: &'static str;

    /// Suffix appended to value counts in error details
    const VALUE_COUNT_UNIT: &'static str = "";

    /// Number of inputs carried by the request
    fn input_count(&self) -> usize;

    /// How many request inputs are covered by the optional input names.
    ///
    /// Formats that do not admit optional inputs return zero.
    fn optional_inputs_present(&self, optional: &BTreeSet<String>) -> usize;

    /// Look an input up by name
    fn find_input(&self, name: &str) -> Option<InputRef<'_, Self::Tensor>>;

    /// Request-level structural checks run before any input is inspected
    fn check_coherency(&self) -> Result<()> {
        Ok(())
    }

    /// Blob count when the input uses binary (encoded file) content
    fn binary_blob_count(&self, tensor: &Self::Tensor) -> Option<usize>;

    /// Whether binary inputs may be checked against the declared batch axis
    fn binary_batch_checks_allowed(&self) -> bool {
        true
    }

    /// Whether the observed datatype encodes the declared precision
    fn datatype_matches(&self, tensor: &Self::Tensor, expected: Precision) -> bool;

    /// Observed datatype rendered for error details
    fn datatype_name(&self, tensor: &Self::Tensor) -> String;

    /// Measure the content of an input whose datatype already matched
    fn content(&self, input: InputRef<'_, Self::Tensor>, precision: Precision) -> ContentMeasure;

    /// Buffer placement of an input, for formats that carry one
    fn buffer_placement(&self, _tensor: &Self::Tensor) -> Option<BufferPlacement> {
        None
    }
}
