//! Interface definitions for TensorGate
//!
//! The validator never looks at a wire format directly. Each format exposes
//! its tensors through [`ShapeAccessor`] and its request-level primitives
//! through [`RequestFormat`]; model contracts come from a
//! [`ContractProvider`].

pub mod contract;
pub mod format;
pub mod shape;

pub use contract::ContractProvider;
pub use format::{BufferKind, BufferPlacement, ContentMeasure, InputRef, RequestFormat};
pub use shape::ShapeAccessor;

pub use tensorgate_types::{
    Dimension, DimensionValue, GateError, Mode, ModelContract, ModelVersion, Precision, Result,
    Shape, ShapeModes, StatusCode, TensorInfo, TensorMap,
};
