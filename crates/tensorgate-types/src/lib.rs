//! Core type definitions for TensorGate
//!
//! Dimensions, shapes, precisions, layouts and model input contracts shared
//! by every request format, together with the error taxonomy reported by the
//! validator.

pub mod config;
pub mod contract;
pub mod dimension;
pub mod errors;
pub mod ids;
pub mod layout;
pub mod mode;
pub mod precision;
pub mod shape;
pub mod tensor_info;

pub use config::*;
pub use contract::*;
pub use dimension::*;
pub use errors::*;
pub use ids::*;
pub use layout::*;
pub use mode::*;
pub use precision::*;
pub use shape::*;
pub use tensor_info::*;

/// Result type used throughout TensorGate
pub type Result<T> = std::result::Result<T, GateError>;
