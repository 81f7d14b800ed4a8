//! # TensorGate
//!
//! Admission checks for inference requests. Every request, whatever wire
//! format it arrived in, is checked against the declared input contract of
//! the model version it targets before any model work is scheduled.
//!
//! ## Crates
//!
//! - [`types`]: contracts, shapes, precisions and the error type
//! - [`interfaces`]: the traits formats and contract stores implement
//! - [`protocols`]: request messages of the supported wire formats
//! - [`validator`]: the validation algorithm, contract registry and counters
//!
//! ## Example
//!
//! ```
//! use tensorgate::prelude::*;
//!
//! let contract = ModelContract::new("resnet", 1).with_input(TensorInfo::new(
//!     "data",
//!     Precision::FP32,
//!     "(1,3,2,2)".parse().unwrap(),
//! ));
//!
//! let request = PredictRequest::new("resnet").with_input(
//!     "data",
//!     TensorProto::with_content(TfDataType::Float, &[1, 3, 2, 2], vec![0; 48]),
//! );
//!
//! let outcome = validate_tfs(&request, &ValidationContext::new(&contract)).unwrap();
//! assert_eq!(outcome, ValidationOutcome::Ok);
//! ```

pub use tensorgate_interfaces as interfaces;
pub use tensorgate_protocols as protocols;
pub use tensorgate_types as types;
pub use tensorgate_validator as validator;

/// Commonly used items
pub mod prelude {
    pub use tensorgate_interfaces::{ContractProvider, RequestFormat, ShapeAccessor};
    pub use tensorgate_protocols::{
        InferInputTensor, InferTensorContents, InferenceRequest, ModelInferRequest,
        NativeDataType, PredictRequest, TensorProto, TfDataType,
    };
    pub use tensorgate_types::{
        Dimension, GateError, Mode, ModelContract, ModelVersion, Precision, Result, Shape,
        ShapeModes, StatusCode, TensorInfo,
    };
    pub use tensorgate_validator::{
        validate, validate_kfs, validate_native, validate_tfs, ContractRegistry, Signal,
        ValidationContext, ValidationOutcome, ValidationResult, ValidationStats, WireFormat,
        WireRequest,
    };
}
