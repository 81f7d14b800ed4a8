//! Request validation for TensorGate
//!
//! Checks inference requests from every supported wire format against a
//! [`ModelContract`](tensorgate_types::ModelContract) before they reach a
//! model. A request is either rejected with a [`GateError`], accepted, or
//! accepted together with a [`Signal`] asking the caller to reshape the
//! model or change its batch size first.

pub mod formats;
pub mod outcome;
pub mod registry;
pub mod stats;
pub mod validator;

pub use formats::{
    validate_kfs, validate_native, validate_tfs, KfsRequest, NativeRequest, TfsRequest,
    WireFormat, WireRequest,
};
pub use outcome::{PendingSignal, Signal, ValidationOutcome, ValidationResult};
pub use registry::ContractRegistry;
pub use stats::{StatsSnapshot, ValidationStats};
pub use validator::{validate, ValidationContext};

pub use tensorgate_types::{GateError, StatusCode};
