//! Wire format data types
//!
//! Decoded request messages of the three formats accepted by TensorGate,
//! together with the tables mapping each format's datatypes onto
//! [`Precision`](tensorgate_types::Precision):
//!
//! - [`tfs`]: TensorFlow Serving style `PredictRequest`
//! - [`kfs`]: KServe v2 style `ModelInferRequest`
//! - [`native`]: in-process `InferenceRequest` built through a typed API

pub mod kfs;
pub mod native;
pub mod tfs;

pub use kfs::{InferInputTensor, InferTensorContents, ModelInferRequest, BYTES_DATATYPE};
pub use native::{
    Buffer, InferenceParameter, InferenceRequest, InferenceTensor, NativeDataType,
};
pub use tfs::{ModelSpec, PredictRequest, TensorProto, TensorShapeProto, TfDataType};
