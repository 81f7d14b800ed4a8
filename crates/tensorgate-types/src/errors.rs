//! Error types for TensorGate request validation

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable status codes surfaced to API clients.
///
/// Every [`GateError`] maps onto exactly one code, and the two validation
/// signals have codes of their own so that callers can log or count every
/// outcome with the same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Ok,
    ReshapeRequired,
    BatchSizeChangeRequired,

    InvalidNoOfInputs,
    InvalidMissingInput,
    InvalidMessageStructure,
    InvalidShape,
    InvalidNoOfShapeDimensions,
    InvalidBatchSize,
    InvalidPrecision,
    InvalidValueCount,
    InvalidContentSize,
    InvalidBufferType,
    InvalidDeviceId,
    InternalError,

    DoubleTensorInsert,
    DoubleBufferSet,
    DoubleParameterInsert,
    NonexistentTensorForSetBuffer,
    NonexistentTensorForRemoval,
    NonexistentBufferForRemoval,
    NonexistentParameterForRemoval,

    ModelNameMissing,
    ModelVersionMissing,
    InvalidConfig,
    IoError,
    SerializationError,
}

impl StatusCode {
    /// All codes, in declaration order
    pub const ALL: [StatusCode; 27] = [
        StatusCode::Ok,
        StatusCode::ReshapeRequired,
        StatusCode::BatchSizeChangeRequired,
        StatusCode::InvalidNoOfInputs,
        StatusCode::InvalidMissingInput,
        StatusCode::InvalidMessageStructure,
        StatusCode::InvalidShape,
        StatusCode::InvalidNoOfShapeDimensions,
        StatusCode::InvalidBatchSize,
        StatusCode::InvalidPrecision,
        StatusCode::InvalidValueCount,
        StatusCode::InvalidContentSize,
        StatusCode::InvalidBufferType,
        StatusCode::InvalidDeviceId,
        StatusCode::InternalError,
        StatusCode::DoubleTensorInsert,
        StatusCode::DoubleBufferSet,
        StatusCode::DoubleParameterInsert,
        StatusCode::NonexistentTensorForSetBuffer,
        StatusCode::NonexistentTensorForRemoval,
        StatusCode::NonexistentBufferForRemoval,
        StatusCode::NonexistentParameterForRemoval,
        StatusCode::ModelNameMissing,
        StatusCode::ModelVersionMissing,
        StatusCode::InvalidConfig,
        StatusCode::IoError,
        StatusCode::SerializationError,
    ];

    /// Upper snake case name, e.g. `INVALID_SHAPE`
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::ReshapeRequired => "RESHAPE_REQUIRED",
            StatusCode::BatchSizeChangeRequired => "BATCH_SIZE_CHANGE_REQUIRED",
            StatusCode::InvalidNoOfInputs => "INVALID_NO_OF_INPUTS",
            StatusCode::InvalidMissingInput => "INVALID_MISSING_INPUT",
            StatusCode::InvalidMessageStructure => "INVALID_MESSAGE_STRUCTURE",
            StatusCode::InvalidShape => "INVALID_SHAPE",
            StatusCode::InvalidNoOfShapeDimensions => "INVALID_NO_OF_SHAPE_DIMENSIONS",
            StatusCode::InvalidBatchSize => "INVALID_BATCH_SIZE",
            StatusCode::InvalidPrecision => "INVALID_PRECISION",
            StatusCode::InvalidValueCount => "INVALID_VALUE_COUNT",
            StatusCode::InvalidContentSize => "INVALID_CONTENT_SIZE",
            StatusCode::InvalidBufferType => "INVALID_BUFFER_TYPE",
            StatusCode::InvalidDeviceId => "INVALID_DEVICE_ID",
            StatusCode::InternalError => "INTERNAL_ERROR",
            StatusCode::DoubleTensorInsert => "DOUBLE_TENSOR_INSERT",
            StatusCode::DoubleBufferSet => "DOUBLE_BUFFER_SET",
            StatusCode::DoubleParameterInsert => "DOUBLE_PARAMETER_INSERT",
            StatusCode::NonexistentTensorForSetBuffer => "NONEXISTENT_TENSOR_FOR_SET_BUFFER",
            StatusCode::NonexistentTensorForRemoval => "NONEXISTENT_TENSOR_FOR_REMOVAL",
            StatusCode::NonexistentBufferForRemoval => "NONEXISTENT_BUFFER_FOR_REMOVAL",
            StatusCode::NonexistentParameterForRemoval => "NONEXISTENT_PARAMETER_FOR_REMOVAL",
            StatusCode::ModelNameMissing => "MODEL_NAME_MISSING",
            StatusCode::ModelVersionMissing => "MODEL_VERSION_MISSING",
            StatusCode::InvalidConfig => "INVALID_CONFIG",
            StatusCode::IoError => "IO_ERROR",
            StatusCode::SerializationError => "SERIALIZATION_ERROR",
        }
    }

    /// Human readable description, used as the prefix of error messages
    pub fn description(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::ReshapeRequired => "Model could be reshaped based on request",
            StatusCode::BatchSizeChangeRequired => "Model could be reloaded with new batch size",
            StatusCode::InvalidNoOfInputs => "Invalid number of inputs",
            StatusCode::InvalidMissingInput => "Missing input with specific name",
            StatusCode::InvalidMessageStructure => "Invalid message structure",
            StatusCode::InvalidShape => "Invalid input shape",
            StatusCode::InvalidNoOfShapeDimensions => "Invalid number of shape dimensions",
            StatusCode::InvalidBatchSize => "Invalid input batch size",
            StatusCode::InvalidPrecision => "Invalid input precision",
            StatusCode::InvalidValueCount => "Invalid number of values in tensor proto container",
            StatusCode::InvalidContentSize => "Invalid content size of tensor proto",
            StatusCode::InvalidBufferType => "Invalid buffer type",
            StatusCode::InvalidDeviceId => "Invalid device id",
            StatusCode::InternalError => "Internal server error",
            StatusCode::DoubleTensorInsert => "Cannot insert more than one tensor with the same name",
            StatusCode::DoubleBufferSet => "Cannot set more than one buffer for one tensor",
            StatusCode::DoubleParameterInsert => {
                "Cannot insert more than one parameter with the same name"
            }
            StatusCode::NonexistentTensorForSetBuffer => "Tried to set buffer for nonexistent tensor",
            StatusCode::NonexistentTensorForRemoval => "Tried to remove nonexistent tensor",
            StatusCode::NonexistentBufferForRemoval => "Tried to remove nonexisting buffer",
            StatusCode::NonexistentParameterForRemoval => "Tried to remove nonexisting parameter",
            StatusCode::ModelNameMissing => "Model with requested name is not found",
            StatusCode::ModelVersionMissing => "Model with requested version is not found",
            StatusCode::InvalidConfig => "Invalid configuration",
            StatusCode::IoError => "I/O error",
            StatusCode::SerializationError => "Serialization error",
        }
    }

    /// Whether this code reports a successful validation (with or without a signal)
    pub fn is_ok(&self) -> bool {
        matches!(
            self,
            StatusCode::Ok | StatusCode::ReshapeRequired | StatusCode::BatchSizeChangeRequired
        )
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for TensorGate operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateError {
    /// Number of inputs in the request does not match the contract
    #[error("Invalid number of inputs - {message}")]
    InvalidNoOfInputs { message: String },

    /// A required input is absent from the request
    #[error("Missing input with specific name - {message}")]
    InvalidMissingInput { message: String },

    /// The request message is internally inconsistent
    #[error("Invalid message structure - {message}")]
    InvalidMessageStructure { message: String },

    /// Non-positive axis or axis value mismatch
    #[error("Invalid input shape - {message}")]
    InvalidShape { message: String },

    /// Rank of the observed shape does not match
    #[error("Invalid number of shape dimensions - {message}")]
    InvalidNoOfShapeDimensions { message: String },

    /// Batch axis does not match the declared batch dimension
    #[error("Invalid input batch size - {message}")]
    InvalidBatchSize { message: String },

    /// Datatype differs from the declared precision
    #[error("Invalid input precision - {message}")]
    InvalidPrecision { message: String },

    /// Typed value container holds the wrong number of values
    #[error("Invalid number of values in tensor proto container - {message}")]
    InvalidValueCount { message: String },

    /// Byte buffer has the wrong length
    #[error("Invalid content size of tensor proto - {message}")]
    InvalidContentSize { message: String },

    /// Buffer location kind is not accepted
    #[error("Invalid buffer type - {message}")]
    InvalidBufferType { message: String },

    /// Buffer declares a device id other than the default one
    #[error("Invalid device id - {message}")]
    InvalidDeviceId { message: String },

    /// Malformed model metadata (not caused by the client)
    #[error("Internal server error - {message}")]
    Internal { message: String },

    /// Input inserted twice into a native request
    #[error("Cannot insert more than one tensor with the same name - {message}")]
    DoubleTensorInsert { message: String },

    /// Buffer attached twice to the same native input
    #[error("Cannot set more than one buffer for one tensor - {message}")]
    DoubleBufferSet { message: String },

    /// Parameter inserted twice into a native request
    #[error("Cannot insert more than one parameter with the same name - {message}")]
    DoubleParameterInsert { message: String },

    /// Buffer set on an input that does not exist
    #[error("Tried to set buffer for nonexistent tensor - {message}")]
    NonexistentTensorForSetBuffer { message: String },

    /// Removal of an input that does not exist
    #[error("Tried to remove nonexistent tensor - {message}")]
    NonexistentTensorForRemoval { message: String },

    /// Removal of a buffer that was never set
    #[error("Tried to remove nonexisting buffer - {message}")]
    NonexistentBufferForRemoval { message: String },

    /// Removal of a parameter that does not exist
    #[error("Tried to remove nonexisting parameter - {message}")]
    NonexistentParameterForRemoval { message: String },

    /// No contract registered under the model name
    #[error("Model with requested name is not found - {message}")]
    ModelNameMissing { message: String },

    /// No contract registered under the model version
    #[error("Model with requested version is not found - {message}")]
    ModelVersionMissing { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O errors
    #[error("I/O error: {message}")]
    IO { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

macro_rules! constructors {
    ($($(#[$doc:meta])* $fn_name:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(message: impl Into<String>) -> Self {
                Self::$variant {
                    message: message.into(),
                }
            }
        )*
    };
}

impl GateError {
    constructors! {
        /// Create an invalid number of inputs error
        invalid_no_of_inputs => InvalidNoOfInputs,
        /// Create a missing input error
        invalid_missing_input => InvalidMissingInput,
        /// Create an invalid message structure error
        invalid_message_structure => InvalidMessageStructure,
        /// Create an invalid shape error
        invalid_shape => InvalidShape,
        /// Create an invalid number of shape dimensions error
        invalid_no_of_shape_dimensions => InvalidNoOfShapeDimensions,
        /// Create an invalid batch size error
        invalid_batch_size => InvalidBatchSize,
        /// Create an invalid precision error
        invalid_precision => InvalidPrecision,
        /// Create an invalid value count error
        invalid_value_count => InvalidValueCount,
        /// Create an invalid content size error
        invalid_content_size => InvalidContentSize,
        /// Create an invalid buffer type error
        invalid_buffer_type => InvalidBufferType,
        /// Create an invalid device id error
        invalid_device_id => InvalidDeviceId,
        /// Create an internal error
        internal => Internal,
        /// Create a double tensor insert error
        double_tensor_insert => DoubleTensorInsert,
        /// Create a double buffer set error
        double_buffer_set => DoubleBufferSet,
        /// Create a double parameter insert error
        double_parameter_insert => DoubleParameterInsert,
        nonexistent_tensor_for_set_buffer => NonexistentTensorForSetBuffer,
        nonexistent_tensor_for_removal => NonexistentTensorForRemoval,
        nonexistent_buffer_for_removal => NonexistentBufferForRemoval,
        nonexistent_parameter_for_removal => NonexistentParameterForRemoval,
        /// Create a missing model error
        model_name_missing => ModelNameMissing,
        /// Create a missing model version error
        model_version_missing => ModelVersionMissing,
        /// Create a configuration error
        config => Config,
        /// Create an I/O error
        io => IO,
        /// Create a serialization error
        serialization => Serialization,
    }

    /// Status code for this error
    pub fn code(&self) -> StatusCode {
        match self {
            Self::InvalidNoOfInputs { .. } => StatusCode::InvalidNoOfInputs,
            Self::InvalidMissingInput { .. } => StatusCode::InvalidMissingInput,
            Self::InvalidMessageStructure { .. } => StatusCode::InvalidMessageStructure,
            Self::InvalidShape { .. } => StatusCode::InvalidShape,
            Self::InvalidNoOfShapeDimensions { .. } => StatusCode::InvalidNoOfShapeDimensions,
            Self::InvalidBatchSize { .. } => StatusCode::InvalidBatchSize,
            Self::InvalidPrecision { .. } => StatusCode::InvalidPrecision,
            Self::InvalidValueCount { .. } => StatusCode::InvalidValueCount,
            Self::InvalidContentSize { .. } => StatusCode::InvalidContentSize,
            Self::InvalidBufferType { .. } => StatusCode::InvalidBufferType,
            Self::InvalidDeviceId { .. } => StatusCode::InvalidDeviceId,
            Self::Internal { .. } => StatusCode::InternalError,
            Self::DoubleTensorInsert { .. } => StatusCode::DoubleTensorInsert,
            Self::DoubleBufferSet { .. } => StatusCode::DoubleBufferSet,
            Self::DoubleParameterInsert { .. } => StatusCode::DoubleParameterInsert,
            Self::NonexistentTensorForSetBuffer { .. } => StatusCode::NonexistentTensorForSetBuffer,
            Self::NonexistentTensorForRemoval { .. } => StatusCode::NonexistentTensorForRemoval,
            Self::NonexistentBufferForRemoval { .. } => StatusCode::NonexistentBufferForRemoval,
            Self::NonexistentParameterForRemoval { .. } => {
                StatusCode::NonexistentParameterForRemoval
            }
            Self::ModelNameMissing { .. } => StatusCode::ModelNameMissing,
            Self::ModelVersionMissing { .. } => StatusCode::ModelVersionMissing,
            Self::Config { .. } => StatusCode::InvalidConfig,
            Self::IO { .. } => StatusCode::IoError,
            Self::Serialization { .. } => StatusCode::SerializationError,
        }
    }

    /// Detail string carried by the error, without the code prefix
    pub fn details(&self) -> &str {
        match self {
            Self::InvalidNoOfInputs { message }
            | Self::InvalidMissingInput { message }
            | Self::InvalidMessageStructure { message }
            | Self::InvalidShape { message }
            | Self::InvalidNoOfShapeDimensions { message }
            | Self::InvalidBatchSize { message }
            | Self::InvalidPrecision { message }
            | Self::InvalidValueCount { message }
            | Self::InvalidContentSize { message }
            | Self::InvalidBufferType { message }
            | Self::InvalidDeviceId { message }
            | Self::Internal { message }
            | Self::DoubleTensorInsert { message }
            | Self::DoubleBufferSet { message }
            | Self::DoubleParameterInsert { message }
            | Self::NonexistentTensorForSetBuffer { message }
            | Self::NonexistentTensorForRemoval { message }
            | Self::NonexistentBufferForRemoval { message }
            | Self::NonexistentParameterForRemoval { message }
            | Self::ModelNameMissing { message }
            | Self::ModelVersionMissing { message }
            | Self::Config { message }
            | Self::IO { message }
            | Self::Serialization { message } => message,
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::IO { .. })
    }

    /// Check if this is a client error (4xx equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidNoOfInputs { .. }
                | Self::InvalidMissingInput { .. }
                | Self::InvalidMessageStructure { .. }
                | Self::InvalidShape { .. }
                | Self::InvalidNoOfShapeDimensions { .. }
                | Self::InvalidBatchSize { .. }
                | Self::InvalidPrecision { .. }
                | Self::InvalidValueCount { .. }
                | Self::InvalidContentSize { .. }
                | Self::InvalidBufferType { .. }
                | Self::InvalidDeviceId { .. }
                | Self::DoubleTensorInsert { .. }
                | Self::DoubleBufferSet { .. }
                | Self::DoubleParameterInsert { .. }
                | Self::NonexistentTensorForSetBuffer { .. }
                | Self::NonexistentTensorForRemoval { .. }
                | Self::NonexistentBufferForRemoval { .. }
                | Self::NonexistentParameterForRemoval { .. }
                | Self::ModelNameMissing { .. }
                | Self::ModelVersionMissing { .. }
        )
    }

    /// Check if this is a server error (5xx equivalent)
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Internal { .. } | Self::Config { .. } | Self::IO { .. } | Self::Serialization { .. }
        )
    }
}

/// Conversion from std::io::Error
impl From<std::io::Error> for GateError {
    fn from(err: std::io::Error) -> Self {
        Self::io(format!("{}", err))
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("{}", err))
    }
}

/// Conversion from toml::de::Error
impl From<toml::de::Error> for GateError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("{}", err))
    }
}
