//! Format bindings
//!
//! Each wire format is adapted to [`RequestFormat`] by a borrowing wrapper,
//! so the validation core runs unchanged over all of them.

pub mod kfs;
pub mod native;
pub mod tfs;

pub use kfs::KfsRequest;
pub use native::NativeRequest;
pub use tfs::TfsRequest;

use crate::outcome::ValidationResult;
use crate::validator::{validate, ValidationContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tensorgate_interfaces::RequestFormat;
use tensorgate_protocols::{InferenceRequest, ModelInferRequest, PredictRequest};
use tensorgate_types::{GateError, ModelVersion, Result};

pub fn validate_tfs(request: &PredictRequest, ctx: &ValidationContext<'_>) -> ValidationResult {
    validate(&TfsRequest::new(request), ctx)
}

pub fn validate_kfs(request: &ModelInferRequest, ctx: &ValidationContext<'_>) -> ValidationResult {
    validate(&KfsRequest::new(request), ctx)
}

pub fn validate_native(request: &InferenceRequest, ctx: &ValidationContext<'_>) -> ValidationResult {
    validate(&NativeRequest::new(request), ctx)
}

/// Wire format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    Tfs,
    Kfs,
    Native,
}

impl WireFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireFormat::Tfs => TfsRequest::FORMAT,
            WireFormat::Kfs => KfsRequest::FORMAT,
            WireFormat::Native => NativeRequest::FORMAT,
        }
    }

    /// Decode a JSON encoded request of this format
    pub fn decode_json(&self, json: &str) -> Result<WireRequest> {
        let request = match self {
            WireFormat::Tfs => WireRequest::Tfs(serde_json::from_str(json)?),
            WireFormat::Kfs => WireRequest::Kfs(serde_json::from_str(json)?),
            WireFormat::Native => WireRequest::Native(serde_json::from_str(json)?),
        };
        Ok(request)
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireFormat {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tfs" => Ok(WireFormat::Tfs),
            "kfs" => Ok(WireFormat::Kfs),
            "native" => Ok(WireFormat::Native),
            other => Err(GateError::config(format!(
                "Unknown request format '{}', expected tfs, kfs or native",
                other
            ))),
        }
    }
}

/// Decoded request of any supported format
#[derive(Debug, Clone, PartialEq)]
pub enum WireRequest {
    Tfs(PredictRequest),
    Kfs(ModelInferRequest),
    Native(InferenceRequest),
}

impl WireRequest {
    pub fn format(&self) -> WireFormat {
        match self {
            WireRequest::Tfs(_) => WireFormat::Tfs,
            WireRequest::Kfs(_) => WireFormat::Kfs,
            WireRequest::Native(_) => WireFormat::Native,
        }
    }

    /// Model name carried by the request itself
    pub fn model_name(&self) -> &str {
        match self {
            WireRequest::Tfs(r) => &r.model_spec.name,
            WireRequest::Kfs(r) => &r.model_name,
            WireRequest::Native(r) => &r.servable_name,
        }
    }

    /// Model version carried by the request; absent means latest
    pub fn model_version(&self) -> Result<ModelVersion> {
        match self {
            WireRequest::Tfs(r) => Ok(r.model_spec.version.map(ModelVersion).unwrap_or_default()),
            WireRequest::Kfs(r) if r.model_version.is_empty() => Ok(ModelVersion::LATEST),
            WireRequest::Kfs(r) => r.model_version.parse().map(ModelVersion).map_err(|_| {
                GateError::model_version_missing(format!(
                    "Invalid model version '{}' for model {}",
                    r.model_version, r.model_name
                ))
            }),
            WireRequest::Native(r) => Ok(r.servable_version),
        }
    }

    pub fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationResult {
        match self {
            WireRequest::Tfs(r) => validate_tfs(r, ctx),
            WireRequest::Kfs(r) => validate_kfs(r, ctx),
            WireRequest::Native(r) => validate_native(r, ctx),
        }
    }
}
