//! Numeric and string precisions declared by model inputs

use crate::GateError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Element precision of a model input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Precision {
    /// 16-bit brain floating point
    BF16,
    /// 64-bit floating point
    FP64,
    /// 32-bit floating point
    FP32,
    /// 16-bit floating point (IEEE 754)
    FP16,
    /// 64-bit signed integer
    I64,
    /// 32-bit signed integer
    I32,
    /// 16-bit signed integer
    I16,
    /// 8-bit signed integer
    I8,
    /// 4-bit signed integer
    I4,
    /// 64-bit unsigned integer
    U64,
    /// 32-bit unsigned integer
    U32,
    /// 16-bit unsigned integer
    U16,
    /// 8-bit unsigned integer
    U8,
    /// 4-bit unsigned integer
    U4,
    /// 1-bit unsigned integer
    U1,
    /// Boolean
    BOOL,
    /// Variable length strings or encoded blobs
    STRING,
    /// Unknown precision
    UNDEFINED,
}

impl Precision {
    /// Storage width of one element in bytes.
    ///
    /// Sub-byte precisions occupy at least one byte. Precisions with no fixed
    /// width (strings, undefined) report zero.
    pub fn size_bytes(&self) -> usize {
        match self {
            Precision::FP64 | Precision::I64 | Precision::U64 => 8,
            Precision::FP32 | Precision::I32 | Precision::U32 => 4,
            Precision::BF16 | Precision::FP16 | Precision::I16 | Precision::U16 => 2,
            Precision::I8 | Precision::U8 | Precision::BOOL => 1,
            Precision::I4 | Precision::U4 | Precision::U1 => 1,
            Precision::STRING | Precision::UNDEFINED => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::BF16 => "BF16",
            Precision::FP64 => "FP64",
            Precision::FP32 => "FP32",
            Precision::FP16 => "FP16",
            Precision::I64 => "I64",
            Precision::I32 => "I32",
            Precision::I16 => "I16",
            Precision::I8 => "I8",
            Precision::I4 => "I4",
            Precision::U64 => "U64",
            Precision::U32 => "U32",
            Precision::U16 => "U16",
            Precision::U8 => "U8",
            Precision::U4 => "U4",
            Precision::U1 => "U1",
            Precision::BOOL => "BOOL",
            Precision::STRING => "STRING",
            Precision::UNDEFINED => "UNDEFINED",
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = GateError;

    fn from_str(s: &str) -> crate::Result<Self> {
        let precision = match s.trim().to_ascii_uppercase().as_str() {
            "BF16" => Precision::BF16,
            "FP64" => Precision::FP64,
            "FP32" => Precision::FP32,
            "FP16" => Precision::FP16,
            "I64" => Precision::I64,
            "I32" => Precision::I32,
            "I16" => Precision::I16,
            "I8" => Precision::I8,
            "I4" => Precision::I4,
            "U64" => Precision::U64,
            "U32" => Precision::U32,
            "U16" => Precision::U16,
            "U8" => Precision::U8,
            "U4" => Precision::U4,
            "U1" => Precision::U1,
            "BOOL" => Precision::BOOL,
            "STRING" => Precision::STRING,
            "UNDEFINED" => Precision::UNDEFINED,
            other => {
                return Err(GateError::config(format!("Unknown precision: {}", other)));
            }
        };
        Ok(precision)
    }
}

impl TryFrom<String> for Precision {
    type Error = GateError;

    fn try_from(value: String) -> crate::Result<Self> {
        value.parse()
    }
}

impl From<Precision> for String {
    fn from(precision: Precision) -> Self {
        precision.as_str().to_string()
    }
}
