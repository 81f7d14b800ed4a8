//! Identifier types for served models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Model version number.
///
/// Version `0` is never served; when used in a lookup it selects the
/// highest registered version.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord, Default)]
#[serde(transparent)]
pub struct ModelVersion(pub u64);

impl ModelVersion {
    pub const LATEST: ModelVersion = ModelVersion(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_latest(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for ModelVersion {
    fn from(value: u64) -> Self {
        ModelVersion(value)
    }
}

impl From<ModelVersion> for u64 {
    fn from(value: ModelVersion) -> Self {
        value.0
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Model name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelName(pub String);

impl ModelName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ModelName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for ModelName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}
