//! Shape and batch modes

use crate::GateError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Key of the entry applying to every input without an explicit one
pub const ANONYMOUS_INPUT_NAME: &str = "ANONYMOUS_INPUT_NAME";

/// Short alias of [`ANONYMOUS_INPUT_NAME`] accepted in configuration files
pub const WILDCARD_INPUT_NAME: &str = "*";

/// Whether a declared shape (or batch axis) is fixed or may be reconfigured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Fixed,
    Auto,
}

impl Mode {
    pub fn is_auto(&self) -> bool {
        matches!(self, Mode::Auto)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Fixed => write!(f, "FIXED"),
            Mode::Auto => write!(f, "AUTO"),
        }
    }
}

impl FromStr for Mode {
    type Err = GateError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Mode::Fixed),
            "auto" => Ok(Mode::Auto),
            other => Err(GateError::config(format!(
                "Unknown mode '{}', expected 'auto' or 'fixed'",
                other
            ))),
        }
    }
}

/// Sparse map of per-input shape modes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeModes(HashMap<String, Mode>);

impl ShapeModes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mode of one input
    pub fn with(mut self, name: impl Into<String>, mode: Mode) -> Self {
        self.insert(name, mode);
        self
    }

    /// Set the mode applying to inputs without an explicit entry
    pub fn with_wildcard(self, mode: Mode) -> Self {
        self.with(ANONYMOUS_INPUT_NAME, mode)
    }

    pub fn insert(&mut self, name: impl Into<String>, mode: Mode) {
        let name = name.into();
        let key = if name == WILDCARD_INPUT_NAME {
            ANONYMOUS_INPUT_NAME.to_string()
        } else {
            name
        };
        self.0.insert(key, mode);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Mode)> {
        self.0.iter().map(|(name, mode)| (name.as_str(), *mode))
    }

    /// Mode of an input: explicit entry, else wildcard entry, else fixed
    pub fn resolve(&self, name: &str) -> Mode {
        self.0
            .get(name)
            .or_else(|| self.0.get(ANONYMOUS_INPUT_NAME))
            .copied()
            .unwrap_or_default()
    }
}

impl<K: Into<String>> FromIterator<(K, Mode)> for ShapeModes {
    fn from_iter<I: IntoIterator<Item = (K, Mode)>>(iter: I) -> Self {
        let mut modes = Self::new();
        for (name, mode) in iter {
            modes.insert(name, mode);
        }
        modes
    }
}
