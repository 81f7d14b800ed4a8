//! Axis semantics of model inputs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Batch axis marker inside a layout string
pub const BATCH_AXIS: char = 'N';

/// Placeholder for an arbitrary number of axes
pub const ANY_AXES_PLACEHOLDER: &str = "...";

/// Layout string such as `NCHW`, `NHWC` or `N...`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout(String);

impl Layout {
    pub fn new(layout: impl Into<String>) -> Self {
        Self(layout.into())
    }

    /// Layout of inputs that only declare a leading batch axis
    pub fn default_input() -> Self {
        Self::new(format!("{}{}", BATCH_AXIS, ANY_AXES_PLACEHOLDER))
    }

    /// Layout with no axis semantics at all
    pub fn unspecified() -> Self {
        Self::new(ANY_AXES_PLACEHOLDER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Index of the batch axis counted from the front.
    ///
    /// Returns `None` when the layout has no batch axis or when it is only
    /// located after an `...` placeholder, where its position depends on the
    /// rank of the tensor.
    pub fn batch_index(&self) -> Option<usize> {
        let fixed_part = match self.0.find(ANY_AXES_PLACEHOLDER) {
            Some(pos) => &self.0[..pos],
            None => self.0.as_str(),
        };
        fixed_part.chars().position(|c| c == BATCH_AXIS)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::default_input()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Layout {
    fn from(layout: &str) -> Self {
        Self::new(layout)
    }
}

impl From<String> for Layout {
    fn from(layout: String) -> Self {
        Self(layout)
    }
}
