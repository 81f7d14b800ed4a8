//! Single-axis dimension model

use crate::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw axis value as carried by requests and contracts.
///
/// Requests may carry negative or zero values (which are rejected during
/// validation), so the observed side is signed.
pub type DimensionValue = i64;

/// Textual marker of a fully dynamic dimension
pub const DYNAMIC_DIMENSION: DimensionValue = -1;

/// Declared size of one axis: a fixed value or an inclusive range.
///
/// Bounds are private; every value comes through [`Dimension::fixed`],
/// [`Dimension::range`] or [`Dimension::any`], so `0 <= min <= max` always
/// holds. A fixed dimension is a range with `min == max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dimension {
    min: DimensionValue,
    max: DimensionValue,
}

impl Dimension {
    /// Fixed dimension; negative values are rejected
    pub fn fixed(value: DimensionValue) -> Result<Self> {
        if value < 0 {
            return Err(GateError::config(format!(
                "Dimension value must be non-negative, got {}",
                value
            )));
        }
        Ok(Self {
            min: value,
            max: value,
        })
    }

    /// Bounded range; `min == max` collapses to a fixed dimension
    pub fn range(min: DimensionValue, max: DimensionValue) -> Result<Self> {
        if min < 0 || max < 0 {
            return Err(GateError::config(format!(
                "Dimension range bounds must be non-negative, got {}:{}",
                min, max
            )));
        }
        if min > max {
            return Err(GateError::config(format!(
                "Dimension range lower bound exceeds upper bound: {}:{}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Fully dynamic dimension accepting any non-negative value
    pub const fn any() -> Self {
        Self {
            min: 0,
            max: DimensionValue::MAX,
        }
    }

    pub fn is_any(&self) -> bool {
        *self == Self::any()
    }

    pub fn is_static(&self) -> bool {
        self.min == self.max
    }

    pub fn min(&self) -> DimensionValue {
        self.min
    }

    pub fn max(&self) -> DimensionValue {
        self.max
    }

    /// Whether an observed axis value is admissible for this dimension
    pub fn matches(&self, observed: DimensionValue) -> bool {
        (self.min..=self.max).contains(&observed)
    }
}

impl PartialEq<DimensionValue> for Dimension {
    fn eq(&self, other: &DimensionValue) -> bool {
        self.is_static() && self.min == *other
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return write!(f, "{}", DYNAMIC_DIMENSION);
        }
        if self.is_static() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}:{}", self.min, self.max)
        }
    }
}

impl FromStr for Dimension {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim().parse::<DimensionValue>().map_err(|e| {
                GateError::config(format!("Invalid dimension '{}': {}", s, e))
            })
        };

        if let Some((min, max)) = s.split_once(':') {
            return Self::range(parse(min)?, parse(max)?);
        }

        let value = parse(s)?;
        if value == DYNAMIC_DIMENSION {
            return Ok(Self::any());
        }
        Self::fixed(value)
    }
}

impl TryFrom<String> for Dimension {
    type Error = GateError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Dimension> for String {
    fn from(dim: Dimension) -> Self {
        dim.to_string()
    }
}
