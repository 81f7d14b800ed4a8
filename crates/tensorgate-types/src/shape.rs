//! Declared tensor shapes

use crate::{Dimension, DimensionValue, GateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Ordered sequence of declared dimensions
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Shape(Vec<Dimension>);

impl Shape {
    pub fn new(dims: Vec<Dimension>) -> Self {
        Self(dims)
    }

    /// Shape made of fixed dimensions only
    pub fn from_static(values: &[DimensionValue]) -> Result<Self> {
        values
            .iter()
            .map(|v| Dimension::fixed(*v))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Dimension> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dimension> {
        self.0.iter()
    }

    pub fn dims(&self) -> &[Dimension] {
        &self.0
    }

    /// Replace one dimension, returning the previous one
    pub fn set(&mut self, index: usize, dim: Dimension) -> Option<Dimension> {
        self.0
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, dim))
    }

    /// Whether every observed axis matches the declared dimension at the same index
    pub fn matches(&self, observed: &[DimensionValue]) -> bool {
        self.0.len() == observed.len()
            && self.0.iter().zip(observed).all(|(dim, value)| dim.matches(*value))
    }

    pub fn is_static(&self) -> bool {
        self.0.iter().all(Dimension::is_static)
    }
}

impl Index<usize> for Shape {
    type Output = Dimension;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Shape {
    type Item = &'a Dimension;
    type IntoIter = std::slice::Iter<'a, Dimension>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Dimension> for Shape {
    fn from_iter<I: IntoIterator<Item = Dimension>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_shape(self.0.iter()))
    }
}

impl FromStr for Shape {
    type Err = GateError;

    /// Accepts `(1,3,224,224)`, `[1, 3]`, `1:8,3` and `()`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .or_else(|| {
                trimmed
                    .strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
            })
            .unwrap_or(trimmed)
            .trim();

        if inner.is_empty() {
            return Ok(Self::default());
        }

        inner
            .split(',')
            .map(str::parse::<Dimension>)
            .collect::<Result<Vec<_>>>()
            .map(Self)
            .map_err(|e| GateError::config(format!("Invalid shape '{}': {}", s, e.details())))
    }
}

impl TryFrom<String> for Shape {
    type Error = GateError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Shape> for String {
    fn from(shape: Shape) -> Self {
        shape.to_string()
    }
}

/// Render a sequence of axis values as `(a,b,c)`
pub fn format_shape<I>(dims: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let joined = dims
        .into_iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("({})", joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_parentheses() {
        let shape: Shape = "(1:8,3,224,224)".parse().unwrap();
        assert_eq!(shape.to_string(), "(1:8,3,224,224)");
        assert_eq!(format_shape([1i64, 3, 100, 100]), "(1,3,100,100)");
    }

    #[test]
    fn parse_variants() {
        let a: Shape = "[1, 3, -1]".parse().unwrap();
        assert_eq!(a.len(), 3);
        assert!(a[2].is_any());

        let b: Shape = "2,4".parse().unwrap();
        assert_eq!(b, Shape::from_static(&[2, 4]).unwrap());

        assert!("()".parse::<Shape>().unwrap().is_empty());
        assert!("(1,x)".parse::<Shape>().is_err());
    }

    #[test]
    fn matches_observed_values() {
        let shape: Shape = "(1:8,3)".parse().unwrap();
        assert!(shape.matches(&[4, 3]));
        assert!(!shape.matches(&[9, 3]));
        assert!(!shape.matches(&[4]));
    }

    #[test]
    fn set_replaces_dimension() {
        let mut shape = Shape::from_static(&[1, 3]).unwrap();
        let previous = shape.set(0, Dimension::any());
        assert_eq!(previous, Some(Dimension::fixed(1).unwrap()));
        assert!(shape[0].is_any());
        assert!(!shape.is_static());
        assert_eq!(shape.set(5, Dimension::any()), None);
    }
}
