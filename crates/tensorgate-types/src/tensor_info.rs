//! Declared model inputs

use crate::{Dimension, Layout, Precision, Shape};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Declared contract of a single model input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorInfo {
    /// Input name, unique within a model
    pub name: String,
    /// Element precision
    pub precision: Precision,
    /// Declared shape
    pub shape: Shape,
    /// Axis semantics
    #[serde(default)]
    pub layout: Layout,
}

impl TensorInfo {
    pub fn new(name: impl Into<String>, precision: Precision, shape: Shape) -> Self {
        Self {
            name: name.into(),
            precision,
            shape,
            layout: Layout::default_input(),
        }
    }

    pub fn with_layout(mut self, layout: impl Into<Layout>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Batch axis index declared by the layout
    pub fn batch_index(&self) -> Option<usize> {
        self.layout.batch_index()
    }

    /// Declared batch dimension, when the layout names one inside the shape
    pub fn batch_dimension(&self) -> Option<&Dimension> {
        self.batch_index().and_then(|idx| self.shape.get(idx))
    }
}

/// Ordered collection of declared inputs keyed by name.
///
/// Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TensorMap {
    entries: Vec<Arc<TensorInfo>>,
}

impl TensorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an input, replacing (in place) any input with the same name
    pub fn insert(&mut self, info: TensorInfo) -> Option<Arc<TensorInfo>> {
        let info = Arc::new(info);
        match self.entries.iter_mut().find(|e| e.name == info.name) {
            Some(slot) => Some(std::mem::replace(slot, info)),
            None => {
                self.entries.push(info);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TensorInfo>> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TensorInfo>> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}

impl FromIterator<TensorInfo> for TensorMap {
    fn from_iter<I: IntoIterator<Item = TensorInfo>>(iter: I) -> Self {
        let mut map = Self::new();
        for info in iter {
            map.insert(info);
        }
        map
    }
}
