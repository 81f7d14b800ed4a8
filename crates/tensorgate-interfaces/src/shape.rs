//! Uniform read access to observed tensor shapes

use tensorgate_types::{format_shape, DimensionValue};

/// Read-only view over the shape of a tensor carried by a request.
///
/// Implementations borrow the wire representation; nothing is copied.
pub trait ShapeAccessor {
    /// Number of axes
    fn axis_count(&self) -> usize;

    /// Value of one axis; `index` is below [`axis_count`](Self::axis_count)
    fn axis_value(&self, index: usize) -> DimensionValue;

    /// Shape rendered as `(a,b,c)`
    fn display_shape(&self) -> String {
        format_shape(self.axis_values())
    }

    fn axis_values(&self) -> Vec<DimensionValue> {
        (0..self.axis_count()).map(|i| self.axis_value(i)).collect()
    }

    /// Whether any axis is zero or negative
    fn has_non_positive_axis(&self) -> bool {
        (0..self.axis_count()).any(|i| self.axis_value(i) <= 0)
    }

    /// Product of all axes; non-positive axes count as zero
    fn element_count(&self) -> usize {
        (0..self.axis_count())
            .map(|i| usize::try_from(self.axis_value(i)).unwrap_or(0))
            .fold(1usize, |acc, v| acc.saturating_mul(v))
    }
}

impl ShapeAccessor for [DimensionValue] {
    fn axis_count(&self) -> usize {
        self.len()
    }

    fn axis_value(&self, index: usize) -> DimensionValue {
        self[index]
    }
}

impl ShapeAccessor for Vec<DimensionValue> {
    fn axis_count(&self) -> usize {
        self.len()
    }

    fn axis_value(&self, index: usize) -> DimensionValue {
        self[index]
    }
}
