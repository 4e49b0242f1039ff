//! The 1D sample array being diffused.

use std::ops::Range;

/// An ordered sequence of `f64` samples indexed `0..len`.
///
/// Indices `0` and `len - 1` are the domain boundary; everything between
/// them is interior. A field shorter than three samples has no interior.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    samples: Vec<f64>,
}

impl Field {
    /// Create a zero-filled field of `len` samples.
    pub fn zeros(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
        }
    }

    /// Wrap existing samples.
    pub fn from_vec(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the field has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index of the midpoint sample (`len / 2`).
    pub fn midpoint(&self) -> usize {
        self.samples.len() / 2
    }

    /// Interior index range `1..len-1`, empty when `len < 3`.
    pub fn interior(&self) -> Range<usize> {
        interior_range(self.samples.len())
    }

    /// Read-only view of all samples.
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Mutable view of all samples.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: f64) {
        self.samples.fill(value);
    }

    /// The two boundary samples `(first, last)`, or `None` if empty.
    pub fn boundary(&self) -> Option<(f64, f64)> {
        Some((*self.samples.first()?, *self.samples.last()?))
    }

    /// Overwrite this field's boundary samples with those of `other`.
    pub fn copy_boundary_from(&mut self, other: &Field) {
        debug_assert_eq!(self.len(), other.len());
        if let Some((first, last)) = other.boundary() {
            let n = self.samples.len();
            self.samples[0] = first;
            self.samples[n - 1] = last;
        }
    }

    /// Overwrite this field's interior samples with those of `other`.
    pub fn copy_interior_from(&mut self, other: &Field) {
        debug_assert_eq!(self.len(), other.len());
        let interior = self.interior();
        self.samples[interior.clone()].copy_from_slice(&other.samples[interior]);
    }

    /// Largest absolute value among interior samples, `0.0` if none.
    pub fn max_abs_interior(&self) -> f64 {
        self.samples[self.interior()]
            .iter()
            .fold(0.0f64, |acc, v| acc.max(v.abs()))
    }

    /// Sum of all samples.
    pub fn total(&self) -> f64 {
        self.samples.iter().sum()
    }
}

/// Interior index range for a field of `len` samples.
pub fn interior_range(len: usize) -> Range<usize> {
    if len < 3 {
        1..1
    } else {
        1..len - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_excludes_boundary() {
        assert_eq!(Field::zeros(5).interior(), 1..4);
        assert!(Field::zeros(2).interior().is_empty());
        assert!(Field::zeros(0).interior().is_empty());
    }

    #[test]
    fn midpoint_is_half_len() {
        assert_eq!(Field::zeros(5).midpoint(), 2);
        assert_eq!(Field::zeros(50_000).midpoint(), 25_000);
    }

    #[test]
    fn copy_boundary_touches_only_ends() {
        let src = Field::from_vec(vec![7.0, 1.0, 2.0, 9.0]);
        let mut dst = Field::zeros(4);
        dst.copy_boundary_from(&src);
        assert_eq!(dst.as_slice(), &[7.0, 0.0, 0.0, 9.0]);
    }

    #[test]
    fn copy_interior_touches_only_middle() {
        let src = Field::from_vec(vec![7.0, 1.0, 2.0, 9.0]);
        let mut dst = Field::zeros(4);
        dst.copy_interior_from(&src);
        assert_eq!(dst.as_slice(), &[0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn max_abs_ignores_boundary() {
        let f = Field::from_vec(vec![-500.0, 3.0, -4.0, 500.0]);
        assert_eq!(f.max_abs_interior(), 4.0);
        assert_eq!(Field::zeros(2).max_abs_interior(), 0.0);
    }

    #[test]
    fn boundary_of_empty_is_none() {
        assert_eq!(Field::zeros(0).boundary(), None);
        assert_eq!(Field::from_vec(vec![1.0]).boundary(), Some((1.0, 1.0)));
    }
}
