//! Sequence data structure for univariate series fed to the clustering engine.

use crate::error::{ClusterError, Result};
use std::ops::Index;

/// An immutable, non-empty, finite-valued univariate series.
///
/// The optional label is bookkeeping only: it never takes part in a
/// distance computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    values: Vec<f64>,
    label: Option<String>,
}

impl Sequence {
    /// Create a new sequence.
    ///
    /// Fails with [`ClusterError::EmptyData`] for an empty vector and with
    /// [`ClusterError::NonFiniteValues`] if any value is NaN or infinite.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(ClusterError::EmptyData);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ClusterError::NonFiniteValues);
        }
        Ok(Self {
            values,
            label: None,
        })
    }

    /// Create a labelled sequence.
    pub fn labelled(values: Vec<f64>, label: impl Into<String>) -> Result<Self> {
        Ok(Self::new(values)?.with_label(label))
    }

    /// Validate a whole collection of raw series, keeping their order.
    pub fn batch(series: Vec<Vec<f64>>) -> Result<Vec<Self>> {
        series.into_iter().map(Self::new).collect()
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build from values already known to be non-empty and finite.
    pub(crate) fn from_trusted(values: Vec<f64>) -> Self {
        debug_assert!(!values.is_empty());
        Self {
            values,
            label: None,
        }
    }

    /// Get the values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Number of observations. Always at least 1.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the sequence and return its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl AsRef<[f64]> for Sequence {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl Index<usize> for Sequence {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl TryFrom<Vec<f64>> for Sequence {
    type Error = ClusterError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_values_in_order() {
        let s = Sequence::new(vec![3.0, 1.0, 2.0]).unwrap();
        assert_eq!(s.values(), &[3.0, 1.0, 2.0]);
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s[1], 1.0);
        assert!(s.label().is_none());
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(Sequence::new(vec![]), Err(ClusterError::EmptyData));
    }

    #[test]
    fn new_rejects_non_finite() {
        assert_eq!(
            Sequence::new(vec![1.0, f64::NAN]),
            Err(ClusterError::NonFiniteValues)
        );
        assert_eq!(
            Sequence::new(vec![f64::INFINITY]),
            Err(ClusterError::NonFiniteValues)
        );
    }

    #[test]
    fn label_is_bookkeeping_only() {
        let s = Sequence::labelled(vec![1.0], "sensor-a").unwrap();
        assert_eq!(s.label(), Some("sensor-a"));
        assert_eq!(s.as_ref(), &[1.0]);
    }

    #[test]
    fn batch_stops_at_first_invalid_series() {
        let ok = Sequence::batch(vec![vec![1.0], vec![2.0, 3.0]]).unwrap();
        assert_eq!(ok.len(), 2);

        let err = Sequence::batch(vec![vec![1.0], vec![]]);
        assert_eq!(err, Err(ClusterError::EmptyData));
    }

    #[test]
    fn try_from_vec() {
        let s: Sequence = vec![0.5, 0.25].try_into().unwrap();
        assert_eq!(s.into_values(), vec![0.5, 0.25]);
    }
}
