//! Centroid aggregation for k-means on time series.
//!
//! The controller only talks to the [`CentroidAggregator`] trait, so the
//! position-wise mean can be swapped for DTW barycenter averaging.

use super::dtw::Dtw;
use crate::core::Sequence;
use crate::error::{ClusterError, Result};
use tracing::{debug, instrument};

/// Computes a cluster representative from its members.
pub trait CentroidAggregator {
    /// Aggregate `members` into a new centroid.
    ///
    /// Returns `Ok(None)` when there are no members; the caller then keeps
    /// the previous centroid for that cluster.
    fn update(&self, members: &[&Sequence]) -> Result<Option<Sequence>>;

    /// Get the aggregator name.
    fn name(&self) -> &str;
}

/// Element-wise arithmetic mean. All members must have the same length.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAggregator;

impl MeanAggregator {
    /// Create a mean aggregator.
    pub fn new() -> Self {
        Self
    }
}

impl CentroidAggregator for MeanAggregator {
    fn update(&self, members: &[&Sequence]) -> Result<Option<Sequence>> {
        if members.is_empty() {
            return Ok(None);
        }
        mean_series(members).map(|values| Some(Sequence::from_trusted(values)))
    }

    fn name(&self) -> &str {
        "Mean"
    }
}

/// Compute element-wise mean of multiple series.
fn mean_series(series: &[&Sequence]) -> Result<Vec<f64>> {
    let len = series[0].len();
    let mut sums = vec![0.0_f64; len];

    for s in series {
        if s.len() != len {
            return Err(ClusterError::DimensionMismatch {
                expected: len,
                got: s.len(),
            });
        }
        for (sum, v) in sums.iter_mut().zip(s.values()) {
            *sum += v;
        }
    }

    let n = series.len() as f64;
    for sum in &mut sums {
        *sum /= n;
    }
    Ok(sums)
}

/// DTW Barycenter Averaging (Petitjean et al. 2011).
///
/// Starts from the element-wise mean when every member has the same length,
/// otherwise from the first member, then repeatedly aligns each member to the
/// barycenter and replaces every barycenter position by the mean of the
/// member values warped onto it. The barycenter keeps its initial length, so
/// members of different lengths are accepted.
#[derive(Debug, Clone)]
pub struct DbaAggregator {
    dtw: Dtw,
    max_iter: usize,
    tol: f64,
}

impl DbaAggregator {
    /// Create a DBA aggregator. Defaults: `max_iter = 10`, `tol = 1e-5`.
    pub fn new(dtw: Dtw) -> Self {
        Self {
            dtw,
            max_iter: 10,
            tol: 1e-5,
        }
    }

    /// Set the maximum number of refinement iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance on the largest per-position change.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }
}

impl CentroidAggregator for DbaAggregator {
    #[instrument(skip(self, members), fields(n = members.len(), max_iter = self.max_iter))]
    fn update(&self, members: &[&Sequence]) -> Result<Option<Sequence>> {
        let Some(first) = members.first() else {
            return Ok(None);
        };

        let mut barycenter = if members.iter().all(|s| s.len() == first.len()) {
            mean_series(members)?
        } else {
            first.values().to_vec()
        };
        let len = barycenter.len();

        for iter in 0..self.max_iter {
            let mut sums = vec![0.0_f64; len];
            let mut counts = vec![0_usize; len];

            for s in members {
                for (bi, si) in self.dtw.align(&barycenter, s.values()).path() {
                    sums[bi] += s[si];
                    counts[bi] += 1;
                }
            }

            let mut delta = 0.0_f64;
            for t in 0..len {
                if counts[t] > 0 {
                    let new_val = sums[t] / counts[t] as f64;
                    delta = delta.max((new_val - barycenter[t]).abs());
                    barycenter[t] = new_val;
                }
            }

            debug!(iteration = iter + 1, delta, "DBA iteration complete");
            if delta < self.tol {
                break;
            }
        }

        Ok(Some(Sequence::from_trusted(barycenter)))
    }

    fn name(&self) -> &str {
        "DBA"
    }
}
