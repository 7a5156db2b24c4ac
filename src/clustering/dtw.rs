//! Dynamic Time Warping (DTW) distance for time series.
//!
//! DTW is a distance measure that allows for elastic alignment between time series.
//!
//! The engine here is the open-boundary, banded variant used by the clustering
//! code: row 0 and column 0 of the accumulated-cost matrix are 0 (not infinity),
//! and cells outside the Sakoe-Chiba band are never written, so they stay 0 as
//! well. An alignment may therefore start anywhere on the boundary.
//!
//! The band width actually used is `max(window, |n - m|)`. Its upper edge is
//! governed by [`WindowBound`]; the default, [`WindowBound::Exclusive`], stops
//! one column short of `i + window`.

use crate::core::Sequence;
use crate::error::{ClusterError, Result};
use std::ops::Range;

/// Local cost between two scalar observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostMetric {
    /// Absolute difference `|x - y|` (Euclidean norm of 1-D points).
    #[default]
    Euclidean,
    /// Cosine distance of the two 1-D points.
    ///
    /// 0 when both values share a sign, 2 when the signs differ. A zero value
    /// has no direction: the cost is 1 against a non-zero value and 0 against
    /// another zero.
    Cosine,
}

impl CostMetric {
    /// Cost of aligning `x` with `y`.
    #[inline]
    pub fn cost(self, x: f64, y: f64) -> f64 {
        match self {
            CostMetric::Euclidean => (x - y).abs(),
            CostMetric::Cosine => {
                if x == 0.0 || y == 0.0 {
                    if x == y {
                        0.0
                    } else {
                        1.0
                    }
                } else {
                    1.0 - x.signum() * y.signum()
                }
            }
        }
    }
}

/// Upper edge of the warping band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowBound {
    /// Columns `j < i + w` (capped at `m`). The band reaches `w` cells below
    /// the diagonal but only `w - 1` above it. Reference-compatible behaviour.
    #[default]
    Exclusive,
    /// Columns `j <= i + w` (capped at `m`). Symmetric Sakoe-Chiba band.
    Inclusive,
}

impl WindowBound {
    /// Matrix columns of row `i` inside the band, for a second series of
    /// length `m` and effective window `w`.
    #[inline]
    pub fn columns(self, i: usize, m: usize, w: usize) -> Range<usize> {
        let start = 1.max(i.saturating_sub(w));
        let end = match self {
            WindowBound::Exclusive => (m + 1).min(i + w),
            WindowBound::Inclusive => (m + 1).min(i + w + 1),
        };
        start..end
    }
}

/// Banded DTW engine: window, local cost and band edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dtw {
    window: usize,
    metric: CostMetric,
    bound: WindowBound,
}

impl Dtw {
    /// Create an engine with the default (exclusive) band edge.
    ///
    /// `window` is the Sakoe-Chiba half-width and must be at least 1.
    pub fn new(window: usize, metric: CostMetric) -> Result<Self> {
        if window < 1 {
            return Err(ClusterError::InvalidParameter(format!(
                "window must be at least 1, got {window}"
            )));
        }
        Ok(Self {
            window,
            metric,
            bound: WindowBound::default(),
        })
    }

    /// Set the band edge.
    pub fn with_bound(mut self, bound: WindowBound) -> Self {
        self.bound = bound;
        self
    }

    /// Declared window.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Local cost metric.
    pub fn metric(&self) -> CostMetric {
        self.metric
    }

    /// Band edge.
    pub fn bound(&self) -> WindowBound {
        self.bound
    }

    /// Window used for series of lengths `n` and `m`.
    pub fn effective_window(&self, n: usize, m: usize) -> usize {
        self.window.max(n.abs_diff(m))
    }

    /// Compute the accumulated-cost matrix and the DTW cost.
    ///
    /// Returns an infinite cost if either series is empty.
    pub fn align(&self, a: &[f64], b: &[f64]) -> DtwAlignment {
        let n = a.len();
        let m = b.len();
        let window = self.effective_window(n, m);
        let mut matrix = vec![vec![0.0_f64; m + 1]; n + 1];

        if n == 0 || m == 0 {
            return DtwAlignment {
                cost: f64::INFINITY,
                matrix,
                window,
                bound: self.bound,
            };
        }

        for i in 1..=n {
            for j in self.bound.columns(i, m, window) {
                let cost = self.metric.cost(a[i - 1], b[j - 1]);
                matrix[i][j] = cost
                    + matrix[i - 1][j]
                        .min(matrix[i][j - 1])
                        .min(matrix[i - 1][j - 1]);
            }
        }

        DtwAlignment {
            cost: matrix[n][m],
            matrix,
            window,
            bound: self.bound,
        }
    }

    /// DTW cost only, using two rolling rows instead of the full matrix.
    ///
    /// Always equal to `self.align(a, b).cost()`. Runs in `O(n * w)` time for
    /// effective window `w`.
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        let n = a.len();
        let m = b.len();
        if n == 0 || m == 0 {
            return f64::INFINITY;
        }

        let window = self.effective_window(n, m);
        let mut prev = vec![0.0_f64; m + 1];
        let mut curr = vec![0.0_f64; m + 1];
        // Columns written into each buffer; every other cell holds 0.
        let mut prev_band = 0..0;
        let mut curr_band = 0..0;

        for i in 1..=n {
            let band = self.bound.columns(i, m, window);

            // `curr` still holds row i - 2. Out-of-band cells of row i must read as 0.
            for j in curr_band {
                if !band.contains(&j) {
                    curr[j] = 0.0;
                }
            }

            for j in band.clone() {
                let cost = self.metric.cost(a[i - 1], b[j - 1]);
                curr[j] = cost + prev[j].min(curr[j - 1]).min(prev[j - 1]);
            }

            std::mem::swap(&mut prev, &mut curr);
            curr_band = std::mem::replace(&mut prev_band, band);
        }

        prev[m]
    }
}

/// Result of a DTW alignment: the cost and the accumulated-cost matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DtwAlignment {
    cost: f64,
    matrix: Vec<Vec<f64>>,
    window: usize,
    bound: WindowBound,
}

impl DtwAlignment {
    /// Total cost, the bottom-right cell of the matrix.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// The `(n + 1) x (m + 1)` accumulated-cost matrix, boundary row and
    /// column included.
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    /// Matrix shape `(n + 1, m + 1)`.
    pub fn shape(&self) -> (usize, usize) {
        (
            self.matrix.len(),
            self.matrix.first().map_or(0, |row| row.len()),
        )
    }

    /// Effective window the matrix was computed with.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Whether matrix cell `(i, j)` was computed (boundary excluded).
    pub fn in_band(&self, i: usize, j: usize) -> bool {
        let (rows, cols) = self.shape();
        i >= 1
            && i < rows
            && j >= 1
            && j < cols
            && self.bound.columns(i, cols - 1, self.window).contains(&j)
    }

    /// Warping path as 0-based `(i, j)` index pairs in ascending order.
    ///
    /// Backtracks from `(n, m)` through computed cells, preferring the
    /// diagonal on ties, until no in-band predecessor is left.
    pub fn path(&self) -> Vec<(usize, usize)> {
        let (rows, cols) = self.shape();
        if rows < 2 || cols < 2 || !self.cost.is_finite() {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut i = rows - 1;
        let mut j = cols - 1;

        loop {
            path.push((i - 1, j - 1));

            let candidates = [(i - 1, j - 1), (i, j - 1), (i - 1, j)];
            let next = candidates
                .into_iter()
                .filter(|&(ci, cj)| self.in_band(ci, cj))
                .fold(None, |best: Option<(usize, usize)>, cell| match best {
                    Some(b) if self.matrix[b.0][b.1] <= self.matrix[cell.0][cell.1] => Some(b),
                    _ => Some(cell),
                });

            match next {
                Some((ni, nj)) => {
                    i = ni;
                    j = nj;
                }
                None => break,
            }
        }

        path.reverse();
        path
    }
}

/// Compute the windowed DTW distance between two raw series.
///
/// A `window` of 0 is treated as 1.
pub fn dtw_distance(a: &[f64], b: &[f64], window: usize, metric: CostMetric) -> f64 {
    Dtw {
        window: window.max(1),
        metric,
        bound: WindowBound::default(),
    }
    .distance(a, b)
}

/// Compute the pairwise DTW distance matrix for a collection of sequences.
///
/// Entry `[i][j]` is `dtw.distance(series[i], series[j])`. The diagonal is 0.
/// With [`WindowBound::Inclusive`] only the upper triangle is computed and
/// mirrored.
pub fn dtw_pairwise(series: &[Sequence], dtw: &Dtw) -> Vec<Vec<f64>> {
    let n = series.len();
    let mut dist_matrix = vec![vec![0.0_f64; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let d = dtw.distance(series[i].values(), series[j].values());
            dist_matrix[i][j] = d;
            dist_matrix[j][i] = match dtw.bound {
                WindowBound::Inclusive => d,
                WindowBound::Exclusive => dtw.distance(series[j].values(), series[i].values()),
            };
        }
    }

    dist_matrix
}
