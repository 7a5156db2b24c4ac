//! # anofox-cluster
//!
//! Time series clustering library.
//!
//! Provides a banded Dynamic Time Warping (DTW) engine and a k-means
//! clustering controller that uses DTW as its distance, with random restarts,
//! a patience-based stopping rule and inertia-based selection of the best
//! restart. Centroids are computed by a pluggable aggregator: a position-wise
//! mean by default, or DTW barycenter averaging.

// Allow some clippy warnings for cleaner code in specific cases
#![allow(clippy::needless_range_loop)]

pub mod clustering;
pub mod core;
pub mod error;

pub use error::{ClusterError, Result};

pub mod prelude {
    pub use crate::clustering::{
        AssignmentMap, CentroidAggregator, CostMetric, Dtw, DtwKMeans, DtwKMeansConfig,
        WindowBound, DEFAULT_PATIENCE,
    };
    pub use crate::core::Sequence;
    pub use crate::error::{ClusterError, Result};
}
