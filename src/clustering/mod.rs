//! Time series clustering algorithms.
//!
//! Provides banded Dynamic Time Warping (DTW) distance and k-means clustering
//! with DTW distance, random restarts and a patience-based stopping rule.
//!
//! # Example
//!
//! ```
//! use anofox_cluster::clustering::{dtw_distance, CostMetric, DtwKMeans, DtwKMeansConfig};
//! use anofox_cluster::core::Sequence;
//!
//! // Compute DTW distance between two series
//! let a = vec![1.0, 2.0, 3.0, 2.0, 1.0];
//! let b = vec![1.0, 2.0, 3.0, 2.0, 1.0];
//! let dist = dtw_distance(&a, &b, 2, CostMetric::Euclidean);
//! assert_eq!(dist, 0.0);
//!
//! // Cluster time series
//! let series = Sequence::batch(vec![
//!     vec![1.0, 2.0, 1.0],
//!     vec![1.1, 2.1, 1.1],
//!     vec![10.0, 11.0, 10.0],
//!     vec![10.1, 11.1, 10.1],
//! ])
//! .unwrap();
//! let config = DtwKMeansConfig::new(2).num_iter(10).seed(42);
//! let mut model = DtwKMeans::new(config).unwrap();
//! model.fit(&series, 5).unwrap();
//! assert_eq!(model.cluster_centers().unwrap().len(), 2);
//! ```

pub mod assignment;
pub mod centroid;
pub mod dtw;
pub mod inertia;
pub mod kmeans;

// Re-export from dtw
pub use dtw::{dtw_distance, dtw_pairwise, CostMetric, Dtw, DtwAlignment, WindowBound};

// Re-export from the k-means building blocks
pub use assignment::{assign, nearest_centroid, AssignmentMap};
pub use centroid::{CentroidAggregator, DbaAggregator, MeanAggregator};
pub use inertia::generalized_inertia;
pub use kmeans::{
    elbow_inertias, DtwKMeans, DtwKMeansConfig, FittedModel, StopReason, DEFAULT_PATIENCE,
};
