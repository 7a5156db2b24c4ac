//! K-means clustering for time series.
//!
//! Provides k-means with DTW distance, random restarts and a patience-based
//! stopping rule. Centroids are updated by a pluggable [`CentroidAggregator`].

use super::assignment::{assign, AssignmentMap};
use super::centroid::{CentroidAggregator, MeanAggregator};
use super::dtw::{CostMetric, Dtw, WindowBound};
use super::inertia::generalized_inertia;
use crate::core::Sequence;
use crate::error::{ClusterError, Result};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, trace};

/// Consecutive unchanged iterations after which a run is considered converged.
pub const DEFAULT_PATIENCE: usize = 5;

/// DTW k-means configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DtwKMeansConfig {
    /// Number of clusters
    pub num_clusters: usize,
    /// Maximum iterations per restart
    pub num_iter: usize,
    /// Number of restarts
    pub num_init: usize,
    /// Sakoe-Chiba window half-width
    pub window: usize,
    /// Local cost metric
    pub metric: CostMetric,
    /// Upper edge of the warping band
    pub bound: WindowBound,
    /// Random seed for initialization
    pub seed: Option<u64>,
}

impl DtwKMeansConfig {
    /// Configuration for `num_clusters` clusters with one iteration, one
    /// restart, window 1 and Euclidean cost.
    pub fn new(num_clusters: usize) -> Self {
        Self {
            num_clusters,
            num_iter: 1,
            num_init: 1,
            window: 1,
            metric: CostMetric::Euclidean,
            bound: WindowBound::Exclusive,
            seed: None,
        }
    }

    /// Set number of clusters.
    pub fn num_clusters(mut self, num_clusters: usize) -> Self {
        self.num_clusters = num_clusters;
        self
    }

    /// Set maximum iterations per restart.
    pub fn num_iter(mut self, num_iter: usize) -> Self {
        self.num_iter = num_iter;
        self
    }

    /// Set number of restarts.
    pub fn num_init(mut self, num_init: usize) -> Self {
        self.num_init = num_init;
        self
    }

    /// Set warping window.
    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set local cost metric.
    pub fn metric(mut self, metric: CostMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Set band edge.
    pub fn bound(mut self, bound: WindowBound) -> Self {
        self.bound = bound;
        self
    }

    /// Set random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter against its minimum.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("num_clusters", self.num_clusters),
            ("num_iter", self.num_iter),
            ("num_init", self.num_init),
            ("window", self.window),
        ];
        for (name, value) in checks {
            if value < 1 {
                return Err(ClusterError::InvalidParameter(format!(
                    "{name} must be at least 1, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// How a single restart ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Assignments stayed unchanged for `patience` consecutive iterations.
    Converged,
    /// `num_iter` iterations ran without reaching the patience threshold.
    MaxIterationsReached,
}

/// State of a fitted model, taken from the lowest-inertia restart.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    /// Centroid of each cluster (index = cluster id)
    pub cluster_centers: Vec<Sequence>,
    /// Cluster membership of the training data
    pub labels: AssignmentMap,
    /// Generalized inertia of the winning restart
    pub inertia: f64,
    /// Iterations performed in the winning restart
    pub n_iter: usize,
    /// How the winning restart ended
    pub stop: StopReason,
    /// 0-based index of the winning restart
    pub best_run: usize,
}

/// Outcome of one restart.
struct RunResult {
    centroids: Vec<Sequence>,
    assignment: AssignmentMap,
    inertia: f64,
    n_iter: usize,
    stop: StopReason,
}

/// K-means over time series with DTW distance.
///
/// The random generator is seeded once, when the model is built. Every
/// restart, and every later call to [`DtwKMeans::fit`], keeps drawing from
/// that same stream.
///
/// # Example
///
/// ```
/// use anofox_cluster::clustering::{DtwKMeans, DtwKMeansConfig};
/// use anofox_cluster::core::Sequence;
///
/// let data = Sequence::batch(vec![
///     vec![1.0, 1.0, 1.0],
///     vec![1.1, 1.1, 1.1],
///     vec![9.0, 9.0, 9.0],
///     vec![9.2, 9.2, 9.2],
/// ])
/// .unwrap();
///
/// let config = DtwKMeansConfig::new(2).num_iter(10).num_init(3).seed(42);
/// let mut model = DtwKMeans::new(config).unwrap();
/// let labels = model.fit(&data, 5).unwrap().labels().unwrap().labels();
///
/// assert_eq!(labels[0], labels[1]);
/// assert_ne!(labels[0], labels[2]);
/// ```
#[derive(Debug, Clone)]
pub struct DtwKMeans<A = MeanAggregator> {
    config: DtwKMeansConfig,
    dtw: Dtw,
    aggregator: A,
    rng: StdRng,
    fitted: Option<FittedModel>,
}

impl DtwKMeans<MeanAggregator> {
    /// Build a model with the position-wise mean aggregator.
    ///
    /// Fails with [`ClusterError::InvalidParameter`] if any parameter is
    /// below its minimum.
    pub fn new(config: DtwKMeansConfig) -> Result<Self> {
        config.validate()?;
        let dtw = Dtw::new(config.window, config.metric)?.with_bound(config.bound);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            dtw,
            aggregator: MeanAggregator,
            rng,
            fitted: None,
        })
    }
}

impl<A: CentroidAggregator> DtwKMeans<A> {
    /// Replace the centroid aggregator. Discards any fitted state.
    pub fn with_aggregator<B: CentroidAggregator>(self, aggregator: B) -> DtwKMeans<B> {
        DtwKMeans {
            config: self.config,
            dtw: self.dtw,
            aggregator,
            rng: self.rng,
            fitted: None,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &DtwKMeansConfig {
        &self.config
    }

    /// Get the DTW engine used for every distance.
    pub fn dtw(&self) -> &Dtw {
        &self.dtw
    }

    /// Get the centroid aggregator.
    pub fn aggregator(&self) -> &A {
        &self.aggregator
    }

    /// Fit the model, drawing initial centroids from the model's own
    /// random stream.
    pub fn fit(&mut self, data: &[Sequence], patience: usize) -> Result<&mut Self> {
        let model = fit_model(
            &self.config,
            &self.dtw,
            &self.aggregator,
            data,
            patience,
            &mut self.rng,
        )?;
        self.fitted = Some(model);
        Ok(self)
    }

    /// Fit the model, drawing initial centroids from a caller-owned
    /// generator.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &mut self,
        data: &[Sequence],
        patience: usize,
        rng: &mut R,
    ) -> Result<&mut Self> {
        let model = fit_model(
            &self.config,
            &self.dtw,
            &self.aggregator,
            data,
            patience,
            rng,
        )?;
        self.fitted = Some(model);
        Ok(self)
    }

    /// Fit the model and return the training-data assignment.
    pub fn fit_predict(&mut self, data: &[Sequence], patience: usize) -> Result<AssignmentMap> {
        self.fit(data, patience)?;
        Ok(self.fitted_model()?.labels.clone())
    }

    /// Assign sequences to the fitted centroids.
    ///
    /// Runs one assignment step; the fitted state is not modified.
    pub fn predict(&self, data: &[Sequence]) -> Result<AssignmentMap> {
        let model = self.fitted_model()?;
        Ok(assign(data, &model.cluster_centers, &self.dtw))
    }

    /// Generalized inertia of the fitted centroids and labels against `data`.
    ///
    /// `data` must be the collection the labels refer to; a different number
    /// of sequences fails with [`ClusterError::DimensionMismatch`].
    pub fn inertia(&self, data: &[Sequence]) -> Result<f64> {
        let model = self.fitted_model()?;
        let expected = model.labels.num_assigned();
        if data.len() != expected {
            return Err(ClusterError::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(generalized_inertia(
            &model.cluster_centers,
            &model.labels,
            data,
            &self.dtw,
        ))
    }

    /// Fitted state, if any.
    pub fn fitted(&self) -> Option<&FittedModel> {
        self.fitted.as_ref()
    }

    /// Fitted centroids, if any.
    pub fn cluster_centers(&self) -> Option<&[Sequence]> {
        self.fitted.as_ref().map(|m| m.cluster_centers.as_slice())
    }

    /// Fitted training-data assignment, if any.
    pub fn labels(&self) -> Option<&AssignmentMap> {
        self.fitted.as_ref().map(|m| &m.labels)
    }

    /// Check if the model has been fitted.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    fn fitted_model(&self) -> Result<&FittedModel> {
        self.fitted.as_ref().ok_or(ClusterError::FitRequired)
    }
}

/// Run every restart and keep the one with the lowest inertia.
#[instrument(
    skip_all,
    fields(n = data.len(), k = config.num_clusters, num_init = config.num_init)
)]
fn fit_model<A, R>(
    config: &DtwKMeansConfig,
    dtw: &Dtw,
    aggregator: &A,
    data: &[Sequence],
    patience: usize,
    rng: &mut R,
) -> Result<FittedModel>
where
    A: CentroidAggregator,
    R: Rng + ?Sized,
{
    if data.is_empty() {
        return Err(ClusterError::EmptyData);
    }
    if config.num_clusters > data.len() {
        return Err(ClusterError::InsufficientData {
            needed: config.num_clusters,
            got: data.len(),
        });
    }

    let mut best: Option<FittedModel> = None;

    for run in 0..config.num_init {
        let centroids = initialize_centroids(data, config.num_clusters, rng);
        let result = run_once(config, dtw, aggregator, data, patience, centroids, run)?;

        let improved = best
            .as_ref()
            .map_or(result.inertia < f64::INFINITY, |b| result.inertia < b.inertia);
        if improved {
            best = Some(FittedModel {
                cluster_centers: result.centroids,
                labels: result.assignment,
                inertia: result.inertia,
                n_iter: result.n_iter,
                stop: result.stop,
                best_run: run,
            });
        }
    }

    let best = best.ok_or_else(|| {
        ClusterError::ComputationError("no restart produced a finite inertia".to_string())
    })?;
    info!(
        best_run = best.best_run,
        inertia = best.inertia,
        n_iter = best.n_iter,
        stop = ?best.stop,
        aggregator = aggregator.name(),
        "selected best restart"
    );
    Ok(best)
}

/// Sample `k` distinct sequences as initial centroids.
fn initialize_centroids<R: Rng + ?Sized>(
    data: &[Sequence],
    k: usize,
    rng: &mut R,
) -> Vec<Sequence> {
    index::sample(rng, data.len(), k)
        .into_iter()
        .map(|i| Sequence::from_trusted(data[i].values().to_vec()))
        .collect()
}

/// One restart: iterate assignment and aggregation until the assignment has
/// been stable for `patience` iterations or `num_iter` is exhausted.
fn run_once<A: CentroidAggregator>(
    config: &DtwKMeansConfig,
    dtw: &Dtw,
    aggregator: &A,
    data: &[Sequence],
    patience: usize,
    mut centroids: Vec<Sequence>,
    run: usize,
) -> Result<RunResult> {
    trace!(run, "starting restart");

    let mut previous: Option<AssignmentMap> = None;
    let mut stable = 0;
    let mut n_iter = 0;
    let mut stop = StopReason::MaxIterationsReached;

    for iteration in 1..=config.num_iter {
        let assignment = assign(data, &centroids, dtw);
        update_centroids(aggregator, data, &assignment, &mut centroids)?;

        stable = match &previous {
            Some(prev) if *prev == assignment => stable + 1,
            _ => 0,
        };
        n_iter = iteration;
        debug!(
            run,
            iteration,
            stable,
            sizes = ?assignment.cluster_sizes(),
            "k-means iteration complete"
        );

        previous = Some(assignment);
        if stable >= patience {
            stop = StopReason::Converged;
            break;
        }
    }

    let assignment = previous.ok_or_else(|| {
        ClusterError::ComputationError("restart finished without an iteration".to_string())
    })?;
    let inertia = generalized_inertia(&centroids, &assignment, data, dtw);
    debug!(run, inertia, n_iter, stop = ?stop, "restart finished");

    Ok(RunResult {
        centroids,
        assignment,
        inertia,
        n_iter,
        stop,
    })
}

/// Replace each non-empty cluster's centroid by its members' aggregate.
fn update_centroids<A: CentroidAggregator>(
    aggregator: &A,
    data: &[Sequence],
    assignment: &AssignmentMap,
    centroids: &mut [Sequence],
) -> Result<()> {
    for (cluster, positions) in assignment.iter() {
        let members: Vec<&Sequence> = positions.iter().map(|&pos| &data[pos]).collect();
        if let Some(centroid) = aggregator.update(&members)? {
            centroids[cluster] = centroid;
        }
    }
    Ok(())
}

/// Elbow method helper: fit one model per k in `1..=max_k` (capped at the
/// number of sequences) and collect the inertias.
///
/// Every other setting, including the seed, comes from `config`.
pub fn elbow_inertias(
    data: &[Sequence],
    max_k: usize,
    config: &DtwKMeansConfig,
    patience: usize,
) -> Result<Vec<f64>> {
    (1..=max_k.min(data.len()))
        .map(|k| {
            let mut model = DtwKMeans::new(config.clone().num_clusters(k))?;
            model.fit(data, patience)?;
            model.inertia(data)
        })
        .collect()
}
