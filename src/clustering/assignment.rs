//! Nearest-centroid assignment.

use super::dtw::Dtw;
use crate::core::Sequence;
use std::collections::BTreeMap;
use std::ops::Index;

/// Cluster membership: for each cluster id `0..k`, the positions of its
/// member sequences in collection order.
///
/// Every cluster id is present, even when its member list is empty. Members
/// are appended in collection order, so two maps compare equal exactly when
/// every cluster has the same member set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentMap {
    clusters: Vec<Vec<usize>>,
}

impl AssignmentMap {
    /// Create a map with `num_clusters` empty clusters.
    pub fn new(num_clusters: usize) -> Self {
        Self {
            clusters: vec![Vec::new(); num_clusters],
        }
    }

    /// Number of cluster ids.
    pub fn num_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Total number of assigned sequences.
    pub fn num_assigned(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum()
    }

    /// Positions assigned to `cluster`. Empty for unknown ids.
    pub fn members(&self, cluster: usize) -> &[usize] {
        self.clusters.get(cluster).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the size of each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }

    /// One cluster id per sequence position.
    pub fn labels(&self) -> Vec<usize> {
        let mut labels = vec![0; self.num_assigned()];
        for (cluster, members) in self.clusters.iter().enumerate() {
            for &pos in members {
                if let Some(label) = labels.get_mut(pos) {
                    *label = cluster;
                }
            }
        }
        labels
    }

    /// Iterate over `(cluster id, members)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.clusters
            .iter()
            .enumerate()
            .map(|(c, m)| (c, m.as_slice()))
    }

    /// Convert into a cluster id -> positions map.
    pub fn into_map(self) -> BTreeMap<usize, Vec<usize>> {
        self.clusters.into_iter().enumerate().collect()
    }

    fn push(&mut self, cluster: usize, position: usize) {
        self.clusters[cluster].push(position);
    }
}

impl Index<usize> for AssignmentMap {
    type Output = [usize];

    fn index(&self, cluster: usize) -> &[usize] {
        &self.clusters[cluster]
    }
}

impl From<AssignmentMap> for BTreeMap<usize, Vec<usize>> {
    fn from(map: AssignmentMap) -> Self {
        map.into_map()
    }
}

/// Find the nearest centroid for a series.
///
/// Scans centroids in order with a `<=` comparison, so on ties the last
/// centroid reaching the minimum wins. Returns `(index, distance)`.
pub fn nearest_centroid(series: &Sequence, centroids: &[Sequence], dtw: &Dtw) -> (usize, f64) {
    let mut min_dist = f64::INFINITY;
    let mut nearest = 0;

    for (i, centroid) in centroids.iter().enumerate() {
        let dist = dtw.distance(series.values(), centroid.values());
        if dist <= min_dist {
            min_dist = dist;
            nearest = i;
        }
    }

    (nearest, min_dist)
}

/// Assign every sequence to its nearest centroid.
///
/// All sequences are compared against the same centroid snapshot. The
/// result has one entry per centroid.
pub fn assign(data: &[Sequence], centroids: &[Sequence], dtw: &Dtw) -> AssignmentMap {
    let mut assignment = AssignmentMap::new(centroids.len());
    if centroids.is_empty() {
        return assignment;
    }

    for (pos, series) in data.iter().enumerate() {
        let (nearest, _) = nearest_centroid(series, centroids, dtw);
        assignment.push(nearest, pos);
    }

    assignment
}
