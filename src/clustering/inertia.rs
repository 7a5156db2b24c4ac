//! Generalized inertia of a clustering.

use super::assignment::AssignmentMap;
use super::dtw::Dtw;
use crate::core::Sequence;

/// Sum over clusters and members of the squared DTW distance from the
/// centroid to the member.
///
/// The centroid is the first argument of every DTW call. Cluster ids without
/// a centroid and member positions outside `data` are skipped.
pub fn generalized_inertia(
    centroids: &[Sequence],
    assignment: &AssignmentMap,
    data: &[Sequence],
    dtw: &Dtw,
) -> f64 {
    let mut inertia = 0.0;
    for (cluster, centroid) in centroids.iter().enumerate() {
        for member in assignment
            .members(cluster)
            .iter()
            .filter_map(|&pos| data.get(pos))
        {
            inertia += dtw.distance(centroid.values(), member.values()).powi(2);
        }
    }
    inertia
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::assignment::assign;
    use crate::clustering::dtw::CostMetric;
    use approx::assert_relative_eq;

    #[test]
    fn inertia_sums_squared_distances() {
        let data = Sequence::batch(vec![vec![1.0, 1.0], vec![3.0, 3.0], vec![10.0, 12.0]]).unwrap();
        let centroids = Sequence::batch(vec![vec![2.0, 2.0], vec![10.0, 10.0]]).unwrap();
        let dtw = Dtw::new(1, CostMetric::Euclidean).unwrap();

        let assignment = assign(&data, &centroids, &dtw);
        assert_eq!(assignment.labels(), vec![0, 0, 1]);

        // 1^2 + 1^2 + 2^2
        assert_relative_eq!(
            generalized_inertia(&centroids, &assignment, &data, &dtw),
            6.0
        );
    }

    #[test]
    fn inertia_is_zero_when_members_equal_centroids() {
        let data = Sequence::batch(vec![vec![1.0, 2.0, 3.0], vec![5.0, 5.0, 5.0]]).unwrap();
        let dtw = Dtw::new(2, CostMetric::Euclidean).unwrap();
        let assignment = assign(&data, &data, &dtw);

        assert_relative_eq!(generalized_inertia(&data, &assignment, &data, &dtw), 0.0);
    }

    #[test]
    fn inertia_of_empty_assignment_is_zero() {
        let data = Sequence::batch(vec![vec![1.0]]).unwrap();
        let dtw = Dtw::new(1, CostMetric::Euclidean).unwrap();
        assert_eq!(
            generalized_inertia(&data, &AssignmentMap::new(1), &data, &dtw),
            0.0
        );
    }
}
