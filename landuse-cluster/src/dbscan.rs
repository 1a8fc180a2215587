//! Density-based clustering with a deterministic border rule.

use std::collections::VecDeque;

use landuse_core::{ClusterAssignment, ClusterId, ClusterParams, ClusterPoint, Clusterer};
use log::debug;

use crate::neighbours::{Neighbour, NeighbourSearch, RTreeNeighbours};

/// DBSCAN over haversine distances.
///
/// A point is *core* when its neighbourhood, itself included, holds at least
/// `min_points` points. Clusters are the connected components of core points
/// that lie within the radius of each other. A non-core point within the
/// radius of a core point is a *border* point and joins the cluster of its
/// nearest core neighbour, with ties going to the smallest point id. Every
/// other point is noise.
///
/// The result depends only on the set of points, never on their order.
///
/// # Examples
/// ```
/// use landuse_cluster::DbscanClusterer;
/// use landuse_core::{ClusterParams, ClusterPoint, Clusterer};
///
/// # fn main() -> Result<(), landuse_core::ClusterError> {
/// let points: Vec<_> = (0..5_u32)
///     .map(|i| ClusterPoint::new(u64::from(i), 77.2, 28.6 + f64::from(i) * 0.0001))
///     .chain([ClusterPoint::new(99, 78.0, 29.0)])
///     .collect();
/// let assignment = DbscanClusterer::new().cluster(&points, &ClusterParams::default())?;
/// assert_eq!(assignment.cluster_count(), 1);
/// assert_eq!(assignment.noise_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DbscanClusterer<S = RTreeNeighbours> {
    search: S,
}

impl DbscanClusterer {
    /// Create a clusterer backed by an R\*-tree neighbour search.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            search: RTreeNeighbours,
        }
    }
}

impl Default for DbscanClusterer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: NeighbourSearch> DbscanClusterer<S> {
    /// Create a clusterer using `search` to find neighbourhoods.
    #[must_use]
    pub const fn with_search(search: S) -> Self {
        Self { search }
    }
}

impl<S: NeighbourSearch> Clusterer for DbscanClusterer<S> {
    fn partition(&self, points: &[ClusterPoint], params: &ClusterParams) -> ClusterAssignment {
        let neighbourhoods = self.search.neighbourhoods(points, params.radius_metres);
        let core: Vec<bool> = neighbourhoods
            .iter()
            .map(|neighbourhood| neighbourhood.len() >= params.min_points)
            .collect();
        let mut labels = label_core_components(&neighbourhoods, &core);
        attach_border_points(points, &neighbourhoods, &core, &mut labels);

        let assignment = ClusterAssignment::new(
            points
                .iter()
                .zip(labels)
                .map(|(point, label)| (point.id, label.map_or(ClusterId::Noise, ClusterId::Cluster)))
                .collect(),
        );
        debug!(
            "dbscan: {} points, {} core, {} clusters, {} noise",
            points.len(),
            core.iter().filter(|is_core| **is_core).count(),
            assignment.cluster_count(),
            assignment.noise_count()
        );
        assignment
    }
}

fn is_core(core: &[bool], index: usize) -> bool {
    core.get(index).copied().unwrap_or(false)
}

/// Flood-fill the core graph, giving each component its own raw label.
fn label_core_components(neighbourhoods: &[Vec<Neighbour>], core: &[bool]) -> Vec<Option<u32>> {
    let mut labels: Vec<Option<u32>> = vec![None; neighbourhoods.len()];
    let mut next_label = 1_u32;
    let mut queue = VecDeque::new();
    for seed in 0..neighbourhoods.len() {
        if !is_core(core, seed) || labels.get(seed).copied().flatten().is_some() {
            continue;
        }
        if let Some(slot) = labels.get_mut(seed) {
            *slot = Some(next_label);
        }
        queue.push_back(seed);
        while let Some(current) = queue.pop_front() {
            let Some(neighbourhood) = neighbourhoods.get(current) else {
                continue;
            };
            for neighbour in neighbourhood {
                if !is_core(core, neighbour.index) {
                    continue;
                }
                let Some(slot) = labels.get_mut(neighbour.index) else {
                    continue;
                };
                if slot.is_none() {
                    *slot = Some(next_label);
                    queue.push_back(neighbour.index);
                }
            }
        }
        next_label = next_label.saturating_add(1);
    }
    labels
}

/// Give each border point the label of its nearest core neighbour.
fn attach_border_points(
    points: &[ClusterPoint],
    neighbourhoods: &[Vec<Neighbour>],
    core: &[bool],
    labels: &mut [Option<u32>],
) {
    let point_id = |index: usize| points.get(index).map_or(u64::MAX, |point| point.id);
    for (index, neighbourhood) in neighbourhoods.iter().enumerate() {
        if is_core(core, index) {
            continue;
        }
        let nearest_core = neighbourhood
            .iter()
            .filter(|neighbour| is_core(core, neighbour.index))
            .min_by(|a, b| {
                a.distance_metres
                    .total_cmp(&b.distance_metres)
                    .then_with(|| point_id(a.index).cmp(&point_id(b.index)))
            });
        let Some(nearest) = nearest_core else {
            continue;
        };
        let label = labels.get(nearest.index).copied().flatten();
        if let Some(slot) = labels.get_mut(index) {
            *slot = label;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExhaustiveNeighbours;
    use rstest::rstest;

    /// Points spaced `step` degrees of latitude apart along one meridian.
    #[expect(clippy::float_arithmetic, reason = "Offsets points along a meridian")]
    fn line(ids: std::ops::Range<u64>, start_lat: f64, step: f64) -> Vec<ClusterPoint> {
        ids.zip(0_u32..)
            .map(|(id, offset)| ClusterPoint::new(id, 77.2, start_lat + f64::from(offset) * step))
            .collect()
    }

    #[rstest]
    fn empty_input_is_empty_assignment() {
        let assignment = DbscanClusterer::new().partition(&[], &ClusterParams::default());
        assert!(assignment.is_empty());
    }

    #[rstest]
    fn single_point_is_noise_under_default_params() {
        let points = [ClusterPoint::new(1, 77.2, 28.6)];
        let assignment = DbscanClusterer::new().partition(&points, &ClusterParams::default());
        assert_eq!(assignment.get(1), Some(ClusterId::Noise));
    }

    #[rstest]
    fn single_point_clusters_when_min_points_is_one() {
        let points = [ClusterPoint::new(1, 77.2, 28.6)];
        let assignment = DbscanClusterer::new().partition(&points, &ClusterParams::new(300.0, 1));
        assert_eq!(assignment.get(1), Some(ClusterId::Cluster(1)));
    }

    #[rstest]
    fn dense_group_forms_a_cluster_and_outlier_is_noise() {
        // ~11 m apart, so every pair of the six is within 300 m.
        let mut points = line(1..7, 28.6, 0.0001);
        points.push(ClusterPoint::new(50, 77.2, 28.7));
        let assignment = DbscanClusterer::new().partition(&points, &ClusterParams::default());
        assert_eq!(assignment.cluster_count(), 1);
        assert_eq!(assignment.noise_count(), 1);
        assert_eq!(assignment.get(50), Some(ClusterId::Noise));
    }

    #[rstest]
    fn chain_of_core_points_is_one_cluster() {
        // ~111 m spacing: neighbours two steps away are still within 300 m.
        let points = line(1..21, 28.6, 0.001);
        let assignment = DbscanClusterer::new().partition(&points, &ClusterParams::default());
        assert_eq!(assignment.cluster_count(), 1);
        assert_eq!(assignment.noise_count(), 0);
    }

    #[rstest]
    fn separated_groups_form_separate_clusters() {
        let mut points = line(1..6, 28.6, 0.0001);
        points.extend(line(10..15, 28.7, 0.0001));
        let assignment = DbscanClusterer::new().partition(&points, &ClusterParams::default());
        assert_eq!(assignment.cluster_count(), 2);
        assert_eq!(assignment.get(1), Some(ClusterId::Cluster(1)));
        assert_eq!(assignment.get(10), Some(ClusterId::Cluster(2)));
    }

    #[rstest]
    fn border_point_joins_nearest_core_neighbour() {
        // Offsets in metres along the prime meridian. The point at 280 m sees
        // one core point of each group (at 0 m and 570 m) and is nearer the
        // left one; the groups themselves are too far apart to merge.
        let at = |id: u64, metres: f64| ClusterPoint::new(id, 0.0, metres / 111_194.93);
        let points = [
            at(1, 0.0),
            at(2, -30.0),
            at(3, -60.0),
            at(4, -90.0),
            at(99, 280.0),
            at(11, 570.0),
            at(12, 600.0),
            at(13, 630.0),
            at(14, 660.0),
        ];
        let params = ClusterParams::new(300.0, 4);
        let assignment = DbscanClusterer::new().partition(&points, &params);
        assert_eq!(assignment.cluster_count(), 2);
        assert_eq!(assignment.noise_count(), 0);
        assert_eq!(assignment.get(99), assignment.get(1));
        assert_ne!(assignment.get(99), assignment.get(11));
    }

    #[rstest]
    fn tree_and_exhaustive_searches_agree() {
        let mut points = line(1..30, 28.6, 0.0007);
        points.extend(line(100..104, 28.9, 0.0001));
        let params = ClusterParams::default();
        let tree = DbscanClusterer::new().partition(&points, &params);
        let exhaustive =
            DbscanClusterer::with_search(ExhaustiveNeighbours).partition(&points, &params);
        assert_eq!(tree, exhaustive);
    }
}
