//! Population index ranking over a cluster assignment.
//!
//! The population index of a point is the member count of its cluster, not
//! a positional rank: two clusters of equal size share the same index.
//! Noise points never receive an index.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::{ClusterAssignment, ClusterId};

/// One ranked, non-noise point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedPoint {
    /// Identifier of the point.
    pub point_id: u64,
    /// Cluster the point belongs to.
    pub cluster: ClusterId,
    /// Member count of that cluster.
    pub population_index: usize,
}

/// Size of one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterSummary {
    /// The cluster.
    pub cluster: ClusterId,
    /// Number of member points.
    pub member_count: usize,
}

fn member_counts(assignment: &ClusterAssignment) -> HashMap<ClusterId, usize> {
    let mut counts = HashMap::new();
    for (_, cluster) in assignment.iter().filter(|(_, cluster)| !cluster.is_noise()) {
        *counts.entry(cluster).or_insert(0_usize) += 1;
    }
    counts
}

/// Clusters ordered by descending member count.
///
/// Ties keep cluster first-appearance order, which is also ascending cluster
/// number because [`ClusterAssignment`] normalises numbering.
#[must_use]
pub fn summarise(assignment: &ClusterAssignment) -> Vec<ClusterSummary> {
    let mut summaries: Vec<_> = member_counts(assignment)
        .into_iter()
        .map(|(cluster, member_count)| ClusterSummary {
            cluster,
            member_count,
        })
        .collect();
    summaries.sort_by_key(|summary| (Reverse(summary.member_count), summary.cluster));
    summaries
}

/// Attach population indices to every non-noise point.
///
/// Rows are sorted by descending population index; ties are broken by
/// cluster first appearance and then by input order.
///
/// # Examples
/// ```
/// use landuse_core::{ClusterAssignment, ClusterId, rank};
///
/// let assignment = ClusterAssignment::new(vec![
///     (1, ClusterId::Cluster(1)),
///     (2, ClusterId::Noise),
///     (3, ClusterId::Cluster(2)),
///     (4, ClusterId::Cluster(2)),
/// ]);
/// let ranked = rank(&assignment);
/// let order: Vec<_> = ranked.iter().map(|row| (row.point_id, row.population_index)).collect();
/// assert_eq!(order, vec![(3, 2), (4, 2), (1, 1)]);
/// ```
#[must_use]
pub fn rank(assignment: &ClusterAssignment) -> Vec<RankedPoint> {
    let counts = member_counts(assignment);
    let mut ranked: Vec<_> = assignment
        .iter()
        .filter_map(|(point_id, cluster)| {
            counts.get(&cluster).map(|&population_index| RankedPoint {
                point_id,
                cluster,
                population_index,
            })
        })
        .collect();
    // Stable: equal keys keep input order.
    ranked.sort_by_key(|row| (Reverse(row.population_index), row.cluster));
    ranked
}
