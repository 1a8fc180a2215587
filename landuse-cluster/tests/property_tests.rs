//! Property-based tests for haversine DBSCAN.
//!
//! # Invariants tested
//!
//! - **Permutation invariance:** shuffling the input never changes the
//!   partition into clusters and noise.
//! - **Search agreement:** R\*-tree and exhaustive neighbour searches yield
//!   identical assignments.
//! - **Coverage:** every input point appears exactly once in the output, in
//!   input order.
//! - **Trivial density:** with `min_points = 1` no point is noise.

use landuse_cluster::{DbscanClusterer, ExhaustiveNeighbours};
use landuse_core::{ClusterParams, ClusterPoint, Clusterer};
use proptest::prelude::*;

/// Points with unique ids scattered over a few square kilometres, dense
/// enough for clusters to form under the default radius.
fn points_strategy() -> impl Strategy<Value = Vec<ClusterPoint>> {
    prop::collection::vec((77.20_f64..77.23, 28.60_f64..28.63), 0..60).prop_map(|coords| {
        coords
            .into_iter()
            .zip(1_u64..)
            .map(|((lon, lat), id)| ClusterPoint::new(id, lon, lat))
            .collect()
    })
}

fn params_strategy() -> impl Strategy<Value = ClusterParams> {
    (50.0_f64..800.0, 1_usize..8).prop_map(|(radius, min_points)| ClusterParams::new(radius, min_points))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn partition_ignores_input_order(
        (points, shuffled) in points_strategy()
            .prop_flat_map(|points| (Just(points.clone()), Just(points).prop_shuffle())),
        params in params_strategy(),
    ) {
        let clusterer = DbscanClusterer::new();
        let original = clusterer.cluster(&points, &params).expect("valid input");
        let reordered = clusterer.cluster(&shuffled, &params).expect("valid input");
        prop_assert_eq!(original.partition(), reordered.partition());
    }

    #[test]
    fn tree_search_matches_exhaustive_search(
        points in points_strategy(),
        params in params_strategy(),
    ) {
        let tree = DbscanClusterer::new().partition(&points, &params);
        let exhaustive = DbscanClusterer::with_search(ExhaustiveNeighbours).partition(&points, &params);
        prop_assert_eq!(tree, exhaustive);
    }

    #[test]
    fn every_point_is_assigned_once(
        points in points_strategy(),
        params in params_strategy(),
    ) {
        let assignment = DbscanClusterer::new().partition(&points, &params);
        let ids: Vec<u64> = assignment.iter().map(|(id, _)| id).collect();
        let expected: Vec<u64> = points.iter().map(|point| point.id).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn min_points_of_one_leaves_no_noise(
        points in points_strategy(),
        radius in 50.0_f64..800.0,
    ) {
        let assignment = DbscanClusterer::new().partition(&points, &ClusterParams::new(radius, 1));
        prop_assert_eq!(assignment.noise_count(), 0);
    }
}
