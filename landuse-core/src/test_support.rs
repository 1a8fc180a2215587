//! Test-only helpers shared by unit and behaviour tests.

use std::collections::HashMap;

use geo::Coord;

use crate::{ClusterAssignment, ClusterId, ClusterParams, ClusterPoint, Clusterer, TaggedPoint};

/// Build a [`TaggedPoint`] from string pairs.
#[must_use]
pub fn tagged(id: u64, lon: f64, lat: f64, tags: &[(&str, &str)]) -> TaggedPoint {
    TaggedPoint::new(
        id,
        Coord { x: lon, y: lat },
        tags.iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect(),
    )
}

/// `Clusterer` returning a preset membership, ignoring geometry.
///
/// Points without a preset entry fall back to a single shared label.
#[derive(Debug, Clone, Default)]
pub struct FixedClusterer {
    preset: HashMap<u64, ClusterId>,
    fallback: Option<ClusterId>,
}

impl FixedClusterer {
    /// Assign each listed id to its cluster; unlisted points are noise.
    #[must_use]
    pub fn new<I>(preset: I) -> Self
    where
        I: IntoIterator<Item = (u64, ClusterId)>,
    {
        Self {
            preset: preset.into_iter().collect(),
            fallback: None,
        }
    }

    /// Put every point into one cluster.
    #[must_use]
    pub fn all_in_one() -> Self {
        Self {
            preset: HashMap::new(),
            fallback: Some(ClusterId::Cluster(1)),
        }
    }
}

impl Clusterer for FixedClusterer {
    fn partition(&self, points: &[ClusterPoint], _params: &ClusterParams) -> ClusterAssignment {
        ClusterAssignment::new(
            points
                .iter()
                .map(|point| {
                    let cluster = self
                        .preset
                        .get(&point.id)
                        .copied()
                        .or(self.fallback)
                        .unwrap_or(ClusterId::Noise);
                    (point.id, cluster)
                })
                .collect(),
        )
    }
}
