//! Spatial clustering contract.
//!
//! The [`Clusterer`] trait hides the density method behind a narrow
//! interface so alternative neighbour searches can be swapped in without
//! touching ranking. Implementations receive validated input through
//! [`Clusterer::cluster`] and only need to provide
//! [`Clusterer::partition`].

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use geo::Coord;
use thiserror::Error;

/// Mean Earth radius used to convert metres to haversine radians.
pub const EARTH_MEAN_RADIUS_METRES: f64 = 6_371_000.0;

/// Default neighbourhood radius in metres.
pub const DEFAULT_RADIUS_METRES: f64 = 300.0;

/// Default minimum number of points forming a dense neighbourhood.
pub const DEFAULT_MIN_POINTS: usize = 5;

/// Errors raised when clustering input is rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClusterError {
    /// The neighbourhood radius was not a positive finite number.
    #[error("cluster radius must be a positive, finite number of metres (got {radius_metres})")]
    InvalidRadius {
        /// Rejected radius.
        radius_metres: f64,
    },
    /// The minimum cluster size was zero.
    #[error("minimum cluster size must be at least 1")]
    ZeroMinPoints,
    /// A point carried a coordinate outside WGS84 bounds.
    #[error("point {id} has invalid coordinate ({lon}, {lat})")]
    InvalidCoordinate {
        /// Identifier of the offending point.
        id: u64,
        /// Longitude supplied.
        lon: f64,
        /// Latitude supplied.
        lat: f64,
    },
    /// Two input points shared an identifier.
    #[error("point {id} appears more than once")]
    DuplicatePoint {
        /// Repeated identifier.
        id: u64,
    },
}

/// Density clustering parameters.
///
/// # Examples
/// ```
/// use landuse_core::ClusterParams;
///
/// let params = ClusterParams::default();
/// assert_eq!(params.min_points, 5);
/// assert!((params.radius_radians() - 300.0 / 6_371_000.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterParams {
    /// Neighbourhood radius in metres.
    pub radius_metres: f64,
    /// Points, including the centre, needed for a core point.
    pub min_points: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            radius_metres: DEFAULT_RADIUS_METRES,
            min_points: DEFAULT_MIN_POINTS,
        }
    }
}

impl ClusterParams {
    /// Construct parameters without validating them.
    #[must_use]
    pub const fn new(radius_metres: f64, min_points: usize) -> Self {
        Self {
            radius_metres,
            min_points,
        }
    }

    /// The radius expressed as a great-circle angle in radians.
    #[expect(
        clippy::float_arithmetic,
        reason = "converting metres to radians divides by the Earth radius"
    )]
    #[must_use]
    pub const fn radius_radians(&self) -> f64 {
        self.radius_metres / EARTH_MEAN_RADIUS_METRES
    }

    /// Check the parameters are usable.
    ///
    /// # Errors
    /// Returns [`ClusterError::InvalidRadius`] for non-finite or non-positive
    /// radii and [`ClusterError::ZeroMinPoints`] when `min_points` is zero.
    pub const fn validate(&self) -> Result<(), ClusterError> {
        if !self.radius_metres.is_finite() || self.radius_metres <= 0.0 {
            return Err(ClusterError::InvalidRadius {
                radius_metres: self.radius_metres,
            });
        }
        if self.min_points == 0 {
            return Err(ClusterError::ZeroMinPoints);
        }
        Ok(())
    }
}

/// A point to cluster: identifier plus WGS84 location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterPoint {
    /// Identifier carried through to the assignment.
    pub id: u64,
    /// Location with `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
}

impl ClusterPoint {
    /// Construct a point from longitude and latitude.
    #[must_use]
    pub const fn new(id: u64, lon: f64, lat: f64) -> Self {
        Self {
            id,
            location: Coord { x: lon, y: lat },
        }
    }

    /// Check the coordinate is finite and within WGS84 bounds.
    ///
    /// # Errors
    /// Returns [`ClusterError::InvalidCoordinate`] otherwise.
    pub fn validate(&self) -> Result<(), ClusterError> {
        let Coord { x: lon, y: lat } = self.location;
        let valid = lon.is_finite()
            && lat.is_finite()
            && (-180.0..=180.0).contains(&lon)
            && (-90.0..=90.0).contains(&lat);
        if valid {
            Ok(())
        } else {
            Err(ClusterError::InvalidCoordinate { id: self.id, lon, lat })
        }
    }
}

/// Cluster membership of one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClusterId {
    /// Not part of any dense region.
    Noise,
    /// Member of the numbered cluster. Numbers start at 1.
    Cluster(u32),
}

impl ClusterId {
    /// Conventional integer label: `-1` for noise, the cluster number
    /// otherwise.
    #[must_use]
    pub fn as_label(self) -> i64 {
        match self {
            Self::Noise => -1,
            Self::Cluster(number) => i64::from(number),
        }
    }

    /// Report whether this is the noise marker.
    #[must_use]
    pub const fn is_noise(self) -> bool {
        matches!(self, Self::Noise)
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noise => f.write_str("noise"),
            Self::Cluster(number) => write!(f, "cluster {number}"),
        }
    }
}

/// Per-point cluster membership in input order.
///
/// Cluster numbers are normalised on construction: clusters are numbered
/// from 1 in order of first appearance, so equal partitions over the same
/// input order always carry the same numbers.
///
/// # Examples
/// ```
/// use landuse_core::{ClusterAssignment, ClusterId};
///
/// let assignment = ClusterAssignment::new(vec![
///     (10, ClusterId::Cluster(7)),
///     (11, ClusterId::Noise),
///     (12, ClusterId::Cluster(7)),
/// ]);
/// assert_eq!(assignment.get(12), Some(ClusterId::Cluster(1)));
/// assert_eq!(assignment.cluster_count(), 1);
/// assert_eq!(assignment.noise_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterAssignment {
    entries: Vec<(u64, ClusterId)>,
}

impl ClusterAssignment {
    /// Build an assignment, renumbering clusters by first appearance.
    #[must_use]
    pub fn new(entries: Vec<(u64, ClusterId)>) -> Self {
        let mut renumbered: HashMap<u32, u32> = HashMap::new();
        let renumbered_entries = entries
            .into_iter()
            .map(|(id, cluster)| match cluster {
                ClusterId::Noise => (id, ClusterId::Noise),
                ClusterId::Cluster(raw) => {
                    let next = u32::try_from(renumbered.len())
                        .map_or(u32::MAX, |count| count.saturating_add(1));
                    let number = *renumbered.entry(raw).or_insert(next);
                    (id, ClusterId::Cluster(number))
                }
            })
            .collect();
        Self {
            entries: renumbered_entries,
        }
    }

    /// Cluster of point `id`, if it was part of the input.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<ClusterId> {
        self.entries
            .iter()
            .find(|(point, _)| *point == id)
            .map(|(_, cluster)| *cluster)
    }

    /// Iterate `(point id, cluster)` in input order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, ClusterId)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of points assigned.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the assignment is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct clusters, noise excluded.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|(_, cluster)| match cluster {
                ClusterId::Noise => None,
                ClusterId::Cluster(number) => Some(*number),
            })
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of noise points.
    #[must_use]
    pub fn noise_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, cluster)| cluster.is_noise())
            .count()
    }

    /// Membership as a label-free partition: the set of clusters, each a
    /// set of point ids, plus the set of noise ids.
    ///
    /// Two assignments describe the same clustering exactly when their
    /// partitions are equal, whatever numbers they use.
    #[must_use]
    pub fn partition(&self) -> (BTreeSet<BTreeSet<u64>>, BTreeSet<u64>) {
        let mut clusters: HashMap<u32, BTreeSet<u64>> = HashMap::new();
        let mut noise = BTreeSet::new();
        for (id, cluster) in &self.entries {
            match cluster {
                ClusterId::Noise => {
                    noise.insert(*id);
                }
                ClusterId::Cluster(number) => {
                    clusters.entry(*number).or_default().insert(*id);
                }
            }
        }
        (clusters.into_values().collect(), noise)
    }
}

/// Validate clustering input.
///
/// # Errors
/// Returns the first parameter, coordinate or duplicate-id problem found.
pub fn validate_input(points: &[ClusterPoint], params: &ClusterParams) -> Result<(), ClusterError> {
    params.validate()?;
    let mut seen = HashSet::with_capacity(points.len());
    for point in points {
        point.validate()?;
        if !seen.insert(point.id) {
            return Err(ClusterError::DuplicatePoint { id: point.id });
        }
    }
    Ok(())
}

/// Partition points into density clusters and noise.
///
/// Implementations must be pure functions of the whole input: the same
/// points and parameters always yield the same partition, whatever their
/// order. Thread-safety (`Send + Sync`) lets a clusterer be shared across
/// pipeline runs.
///
/// # Examples
///
/// ```rust
/// use landuse_core::{ClusterAssignment, ClusterId, ClusterParams, ClusterPoint, Clusterer};
///
/// struct EverythingIsNoise;
///
/// impl Clusterer for EverythingIsNoise {
///     fn partition(&self, points: &[ClusterPoint], _params: &ClusterParams) -> ClusterAssignment {
///         ClusterAssignment::new(points.iter().map(|p| (p.id, ClusterId::Noise)).collect())
///     }
/// }
///
/// let points = [ClusterPoint::new(1, 77.2, 28.6)];
/// let assignment = EverythingIsNoise
///     .cluster(&points, &ClusterParams::default())
///     .expect("valid input");
/// assert_eq!(assignment.noise_count(), 1);
/// ```
pub trait Clusterer: Send + Sync {
    /// Partition already validated input.
    fn partition(&self, points: &[ClusterPoint], params: &ClusterParams) -> ClusterAssignment;

    /// Validate the input and partition it.
    ///
    /// # Errors
    /// Returns [`ClusterError`] when [`validate_input`] rejects the input.
    fn cluster(
        &self,
        points: &[ClusterPoint],
        params: &ClusterParams,
    ) -> Result<ClusterAssignment, ClusterError> {
        validate_input(points, params)?;
        Ok(self.partition(points, params))
    }
}
