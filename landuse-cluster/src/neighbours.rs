//! Fixed-radius neighbour search on the sphere.
//!
//! Both searches return, for every input point, the points whose haversine
//! distance is within the radius, the point itself included.

use geo::{Coord, Distance, HaversineMeasure, Point};
use landuse_core::{ClusterPoint, EARTH_MEAN_RADIUS_METRES};
use rstar::{AABB, RTree, RTreeObject};

/// Slack, in degrees, added to every prefilter window.
const ENVELOPE_SLACK_DEGREES: f64 = 1e-9;

/// One point inside another point's neighbourhood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    /// Position of the neighbour in the input slice.
    pub index: usize,
    /// Great-circle distance in metres.
    pub distance_metres: f64,
}

/// Strategy for finding every point within a radius of every other point.
pub trait NeighbourSearch: Send + Sync {
    /// Return one neighbourhood per input point, in input order.
    ///
    /// Each neighbourhood includes the point itself at distance zero and
    /// every other point at most `radius_metres` away.
    fn neighbourhoods(&self, points: &[ClusterPoint], radius_metres: f64) -> Vec<Vec<Neighbour>>;
}

/// Haversine distance in metres on a sphere of
/// [`EARTH_MEAN_RADIUS_METRES`].
#[must_use]
pub fn haversine_metres(a: Coord<f64>, b: Coord<f64>) -> f64 {
    HaversineMeasure::new(EARTH_MEAN_RADIUS_METRES).distance(Point::from(a), Point::from(b))
}

/// Brute-force search comparing every pair of points.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveNeighbours;

impl NeighbourSearch for ExhaustiveNeighbours {
    fn neighbourhoods(&self, points: &[ClusterPoint], radius_metres: f64) -> Vec<Vec<Neighbour>> {
        points
            .iter()
            .map(|centre| {
                points
                    .iter()
                    .enumerate()
                    .filter_map(|(index, other)| {
                        within(centre.location, other.location, radius_metres).map(
                            |distance_metres| Neighbour {
                                index,
                                distance_metres,
                            },
                        )
                    })
                    .collect()
            })
            .collect()
    }
}

/// R\*-tree backed search.
///
/// Candidates come from a longitude/latitude window that bounds the
/// spherical cap around each point; each is then confirmed with the
/// haversine distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct RTreeNeighbours;

#[derive(Debug, Clone, Copy)]
struct IndexedPoint {
    index: usize,
    location: Coord<f64>,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.location.x, self.location.y])
    }
}

impl NeighbourSearch for RTreeNeighbours {
    fn neighbourhoods(&self, points: &[ClusterPoint], radius_metres: f64) -> Vec<Vec<Neighbour>> {
        let tree = RTree::bulk_load(
            points
                .iter()
                .enumerate()
                .map(|(index, point)| IndexedPoint {
                    index,
                    location: point.location,
                })
                .collect(),
        );
        points
            .iter()
            .map(|centre| {
                let window = search_window(centre.location, radius_metres);
                let mut found: Vec<Neighbour> = tree
                    .locate_in_envelope(&window)
                    .filter_map(|candidate| {
                        within(centre.location, candidate.location, radius_metres).map(
                            |distance_metres| Neighbour {
                                index: candidate.index,
                                distance_metres,
                            },
                        )
                    })
                    .collect();
                found.sort_by_key(|neighbour| neighbour.index);
                found
            })
            .collect()
    }
}

fn within(a: Coord<f64>, b: Coord<f64>, radius_metres: f64) -> Option<f64> {
    let distance = haversine_metres(a, b);
    (distance <= radius_metres).then_some(distance)
}

/// Degree window containing every point within `radius_metres` of `centre`.
///
/// The longitude half-width is `asin(sin r / cos lat)` for an angular radius
/// `r`. Windows touching a pole or crossing the antimeridian widen to the
/// full longitude range.
#[expect(
    clippy::float_arithmetic,
    reason = "window bounds are derived from spherical trigonometry"
)]
fn search_window(centre: Coord<f64>, radius_metres: f64) -> AABB<[f64; 2]> {
    let angular = radius_metres / EARTH_MEAN_RADIUS_METRES;
    let half_height = angular.to_degrees() + ENVELOPE_SLACK_DEGREES;
    let min_lat = (centre.y - half_height).max(-90.0);
    let max_lat = (centre.y + half_height).min(90.0);

    let full_band = AABB::from_corners([-180.0, min_lat], [180.0, max_lat]);
    let ratio = angular.sin() / centre.y.to_radians().cos();
    if !ratio.is_finite() || ratio >= 1.0 || angular >= std::f64::consts::FRAC_PI_2 {
        return full_band;
    }
    let half_width = ratio.asin().to_degrees() + ENVELOPE_SLACK_DEGREES;
    let min_lon = centre.x - half_width;
    let max_lon = centre.x + half_width;
    if min_lon < -180.0 || max_lon > 180.0 {
        return full_band;
    }
    AABB::from_corners([min_lon, min_lat], [max_lon, max_lat])
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "Tests compare computed distances against tolerances"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn indices(neighbourhood: &[Neighbour]) -> Vec<usize> {
        neighbourhood.iter().map(|n| n.index).collect()
    }

    #[rstest]
    fn one_degree_of_latitude_is_about_111_km() {
        let distance = haversine_metres(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
        assert!((distance - 111_194.93).abs() < 1.0, "got {distance}");
    }

    #[rstest]
    fn neighbourhood_includes_the_point_itself() {
        let points = [ClusterPoint::new(1, 77.2, 28.6)];
        let found = RTreeNeighbours.neighbourhoods(&points, 300.0);
        assert_eq!(found.len(), 1);
        assert_eq!(indices(&found[0]), vec![0]);
    }

    #[rstest]
    #[case(RTreeNeighbours.neighbourhoods(&antimeridian_points(), 300.0))]
    #[case(ExhaustiveNeighbours.neighbourhoods(&antimeridian_points(), 300.0))]
    fn finds_neighbours_across_the_antimeridian(#[case] found: Vec<Vec<Neighbour>>) {
        assert_eq!(indices(&found[0]), vec![0, 1]);
        assert_eq!(indices(&found[1]), vec![0, 1]);
    }

    fn antimeridian_points() -> [ClusterPoint; 2] {
        [
            ClusterPoint::new(1, 179.9995, 0.0),
            ClusterPoint::new(2, -179.9995, 0.0),
        ]
    }

    #[rstest]
    fn finds_neighbours_near_the_pole() {
        let points = [
            ClusterPoint::new(1, 0.0, 89.9990),
            ClusterPoint::new(2, 180.0, 89.9990),
        ];
        let found = RTreeNeighbours.neighbourhoods(&points, 300.0);
        assert_eq!(indices(&found[0]), vec![0, 1]);
    }

    #[rstest]
    fn radius_is_inclusive() {
        let a = Coord { x: 10.0, y: 45.0 };
        let b = Coord { x: 10.001, y: 45.0 };
        let exact = haversine_metres(a, b);
        assert_eq!(within(a, b, exact), Some(exact));
        assert_eq!(within(a, b, exact * 0.999), None);
    }
}
