//! Tagged points of interest as handed over by the ingestion layer.

use std::collections::HashMap;

use geo::Coord;

/// Free-form attribute map attached to a point.
///
/// Keys and values mirror OpenStreetMap's tag structure. Lookups have
/// get-or-absent semantics; a missing key is never an error.
pub type Tags = HashMap<String, String>;

/// Attribute whose value is carried into tabular outputs as the
/// "primary" descriptor of a point.
pub const PRIMARY_ATTRIBUTE: &str = "amenity";

/// A real-world point of interest with its raw tags.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Callers
/// own coordinate validation; the classification stage never inspects the
/// location.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use landuse_core::{TaggedPoint, Tags};
///
/// let point = TaggedPoint::new(
///     7,
///     Coord { x: 77.21, y: 28.61 },
///     Tags::from([("amenity".into(), "restaurant".into())]),
/// );
///
/// assert_eq!(point.tag("amenity"), Some("restaurant"));
/// assert_eq!(point.primary_value(), Some("restaurant"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaggedPoint {
    /// Stable identifier from the source dataset.
    pub id: u64,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Source tags.
    pub tags: Tags,
}

impl TaggedPoint {
    /// Construct a `TaggedPoint` with the provided tags.
    #[must_use]
    pub const fn new(id: u64, location: Coord<f64>, tags: Tags) -> Self {
        Self { id, location, tags }
    }

    /// Construct a `TaggedPoint` without tags.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use landuse_core::TaggedPoint;
    ///
    /// let point = TaggedPoint::with_empty_tags(1, Coord { x: 0.0, y: 0.0 });
    /// assert!(point.tags.is_empty());
    /// ```
    #[must_use]
    pub fn with_empty_tags(id: u64, location: Coord<f64>) -> Self {
        Self::new(id, location, Tags::new())
    }

    /// Return the value stored under `key`, if any.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Return the value of [`PRIMARY_ATTRIBUTE`], if present.
    #[must_use]
    pub fn primary_value(&self) -> Option<&str> {
        self.tag(PRIMARY_ATTRIBUTE)
    }
}
