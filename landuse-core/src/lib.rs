//! Land-use classification and commercial clustering for tagged points.
//!
//! Responsibilities:
//! - Hold the rule tables mapping OpenStreetMap-style attribute values to
//!   land-use labels and activity categories ([`Taxonomy`]).
//! - Classify a point's tags into a [`LandUse`] with the attribute pairs that
//!   caused it, and derive its [`ActivityCategory`] ([`TagClassifier`]).
//! - Define the [`Clusterer`] contract and rank clustered points by the size
//!   of their cluster ([`rank`]).
//! - Chain both stages over a batch of points ([`Pipeline`]).
//!
//! Boundaries:
//! - No I/O beyond decoding caller-supplied readers.
//! - The density clustering algorithm lives in `landuse-cluster`.
//!
//! Invariants:
//! - Every operation is a pure function of its inputs; the shipped taxonomy
//!   is immutable once built.
//! - No global mutable state.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use landuse_core::{ActivityCategory, Pipeline, TaggedPoint, Tags, Taxonomy};
//!
//! let taxonomy = Taxonomy::osm_default();
//! let point = TaggedPoint::new(
//!     7,
//!     Coord { x: 77.21, y: 28.63 },
//!     Tags::from([("amenity".into(), "restaurant".into())]),
//! );
//! let report = Pipeline::new(&taxonomy).classify([&point]);
//! assert_eq!(report.rows[0].category, Some(ActivityCategory::Commercial));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod classify;
mod cluster;
mod label;
mod pipeline;
mod point;
mod rank;
mod taxonomy;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use classify::{
    Candidates, Classification, INFERRED_ATTRIBUTE, TagClassifier, TriggeringPairs, aggregate,
    categorize,
};
pub use cluster::{
    ClusterAssignment, ClusterError, ClusterId, ClusterParams, ClusterPoint, Clusterer,
    DEFAULT_MIN_POINTS, DEFAULT_RADIUS_METRES, EARTH_MEAN_RADIUS_METRES, validate_input,
};
pub use label::{ActivityCategory, LandUse, ParseLabelError, RuleLabel};
pub use pipeline::{
    ClassificationReport, ClassifiedRow, ClusteredRow, CommercialClusters, Pipeline,
    PipelineOutput, PopulationRow, cluster_commercial, cluster_commercial_rows,
};
pub use point::{PRIMARY_ATTRIBUTE, TaggedPoint, Tags};
pub use rank::{ClusterSummary, RankedPoint, rank, summarise};
#[cfg(feature = "serde")]
pub use taxonomy::{ActivityDocument, RuleDocument, TaxonomyDocument};
pub use taxonomy::{Taxonomy, TaxonomyBuilder, TaxonomyError, TaxonomyRule};
