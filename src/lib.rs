//! Facade crate for the land-use engine.
//!
//! This crate re-exports the core classification and ranking types and
//! exposes the haversine DBSCAN clusterer behind a feature flag.

#![forbid(unsafe_code)]

pub use landuse_core::{
    ActivityCategory, ClassificationReport, ClassifiedRow, ClusterAssignment, ClusterError,
    ClusterId, ClusterParams, ClusterPoint, ClusteredRow, Clusterer, CommercialClusters,
    LandUse, Pipeline, PipelineOutput, PopulationRow, RankedPoint, RuleLabel, TagClassifier,
    TaggedPoint, Tags, Taxonomy, TaxonomyError, TriggeringPairs, cluster_commercial,
    cluster_commercial_rows, rank,
};

#[cfg(feature = "serde")]
pub use landuse_core::TaxonomyDocument;

#[cfg(feature = "test-support")]
pub use landuse_core::test_support;

#[cfg(feature = "cluster-dbscan")]
pub use landuse_cluster::{DbscanClusterer, ExhaustiveNeighbours, NeighbourSearch, RTreeNeighbours};
