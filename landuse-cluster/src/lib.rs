//! Haversine DBSCAN for commercial point clustering.
//!
//! [`DbscanClusterer`] implements [`landuse_core::Clusterer`]. Neighbourhoods
//! come from a [`NeighbourSearch`]: [`RTreeNeighbours`] prefilters candidates
//! with an R\*-tree window query, while [`ExhaustiveNeighbours`] compares
//! every pair and serves as a reference for small inputs.
//!
//! # Examples
//!
//! ```
//! use landuse_cluster::DbscanClusterer;
//! use landuse_core::{ClusterParams, ClusterPoint, Clusterer};
//!
//! # fn main() -> Result<(), landuse_core::ClusterError> {
//! let points = [ClusterPoint::new(1, 77.21, 28.63)];
//! let assignment = DbscanClusterer::new().cluster(&points, &ClusterParams::default())?;
//! assert_eq!(assignment.noise_count(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod dbscan;
mod neighbours;

pub use dbscan::DbscanClusterer;
pub use neighbours::{
    ExhaustiveNeighbours, Neighbour, NeighbourSearch, RTreeNeighbours, haversine_metres,
};
