//! Two-stage classification and clustering pipeline.
//!
//! Stage one classifies tagged points and keeps the activity, residential
//! and mixed ones as [`ClassifiedRow`]s. Stage two clusters the commercial
//! rows, labels each one in a [`ClusteredRow`] and ranks the clustered
//! ones into [`PopulationRow`]s.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::{
    ActivityCategory, ClusterError, ClusterParams, ClusterPoint, Clusterer, LandUse, TagClassifier,
    TaggedPoint, Taxonomy, TriggeringPairs, rank,
};

/// A classified point ready for storage or visualisation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifiedRow {
    /// Identifier of the source point.
    pub id: u64,
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
    /// Value of the point's primary attribute, if tagged.
    pub primary_value: Option<String>,
    /// Aggregated land-use label.
    pub land_use: LandUse,
    /// Attribute pairs that produced the label.
    pub pairs: TriggeringPairs,
    /// First activity category, or `None` when uncategorised.
    pub category: Option<ActivityCategory>,
}

impl ClassifiedRow {
    /// Report whether the row is commercially classified.
    #[must_use]
    pub fn is_commercial(&self) -> bool {
        self.category == Some(ActivityCategory::Commercial)
    }
}

/// A commercial, clustered point with its population index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationRow {
    /// Identifier of the source point.
    pub id: u64,
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
    /// Value of the point's primary attribute, if tagged.
    pub primary_value: Option<String>,
    /// Member count of the point's cluster.
    pub population_index: usize,
}

/// A commercial point with its cluster label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusteredRow {
    /// Identifier of the source point.
    pub id: u64,
    /// Longitude.
    pub x: f64,
    /// Latitude.
    pub y: f64,
    /// Value of the point's primary attribute, if tagged.
    pub primary_value: Option<String>,
    /// Cluster number, or `-1` for noise.
    pub cluster: i64,
}

/// Clustering stage output for the commercial subset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommercialClusters {
    /// Every commercial point with its label, in input order.
    pub clustered: Vec<ClusteredRow>,
    /// Clustered points sorted by descending population index.
    pub population: Vec<PopulationRow>,
}

/// Outcome of the classification stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationReport {
    /// Points kept for downstream use, in input order.
    pub rows: Vec<ClassifiedRow>,
    /// Points dropped because they were labelled `infer`.
    pub deferred: usize,
    /// Points dropped because no useful label applied.
    pub unclassified: usize,
}

impl ClassificationReport {
    /// Rows whose category is commercial.
    pub fn commercial(&self) -> impl Iterator<Item = &ClassifiedRow> + '_ {
        self.rows.iter().filter(|row| row.is_commercial())
    }
}

/// Output of a full pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    /// Classification stage output.
    pub classification: ClassificationReport,
    /// Clustering stage output, sorted by descending population index.
    pub population: Vec<PopulationRow>,
}

/// Runs both stages against a shared taxonomy.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use landuse_core::{LandUse, Pipeline, TaggedPoint, Tags, Taxonomy};
///
/// let taxonomy = Taxonomy::osm_default();
/// let points = vec![
///     TaggedPoint::new(1, Coord { x: 0.0, y: 0.0 }, Tags::from([("shop".into(), "bakery".into())])),
///     TaggedPoint::new(2, Coord { x: 0.0, y: 0.0 }, Tags::from([("building".into(), "yes".into())])),
/// ];
/// let report = Pipeline::new(&taxonomy).classify(&points);
/// assert_eq!(report.rows.len(), 1);
/// assert_eq!(report.rows[0].land_use, LandUse::Activity);
/// assert_eq!(report.deferred, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Pipeline<'a> {
    classifier: TagClassifier<'a>,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline backed by `taxonomy`.
    #[must_use]
    pub const fn new(taxonomy: &'a Taxonomy) -> Self {
        Self {
            classifier: TagClassifier::new(taxonomy),
        }
    }

    /// Classify points, dropping `infer` and unclassified ones.
    #[must_use]
    pub fn classify<'p, I>(&self, points: I) -> ClassificationReport
    where
        I: IntoIterator<Item = &'p TaggedPoint>,
    {
        let mut report = ClassificationReport::default();
        for point in points {
            let classification = self.classifier.classify_tags(&point.tags);
            match classification.land_use {
                LandUse::Infer => report.deferred += 1,
                LandUse::Unclassified => report.unclassified += 1,
                LandUse::Activity | LandUse::Residential | LandUse::Mixed => {
                    let category = classification.primary_category();
                    report.rows.push(ClassifiedRow {
                        id: point.id,
                        x: point.location.x,
                        y: point.location.y,
                        primary_value: point.primary_value().map(str::to_owned),
                        land_use: classification.land_use,
                        pairs: classification.pairs,
                        category,
                    });
                }
            }
        }
        debug!(
            "classified {} points, dropped {} deferred and {} unclassified",
            report.rows.len(),
            report.deferred,
            report.unclassified
        );
        report
    }

    /// Classify, then cluster and rank the commercial subset.
    ///
    /// # Errors
    /// Propagates [`ClusterError`] from [`cluster_commercial`].
    pub fn run<'p, I>(
        &self,
        points: I,
        clusterer: &dyn Clusterer,
        params: &ClusterParams,
    ) -> Result<PipelineOutput, ClusterError>
    where
        I: IntoIterator<Item = &'p TaggedPoint>,
    {
        let classification = self.classify(points);
        let population = cluster_commercial(&classification.rows, clusterer, params)?;
        Ok(PipelineOutput {
            classification,
            population,
        })
    }
}

/// Cluster the commercial rows and attach population indices.
///
/// Non-commercial and uncategorised rows are ignored; noise points are
/// dropped from the output. Rows are sorted by descending population index
/// with ties in cluster first-appearance order.
///
/// # Errors
/// Returns [`ClusterError`] when the clustering input is rejected, for
/// example for invalid parameters, out-of-range coordinates or repeated ids.
pub fn cluster_commercial(
    rows: &[ClassifiedRow],
    clusterer: &dyn Clusterer,
    params: &ClusterParams,
) -> Result<Vec<PopulationRow>, ClusterError> {
    cluster_commercial_rows(rows, clusterer, params).map(|clusters| clusters.population)
}

/// Cluster the commercial rows, keeping both the per-point labels and the
/// ranked population rows.
///
/// # Errors
/// Returns [`ClusterError`] under the same conditions as
/// [`cluster_commercial`].
pub fn cluster_commercial_rows(
    rows: &[ClassifiedRow],
    clusterer: &dyn Clusterer,
    params: &ClusterParams,
) -> Result<CommercialClusters, ClusterError> {
    let commercial: Vec<&ClassifiedRow> = rows.iter().filter(|row| row.is_commercial()).collect();
    if commercial.is_empty() {
        warn!("no commercial points to cluster");
    }
    let points: Vec<ClusterPoint> = commercial
        .iter()
        .map(|row| ClusterPoint::new(row.id, row.x, row.y))
        .collect();
    let assignment = clusterer.cluster(&points, params)?;
    info!(
        "clustered {} commercial points into {} clusters ({} noise)",
        assignment.len(),
        assignment.cluster_count(),
        assignment.noise_count()
    );

    let by_id: HashMap<u64, &ClassifiedRow> = commercial.iter().map(|row| (row.id, *row)).collect();
    let clustered = assignment
        .iter()
        .filter_map(|(id, cluster)| {
            by_id.get(&id).map(|row| ClusteredRow {
                id: row.id,
                x: row.x,
                y: row.y,
                primary_value: row.primary_value.clone(),
                cluster: cluster.as_label(),
            })
        })
        .collect();
    let population = rank(&assignment)
        .into_iter()
        .filter_map(|ranked| {
            by_id.get(&ranked.point_id).map(|row| PopulationRow {
                id: row.id,
                x: row.x,
                y: row.y,
                primary_value: row.primary_value.clone(),
                population_index: ranked.population_index,
            })
        })
        .collect();
    Ok(CommercialClusters {
        clustered,
        population,
    })
}
