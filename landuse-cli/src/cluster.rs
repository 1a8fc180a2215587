//! `cluster` command: population index ranking of classified rows.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use landuse_cluster::DbscanClusterer;
use landuse_core::{ClassifiedRow, ClusterParams, CommercialClusters, cluster_commercial_rows};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::require_file;
use crate::records::{load_rows, write_json};
use crate::{
    ARG_CLUSTERED_OUTPUT, ARG_MIN_POINTS, ARG_OUTPUT, ARG_RADIUS_METRES, ARG_ROWS, CliError,
    ENV_CLUSTER_ROWS,
};

/// CLI arguments for the `cluster` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Cluster the commercial rows written by `classify` with \
                 haversine DBSCAN and rank each clustered point by the size \
                 of its cluster. Noise points are dropped from the ranking \
                 and kept as -1 in --clustered-output.",
    about = "Cluster commercial rows and compute population indices"
)]
#[ortho_config(prefix = "LANDUSE")]
pub(crate) struct ClusterArgs {
    /// Path to the classified rows.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) rows: Option<Utf8PathBuf>,
    /// Neighbourhood radius in metres (default 300).
    #[arg(long = ARG_RADIUS_METRES, value_name = "metres")]
    #[serde(default)]
    pub(crate) radius_metres: Option<f64>,
    /// Points, including the centre, needed for a dense neighbourhood
    /// (default 5).
    #[arg(long = ARG_MIN_POINTS, value_name = "count")]
    #[serde(default)]
    pub(crate) min_points: Option<usize>,
    /// Also write every commercial point with its cluster label to this
    /// path.
    #[arg(long = ARG_CLUSTERED_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) clustered_output: Option<Utf8PathBuf>,
    /// Where to write the population rows; stdout when omitted.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ClusterArgs {
    pub(crate) fn into_config(self) -> Result<ClusterConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ClusterConfig::try_from(merged)
    }
}

/// Resolved `cluster` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClusterConfig {
    pub(crate) rows: Utf8PathBuf,
    pub(crate) params: ClusterParams,
    pub(crate) clustered_output: Option<Utf8PathBuf>,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<ClusterArgs> for ClusterConfig {
    type Error = CliError;

    fn try_from(args: ClusterArgs) -> Result<Self, Self::Error> {
        let rows = args.rows.ok_or(CliError::MissingArgument {
            field: ARG_ROWS,
            env: ENV_CLUSTER_ROWS,
        })?;
        let params = resolve_params(args.radius_metres, args.min_points)?;
        Ok(Self {
            rows,
            params,
            clustered_output: args.clustered_output,
            output: args.output,
        })
    }
}

/// Fill unset clustering options with defaults and validate the result.
pub(crate) fn resolve_params(
    radius_metres: Option<f64>,
    min_points: Option<usize>,
) -> Result<ClusterParams, CliError> {
    let defaults = ClusterParams::default();
    let params = ClusterParams::new(
        radius_metres.unwrap_or(defaults.radius_metres),
        min_points.unwrap_or(defaults.min_points),
    );
    params
        .validate()
        .map_err(|source| CliError::InvalidParameters { source })?;
    Ok(params)
}

pub(crate) fn run_cluster_with(args: ClusterArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_file(&config.rows, ARG_ROWS)?;
    let rows = load_rows(&config.rows)?;
    let clusters = rank_rows(&rows, &config.params)?;
    write_clusters(
        &clusters,
        config.clustered_output.as_deref(),
        config.output.as_deref(),
        writer,
    )
}

/// Cluster the commercial subset of `rows` with haversine DBSCAN.
pub(crate) fn rank_rows(
    rows: &[ClassifiedRow],
    params: &ClusterParams,
) -> Result<CommercialClusters, CliError> {
    let clusters = cluster_commercial_rows(rows, &DbscanClusterer::new(), params)
        .map_err(|source| CliError::Cluster { source })?;
    info!(
        "ranked {} of {} commercial points (radius {} m, min points {})",
        clusters.population.len(),
        clusters.clustered.len(),
        params.radius_metres,
        params.min_points
    );
    Ok(clusters)
}

/// Write the optional per-point labels, then the population rows.
pub(crate) fn write_clusters(
    clusters: &CommercialClusters,
    clustered_output: Option<&Utf8Path>,
    output: Option<&Utf8Path>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    if let Some(path) = clustered_output {
        write_json(&clusters.clustered, Some(path), writer)?;
    }
    write_json(&clusters.population, output, writer)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ClusterConfig, CliError> {
    let merged = ClusterArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ClusterConfig::try_from(merged)
}
