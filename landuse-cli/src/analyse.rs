//! `analyse` command: classification and clustering in one run.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::classify::classify_file;
use crate::cluster::{rank_rows, resolve_params, write_clusters};
use crate::fs::require_file;
use crate::records::write_json;
use crate::{
    ARG_CLASSIFIED_OUTPUT, ARG_CLUSTERED_OUTPUT, ARG_MIN_POINTS, ARG_OUTPUT, ARG_POINTS,
    ARG_RADIUS_METRES, ARG_TAXONOMY, CliError, ENV_ANALYSE_POINTS,
};
use landuse_core::ClusterParams;

/// CLI arguments for the `analyse` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Classify a point file, then cluster its commercial points \
                 and write the population rows. The intermediate classified \
                 rows can be kept with --classified-output and the per-point \
                 cluster labels with --clustered-output.",
    about = "Classify and cluster in one run"
)]
#[ortho_config(prefix = "LANDUSE")]
pub(crate) struct AnalyseArgs {
    /// Path to the JSON point file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) points: Option<Utf8PathBuf>,
    /// Path to a JSON taxonomy document replacing the shipped tables.
    #[arg(long = ARG_TAXONOMY, value_name = "path")]
    #[serde(default)]
    pub(crate) taxonomy: Option<Utf8PathBuf>,
    /// Neighbourhood radius in metres (default 300).
    #[arg(long = ARG_RADIUS_METRES, value_name = "metres")]
    #[serde(default)]
    pub(crate) radius_metres: Option<f64>,
    /// Points, including the centre, needed for a dense neighbourhood
    /// (default 5).
    #[arg(long = ARG_MIN_POINTS, value_name = "count")]
    #[serde(default)]
    pub(crate) min_points: Option<usize>,
    /// Also write the classified rows to this path.
    #[arg(long = ARG_CLASSIFIED_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) classified_output: Option<Utf8PathBuf>,
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

impl AnalyseArgs {
    pub(crate) fn into_config(self) -> Result<AnalyseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AnalyseConfig::try_from(merged)
    }
}

/// Resolved `analyse` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AnalyseConfig {
    pub(crate) points: Utf8PathBuf,
    pub(crate) taxonomy: Option<Utf8PathBuf>,
    pub(crate) params: ClusterParams,
    pub(crate) classified_output: Option<Utf8PathBuf>,
    pub(crate) clustered_output: Option<Utf8PathBuf>,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl AnalyseConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_file(&self.points, ARG_POINTS)?;
        if let Some(taxonomy) = &self.taxonomy {
            require_file(taxonomy, ARG_TAXONOMY)?;
        }
        Ok(())
    }
}

impl TryFrom<AnalyseArgs> for AnalyseConfig {
    type Error = CliError;

    fn try_from(args: AnalyseArgs) -> Result<Self, Self::Error> {
        let points = args.points.ok_or(CliError::MissingArgument {
            field: ARG_POINTS,
            env: ENV_ANALYSE_POINTS,
        })?;
        let params = resolve_params(args.radius_metres, args.min_points)?;
        Ok(Self {
            points,
            taxonomy: args.taxonomy,
            params,
            classified_output: args.classified_output,
            clustered_output: args.clustered_output,
            output: args.output,
        })
    }
}

pub(crate) fn run_analyse_with(args: AnalyseArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let report = classify_file(&config.points, config.taxonomy.as_deref())?;
    let clusters = rank_rows(&report.rows, &config.params)?;
    if let Some(path) = &config.classified_output {
        write_json(&report.rows, Some(path), writer)?;
    }
    write_clusters(
        &clusters,
        config.clustered_output.as_deref(),
        config.output.as_deref(),
        writer,
    )
}
