//! `classify` command: tag classification of a point file.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use landuse_core::{ClassificationReport, Pipeline};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::require_file;
use crate::records::{load_points, load_taxonomy, write_json};
use crate::{ARG_OUTPUT, ARG_POINTS, ARG_TAXONOMY, CliError, ENV_CLASSIFY_POINTS};

/// CLI arguments for the `classify` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Classify a JSON array of {id, lon, lat, tags} points into \
                 activity, residential and mixed land-use rows. Points \
                 needing inference or carrying no useful label are dropped.",
    about = "Classify tagged points by land use"
)]
#[ortho_config(prefix = "LANDUSE")]
pub(crate) struct ClassifyArgs {
    /// Path to the JSON point file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) points: Option<Utf8PathBuf>,
    /// Path to a JSON taxonomy document replacing the shipped tables.
    #[arg(long = ARG_TAXONOMY, value_name = "path")]
    #[serde(default)]
    pub(crate) taxonomy: Option<Utf8PathBuf>,
    /// Where to write the classified rows; stdout when omitted.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ClassifyArgs {
    pub(crate) fn into_config(self) -> Result<ClassifyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ClassifyConfig::try_from(merged)
    }
}

/// Resolved `classify` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassifyConfig {
    pub(crate) points: Utf8PathBuf,
    pub(crate) taxonomy: Option<Utf8PathBuf>,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ClassifyConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_file(&self.points, ARG_POINTS)?;
        if let Some(taxonomy) = &self.taxonomy {
            require_file(taxonomy, ARG_TAXONOMY)?;
        }
        Ok(())
    }
}

impl TryFrom<ClassifyArgs> for ClassifyConfig {
    type Error = CliError;

    fn try_from(args: ClassifyArgs) -> Result<Self, Self::Error> {
        let points = args.points.ok_or(CliError::MissingArgument {
            field: ARG_POINTS,
            env: ENV_CLASSIFY_POINTS,
        })?;
        Ok(Self {
            points,
            taxonomy: args.taxonomy,
            output: args.output,
        })
    }
}

pub(crate) fn run_classify_with(args: ClassifyArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let report = classify_file(&config.points, config.taxonomy.as_deref())?;
    write_json(&report.rows, config.output.as_deref(), writer)
}

/// Classify the points stored at `points`.
pub(crate) fn classify_file(
    points: &Utf8Path,
    taxonomy_path: Option<&Utf8Path>,
) -> Result<ClassificationReport, CliError> {
    let taxonomy = load_taxonomy(taxonomy_path)?;
    let loaded = load_points(points)?;
    let report = Pipeline::new(&taxonomy).classify(&loaded);
    info!(
        "classified {} of {} points ({} commercial, {} deferred, {} unclassified)",
        report.rows.len(),
        loaded.len(),
        report.commercial().count(),
        report.deferred,
        report.unclassified
    );
    Ok(report)
}
