//! Command-line interface for land-use classification and commercial
//! clustering.
//!
//! Three subcommands share one configuration scheme: `classify` turns a
//! tagged point file into land-use rows, `cluster` ranks the commercial rows
//! by cluster size, and `analyse` does both in one run. Options can come
//! from CLI flags, `LANDUSE_*` environment variables or configuration files.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod analyse;
mod classify;
mod cluster;
mod error;
mod fs;
mod records;

pub use error::CliError;

use analyse::{AnalyseArgs, run_analyse_with};
use classify::{ClassifyArgs, run_classify_with};
use cluster::{ClusterArgs, run_cluster_with};

const ARG_POINTS: &str = "points";
const ARG_ROWS: &str = "rows";
const ARG_TAXONOMY: &str = "taxonomy";
const ARG_OUTPUT: &str = "output";
const ARG_CLASSIFIED_OUTPUT: &str = "classified-output";
const ARG_CLUSTERED_OUTPUT: &str = "clustered-output";
const ARG_RADIUS_METRES: &str = "radius-metres";
const ARG_MIN_POINTS: &str = "min-points";
const ENV_CLASSIFY_POINTS: &str = "LANDUSE_CMDS_CLASSIFY_POINTS";
const ENV_CLUSTER_ROWS: &str = "LANDUSE_CMDS_CLUSTER_ROWS";
const ENV_ANALYSE_POINTS: &str = "LANDUSE_CMDS_ANALYSE_POINTS";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, an
/// input cannot be read, clustering rejects its input, or output cannot be
/// written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Classify(args) => run_classify_with(args, &mut stdout),
        Command::Cluster(args) => run_cluster_with(args, &mut stdout),
        Command::Analyse(args) => run_analyse_with(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "landuse",
    about = "Classify tagged points by land use and rank commercial clusters",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify tagged points into land-use rows.
    Classify(ClassifyArgs),
    /// Cluster classified commercial rows and compute population indices.
    Cluster(ClusterArgs),
    /// Classify and cluster in one run.
    Analyse(AnalyseArgs),
}

#[cfg(test)]
mod tests;
