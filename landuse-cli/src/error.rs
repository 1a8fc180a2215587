//! Error types emitted by the land-use CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use landuse_core::{ClusterError, TaxonomyError};
use thiserror::Error;

/// Errors emitted by the land-use CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument that named the path.
        field: &'static str,
        /// Path supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument that named the path.
        field: &'static str,
        /// Path supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument that named the path.
        field: &'static str,
        /// Path supplied.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening an input file failed.
    #[error("failed to open {path:?}: {source}")]
    OpenInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An input file held malformed JSON.
    #[error("failed to parse JSON at {path:?}: {source}")]
    ParseInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A taxonomy document failed to load or validate.
    #[error("failed to load taxonomy from {path:?}: {source}")]
    LoadTaxonomy {
        /// Taxonomy document path.
        path: Utf8PathBuf,
        /// Decoding or validation error.
        #[source]
        source: TaxonomyError,
    },
    /// Clustering parameters were rejected.
    #[error("invalid clustering parameters: {source}")]
    InvalidParameters {
        /// Validation error.
        #[source]
        source: ClusterError,
    },
    /// Clustering rejected the classified rows.
    #[error("clustering failed: {source}")]
    Cluster {
        /// Clustering error.
        #[source]
        source: ClusterError,
    },
    /// Creating an output file failed.
    #[error("failed to create output {path:?}: {source}")]
    CreateOutput {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
