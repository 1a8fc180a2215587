//! Focused unit tests covering command configuration validation.

use super::helpers::Workspace;
use super::*;
use crate::analyse::AnalyseConfig;
use crate::classify::ClassifyConfig;
use crate::cluster::{ClusterConfig, config_from_layers_for_test};
use camino::Utf8PathBuf;
use landuse_core::{ClusterError, ClusterParams};
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;
use std::fs;

#[rstest]
fn classify_without_points_names_the_env_variable() {
    let err = ClassifyConfig::try_from(ClassifyArgs::default()).expect_err("points are required");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_POINTS);
            assert_eq!(env, ENV_CLASSIFY_POINTS);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn cluster_without_rows_names_the_env_variable() {
    let err = ClusterConfig::try_from(ClusterArgs::default()).expect_err("rows are required");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_ROWS);
            assert_eq!(env, ENV_CLUSTER_ROWS);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn analyse_without_points_names_the_env_variable() {
    let err = AnalyseConfig::try_from(AnalyseArgs::default()).expect_err("points are required");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_POINTS);
            assert_eq!(env, ENV_ANALYSE_POINTS);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn unset_cluster_options_fall_back_to_defaults() {
    let args = ClusterArgs {
        rows: Some(Utf8PathBuf::from("rows.json")),
        ..ClusterArgs::default()
    };
    let config = ClusterConfig::try_from(args).expect("defaults are valid");
    assert_eq!(config.params, ClusterParams::default());
    assert_eq!(config.output, None);
}

#[rstest]
#[case(Some(0.0), None)]
#[case(Some(-5.0), None)]
#[case(None, Some(0))]
fn invalid_cluster_options_are_rejected(
    #[case] radius_metres: Option<f64>,
    #[case] min_points: Option<usize>,
) {
    let args = ClusterArgs {
        rows: Some(Utf8PathBuf::from("rows.json")),
        radius_metres,
        min_points,
        clustered_output: None,
        output: None,
    };
    let err = ClusterConfig::try_from(args).expect_err("invalid parameters");
    match err {
        CliError::InvalidParameters { source } => assert!(matches!(
            source,
            ClusterError::InvalidRadius { .. } | ClusterError::ZeroMinPoints
        )),
        other => panic!("expected InvalidParameters, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_missing_files() {
    let workspace = Workspace::new();
    let config = ClassifyConfig {
        points: workspace.root().join("missing.json"),
        taxonomy: None,
        output: None,
    };
    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_POINTS),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let workspace = Workspace::new();
    let points = workspace.write_points();
    let taxonomy_dir = workspace.root().join("taxonomy");
    fs::create_dir(&taxonomy_dir).expect("create directory");
    let config = ClassifyConfig {
        points,
        taxonomy: Some(taxonomy_dir),
        output: None,
    };
    let err = config
        .validate_sources()
        .expect_err("expected directory rejection");
    match err {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_TAXONOMY),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "rows": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "rows": "from-file.json",
            "radius_metres": 150.0,
            "min_points": 3,
        }),
        None,
    );
    composer.push_environment(json!({
        "rows": "from-env.json",
        "radius_metres": 200.0,
    }));
    composer.push_cli(json!({ "radius_metres": 250.0 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.rows, Utf8PathBuf::from("from-env.json"));
    assert_eq!(config.params, ClusterParams::new(250.0, 3));
}
