//! JSON records read and written by the commands.

use std::io::{BufReader, Write};

use camino::Utf8Path;
use geo::Coord;
use landuse_core::{ClassifiedRow, ClusterError, ClusterPoint, TaggedPoint, Tags, Taxonomy};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::CliError;
use crate::fs::{create_output, open_input};

/// One input point as stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct PointRecord {
    pub(crate) id: u64,
    pub(crate) lon: f64,
    pub(crate) lat: f64,
    #[serde(default)]
    pub(crate) tags: Option<Map<String, Value>>,
}

impl PointRecord {
    /// Check the coordinates and keep the usable tags.
    ///
    /// Numbers and booleans become their JSON text; nulls, arrays and
    /// objects are dropped.
    fn into_point(self) -> Result<TaggedPoint, ClusterError> {
        ClusterPoint::new(self.id, self.lon, self.lat).validate()?;
        let id = self.id;
        let tags: Tags = self
            .tags
            .into_iter()
            .flatten()
            .filter_map(|(key, value)| tag_text(id, &key, value).map(|text| (key, text)))
            .collect();
        Ok(TaggedPoint::new(
            id,
            Coord {
                x: self.lon,
                y: self.lat,
            },
            tags,
        ))
    }
}

fn tag_text(id: u64, key: &str, value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            debug!("point {id}: dropping tag {key} without a scalar value");
            None
        }
    }
}

fn read_json<T>(path: &Utf8Path) -> Result<T, CliError>
where
    T: for<'de> Deserialize<'de>,
{
    let reader = BufReader::new(open_input(path)?);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON array of point records.
///
/// Elements that do not decode as a point, or whose coordinates fall
/// outside WGS84 bounds, are skipped with a warning; a file that is not a
/// JSON array is an error.
pub(crate) fn load_points(path: &Utf8Path) -> Result<Vec<TaggedPoint>, CliError> {
    let values: Vec<Value> = read_json(path)?;
    let total = values.len();
    let points: Vec<TaggedPoint> = values
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| {
            serde_json::from_value::<PointRecord>(value)
                .inspect_err(|err| warn!("skipping record {position} in {path}: {err}"))
                .ok()?
                .into_point()
                .inspect_err(|err| warn!("skipping record {position} in {path}: {err}"))
                .ok()
        })
        .collect();
    debug!("loaded {} of {total} points from {path}", points.len());
    Ok(points)
}

/// Load classified rows written by the `classify` command.
pub(crate) fn load_rows(path: &Utf8Path) -> Result<Vec<ClassifiedRow>, CliError> {
    let rows: Vec<ClassifiedRow> = read_json(path)?;
    debug!("loaded {} classified rows from {path}", rows.len());
    Ok(rows)
}

/// Load a taxonomy document, or the shipped tables when no path is given.
pub(crate) fn load_taxonomy(path: Option<&Utf8Path>) -> Result<Taxonomy, CliError> {
    let Some(taxonomy_path) = path else {
        return Ok(Taxonomy::osm_default());
    };
    let reader = BufReader::new(open_input(taxonomy_path)?);
    let taxonomy =
        Taxonomy::from_json_reader(reader).map_err(|source| CliError::LoadTaxonomy {
            path: taxonomy_path.to_path_buf(),
            source,
        })?;
    debug!(
        "loaded {} taxonomy rules from {taxonomy_path}",
        taxonomy.rule_count()
    );
    Ok(taxonomy)
}

/// Write `value` as pretty JSON to `output`, or to `fallback` when no output
/// path is configured.
pub(crate) fn write_json<T: Serialize>(
    value: &T,
    output: Option<&Utf8Path>,
    fallback: &mut dyn Write,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    output.map_or_else(
        || write_payload(fallback, &payload),
        |path| {
            let mut file = create_output(path)?;
            write_payload(&mut file, &payload)
        },
    )
}

fn write_payload(writer: &mut dyn Write, payload: &str) -> Result<(), CliError> {
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    writer.flush().map_err(CliError::WriteOutput)
}
