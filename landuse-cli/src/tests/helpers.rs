//! Test helpers writing point files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

/// Longitude and latitude of the restaurant block.
const CENTRE: (f64, f64) = (77.2090, 28.6139);

pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace path");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn write_json(&self, name: &str, value: &Value) -> Utf8PathBuf {
        let path = self.root.join(name);
        let payload = serde_json::to_vec_pretty(value).expect("serialise fixture");
        fs::write(&path, payload).expect("write fixture");
        path
    }

    /// Write the sample street and return its path.
    pub(super) fn write_points(&self) -> Utf8PathBuf {
        self.write_json("points.json", &sample_points())
    }
}

/// Six restaurants within a few dozen metres of each other, a house, an
/// unresolved building, a cafe two kilometres away and one malformed record.
#[expect(clippy::float_arithmetic, reason = "Offsets points around the centre")]
pub(super) fn sample_points() -> Value {
    let (lon, lat) = CENTRE;
    let mut records: Vec<Value> = (0_u32..6)
        .map(|step| {
            let offset = f64::from(step) * 0.0002;
            json!({
                "id": u64::from(step) + 1,
                "lon": lon + offset,
                "lat": lat,
                "tags": { "amenity": "restaurant", "name": format!("Dhaba {step}") },
            })
        })
        .collect();
    records.push(json!({
        "id": 10,
        "lon": lon,
        "lat": lat + 0.001,
        "tags": { "building": "house" },
    }));
    records.push(json!({
        "id": 11,
        "lon": lon,
        "lat": lat - 0.001,
        "tags": { "building": "yes" },
    }));
    records.push(json!({
        "id": 12,
        "lon": lon + 0.02,
        "lat": lat,
        "tags": { "amenity": "cafe" },
    }));
    records.push(json!({ "id": "not-a-number", "lon": lon }));
    Value::Array(records)
}
