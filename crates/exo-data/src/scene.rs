//! Scene output: CSV writer, manifest sidecar and a name-based reader
//!
//! Consumers look columns up by header name. The manifest records the column
//! list so a consumer can check the contract before reading any rows.

use crate::error::{CatalogError, CatalogResult};
use crate::pipeline::PipelineConfig;
use crate::schema::SCENE_COLUMNS;
use crate::table::{ColumnData, Table};

use exo_core::coordinates::{CartesianPosition, EquatorialPosition};
use exo_core::scale::ValueRange;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

pub const MANIFEST_VERSION: u32 = 1;

/// One scene-ready star system
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    #[serde(deserialize_with = "nan_if_empty")]
    pub ra: f64,
    #[serde(deserialize_with = "nan_if_empty")]
    pub dec: f64,
    /// Scaled distance, `[0, distance_scale]`
    #[serde(deserialize_with = "nan_if_empty")]
    pub sy_dist: f64,
    #[serde(deserialize_with = "nan_if_empty")]
    pub pl_rade: f64,
    /// Log-compressed radius, `[0, radius_scale]`
    #[serde(deserialize_with = "nan_if_empty")]
    pub st_rad: f64,
    #[serde(deserialize_with = "nan_if_empty")]
    pub st_teff: f64,
    #[serde(deserialize_with = "nan_if_empty")]
    pub x: f64,
    #[serde(deserialize_with = "nan_if_empty")]
    pub y: f64,
    #[serde(deserialize_with = "nan_if_empty")]
    pub z: f64,
}

impl SceneRecord {
    pub fn position(&self) -> CartesianPosition {
        CartesianPosition::new(self.x, self.y, self.z)
    }

    /// Sky position recovered from `x, y, z`; agrees with `ra`, `dec` and
    /// `sy_dist` for any row the pipeline wrote.
    pub fn sky_position(&self) -> EquatorialPosition {
        self.position().to_equatorial()
    }
}

fn nan_if_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Sidecar describing a written scene file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    pub version: u32,
    pub columns: Vec<String>,
    pub row_count: usize,
    pub config: PipelineConfig,
    /// `local:<path>` or `archive:<table>`
    pub source: String,
}

impl SceneManifest {
    pub fn for_table(table: &Table, config: PipelineConfig, source: String) -> Self {
        Self {
            version: MANIFEST_VERSION,
            columns: table.column_names().into_iter().map(str::to_string).collect(),
            row_count: table.num_rows(),
            config,
            source,
        }
    }

    /// `scene.csv` -> `scene.manifest.json`
    pub fn path_for(scene_path: &Path) -> PathBuf {
        scene_path.with_extension("manifest.json")
    }

    pub fn save(&self, path: &Path) -> CatalogResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Fails naming the first scene column the file does not carry
    pub fn check_columns(&self) -> CatalogResult<()> {
        match SCENE_COLUMNS.iter().find(|c| !self.columns.iter().any(|have| have == *c)) {
            Some(missing) => Err(CatalogError::MissingColumn(missing.to_string())),
            None => Ok(()),
        }
    }
}

/// Write `table` as CSV with a header. Missing and NaN cells are left empty.
pub fn write_scene_csv(table: &Table, path: &Path) -> CatalogResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut w = csv::Writer::from_path(path)?;
    w.write_record(table.column_names())?;

    let columns: Vec<_> = table.columns().collect();
    for row in 0..table.num_rows() {
        w.write_record(columns.iter().map(|c| format_cell(&c.data, row)))?;
    }
    w.flush()?;

    tracing::info!("Wrote {} rows to {:?}", table.num_rows(), path);
    Ok(())
}

fn format_cell(data: &ColumnData, row: usize) -> String {
    match data {
        ColumnData::Numeric(values) => match values[row] {
            Some(v) if !v.is_nan() => format_number(v),
            _ => String::new(),
        },
        ColumnData::Text(values) => values[row].clone().unwrap_or_default(),
    }
}

/// Shortest round-trip text; exponent form for very small or large magnitudes
fn format_number(v: f64) -> String {
    let a = v.abs();
    if a != 0.0 && a.is_finite() && !(1e-4..1e16).contains(&a) {
        format!("{:e}", v)
    } else {
        v.to_string()
    }
}

/// Read a scene file by column name; column order does not matter.
pub fn read_scene_csv(path: &Path) -> CatalogResult<Vec<SceneRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader.deserialize().collect::<Result<Vec<SceneRecord>, _>>()?;
    Ok(records)
}

/// Extents of a scene, ignoring NaN entries
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSummary {
    pub systems: usize,
    pub x: Option<ValueRange>,
    pub y: Option<ValueRange>,
    pub z: Option<ValueRange>,
    pub sy_dist: Option<ValueRange>,
    pub st_rad: Option<ValueRange>,
}

impl SceneSummary {
    pub fn from_records(records: &[SceneRecord]) -> Self {
        let range = |f: fn(&SceneRecord) -> f64| ValueRange::of(records.iter().map(f));
        Self {
            systems: records.len(),
            x: range(|r| r.x),
            y: range(|r| r.y),
            z: range(|r| r.z),
            sy_dist: range(|r| r.sy_dist),
            st_rad: range(|r| r.st_rad),
        }
    }
}
