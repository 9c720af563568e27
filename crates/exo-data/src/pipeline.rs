//! Scene pipeline: turns a raw catalog table into a bounded Cartesian scene

use crate::archive::ArchiveQuery;
use crate::catalog::load_from_csv;
use crate::clean::clean_catalog;
use crate::error::CatalogResult;
use crate::scene::{write_scene_csv, SceneManifest};
use crate::schema::{ST_RAD, SY_DIST};
use crate::table::Table;
use crate::transform::{convert_to_cartesian, linear_scale, log_compress};

use exo_core::constants::{RADIUS_SCALE_CONST, SCALE_FACTOR_CONST};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Scaled `sy_dist` spans `[0, distance_scale]`
    pub distance_scale: f64,
    /// Log-compressed `st_rad` spans `[0, radius_scale]`
    pub radius_scale: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            distance_scale: SCALE_FACTOR_CONST,
            radius_scale: RADIUS_SCALE_CONST,
        }
    }
}

impl PipelineConfig {
    /// Load from JSON. Missing fields take their defaults.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Main scene pipeline. Holds no state between runs.
pub struct DataPipeline {
    config: PipelineConfig,
}

impl DataPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Clean, scale and project a raw catalog.
    ///
    /// Order is fixed: the distance is scaled before projection so `x, y, z`
    /// come out in scene units, and the radius is compressed last.
    pub fn run(&self, raw: &Table) -> CatalogResult<Table> {
        let cleaned = clean_catalog(raw)?;
        let scaled = linear_scale(&cleaned, SY_DIST, self.config.distance_scale)?;
        let cartesian = convert_to_cartesian(&scaled)?;
        let scene = log_compress(&cartesian, ST_RAD, self.config.radius_scale)?;

        tracing::info!("Scene ready: {} systems", scene.num_rows());
        Ok(scene)
    }
}

/// Run the pipeline with the default scale constants
pub fn convert_scale_clean_df(raw: &Table) -> CatalogResult<Table> {
    DataPipeline::with_defaults().run(raw)
}

/// Local CSV -> scene CSV (+ manifest)
pub fn generate_from_local_csv(input: &Path, output: &Path, config: &PipelineConfig) -> CatalogResult<SceneManifest> {
    let raw = load_from_csv(input)?;
    let scene = DataPipeline::new(config.clone()).run(&raw)?;
    write_scene(&scene, output, config, format!("local:{}", input.display()))
}

/// Archive query -> scene CSV (+ manifest)
pub async fn generate_from_archive(query: &ArchiveQuery, output: &Path, config: &PipelineConfig) -> CatalogResult<SceneManifest> {
    let raw = query.fetch().await?;
    let scene = DataPipeline::new(config.clone()).run(&raw)?;
    write_scene(&scene, output, config, format!("archive:{}", query.table))
}

fn write_scene(scene: &Table, output: &Path, config: &PipelineConfig, source: String) -> CatalogResult<SceneManifest> {
    write_scene_csv(scene, output)?;
    let manifest = SceneManifest::for_table(scene, config.clone(), source);
    manifest.save(&SceneManifest::path_for(output))?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::scene::read_scene_csv;
    use crate::schema::SCENE_COLUMNS;
    use crate::table::ColumnData;

    fn two_systems(st_rad: Vec<f64>) -> Table {
        Table::from_numeric(vec![
            ("ra", vec![0.0, 90.0]),
            ("dec", vec![0.0, 0.0]),
            ("sy_dist", vec![10.0, 20.0]),
            ("pl_rade", vec![1.0, 2.0]),
            ("st_rad", st_rad),
            ("st_teff", vec![5000.0, 6000.0]),
        ])
        .unwrap()
    }

    fn column(table: &Table, name: &str) -> Vec<f64> {
        table.numeric(name).unwrap().iter().map(|v| v.unwrap()).collect()
    }

    fn max(values: &[f64]) -> f64 {
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    #[test]
    fn test_two_systems_end_to_end() {
        let scene = convert_scale_clean_df(&two_systems(vec![1.0, 100.0])).unwrap();

        assert_eq!(scene.num_rows(), 2);
        assert_eq!(scene.column_names(), SCENE_COLUMNS.to_vec());

        let dist = column(&scene, "sy_dist");
        let st_rad = column(&scene, "st_rad");
        assert_eq!(dist, vec![0.0, SCALE_FACTOR_CONST]);
        assert_eq!(st_rad, vec![0.0, 3.0]);
        assert_eq!(max(&st_rad), RADIUS_SCALE_CONST);

        let (x, y, z) = (column(&scene, "x"), column(&scene, "y"), column(&scene, "z"));
        for i in 0..2 {
            let r2 = x[i] * x[i] + y[i] * y[i] + z[i] * z[i];
            assert!((r2 - dist[i] * dist[i]).abs() <= (dist[i] * dist[i]).max(1.0) * 1e-12);
        }
    }

    #[test]
    fn test_radius_compressed_in_log_space() {
        let raw = Table::from_numeric(vec![
            ("ra", vec![0.0, 90.0, 180.0]),
            ("dec", vec![0.0, 0.0, 0.0]),
            ("sy_dist", vec![10.0, 20.0, 30.0]),
            ("pl_rade", vec![1.0, 2.0, 3.0]),
            ("st_rad", vec![1.0, 10.0, 100.0]),
            ("st_teff", vec![5000.0, 6000.0, 7000.0]),
        ])
        .unwrap();
        let st_rad = column(&convert_scale_clean_df(&raw).unwrap(), "st_rad");

        // a linear scale would put the middle star at 10/99 * 3
        for (actual, expected) in st_rad.into_iter().zip([0.0, 1.5, 3.0]) {
            assert!((actual - expected).abs() < 1e-9, "expected {} got {}", expected, actual);
        }
    }

    #[test]
    fn test_extra_columns_removed() {
        let raw = two_systems(vec![1.0, 10.0])
            .with_column("extra_col", ColumnData::Text(vec![Some("a".into()), Some("b".into())]))
            .unwrap();
        let scene = convert_scale_clean_df(&raw).unwrap();
        assert!(!scene.has_column("extra_col"));
        assert!(raw.has_column("extra_col"));
    }

    #[test]
    fn test_duplicates_and_missing_removed() {
        let raw = Table::new()
            .with_column("ra", ColumnData::Numeric(vec![Some(0.0), Some(90.0), Some(180.0), None]))
            .and_then(|t| t.with_column("dec", ColumnData::Numeric(vec![Some(0.0); 4])))
            .and_then(|t| t.with_column("sy_dist", ColumnData::Numeric(vec![Some(10.0), Some(10.0), Some(20.0), Some(30.0)])))
            .and_then(|t| t.with_column("pl_rade", ColumnData::Numeric(vec![Some(1.0); 4])))
            .and_then(|t| t.with_column("st_rad", ColumnData::Numeric(vec![Some(1.0), Some(2.0), Some(5.0), Some(3.0)])))
            .and_then(|t| t.with_column("st_teff", ColumnData::Numeric(vec![Some(5500.0); 4])))
            .unwrap();

        let scene = convert_scale_clean_df(&raw).unwrap();
        assert_eq!(scene.num_rows(), 2);
        assert_eq!(column(&scene, "sy_dist"), vec![0.0, SCALE_FACTOR_CONST]);
    }

    #[test]
    fn test_single_system_is_degenerate() {
        let raw = Table::from_numeric(vec![
            ("ra", vec![45.0]),
            ("dec", vec![30.0]),
            ("sy_dist", vec![15.0]),
            ("pl_rade", vec![1.5]),
            ("st_rad", vec![2.0]),
            ("st_teff", vec![5500.0]),
        ])
        .unwrap();
        let scene = convert_scale_clean_df(&raw).unwrap();

        assert_eq!(scene.num_rows(), 1);
        assert!(column(&scene, "sy_dist")[0].is_nan());
        assert!(column(&scene, "x")[0].is_nan());
        assert!(column(&scene, "st_rad")[0].is_nan());
    }

    #[test]
    fn test_custom_scales() {
        let pipeline = DataPipeline::new(PipelineConfig { distance_scale: 100.0, radius_scale: 1.0 });
        let scene = pipeline.run(&two_systems(vec![1.0, 50.0])).unwrap();
        assert_eq!(max(&column(&scene, "sy_dist")), 100.0);
        assert_eq!(max(&column(&scene, "st_rad")), 1.0);
    }

    #[test]
    fn test_schema_error_aborts() {
        let raw = Table::from_numeric(vec![("ra", vec![0.0]), ("dec", vec![0.0])]).unwrap();
        assert!(matches!(convert_scale_clean_df(&raw), Err(CatalogError::MissingColumn(_))));
    }

    #[test]
    fn test_config_partial_json() {
        let config: PipelineConfig = serde_json::from_str(r#"{"distance_scale": 500.0}"#).unwrap();
        assert_eq!(config.distance_scale, 500.0);
        assert_eq!(config.radius_scale, RADIUS_SCALE_CONST);
    }

    #[test]
    fn test_generate_from_local_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("catalog.csv");
        std::fs::write(
            &input,
            "pl_name,ra,dec,sy_dist,pl_rade,st_rad,st_teff\n\
             b,0.0,0.0,10.0,1.0,1.0,5000\n\
             c,90.0,0.0,10.0,2.0,1.0,5000\n\
             d,180.0,45.0,20.0,1.2,10.0,6000\n",
        )
        .unwrap();
        let output = dir.path().join("out").join("scene.csv");

        let manifest = generate_from_local_csv(&input, &output, &PipelineConfig::default()).unwrap();
        assert_eq!(manifest.row_count, 2);

        let records = read_scene_csv(&output).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].sy_dist, SCALE_FACTOR_CONST);
        assert_eq!(records[1].st_rad, RADIUS_SCALE_CONST);

        let saved = SceneManifest::load(&SceneManifest::path_for(&output)).unwrap();
        assert_eq!(saved, manifest);
    }

    #[test]
    fn test_generate_rejects_non_csv() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_from_local_csv(
            &dir.path().join("catalog.txt"),
            &dir.path().join("scene.csv"),
            &PipelineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(_)));
        assert!(!dir.path().join("scene.csv").exists());
    }
}
