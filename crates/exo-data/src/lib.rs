pub mod error;
pub mod table;
pub mod schema;
pub mod catalog;
pub mod archive;
pub mod clean;
pub mod transform;
pub mod pipeline;
pub mod scene;

pub use error::{CatalogError, CatalogResult};
pub use table::{Column, ColumnData, Table};
pub use catalog::{load_from_csv, read_csv};
pub use archive::ArchiveQuery;
pub use clean::clean_catalog;
pub use transform::{convert_to_cartesian, linear_scale, log_compress, log_transform};
pub use pipeline::{
    DataPipeline, PipelineConfig, convert_scale_clean_df, generate_from_archive, generate_from_local_csv,
};
pub use scene::{SceneManifest, SceneRecord, SceneSummary, read_scene_csv, write_scene_csv};
