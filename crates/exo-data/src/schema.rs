//! Column names shared by ingestion, the pipeline and the scene consumer

pub const RA: &str = "ra";
pub const DEC: &str = "dec";
pub const SY_DIST: &str = "sy_dist";
pub const PL_RADE: &str = "pl_rade";
pub const ST_RAD: &str = "st_rad";
pub const ST_TEFF: &str = "st_teff";

pub const X: &str = "x";
pub const Y: &str = "y";
pub const Z: &str = "z";

/// Catalog columns every input must provide. Anything else is dropped.
pub const REQUIRED_COLUMNS: [&str; 6] = [RA, DEC, SY_DIST, PL_RADE, ST_RAD, ST_TEFF];

/// Columns of a scene-ready table, in output order
pub const SCENE_COLUMNS: [&str; 9] = [RA, DEC, SY_DIST, PL_RADE, ST_RAD, ST_TEFF, X, Y, Z];
