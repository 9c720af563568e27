/// Upper bound of the scaled system distance (scene units)
pub const SCALE_FACTOR_CONST: f64 = 70_000.0;

/// Upper bound of the log-compressed stellar radius (scene units)
pub const RADIUS_SCALE_CONST: f64 = 3.0;

/// NASA Exoplanet Archive "Planetary Systems" table
pub const ARCHIVE_TABLE: &str = "ps";

/// NASA Exoplanet Archive TAP endpoint (synchronous queries)
pub const ARCHIVE_TAP_URL: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync";
