//! Column transforms: min-max scaling, Cartesian projection, log compression

use crate::error::CatalogResult;
use crate::schema::{DEC, RA, SY_DIST, X, Y, Z};
use crate::table::Table;
use exo_core::coordinates::EquatorialPosition;
use exo_core::scale::ValueRange;

/// Rescale `column` linearly so its minimum maps to 0 and its maximum to `scale`.
///
/// A constant column yields NaN everywhere, and missing cells stay missing.
pub fn linear_scale(table: &Table, column: &str, scale: f64) -> CatalogResult<Table> {
    let values = table.numeric(column)?;

    let Some(range) = ValueRange::of(values.iter().flatten().copied()) else {
        return table.with_numeric(column, values.to_vec());
    };

    if range.span() == 0.0 {
        tracing::warn!("Column '{}' is constant ({}); scaled values will be NaN", column, range.min);
    } else if range.is_degenerate() {
        tracing::warn!(
            "Column '{}' has non-finite range [{}, {}]; infinite values scale to NaN",
            column, range.min, range.max
        );
    }
    tracing::debug!("Scaling '{}' from [{}, {}] to [0, {}]", column, range.min, range.max, scale);

    let scaled = values.iter().map(|v| v.map(|v| range.rescale(v, scale))).collect();
    table.with_numeric(column, scaled)
}

/// Append `x`, `y`, `z` from `ra`/`dec` (degrees) and `sy_dist`.
///
/// The distance is used as-is, so scaling it first puts the points directly
/// in scene units.
pub fn convert_to_cartesian(table: &Table) -> CatalogResult<Table> {
    let ra = table.numeric(RA)?;
    let dec = table.numeric(DEC)?;
    let dist = table.numeric(SY_DIST)?;

    let positions: Vec<_> = ra
        .iter()
        .zip(dec)
        .zip(dist)
        .map(|((ra, dec), dist)| match (ra, dec, dist) {
            (Some(ra), Some(dec), Some(dist)) => {
                Some(EquatorialPosition::new(*ra, *dec, *dist).to_cartesian())
            }
            _ => None,
        })
        .collect();

    table
        .with_numeric(X, positions.iter().map(|p| p.map(|p| p.x)).collect())?
        .with_numeric(Y, positions.iter().map(|p| p.map(|p| p.y)).collect())?
        .with_numeric(Z, positions.iter().map(|p| p.map(|p| p.z)).collect())
}

/// Natural log of every value in `column`.
/// Zero gives -inf and negatives give NaN; neither is rejected.
pub fn log_transform(table: &Table, column: &str) -> CatalogResult<Table> {
    let values = table.numeric(column)?;
    if values.iter().flatten().any(|v| *v <= 0.0) {
        tracing::warn!("Column '{}' has non-positive values; log is undefined for them", column);
    }
    table.with_numeric(column, values.iter().map(|v| v.map(f64::ln)).collect())
}

/// Log-compress `column` then rescale it to `[0, scale]`.
///
/// Stellar radii span several orders of magnitude; a straight linear scale
/// would squash nearly every star into the bottom of the range.
pub fn log_compress(table: &Table, column: &str, scale: f64) -> CatalogResult<Table> {
    linear_scale(&log_transform(table, column)?, column, scale)
}
