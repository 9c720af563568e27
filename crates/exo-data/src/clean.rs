//! Projection, missing-value removal and duplicate-system removal

use crate::error::CatalogResult;
use crate::schema::{REQUIRED_COLUMNS, SY_DIST};
use crate::table::Table;
use std::collections::HashSet;

/// Project to the required catalog columns, drop incomplete rows, then keep
/// the first row seen for each `sy_dist`.
///
/// Several planets orbiting the same star share a system distance, so the
/// distance doubles as the star-system key.
pub fn clean_catalog(table: &Table) -> CatalogResult<Table> {
    let projected = table.select(&REQUIRED_COLUMNS)?;
    let complete = drop_incomplete(&projected);
    let unique = drop_duplicates(&complete, SY_DIST)?;

    tracing::info!(
        "Cleaned catalog: {} rows in, {} incomplete, {} duplicate systems, {} kept",
        table.num_rows(),
        projected.num_rows() - complete.num_rows(),
        complete.num_rows() - unique.num_rows(),
        unique.num_rows()
    );

    Ok(unique)
}

/// Rows with a value in every column
pub fn drop_incomplete(table: &Table) -> Table {
    let keep: Vec<bool> = (0..table.num_rows())
        .map(|row| table.columns().all(|c| !c.data.is_missing(row)))
        .collect();
    table.filter_rows(&keep)
}

/// First row for each distinct value of `column`, in input order
pub fn drop_duplicates(table: &Table, column: &str) -> CatalogResult<Table> {
    let values = table.numeric(column)?;
    let mut seen = HashSet::with_capacity(values.len());

    let keep: Vec<bool> = values.iter().map(|v| seen.insert(dedup_key(*v))).collect();
    Ok(table.filter_rows(&keep))
}

/// Equality key for a cell: `0.0 == -0.0`, and all NaNs are one value.
fn dedup_key(value: Option<f64>) -> Option<u64> {
    value.map(|v| {
        if v.is_nan() {
            f64::NAN.to_bits()
        } else if v == 0.0 {
            0.0_f64.to_bits()
        } else {
            v.to_bits()
        }
    })
}
