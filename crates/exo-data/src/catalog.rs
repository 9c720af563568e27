//! Delimited catalog loading
//!
//! Local files and archive responses both go through [`read_csv`], so every
//! ingestion path produces the same table shape.

use crate::error::{CatalogError, CatalogResult};
use crate::table::{ColumnData, Table};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Cell contents treated as a missing value (compared case-insensitively)
const MISSING_TOKENS: [&str; 8] = ["", "nan", "-nan", "null", "none", "na", "n/a", "#n/a"];

/// Load a catalog from a `.csv` file.
///
/// The extension is checked before the file is opened.
pub fn load_from_csv(path: &Path) -> CatalogResult<Table> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(CatalogError::UnsupportedFormat(path.display().to_string()));
    }

    tracing::info!("Loading catalog from {:?}", path);
    let table = read_csv(File::open(path)?)?;
    tracing::info!("Loaded {} rows, {} columns", table.num_rows(), table.num_columns());
    Ok(table)
}

/// Parse comma-delimited text with a header row.
///
/// Short rows are padded with missing cells; rows longer than the header
/// are rejected. A column is numeric when every non-missing cell parses as `f64`;
/// otherwise it is kept as text.
pub fn read_csv<R: Read>(reader: R) -> CatalogResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(CatalogError::RowLength { row: row + 1, expected: headers.len(), found: record.len() });
        }
        for (i, column) in cells.iter_mut().enumerate() {
            let field = record.get(i).unwrap_or("");
            column.push(if is_missing(field) { None } else { Some(field.to_string()) });
        }
    }

    headers
        .into_iter()
        .zip(cells)
        .try_fold(Table::new(), |table, (name, column)| table.with_column(name, infer_column(column)))
}

fn is_missing(field: &str) -> bool {
    MISSING_TOKENS.iter().any(|token| field.eq_ignore_ascii_case(token))
}

fn infer_column(cells: Vec<Option<String>>) -> ColumnData {
    let parsed: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(text) => text.parse::<f64>().ok().map(Some),
        })
        .collect();

    match parsed {
        Some(values) => ColumnData::Numeric(values),
        None => ColumnData::Text(cells),
    }
}
