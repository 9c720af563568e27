//! In-memory column table shared by every pipeline stage
//!
//! Stages never mutate a table they are handed; each one builds a new table.

use crate::error::{CatalogError, CatalogResult};

/// Cells of one column. `None` marks a missing value.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Missing cell test. NaN counts as missing, the same as an empty cell.
    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Self::Numeric(v) => v[row].map_or(true, f64::is_nan),
            Self::Text(v) => v[row].is_none(),
        }
    }

    fn filter(&self, keep: &[bool]) -> Self {
        fn pick<T: Clone>(values: &[T], keep: &[bool]) -> Vec<T> {
            values.iter().zip(keep).filter(|(_, k)| **k).map(|(v, _)| v.clone()).collect()
        }
        match self {
            Self::Numeric(v) => Self::Numeric(pick(v, keep)),
            Self::Text(v) => Self::Text(pick(v, keep)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Ordered set of uniquely named, equal-length columns
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    num_rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table of fully populated numeric columns
    pub fn from_numeric<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> CatalogResult<Self> {
        columns.into_iter().try_fold(Self::new(), |table, (name, values)| {
            table.with_column(name, ColumnData::Numeric(values.into_iter().map(Some).collect()))
        })
    }

    /// Append a column. The first column fixes the row count.
    pub fn with_column(mut self, name: impl Into<String>, data: ColumnData) -> CatalogResult<Self> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(CatalogError::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.num_rows = data.len();
        } else if data.len() != self.num_rows {
            return Err(CatalogError::ColumnLength {
                column: name,
                expected: self.num_rows,
                found: data.len(),
            });
        }
        self.columns.push(Column { name, data });
        Ok(self)
    }

    pub fn num_rows(&self) -> usize { self.num_rows }
    pub fn num_columns(&self) -> usize { self.columns.len() }
    pub fn is_empty(&self) -> bool { self.num_rows == 0 }

    pub fn columns(&self) -> impl Iterator<Item = &Column> { self.columns.iter() }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Numeric cells of `name`
    pub fn numeric(&self, name: &str) -> CatalogResult<&[Option<f64>]> {
        match &self.column(name).ok_or_else(|| CatalogError::MissingColumn(name.to_string()))?.data {
            ColumnData::Numeric(values) => Ok(values),
            ColumnData::Text(_) => Err(CatalogError::ColumnType {
                column: name.to_string(),
                expected: "numeric",
            }),
        }
    }

    /// Keep only `names`, in that order.
    ///
    /// Every name is checked before any column is copied, so a schema
    /// mismatch fails without touching row data.
    pub fn select(&self, names: &[&str]) -> CatalogResult<Table> {
        if let Some(missing) = names.iter().find(|n| !self.has_column(n)) {
            return Err(CatalogError::MissingColumn(missing.to_string()));
        }

        let columns = names
            .iter()
            .filter_map(|n| self.column(n))
            .cloned()
            .collect::<Vec<_>>();
        let num_rows = if columns.is_empty() { 0 } else { self.num_rows };
        Ok(Table { columns, num_rows })
    }

    /// Rows whose mask entry is true, in input order
    pub fn filter_rows(&self, keep: &[bool]) -> Table {
        debug_assert_eq!(keep.len(), self.num_rows);
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column { name: c.name.clone(), data: c.data.filter(keep) })
                .collect(),
            num_rows: keep.iter().filter(|k| **k).count(),
        }
    }

    /// Copy of this table with `name` set to `values`: replaced in place if
    /// the column exists, appended otherwise.
    pub fn with_numeric(&self, name: &str, values: Vec<Option<f64>>) -> CatalogResult<Table> {
        if values.len() != self.num_rows && !self.columns.is_empty() {
            return Err(CatalogError::ColumnLength {
                column: name.to_string(),
                expected: self.num_rows,
                found: values.len(),
            });
        }

        let mut table = self.clone();
        match table.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => {
                column.data = ColumnData::Numeric(values);
                Ok(table)
            }
            None => table.with_column(name, ColumnData::Numeric(values)),
        }
    }
}
