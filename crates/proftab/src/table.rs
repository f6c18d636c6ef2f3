//! In-memory table shared by every codec.

use crate::converter::ConvertError;

/// Ordered, named columns over row-major text cells.
///
/// Cells are kept as text exactly as they were read; no codec coerces
/// values to numbers. Every row has one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column names.
    ///
    /// Column names must be unique.
    pub fn new<I, S>(columns: I) -> Result<Self, ConvertError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(ConvertError::validation(format!(
                    "duplicate column name '{name}'"
                )));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Build a table from column-major values, padding to `row_count`.
    ///
    /// Missing cells become empty text; values past `row_count` are dropped.
    /// A `row_count` too large to allocate is a format error.
    pub fn from_columns(
        columns: Vec<(String, Vec<String>)>,
        row_count: usize,
    ) -> Result<Self, ConvertError> {
        let mut table = Table::new(columns.iter().map(|(name, _)| name.as_str()))?;
        table.rows.try_reserve_exact(row_count).map_err(|e| {
            ConvertError::format(format!("cannot hold {row_count} rows: {e}"))
        })?;
        for r in 0..row_count {
            table.rows.push(
                columns
                    .iter()
                    .map(|(_, values)| values.get(r).cloned().unwrap_or_default())
                    .collect(),
            );
        }
        Ok(table)
    }

    /// Append a row. Its width must match the column count.
    pub fn push_row<I, S>(&mut self, row: I) -> Result<(), ConvertError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(ConvertError::validation(format!(
                "row {} has {} cells, expected {}",
                self.rows.len() + 1,
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Values of column `index`, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows.iter().map(move |row| row[index].as_str())
    }
}
