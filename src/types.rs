//! Core data model types.
//!
//! Ingestion produces a [`Table`] (ordered column names plus string-keyed [`Row`]s). Profiling turns
//! a table into a [`Summary`] made of per-column [`ColumnProfile`]s.

use std::collections::HashMap;

use serde::Serialize;

/// One cell value.
///
/// Delimited sources only produce [`Cell::Text`]. JSON sources keep the kind of each scalar so that
/// profiling can tell `null`, booleans, numbers, and strings apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Raw text. Nested JSON arrays/objects are stored here as compact JSON text.
    Text(String),
    /// A JSON number in its shortest decimal form (`1.0` and `1` are both `"1"`).
    Number(String),
    Bool(bool),
    /// JSON `null`: present (not missing), but not numeric-looking.
    Null,
}

impl Cell {
    /// Number cell formatted in shortest round-trip decimal form.
    pub fn number(value: f64) -> Self {
        // Normalizes -0 to 0.
        let value = if value == 0.0 { 0.0 } else { value };
        Cell::Number(value.to_string())
    }

    /// Text form of the cell, as shown in samples and previews.
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Text(s) | Cell::Number(s) => s,
            Cell::Bool(true) => "true",
            Cell::Bool(false) => "false",
            Cell::Null => "null",
        }
    }

    /// `true` only for empty text, the one present value that counts as missing.
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_owned())
    }
}

/// A single record: column name -> [`Cell`].
///
/// A column that is not present in the record reads as `None` (absent). This is distinct from a
/// present-but-empty value (`Some("")`); both count as missing when profiling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<String, Cell>,
}

impl Row {
    /// Create an empty row (every column absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row by zipping header names to positional values.
    ///
    /// Positions past the end of `values` yield `""`; extra values are ignored. When a name occurs
    /// more than once in `header`, the later position wins.
    pub fn from_positional(header: &[String], values: &[&str]) -> Self {
        let cells = header
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), Cell::from(values.get(idx).copied().unwrap_or(""))))
            .collect();
        Self { cells }
    }

    /// Set (or overwrite) a cell.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Cell>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Text form of the value for `column`, or `None` if the record has no such key.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cell(column).map(Cell::as_str)
    }

    /// Typed value for `column`, or `None` if the record has no such key.
    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells.get(column)
    }
}

impl<K: Into<String>, V: Into<Cell>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// In-memory tabular dataset: ordered column names and ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names in display/iteration order. May contain duplicates (delimited headers).
    pub columns: Vec<String>,
    /// Row storage.
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of declared columns (duplicates included).
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `true` when the source had no header, i.e. the "no data" condition.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Text values of one column in row order (`None` where the record lacks the key).
    pub fn column_values<'a>(&'a self, column: &str) -> Vec<Option<&'a str>> {
        self.rows.iter().map(|row| row.get(column)).collect()
    }

    /// Typed cells of one column in row order (`None` where the record lacks the key).
    pub fn column_cells<'a>(&'a self, column: &str) -> Vec<Option<&'a Cell>> {
        self.rows.iter().map(|row| row.cell(column)).collect()
    }
}

/// Descriptive statistics over the finite numeric values of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std: f64,
}

/// Profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Result of numeric type sniffing over the leading sample of the column.
    pub is_numeric: bool,
    /// Distinct non-missing values. Text compares by string identity; a JSON number never equals
    /// a JSON string.
    pub unique_count: usize,
    /// Text form of the first few non-missing values, in row order.
    pub sample: Vec<String>,
    /// Present when at least one value coerces to a finite number (`true` is 1; `false` and
    /// `null` are 0).
    pub stats: Option<NumericStats>,
    /// Rows where the value is absent or empty.
    pub missing_count: usize,
}

/// Dataset-wide summary built by [`crate::profiling::summarize`].
///
/// A summary is never mutated after construction; reload or rebuild to refresh it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub row_count: usize,
    pub column_count: usize,
    /// Sum over declared columns (duplicates included) of absent/empty values.
    pub missing_count: usize,
    /// Names of columns classified numeric, in column order.
    pub numeric_columns: Vec<String>,
    /// One profile per distinct column name, in column order.
    pub profiles: Vec<ColumnProfile>,
}

impl Summary {
    /// Profile for `column`, if present.
    pub fn profile(&self, column: &str) -> Option<&ColumnProfile> {
        self.profiles.iter().find(|p| p.name == column)
    }

    /// Stats of the first numeric column, as read by the alert scanner and status report.
    ///
    /// Returns `None` if no column is numeric. The inner option is `None` when the column sniffed as
    /// numeric but no value coerced to a finite number.
    pub fn first_numeric(&self) -> Option<(&str, Option<&NumericStats>)> {
        let name = self.numeric_columns.first()?;
        let stats = self.profile(name).and_then(|p| p.stats.as_ref());
        Some((name.as_str(), stats))
    }

    /// Columns whose distinct count exceeds `ratio * row_count` (identifier-like fields).
    pub fn high_cardinality_columns(&self, ratio: f64) -> Vec<&str> {
        let threshold = self.row_count as f64 * ratio;
        self.profiles
            .iter()
            .filter(|p| p.unique_count as f64 > threshold)
            .map(|p| p.name.as_str())
            .collect()
    }
}
