use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the dataset
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, classified once at load time.
///
/// Every non-missing cell is either numeric or categorical text; downstream
/// code matches on the tag instead of re-parsing strings.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Classify one raw text field.
    ///
    /// Empty fields are missing. Fields that parse as a *finite* float are
    /// numeric; `NaN`/`inf` spellings are treated as missing so aggregates
    /// stay finite. Everything else is categorical text.
    pub fn parse(raw: &str) -> CellValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            Ok(_) => CellValue::Missing,
            Err(_) => CellValue::Text(trimmed.to_string()),
        }
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => write!(f, "<missing>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – one named column of cells
// ---------------------------------------------------------------------------

/// A named column of the dataset.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            cells,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over the non-missing numeric values of this column.
    pub fn numeric_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(CellValue::as_f64)
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    /// True when every non-missing cell is numeric.
    ///
    /// A single categorical cell disqualifies the whole column; a column
    /// with only missing cells counts as numeric (its aggregates are then
    /// simply undefined).
    pub fn is_numeric(&self) -> bool {
        self.cells
            .iter()
            .all(|c| !matches!(c, CellValue::Text(_)))
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Constructing a [`Table`] failed because the columns do not form a
/// rectangular, uniquely-named dataset.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table has no columns")]
    NoColumns,
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
    #[error("column '{name}' has {len} rows, expected {expected}")]
    RaggedColumn {
        name: String,
        len: usize,
        expected: usize,
    },
}

/// The full parsed dataset: an ordered list of equally long, uniquely named
/// columns. Immutable once constructed; loading a new file replaces the
/// whole table.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table, enforcing unique names and equal column lengths.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let first = columns.first().ok_or(TableError::NoColumns)?;
        let n_rows = first.len();

        let mut seen: Vec<&str> = Vec::with_capacity(columns.len());
        for col in &columns {
            if seen.contains(&col.name.as_str()) {
                return Err(TableError::DuplicateColumn(col.name.clone()));
            }
            seen.push(&col.name);
            if col.len() != n_rows {
                return Err(TableError::RaggedColumn {
                    name: col.name.clone(),
                    len: col.len(),
                    expected: n_rows,
                });
            }
        }

        Ok(Table { columns, n_rows })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in their original file order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
