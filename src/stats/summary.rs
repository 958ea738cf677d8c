use crate::data::schema::Schema;
use crate::data::table::{Column, Table};

// ---------------------------------------------------------------------------
// Per-column aggregates
// ---------------------------------------------------------------------------

/// Aggregates over the non-missing values of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Summary of one numeric column. `stats` is `None` when the column has no
/// non-missing values, so a fully empty column reports "undefined" instead
/// of crashing or inventing numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub present: usize,
    pub missing: usize,
    pub stats: Option<SummaryStats>,
}

/// Summaries for every numeric column, in the table's column order.
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    entries: Vec<(String, ColumnSummary)>,
}

impl StatsSummary {
    pub fn get(&self, column: &str) -> Option<&ColumnSummary> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, s)| s)
    }

    /// Mean of a column, when defined.
    pub fn mean(&self, column: &str) -> Option<f64> {
        self.get(column)?.stats.map(|s| s.mean)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnSummary)> {
        self.entries.iter().map(|(name, s)| (name.as_str(), s))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute {min, max, mean} plus present/missing counts for every numeric
/// column of the table. Missing cells are excluded from the aggregates and
/// surfaced through the counts.
pub fn summarize(table: &Table, schema: &Schema) -> StatsSummary {
    let entries = schema
        .numeric_columns()
        .iter()
        .filter_map(|name| {
            let column = table.column(name)?;
            Some((name.clone(), summarize_column(column)))
        })
        .collect();
    StatsSummary { entries }
}

fn summarize_column(column: &Column) -> ColumnSummary {
    let mut present = 0usize;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0f64;

    for v in column.numeric_values() {
        present += 1;
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }

    let stats = (present > 0).then(|| SummaryStats {
        min,
        max,
        mean: sum / present as f64,
    });

    ColumnSummary {
        present,
        missing: column.missing_count(),
        stats,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
