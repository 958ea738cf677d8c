use crate::data::schema::Schema;
use crate::data::table::{Column, Table};

// ---------------------------------------------------------------------------
// Pairwise Pearson correlation over numeric columns
// ---------------------------------------------------------------------------

/// Symmetric correlation matrix over the numeric columns of one table.
///
/// The diagonal is 1.0 by definition. Off-diagonal entries are `NaN` when a
/// coefficient is undefined (a zero-variance column, or fewer than two rows
/// where both cells are present).
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    // Row-major, len == columns.len()^2.
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Column labels, in the table's column order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient by position. Panics when out of range.
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.columns.len() + j]
    }

    /// Coefficient by column names, when both exist.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.at(i, j))
    }
}

/// Compute the pairwise Pearson correlation matrix over the numeric columns.
///
/// Each pair is evaluated over the rows where *both* cells are present, so a
/// missing value drops only the pairs it participates in.
pub fn correlate(table: &Table, schema: &Schema) -> CorrelationMatrix {
    let columns: Vec<&Column> = schema
        .numeric_columns()
        .iter()
        .filter_map(|name| table.column(name))
        .collect();
    let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();

    let n = columns.len();
    let mut values = vec![f64::NAN; n * n];
    for i in 0..n {
        values[i * n + i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson(columns[i], columns[j]);
            values[i * n + j] = r;
            values[j * n + i] = r;
        }
    }

    CorrelationMatrix {
        columns: names,
        values,
    }
}

/// Pearson coefficient over the rows where both cells are numeric.
/// `NaN` when fewer than two such rows exist or either side has zero
/// variance.
fn pearson(a: &Column, b: &Column) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .cells
        .iter()
        .zip(&b.cells)
        .filter_map(|(x, y)| Some((x.as_f64()?, y.as_f64()?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 {
        f64::NAN
    } else {
        // Rounding can push the ratio a hair beyond ±1.
        (sxy / denom).clamp(-1.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::CellValue;

    const EPS: f64 = 1e-9;

    fn numbers(name: &str, values: &[f64]) -> Column {
        Column::new(name, values.iter().map(|&v| CellValue::Number(v)).collect())
    }

    fn matrix_of(columns: Vec<Column>) -> CorrelationMatrix {
        let table = Table::new(columns).unwrap();
        let schema = Schema::derive(&table);
        correlate(&table, &schema)
    }

    #[test]
    fn symmetric_with_unit_diagonal() {
        let m = matrix_of(vec![
            numbers("a", &[1.0, 2.0, 3.0, 4.0]),
            numbers("b", &[1.5, 0.3, 2.8, 1.1]),
            numbers("c", &[-4.0, 2.0, 0.5, 9.0]),
        ]);

        for i in 0..m.len() {
            assert_eq!(m.at(i, i), 1.0);
            for j in 0..m.len() {
                let ij = m.at(i, j);
                let ji = m.at(j, i);
                assert!(ij == ji || (ij.is_nan() && ji.is_nan()));
            }
        }
    }

    #[test]
    fn perfectly_linear_columns_correlate_to_one() {
        let m = matrix_of(vec![
            numbers("x", &[1.0, 2.0, 3.0]),
            numbers("double", &[2.0, 4.0, 6.0]),
        ]);
        assert!((m.get("x", "double").unwrap() - 1.0).abs() < EPS);

        let m = matrix_of(vec![
            numbers("x", &[1.0, 2.0, 3.0]),
            numbers("neg", &[3.0, 2.0, 1.0]),
        ]);
        assert!((m.get("x", "neg").unwrap() + 1.0).abs() < EPS);
    }

    #[test]
    fn zero_variance_column_yields_nan_off_diagonal() {
        let m = matrix_of(vec![
            numbers("flat", &[5.0, 5.0, 5.0]),
            numbers("x", &[1.0, 2.0, 3.0]),
        ]);
        assert!(m.get("flat", "x").unwrap().is_nan());
        assert_eq!(m.get("flat", "flat").unwrap(), 1.0);
    }

    #[test]
    fn missing_cells_drop_only_their_pairs() {
        let a = numbers("a", &[1.0, 2.0, 3.0, 4.0]);
        let b = Column::new(
            "b",
            vec![
                CellValue::Number(2.0),
                CellValue::Number(4.0),
                CellValue::Missing,
                CellValue::Number(8.0),
            ],
        );
        let m = matrix_of(vec![a, b]);
        // Over the three complete rows b == 2a exactly.
        assert!((m.get("a", "b").unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn categorical_columns_are_not_included() {
        let label = Column::new(
            "label",
            vec![CellValue::Text("u".into()), CellValue::Text("v".into())],
        );
        let m = matrix_of(vec![label, numbers("y", &[1.0, 2.0])]);
        assert_eq!(m.columns(), ["y"]);
        assert!(m.get("label", "y").is_none());
    }

    #[test]
    fn single_complete_pair_is_undefined() {
        let a = Column::new(
            "a",
            vec![CellValue::Number(1.0), CellValue::Missing],
        );
        let b = Column::new(
            "b",
            vec![CellValue::Number(2.0), CellValue::Number(3.0)],
        );
        let m = matrix_of(vec![a, b]);
        assert!(m.get("a", "b").unwrap().is_nan());
    }
}
