use super::table::Table;

// ---------------------------------------------------------------------------
// Schema – feature / target / numeric-column layout of a table
// ---------------------------------------------------------------------------

/// Derived description of a table's column layout.
///
/// The input file layout is assumed to place the prediction target in the
/// *last* column; every preceding column is a model feature. This is a
/// structural convention of the expected datasets, not something inferred
/// from the data, and callers preparing files must honour it.
///
/// A schema is a read-only view: it is derived fresh whenever a new table is
/// loaded and never mutated independently.
#[derive(Debug, Clone)]
pub struct Schema {
    feature_columns: Vec<String>,
    target_column: String,
    numeric_columns: Vec<String>,
}

impl Schema {
    /// Derive the schema from a loaded table.
    ///
    /// `numeric_columns` keeps the table's original column order and may
    /// include the target. A column qualifies only if every non-missing
    /// cell is numeric; one categorical cell excludes it.
    pub fn derive(table: &Table) -> Schema {
        let names: Vec<String> = table.column_names().map(str::to_string).collect();

        // Table construction guarantees at least one column.
        let (target_column, feature_columns) = match names.split_last() {
            Some((last, rest)) => (last.clone(), rest.to_vec()),
            None => unreachable!("Table always has at least one column"),
        };

        let numeric_columns = table
            .columns()
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.clone())
            .collect();

        Schema {
            feature_columns,
            target_column,
            numeric_columns,
        }
    }

    /// Model input columns, in file order (everything except the target).
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// The last column of the file.
    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    /// Columns whose non-missing cells are all numeric, in file order.
    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        self.numeric_columns.iter().any(|c| c == name)
    }

    /// True when every feature column is numeric, i.e. the table can seed a
    /// full prediction input row.
    pub fn features_all_numeric(&self) -> bool {
        self.feature_columns.iter().all(|c| self.is_numeric(c))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{CellValue, Column};

    fn numbers(name: &str, values: &[f64]) -> Column {
        Column::new(name, values.iter().map(|&v| CellValue::Number(v)).collect())
    }

    #[test]
    fn last_column_is_target() {
        let table = Table::new(vec![
            numbers("x1", &[1.0, 2.0]),
            numbers("x2", &[3.0, 4.0]),
            numbers("y", &[5.0, 6.0]),
        ])
        .unwrap();

        let schema = Schema::derive(&table);
        assert_eq!(schema.feature_columns(), ["x1", "x2"]);
        assert_eq!(schema.target_column(), "y");
        assert_eq!(schema.feature_columns().len(), table.n_cols() - 1);
    }

    #[test]
    fn one_categorical_cell_excludes_the_column() {
        let mixed = || {
            Column::new(
                "label",
                vec![
                    CellValue::Number(1.0),
                    CellValue::Text("two".into()),
                    CellValue::Number(3.0),
                ],
            )
        };

        // Categorical target: the features themselves stay usable.
        let table = Table::new(vec![numbers("a", &[1.0, 2.0, 3.0]), mixed()]).unwrap();
        let schema = Schema::derive(&table);
        assert_eq!(schema.numeric_columns(), ["a"]);
        assert!(!schema.is_numeric("label"));
        assert!(schema.features_all_numeric());

        // Categorical feature: no complete prediction input row exists.
        let table = Table::new(vec![mixed(), numbers("y", &[1.0, 2.0, 3.0])]).unwrap();
        let schema = Schema::derive(&table);
        assert!(!schema.features_all_numeric());
    }

    #[test]
    fn numeric_target_is_listed_as_numeric() {
        let table = Table::new(vec![
            numbers("x", &[1.0, 2.0]),
            numbers("y", &[10.0, 20.0]),
        ])
        .unwrap();

        let schema = Schema::derive(&table);
        assert!(schema.is_numeric("y"));
        assert_eq!(schema.numeric_columns(), ["x", "y"]);
    }

    #[test]
    fn missing_cells_do_not_break_numeric_detection() {
        let col = Column::new(
            "a",
            vec![CellValue::Number(1.0), CellValue::Missing],
        );
        let table = Table::new(vec![col, numbers("y", &[0.0, 0.0])]).unwrap();

        let schema = Schema::derive(&table);
        assert!(schema.is_numeric("a"));
    }

    #[test]
    fn single_column_table_has_no_features() {
        let table = Table::new(vec![numbers("y", &[1.0])]).unwrap();
        let schema = Schema::derive(&table);
        assert!(schema.feature_columns().is_empty());
        assert_eq!(schema.target_column(), "y");
        assert!(schema.features_all_numeric());
    }
}
