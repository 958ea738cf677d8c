use thiserror::Error;

use crate::data::schema::Schema;

use super::artifact::ModelArtifact;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The request cannot be served by the loaded model.
///
/// All variants are recoverable user-facing conditions: the dataset on
/// screen does not line up with the model's training layout, or the typed
/// values are unusable. Internally mis-sized vectors are a caller bug and
/// panic instead (see [`predict`]).
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("model expects {expected} features but the dataset has {got}")]
    ArityMismatch { expected: usize, got: usize },
    #[error("feature {index} is '{got}' but the model was fitted on '{expected}'")]
    NameMismatch {
        index: usize,
        expected: String,
        got: String,
    },
    #[error("value for '{column}' is not a finite number")]
    NonFinite { column: String },
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// One row of feature values paired with the column names they belong to.
///
/// Mirrors how the values are collected in the UI: one input per feature
/// column, in schema order.
#[derive(Debug, Clone)]
pub struct InputRecord {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl InputRecord {
    /// Panics if `columns` and `values` disagree in length. Both come from
    /// the same schema-ordered loop, so a mismatch is a programming error.
    pub fn new(columns: Vec<String>, values: Vec<f64>) -> InputRecord {
        assert_eq!(
            columns.len(),
            values.len(),
            "input record columns and values must pair up"
        );
        InputRecord { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Build an input record from the current dataset's feature columns.
pub fn record_from_schema(schema: &Schema, values: Vec<f64>) -> InputRecord {
    InputRecord::new(schema.feature_columns().to_vec(), values)
}

/// Run one prediction, refusing inputs the model was not fitted for.
///
/// The record's column names must match the artifact's feature list
/// pairwise and in order, and every value must be finite. Errors report
/// the first offending position.
pub fn predict(artifact: &ModelArtifact, record: &InputRecord) -> Result<f64, PredictError> {
    let expected = artifact.n_features();
    let got = record.columns().len();
    if got != expected {
        return Err(PredictError::ArityMismatch { expected, got });
    }
    for (index, (expected, got)) in artifact
        .features
        .iter()
        .zip(record.columns())
        .enumerate()
    {
        if expected != got {
            return Err(PredictError::NameMismatch {
                index,
                expected: expected.clone(),
                got: got.clone(),
            });
        }
    }
    for (column, value) in record.columns().iter().zip(record.values()) {
        if !value.is_finite() {
            return Err(PredictError::NonFinite {
                column: column.clone(),
            });
        }
    }
    Ok(artifact.estimator.evaluate(record.values()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{CellValue, Column, Table};
    use crate::predict::artifact::{Estimator, Stump};

    fn artifact() -> ModelArtifact {
        ModelArtifact {
            name: "unit".to_string(),
            features: vec!["area".to_string(), "rooms".to_string()],
            target: "price".to_string(),
            estimator: Estimator::Linear {
                intercept: 1.0,
                coefficients: vec![3.0, 10.0],
            },
        }
    }

    fn record(columns: &[&str], values: &[f64]) -> InputRecord {
        InputRecord::new(
            columns.iter().map(|c| c.to_string()).collect(),
            values.to_vec(),
        )
    }

    #[test]
    fn linear_prediction_is_exact() {
        let y = predict(&artifact(), &record(&["area", "rooms"], &[2.0, 0.5])).unwrap();
        assert!((y - 12.0).abs() < 1e-12);
    }

    #[test]
    fn stump_prediction_is_exact() {
        let artifact = ModelArtifact {
            name: "stumps".to_string(),
            features: vec!["x".to_string()],
            target: "y".to_string(),
            estimator: Estimator::Stumps {
                base: 100.0,
                stumps: vec![Stump {
                    feature: 0,
                    threshold: 0.0,
                    below: -10.0,
                    above: 10.0,
                }],
            },
        };
        let y = predict(&artifact, &record(&["x"], &[-1.0])).unwrap();
        assert!((y - 90.0).abs() < 1e-12);
    }

    #[test]
    fn wrong_feature_count_is_refused() {
        let err = predict(&artifact(), &record(&["area"], &[2.0])).unwrap_err();
        assert_eq!(
            err,
            PredictError::ArityMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn wrong_feature_name_is_refused() {
        let err = predict(&artifact(), &record(&["area", "floors"], &[2.0, 1.0])).unwrap_err();
        assert_eq!(
            err,
            PredictError::NameMismatch {
                index: 1,
                expected: "rooms".to_string(),
                got: "floors".to_string(),
            }
        );
    }

    #[test]
    fn non_finite_value_is_refused() {
        let err = predict(&artifact(), &record(&["area", "rooms"], &[f64::NAN, 1.0])).unwrap_err();
        assert_eq!(
            err,
            PredictError::NonFinite {
                column: "area".to_string()
            }
        );
    }

    #[test]
    #[should_panic(expected = "must pair up")]
    fn mismatched_record_is_a_caller_bug() {
        InputRecord::new(vec!["a".to_string()], vec![1.0, 2.0]);
    }

    #[test]
    fn column_means_round_trip_to_a_finite_prediction() {
        let number = |v: f64| CellValue::Number(v);
        let table = Table::new(vec![
            Column {
                name: "area".to_string(),
                cells: vec![number(50.0), number(70.0), CellValue::Missing],
            },
            Column {
                name: "rooms".to_string(),
                cells: vec![number(2.0), number(3.0), number(4.0)],
            },
            Column {
                name: "price".to_string(),
                cells: vec![number(150.0), number(210.0), number(260.0)],
            },
        ])
        .unwrap();
        let schema = Schema::derive(&table);
        let summary = crate::stats::summary::summarize(&table, &schema);

        let means: Vec<f64> = schema
            .feature_columns()
            .iter()
            .map(|name| summary.mean(name).unwrap())
            .collect();
        let record = record_from_schema(&schema, means);

        let y = predict(&artifact(), &record).unwrap();
        assert!(y.is_finite());
    }
}
