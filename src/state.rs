use std::path::Path;

use crate::data::schema::Schema;
use crate::data::table::Table;
use crate::predict::artifact::ModelArtifact;
use crate::predict::engine;
use crate::stats::correlation::{CorrelationMatrix, correlate};
use crate::stats::density::{Distribution, DistributionError};
use crate::stats::summary::{StatsSummary, summarize};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Statistics,
    Correlation,
    Distribution,
    Predict,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Statistics,
        Tab::Correlation,
        Tab::Distribution,
        Tab::Predict,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Statistics => "Statistics",
            Tab::Correlation => "Correlation",
            Tab::Distribution => "Distribution",
            Tab::Predict => "Predict",
        }
    }
}

// ---------------------------------------------------------------------------
// Session – everything derived from one uploaded dataset
// ---------------------------------------------------------------------------

/// The per-upload ownership unit. Created whole from a freshly loaded
/// [`Table`] and replaced whole on the next upload; derived results are
/// computed once here, never per frame.
pub struct Session {
    pub table: Table,
    pub schema: Schema,
    pub summary: StatsSummary,
    pub correlation: CorrelationMatrix,

    /// Column shown in the Distribution tab.
    pub selected_column: Option<String>,
    /// Cached histogram + density for `selected_column`.
    pub distribution: Option<Distribution>,

    /// One value per feature column, seeded with the column means.
    pub inputs: Vec<f64>,
    pub last_prediction: Option<f64>,
}

impl Session {
    pub fn new(table: Table) -> Session {
        let schema = Schema::derive(&table);
        let summary = summarize(&table, &schema);
        let correlation = correlate(&table, &schema);

        // One entry per feature column; columns with no defined mean
        // (all missing, or categorical) seed as zero.
        let inputs: Vec<f64> = schema
            .feature_columns()
            .iter()
            .map(|name| summary.mean(name).unwrap_or(0.0))
            .collect();

        let selected_column = schema.numeric_columns().first().cloned();

        let mut session = Session {
            table,
            schema,
            summary,
            correlation,
            selected_column,
            distribution: None,
            inputs,
            last_prediction: None,
        };
        if let Err(e) = session.resample() {
            log::warn!("default distribution unavailable: {e}");
        }
        session
    }

    /// Switch the Distribution tab to another column and rebuild its plot
    /// data.
    pub fn select_column(&mut self, name: String) -> Result<(), DistributionError> {
        self.selected_column = Some(name);
        self.resample()
    }

    fn resample(&mut self) -> Result<(), DistributionError> {
        self.distribution = None;
        if let Some(name) = self.selected_column.clone() {
            self.distribution = Some(Distribution::sample(&self.table, &self.schema, &name)?);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Model slot
// ---------------------------------------------------------------------------

/// App-lifetime holder for the model artifact.
///
/// A successful load is final for the run; only a failed attempt may be
/// retried. Dataset reloads never touch the slot.
pub enum ModelSlot {
    Empty,
    Loaded(ModelArtifact),
    Failed(String),
}

impl ModelSlot {
    pub fn artifact(&self) -> Option<&ModelArtifact> {
        match self {
            ModelSlot::Loaded(artifact) => Some(artifact),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelSlot::Loaded(_))
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset and everything derived from it (None until the user
    /// opens a file).
    pub session: Option<Session>,

    pub model: ModelSlot,

    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: None,
            model: ModelSlot::Empty,
            tab: Tab::Statistics,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, replacing any previous session. The
    /// model slot is dataset-independent and survives.
    pub fn set_dataset(&mut self, table: Table) {
        self.session = Some(Session::new(table));
        self.status_message = None;
    }

    /// Load the model artifact from disk into the slot.
    pub fn load_model(&mut self, path: &Path) {
        if let ModelSlot::Loaded(artifact) = &self.model {
            log::warn!("model '{}' already loaded; ignoring {}", artifact.name, path.display());
            return;
        }
        match ModelArtifact::load(path) {
            Ok(artifact) => {
                log::info!(
                    "loaded model '{}' ({} features, target '{}')",
                    artifact.name,
                    artifact.n_features(),
                    artifact.target
                );
                self.status_message = None;
                self.model = ModelSlot::Loaded(artifact);
            }
            Err(e) => {
                log::error!("failed to load model from {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                self.model = ModelSlot::Failed(e.to_string());
            }
        }
    }

    /// Run one prediction from the current input values.
    pub fn run_prediction(&mut self) {
        let artifact = match &self.model {
            ModelSlot::Loaded(artifact) => artifact,
            _ => return,
        };
        let Some(session) = &mut self.session else {
            return;
        };

        let record = engine::record_from_schema(&session.schema, session.inputs.clone());
        match engine::predict(artifact, &record) {
            Ok(value) => {
                log::info!("predicted {} = {value}", artifact.target);
                session.last_prediction = Some(value);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("prediction refused: {e}");
                session.last_prediction = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{CellValue, Column};
    use crate::predict::artifact::Estimator;

    fn numeric_table() -> Table {
        let number = |v: f64| CellValue::Number(v);
        Table::new(vec![
            Column::new("x1", vec![number(1.0), number(2.0), number(3.0)]),
            Column::new("x2", vec![number(2.0), number(4.0), number(6.0)]),
            Column::new("y", vec![number(10.0), number(20.0), number(30.0)]),
        ])
        .unwrap()
    }

    fn matching_artifact() -> ModelArtifact {
        ModelArtifact {
            name: "unit".to_string(),
            features: vec!["x1".to_string(), "x2".to_string()],
            target: "y".to_string(),
            estimator: Estimator::Linear {
                intercept: 0.0,
                coefficients: vec![2.0, 4.0],
            },
        }
    }

    #[test]
    fn session_seeds_inputs_with_column_means() {
        let session = Session::new(numeric_table());
        assert_eq!(session.inputs, vec![2.0, 4.0]);
        assert_eq!(session.selected_column.as_deref(), Some("x1"));
        assert!(session.distribution.is_some());
    }

    #[test]
    fn new_dataset_replaces_session_but_keeps_model() {
        let mut state = AppState::default();
        state.model = ModelSlot::Loaded(matching_artifact());

        state.set_dataset(numeric_table());
        state.run_prediction();
        assert!(state.session.as_ref().unwrap().last_prediction.is_some());

        state.set_dataset(numeric_table());
        assert!(state.session.as_ref().unwrap().last_prediction.is_none());
        assert!(state.model.is_loaded());
    }

    #[test]
    fn model_loads_at_most_once_per_run() {
        let first = matching_artifact();
        let mut second = matching_artifact();
        second.name = "other".to_string();

        let dir = std::env::temp_dir();
        let first_path = dir.join("inferboard_state_first.json");
        let second_path = dir.join("inferboard_state_second.json");
        first.save(&first_path).unwrap();
        second.save(&second_path).unwrap();

        let mut state = AppState::default();
        state.load_model(&first_path);
        state.load_model(&second_path);
        std::fs::remove_file(&first_path).ok();
        std::fs::remove_file(&second_path).ok();

        assert_eq!(state.model.artifact().unwrap().name, "unit");
    }

    #[test]
    fn failed_model_load_can_be_retried() {
        let mut state = AppState::default();
        state.load_model(Path::new("/nonexistent/model.json"));
        assert!(matches!(state.model, ModelSlot::Failed(_)));
        assert!(state.status_message.is_some());

        // Exploration is unaffected by the failed load.
        state.set_dataset(numeric_table());
        let session = state.session.as_ref().unwrap();
        assert!(!session.summary.is_empty());
        assert_eq!(session.correlation.len(), 3);

        let path = std::env::temp_dir().join("inferboard_state_retry.json");
        matching_artifact().save(&path).unwrap();
        state.load_model(&path);
        std::fs::remove_file(&path).ok();

        assert!(state.model.is_loaded());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn prediction_with_mean_inputs_is_finite() {
        let mut state = AppState::default();
        state.model = ModelSlot::Loaded(matching_artifact());
        state.set_dataset(numeric_table());

        state.run_prediction();

        let session = state.session.as_ref().unwrap();
        let value = session.last_prediction.unwrap();
        assert!(value.is_finite());
        assert!((value - 20.0).abs() < 1e-12);
    }

    #[test]
    fn prediction_against_foreign_model_sets_status() {
        let mut artifact = matching_artifact();
        artifact.features = vec!["a".to_string(), "b".to_string()];

        let mut state = AppState::default();
        state.model = ModelSlot::Loaded(artifact);
        state.set_dataset(numeric_table());

        state.run_prediction();

        assert!(state.session.as_ref().unwrap().last_prediction.is_none());
        assert!(state.status_message.is_some());
    }
}
