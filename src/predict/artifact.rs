use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The model artifact could not be located or deserialized.
///
/// Recoverable: the exploration tabs keep working without a model, only the
/// prediction capability stays disabled.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact not readable: {0}")]
    Io(#[from] std::io::Error),
    #[error("model artifact is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
    #[error("model artifact is inconsistent: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Estimator – the opaque fitted model
// ---------------------------------------------------------------------------

/// One regression stump: a single split on one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stump {
    pub feature: usize,
    pub threshold: f64,
    pub below: f64,
    pub above: f64,
}

/// The fitted estimator inside an artifact.
///
/// The dashboard treats this as a black box: given one ordered row of
/// feature values it produces one scalar. New kinds can be added without
/// touching any caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    /// `intercept + coefficients · x`
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    /// Additive one-split trees: `base + Σ (x[feature] < threshold ? below : above)`
    Stumps { base: f64, stumps: Vec<Stump> },
}

impl Estimator {
    /// Run inference on one row of feature values.
    ///
    /// The caller guarantees `values.len()` matches the artifact's feature
    /// list; [`ModelArtifact::load`] guarantees the estimator is consistent
    /// with that list.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        match self {
            Estimator::Linear {
                intercept,
                coefficients,
            } => {
                debug_assert_eq!(coefficients.len(), values.len());
                intercept
                    + coefficients
                        .iter()
                        .zip(values)
                        .map(|(c, v)| c * v)
                        .sum::<f64>()
            }
            Estimator::Stumps { base, stumps } => {
                base + stumps
                    .iter()
                    .map(|s| {
                        if values[s.feature] < s.threshold {
                            s.below
                        } else {
                            s.above
                        }
                    })
                    .sum::<f64>()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ModelArtifact – serialized form
// ---------------------------------------------------------------------------

/// A pre-fitted regression model, loaded once and never mutated.
///
/// `features` records the training-time column names in order; predictions
/// are only served for datasets whose feature layout matches (see
/// [`engine::predict`](super::engine::predict)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Human-readable label shown in the UI, e.g. `"ridge-2024-11"`.
    pub name: String,
    pub features: Vec<String>,
    pub target: String,
    pub estimator: Estimator,
}

impl ModelArtifact {
    /// Deserialize an artifact from a JSON file and check its internal
    /// consistency.
    pub fn load(path: &Path) -> Result<ModelArtifact, ArtifactError> {
        let text = fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_json::from_str(&text)?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Serialize to pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        match &self.estimator {
            Estimator::Linear { coefficients, .. } => {
                if coefficients.len() != self.features.len() {
                    return Err(ArtifactError::Invalid(format!(
                        "{} coefficients for {} features",
                        coefficients.len(),
                        self.features.len()
                    )));
                }
            }
            Estimator::Stumps { stumps, .. } => {
                if let Some(s) = stumps.iter().find(|s| s.feature >= self.features.len()) {
                    return Err(ArtifactError::Invalid(format!(
                        "stump references feature index {} but the artifact has {} features",
                        s.feature,
                        self.features.len()
                    )));
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_artifact() -> ModelArtifact {
        ModelArtifact {
            name: "test-linear".to_string(),
            features: vec!["area".to_string(), "rooms".to_string()],
            target: "price".to_string(),
            estimator: Estimator::Linear {
                intercept: 10.0,
                coefficients: vec![2.0, -0.5],
            },
        }
    }

    #[test]
    fn save_then_load_preserves_contents() {
        let original = linear_artifact();
        let path = std::env::temp_dir().join("inferboard_artifact_round_trip.json");

        original.save(&path).expect("save");
        let loaded = ModelArtifact::load(&path).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, original);
    }

    #[test]
    fn missing_file_is_reported_not_fatal() {
        let path = Path::new("/nonexistent/inferboard/model.json");
        assert!(matches!(
            ModelArtifact::load(path),
            Err(ArtifactError::Io(_))
        ));
    }

    #[test]
    fn garbage_json_is_rejected() {
        let path = std::env::temp_dir().join("inferboard_artifact_garbage.json");
        std::fs::write(&path, b"{ not json ]").unwrap();
        let result = ModelArtifact::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ArtifactError::Format(_))));
    }

    #[test]
    fn coefficient_count_must_match_features() {
        let mut artifact = linear_artifact();
        artifact.estimator = Estimator::Linear {
            intercept: 0.0,
            coefficients: vec![1.0],
        };
        let path = std::env::temp_dir().join("inferboard_artifact_inconsistent.json");
        std::fs::write(&path, serde_json::to_string(&artifact).unwrap()).unwrap();
        let result = ModelArtifact::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ArtifactError::Invalid(_))));
    }

    #[test]
    fn stump_feature_index_must_be_in_range() {
        let artifact = ModelArtifact {
            name: "test-stumps".to_string(),
            features: vec!["a".to_string()],
            target: "y".to_string(),
            estimator: Estimator::Stumps {
                base: 0.0,
                stumps: vec![Stump {
                    feature: 3,
                    threshold: 0.0,
                    below: -1.0,
                    above: 1.0,
                }],
            },
        };
        let path = std::env::temp_dir().join("inferboard_artifact_bad_stump.json");
        std::fs::write(&path, serde_json::to_string(&artifact).unwrap()).unwrap();
        let result = ModelArtifact::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ArtifactError::Invalid(_))));
    }

    #[test]
    fn wire_format_is_stable() {
        // Layout emitted by the generate_sample binary.
        let text = r#"{
            "name": "sample-linear",
            "features": ["area", "rooms"],
            "target": "price",
            "estimator": {
                "kind": "linear",
                "intercept": 40.0,
                "coefficients": [2.5, 12.0]
            }
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(text).unwrap();
        assert_eq!(artifact.target, "price");
        assert_eq!(
            artifact.estimator,
            Estimator::Linear {
                intercept: 40.0,
                coefficients: vec![2.5, 12.0],
            }
        );
    }

    #[test]
    fn linear_evaluation() {
        let artifact = linear_artifact();
        let y = artifact.estimator.evaluate(&[100.0, 4.0]);
        assert!((y - (10.0 + 200.0 - 2.0)).abs() < 1e-12);
    }

    #[test]
    fn stump_evaluation_branches_on_threshold() {
        let estimator = Estimator::Stumps {
            base: 1.0,
            stumps: vec![
                Stump {
                    feature: 0,
                    threshold: 5.0,
                    below: -2.0,
                    above: 2.0,
                },
                Stump {
                    feature: 1,
                    threshold: 0.0,
                    below: 0.5,
                    above: -0.5,
                },
            ],
        };
        assert!((estimator.evaluate(&[3.0, 1.0]) - (1.0 - 2.0 - 0.5)).abs() < 1e-12);
        assert!((estimator.evaluate(&[7.0, -1.0]) - (1.0 + 2.0 + 0.5)).abs() < 1e-12);
    }
}
