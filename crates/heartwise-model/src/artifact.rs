//! Classifier artifact format and loading.
//!
//! An artifact is a JSON document tagged by `kind`. It must carry the
//! `feature_names` it was trained on, and they must match the canonical
//! schema exactly, in order:
//!
//! ```json
//! {
//!   "kind": "logistic_regression",
//!   "feature_names": ["age", "sex", "cp", "trestbps", "chol", "fbs", "restecg",
//!                     "thalach", "exang", "oldpeak", "slope", "ca", "thal"],
//!   "coefficients": [0.1, ...],
//!   "intercept": -0.3,
//!   "scaler": { "mean": [...], "scale": [...] }
//! }
//! ```

use crate::error::{ModelError, ModelResult};
use crate::forest::RandomForest;
use crate::logistic::LogisticRegression;
use chrono::{DateTime, Utc};
use heartwise_kernel::{Classifier, FEATURE_NAMES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Model payload, one variant per supported family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression {
        feature_names: Vec<String>,
        #[serde(flatten)]
        model: LogisticRegression,
    },
    RandomForest {
        feature_names: Vec<String>,
        #[serde(flatten)]
        model: RandomForest,
    },
}

impl ModelArtifact {
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        let artifact: Self = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::LogisticRegression { .. } => LogisticRegression::KIND,
            ModelArtifact::RandomForest { .. } => RandomForest::KIND,
        }
    }

    pub fn feature_names(&self) -> &[String] {
        match self {
            ModelArtifact::LogisticRegression { feature_names, .. }
            | ModelArtifact::RandomForest { feature_names, .. } => feature_names,
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        let names = self.feature_names();
        if names.len() != FEATURE_NAMES.len() || names.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b)
        {
            return Err(ModelError::Invalid(format!(
                "feature_names {names:?} do not match the canonical order {FEATURE_NAMES:?}"
            )));
        }
        match self {
            ModelArtifact::LogisticRegression { model, .. } => model.validate(),
            ModelArtifact::RandomForest { model, .. } => model.validate(),
        }
    }

    pub fn into_classifier(self) -> Arc<dyn Classifier> {
        match self {
            ModelArtifact::LogisticRegression { model, .. } => Arc::new(model),
            ModelArtifact::RandomForest { model, .. } => Arc::new(model),
        }
    }
}

/// Where a classifier came from, for readiness reporting.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub kind: String,
    pub path: PathBuf,
    pub loaded_at: DateTime<Utc>,
}

/// A classifier together with its provenance.
#[derive(Clone)]
pub struct LoadedModel {
    pub classifier: Arc<dyn Classifier>,
    pub info: ModelInfo,
}

impl LoadedModel {
    /// Wrap an already constructed classifier, stamping it as loaded now.
    pub fn from_classifier(classifier: Arc<dyn Classifier>, path: impl Into<PathBuf>) -> Self {
        let info = ModelInfo {
            kind: classifier.kind().to_string(),
            path: path.into(),
            loaded_at: Utc::now(),
        };
        Self { classifier, info }
    }
}

/// Read, parse and validate the artifact at `path`.
pub fn load_model(path: impl AsRef<Path>) -> ModelResult<LoadedModel> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading model artifact");
    let json = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact = ModelArtifact::from_json_str(&json)?;
    info!(path = %path.display(), kind = artifact.kind(), "model artifact loaded");

    Ok(LoadedModel::from_classifier(artifact.into_classifier(), path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartwise_kernel::{FEATURE_COUNT, FeatureRow, Label};
    use serde_json::{Value, json};
    use std::io::Write;

    fn logistic_json() -> Value {
        json!({
            "kind": "logistic_regression",
            "feature_names": FEATURE_NAMES,
            "coefficients": vec![0.0; FEATURE_COUNT],
            "intercept": 1.0
        })
    }

    fn forest_json() -> Value {
        json!({
            "kind": "random_forest",
            "feature_names": FEATURE_NAMES,
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [11, -2, -2],
                "threshold": [0.5, -2.0, -2.0],
                "value": [[0.0, 0.0], [40.0, 10.0], [5.0, 45.0]]
            }]
        })
    }

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write artifact");
        file
    }

    #[test]
    fn loads_logistic_artifact_from_disk() {
        let file = write_temp(&logistic_json().to_string());
        let model = load_model(file.path()).unwrap();
        assert_eq!(model.info.kind, "logistic_regression");
        assert_eq!(model.info.path, file.path());
        assert_eq!(model.classifier.kind(), "logistic_regression");
        let row = FeatureRow::new([0.0; FEATURE_COUNT]);
        assert_eq!(model.classifier.predict(&row).unwrap(), Label::Positive);
    }

    #[test]
    fn loads_forest_artifact() {
        let artifact = ModelArtifact::from_json_str(&forest_json().to_string()).unwrap();
        assert_eq!(artifact.kind(), "random_forest");
        let classifier = artifact.into_classifier();
        let row = FeatureRow::new([0.0; FEATURE_COUNT]);
        let p = classifier.predict_proba(&row).unwrap();
        assert!((p.positive - 0.2).abs() < 1e-12);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(dir.path().join("absent.json")).err().unwrap();
        assert!(matches!(err, ModelError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let file = write_temp("not json at all");
        assert!(matches!(load_model(file.path()), Err(ModelError::Parse(_))));
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let mut artifact = logistic_json();
        artifact["kind"] = json!("gradient_boosting");
        assert!(matches!(
            ModelArtifact::from_json_str(&artifact.to_string()),
            Err(ModelError::Parse(_))
        ));
    }

    #[test]
    fn feature_order_must_match_training_schema() {
        let mut names: Vec<&str> = FEATURE_NAMES.to_vec();
        names.swap(0, 1);
        let mut artifact = logistic_json();
        artifact["feature_names"] = json!(names);
        let err = ModelArtifact::from_json_str(&artifact.to_string()).unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));

        let mut artifact = logistic_json();
        artifact["feature_names"] = json!(&FEATURE_NAMES[..12]);
        assert!(ModelArtifact::from_json_str(&artifact.to_string()).is_err());
    }

    #[test]
    fn invalid_model_parameters_are_rejected() {
        let mut artifact = logistic_json();
        artifact["coefficients"] = json!([1.0, 2.0]);
        assert!(matches!(
            ModelArtifact::from_json_str(&artifact.to_string()),
            Err(ModelError::Invalid(_))
        ));

        let mut artifact = forest_json();
        artifact["trees"][0]["feature"][0] = json!(13);
        assert!(matches!(
            ModelArtifact::from_json_str(&artifact.to_string()),
            Err(ModelError::Invalid(_))
        ));
    }
}
