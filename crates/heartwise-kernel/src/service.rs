//! The inference pipeline: validate → classify → confidence.

use crate::classifier::{ClassProbabilities, Classifier, ClassifierError, Label};
use crate::error::InferenceError;
use crate::prediction::{ConfidencePolicy, Prediction};
use crate::record::PatientRecord;
use crate::schema::FeatureRow;
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

/// Stateless prediction service around a shared, read-only classifier.
#[derive(Clone)]
pub struct PredictionService {
    classifier: Arc<dyn Classifier>,
    policy: ConfidencePolicy,
}

impl PredictionService {
    pub fn new(classifier: Arc<dyn Classifier>, policy: ConfidencePolicy) -> Self {
        Self { classifier, policy }
    }

    pub fn policy(&self) -> ConfidencePolicy {
        self.policy
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Validate a raw payload and run inference on it.
    pub fn predict_value(&self, payload: &Value) -> Result<Prediction, InferenceError> {
        let record = PatientRecord::from_value(payload)?;
        self.predict(&record)
    }

    /// Run inference on an already validated record.
    pub fn predict(&self, record: &PatientRecord) -> Result<Prediction, InferenceError> {
        let (reported, probabilities) = self.classify(&record.to_row())?;
        probabilities
            .validate()
            .map_err(InferenceError::ClassifierFailure)?;

        // The probability vector is authoritative so that label and
        // confidence always describe the same class.
        let label = Label::from_probabilities(&probabilities);
        if reported != label {
            warn!(
                kind = self.classifier.kind(),
                reported = reported.as_str(),
                label = label.as_str(),
                p0 = probabilities.negative,
                p1 = probabilities.positive,
                "classifier label disagrees with its probability vector"
            );
        }

        Ok(Prediction {
            label,
            confidence: self.policy.confidence(label, &probabilities),
            probabilities,
        })
    }

    fn classify(&self, row: &FeatureRow) -> Result<(Label, ClassProbabilities), InferenceError> {
        let classifier = self.classifier.as_ref();
        // A panicking model must not take the worker down with it.
        let outcome = panic::catch_unwind(AssertUnwindSafe(
            || -> Result<_, ClassifierError> {
                Ok((classifier.predict(row)?, classifier.predict_proba(row)?))
            },
        ));
        match outcome {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(err)) => Err(InferenceError::ClassifierFailure(err.to_string())),
            Err(payload) => Err(InferenceError::ClassifierFailure(format!(
                "classifier panicked: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}
