//! Inference error taxonomy.
//!
//! Every failure of the inference pipeline is one of four variants. Callers
//! branch on the variant (or on [`InferenceError::code`]), never on the
//! message text.

use crate::schema::Feature;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InferenceError {
    /// The payload is absent, not a record, or not decodable as key/value
    /// pairs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required feature is absent (or explicitly `null`).
    #[error("missing required feature '{0}'")]
    MissingFeature(Feature),

    /// A feature value cannot be coerced to a finite number.
    #[error("feature '{feature}' has non-numeric value {raw}")]
    InvalidFeatureValue { feature: Feature, raw: String },

    /// The classifier itself failed. The detail is for logs only.
    #[error("classifier failure: {0}")]
    ClassifierFailure(String),
}

impl InferenceError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            InferenceError::InvalidInput(_) => "INVALID_INPUT",
            InferenceError::MissingFeature(_) => "MISSING_FEATURE",
            InferenceError::InvalidFeatureValue { .. } => "INVALID_FEATURE_VALUE",
            InferenceError::ClassifierFailure(_) => "CLASSIFIER_FAILURE",
        }
    }

    /// `true` when the caller sent something wrong; `false` for internal
    /// failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, InferenceError::ClassifierFailure(_))
    }

    /// The offending feature, if the error is about one.
    pub fn feature(&self) -> Option<Feature> {
        match self {
            InferenceError::MissingFeature(feature)
            | InferenceError::InvalidFeatureValue { feature, .. } => Some(*feature),
            _ => None,
        }
    }
}
