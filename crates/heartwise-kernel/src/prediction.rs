//! Prediction results and the confidence policy.

use crate::classifier::{ClassProbabilities, Label};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the confidence score is derived from `[p0, p1]`.
///
/// Chosen once at startup and applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidencePolicy {
    /// Probability of the predicted class (`p1` if positive, else `p0`).
    #[default]
    PredictedClass,
    /// Always `p1`, regardless of the predicted label.
    PositiveClass,
}

impl ConfidencePolicy {
    pub fn confidence(self, label: Label, probabilities: &ClassProbabilities) -> f64 {
        match self {
            ConfidencePolicy::PredictedClass => probabilities.of(label),
            ConfidencePolicy::PositiveClass => probabilities.positive,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidencePolicy::PredictedClass => "predicted_class",
            ConfidencePolicy::PositiveClass => "positive_class",
        }
    }
}

impl fmt::Display for ConfidencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown confidence policy '{0}' (expected 'predicted_class' or 'positive_class')")]
pub struct ParsePolicyError(pub String);

impl FromStr for ConfidencePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "predicted_class" | "predicted" => Ok(ConfidencePolicy::PredictedClass),
            "positive_class" | "positive" => Ok(ConfidencePolicy::PositiveClass),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Outcome of one inference call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// Authoritative confidence in `[0, 1]`.
    pub confidence: f64,
    pub probabilities: ClassProbabilities,
}

impl Prediction {
    /// Confidence as a percentage with two decimals, e.g. `"87.35%"`.
    /// Display only; [`Prediction::confidence`] is the real value.
    pub fn confidence_display(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}
