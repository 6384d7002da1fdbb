//! Classifier contract.
//!
//! A [`Classifier`] is loaded once at startup and shared read-only by every
//! request, so implementations must be `Send + Sync` and must not mutate
//! themselves while predicting.

use crate::schema::FeatureRow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Binary class predicted by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// No heart disease detected (class `0`).
    Negative,
    /// Heart disease detected (class `1`).
    Positive,
}

impl Label {
    /// Class index as emitted on the wire.
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Negative => "negative",
            Label::Positive => "positive",
        }
    }

    /// Human-readable result line.
    pub fn message(self) -> &'static str {
        match self {
            Label::Negative => "No Heart Disease Detected",
            Label::Positive => "Heart Disease Detected",
        }
    }

    /// The more probable class. Ties go to [`Label::Positive`].
    pub fn from_probabilities(probabilities: &ClassProbabilities) -> Self {
        if probabilities.positive >= probabilities.negative {
            Label::Positive
        } else {
            Label::Negative
        }
    }
}

/// Class-probability vector `[p0, p1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ClassProbabilities {
    pub negative: f64,
    pub positive: f64,
}

impl ClassProbabilities {
    /// Largest tolerated deviation of `p0 + p1` from 1.
    pub const SUM_TOLERANCE: f64 = 1e-6;

    pub fn new(negative: f64, positive: f64) -> Self {
        Self { negative, positive }
    }

    pub fn from_positive(positive: f64) -> Self {
        Self::new(1.0 - positive, positive)
    }

    /// Probability assigned to `label`.
    pub fn of(&self, label: Label) -> f64 {
        match label {
            Label::Negative => self.negative,
            Label::Positive => self.positive,
        }
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.negative, self.positive]
    }

    /// Check that the vector is a proper distribution over two classes.
    pub fn validate(&self) -> Result<(), String> {
        for (class, p) in [("p0", self.negative), ("p1", self.positive)] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(format!("{class} = {p} is not a probability"));
            }
        }
        let sum = self.negative + self.positive;
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(format!("probabilities sum to {sum}, expected 1"));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for ClassProbabilities {
    fn from([negative, positive]: [f64; 2]) -> Self {
        Self::new(negative, positive)
    }
}

impl From<ClassProbabilities> for [f64; 2] {
    fn from(p: ClassProbabilities) -> Self {
        p.as_array()
    }
}

/// Failure reported by a classifier implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("classifier produced a non-finite value: {0}")]
    NonFinite(String),

    #[error("{0}")]
    Internal(String),
}

/// A pre-trained binary classifier over a [`FeatureRow`].
pub trait Classifier: Send + Sync {
    /// Short identifier of the model family, e.g. `"logistic_regression"`.
    fn kind(&self) -> &str;

    fn predict(&self, row: &FeatureRow) -> Result<Label, ClassifierError>;

    fn predict_proba(&self, row: &FeatureRow) -> Result<ClassProbabilities, ClassifierError>;
}
