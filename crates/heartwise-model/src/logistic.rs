//! Logistic regression with an optional standard scaler.
//!
//! `p1 = sigmoid(intercept + Σ coefᵢ · (xᵢ − meanᵢ) / scaleᵢ)`

use crate::error::{ModelError, ModelResult};
use heartwise_kernel::{
    ClassProbabilities, Classifier, ClassifierError, FEATURE_COUNT, FeatureRow, Label,
};
use serde::{Deserialize, Serialize};

/// Per-feature standardisation applied before the linear term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    fn validate(&self) -> ModelResult<()> {
        expect_len("scaler.mean", &self.mean)?;
        expect_len("scaler.scale", &self.scale)?;
        expect_finite("scaler.mean", &self.mean)?;
        expect_finite("scaler.scale", &self.scale)?;
        if let Some(i) = self.scale.iter().position(|s| *s == 0.0) {
            return Err(ModelError::Invalid(format!("scaler.scale[{i}] is zero")));
        }
        Ok(())
    }

    fn transform(&self, i: usize, x: f64) -> f64 {
        (x - self.mean[i]) / self.scale[i]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<StandardScaler>,
}

impl LogisticRegression {
    pub const KIND: &'static str = "logistic_regression";

    /// Build a validated model.
    pub fn new(
        coefficients: Vec<f64>,
        intercept: f64,
        scaler: Option<StandardScaler>,
    ) -> ModelResult<Self> {
        let model = Self {
            coefficients,
            intercept,
            scaler,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> ModelResult<()> {
        expect_len("coefficients", &self.coefficients)?;
        expect_finite("coefficients", &self.coefficients)?;
        if !self.intercept.is_finite() {
            return Err(ModelError::Invalid("intercept is not finite".into()));
        }
        if let Some(scaler) = &self.scaler {
            scaler.validate()?;
        }
        Ok(())
    }

    /// Linear term before the sigmoid.
    ///
    /// Extreme inputs may overflow to `±inf`, which the sigmoid saturates.
    /// `NaN` means opposing infinite contributions and has no defined class.
    pub fn decision_function(&self, row: &FeatureRow) -> f64 {
        let linear: f64 = row
            .as_slice()
            .iter()
            .enumerate()
            .zip(&self.coefficients)
            .map(|((i, x), coef)| {
                let x = match &self.scaler {
                    Some(scaler) => scaler.transform(i, *x),
                    None => *x,
                };
                coef * x
            })
            .sum();
        self.intercept + linear
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn predict(&self, row: &FeatureRow) -> Result<Label, ClassifierError> {
        Ok(Label::from_probabilities(&self.predict_proba(row)?))
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<ClassProbabilities, ClassifierError> {
        let z = self.decision_function(row);
        if z.is_nan() {
            return Err(ClassifierError::NonFinite(format!("decision function = {z}")));
        }
        Ok(ClassProbabilities::from_positive(sigmoid(z)))
    }
}

/// Numerically stable logistic function, saturating to 0 and 1 at `∓inf`.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

pub(crate) fn expect_len(field: &str, values: &[f64]) -> ModelResult<()> {
    if values.len() != FEATURE_COUNT {
        return Err(ModelError::Invalid(format!(
            "{field} has {} entries, expected {FEATURE_COUNT}",
            values.len()
        )));
    }
    Ok(())
}

fn expect_finite(field: &str, values: &[f64]) -> ModelResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ModelError::Invalid(format!("{field}[{i}] is not finite"))),
        None => Ok(()),
    }
}
