//! Canonical feature schema.
//!
//! [`Feature::ALL`] is the column order the classifier was trained with. Row
//! assembly always walks this list; the arrival order of keys in a request
//! payload never matters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of features in a patient record.
pub const FEATURE_COUNT: usize = 13;

/// Feature names in canonical (training) order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang", "oldpeak",
    "slope", "ca", "thal",
];

/// One clinical feature of the Cleveland heart-disease schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    /// Age in years.
    Age,
    /// 1 = male, 0 = female.
    Sex,
    /// Chest pain type.
    Cp,
    /// Resting blood pressure (mm Hg).
    Trestbps,
    /// Serum cholesterol (mg/dl).
    Chol,
    /// Fasting blood sugar > 120 mg/dl.
    Fbs,
    /// Resting ECG result.
    Restecg,
    /// Maximum heart rate achieved.
    Thalach,
    /// Exercise induced angina.
    Exang,
    /// ST depression induced by exercise relative to rest. Real-valued.
    Oldpeak,
    /// Slope of the peak exercise ST segment.
    Slope,
    /// Number of major vessels colored by fluoroscopy.
    Ca,
    /// Thalassemia code.
    Thal,
}

impl Feature {
    /// Every feature, in canonical order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Age,
        Feature::Sex,
        Feature::Cp,
        Feature::Trestbps,
        Feature::Chol,
        Feature::Fbs,
        Feature::Restecg,
        Feature::Thalach,
        Feature::Exang,
        Feature::Oldpeak,
        Feature::Slope,
        Feature::Ca,
        Feature::Thal,
    ];

    /// Position of this feature in a [`FeatureRow`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire name of the feature.
    pub const fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered numeric vector handed to a classifier.
///
/// Values are always finite: the only way to build a row from user input is
/// through [`PatientRecord`](crate::PatientRecord), which rejects NaN and
/// infinities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow([f64; FEATURE_COUNT]);

impl FeatureRow {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}
