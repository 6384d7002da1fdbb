//! Patient record validation and coercion.
//!
//! A raw payload is a JSON value. Validation runs before any row assembly:
//!
//! 1. the payload must be an object (`InvalidInput` otherwise);
//! 2. every canonical feature must be present and non-null
//!    (`MissingFeature`), checked in canonical order;
//! 3. every value must coerce to a finite `f64` (`InvalidFeatureValue`).
//!
//! Unknown keys are ignored.

use crate::error::InferenceError;
use crate::schema::{FEATURE_COUNT, Feature, FeatureRow};
use serde_json::{Map, Value};

/// A validated patient record: one finite value per canonical feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatientRecord {
    values: [f64; FEATURE_COUNT],
}

impl PatientRecord {
    /// Validate an arbitrary decoded payload.
    pub fn from_value(payload: &Value) -> Result<Self, InferenceError> {
        match payload {
            Value::Object(fields) => Self::from_fields(fields),
            Value::Null => Err(InferenceError::InvalidInput(
                "request body is empty".to_string(),
            )),
            other => Err(InferenceError::InvalidInput(format!(
                "expected a record of feature values, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Validate a key/value map.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, InferenceError> {
        let mut values = [0.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            let raw = match fields.get(feature.name()) {
                None | Some(Value::Null) => return Err(InferenceError::MissingFeature(feature)),
                Some(raw) => raw,
            };
            values[feature.index()] = coerce(feature, raw)?;
        }
        Ok(Self { values })
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    /// The record as a row in canonical order.
    pub fn to_row(&self) -> FeatureRow {
        FeatureRow::new(self.values)
    }
}

fn coerce(feature: Feature, raw: &Value) -> Result<f64, InferenceError> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    match parsed {
        Some(value) if value.is_finite() => Ok(value),
        _ => Err(InferenceError::InvalidFeatureValue {
            feature,
            raw: raw.to_string(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reference_payload() -> Value {
        json!({
            "age": 63, "sex": 1, "cp": 3, "trestbps": 145, "chol": 233, "fbs": 1,
            "restecg": 0, "thalach": 150, "exang": 0, "oldpeak": 2.3, "slope": 0,
            "ca": 0, "thal": 1
        })
    }

    #[test]
    fn builds_row_in_canonical_order() {
        let record = PatientRecord::from_value(&reference_payload()).unwrap();
        assert_eq!(
            record.to_row().values(),
            &[63.0, 1.0, 3.0, 145.0, 233.0, 1.0, 0.0, 150.0, 0.0, 2.3, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn key_order_does_not_matter() {
        let mut reversed = Map::new();
        let canonical = reference_payload();
        let fields = canonical.as_object().unwrap();
        for name in fields.keys().rev() {
            reversed.insert(name.clone(), fields[name].clone());
        }
        assert_eq!(
            PatientRecord::from_fields(&reversed).unwrap(),
            PatientRecord::from_value(&canonical).unwrap()
        );
    }

    #[test]
    fn every_missing_feature_is_reported_by_name() {
        for feature in Feature::ALL {
            let mut payload = reference_payload();
            payload.as_object_mut().unwrap().remove(feature.name());
            let err = PatientRecord::from_value(&payload).unwrap_err();
            assert_eq!(err, InferenceError::MissingFeature(feature));
        }
    }

    #[test]
    fn null_counts_as_missing() {
        let mut payload = reference_payload();
        payload["chol"] = Value::Null;
        assert_eq!(
            PatientRecord::from_value(&payload).unwrap_err(),
            InferenceError::MissingFeature(Feature::Chol)
        );
    }

    #[test]
    fn extra_keys_are_ignored() {
        let mut payload = reference_payload();
        payload["target"] = json!(1);
        payload["notes"] = json!({"free": "text"});
        assert_eq!(
            PatientRecord::from_value(&payload).unwrap(),
            PatientRecord::from_value(&reference_payload()).unwrap()
        );
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let mut payload = reference_payload();
        payload["age"] = json!("63");
        payload["oldpeak"] = json!(" 2.3 ");
        assert_eq!(
            PatientRecord::from_value(&payload).unwrap(),
            PatientRecord::from_value(&reference_payload()).unwrap()
        );
    }

    #[test]
    fn booleans_coerce_to_zero_and_one() {
        let mut payload = reference_payload();
        payload["fbs"] = json!(true);
        payload["exang"] = json!(false);
        let record = PatientRecord::from_value(&payload).unwrap();
        assert_eq!(record.get(Feature::Fbs), 1.0);
        assert_eq!(record.get(Feature::Exang), 0.0);
    }

    #[test]
    fn non_numeric_values_are_rejected_with_raw_value() {
        let cases = [
            (json!("abc"), "\"abc\""),
            (json!(""), "\"\""),
            (json!([1, 2]), "[1,2]"),
            (json!({"v": 1}), "{\"v\":1}"),
            (json!("NaN"), "\"NaN\""),
            (json!("inf"), "\"inf\""),
        ];
        for (value, raw) in cases {
            let mut payload = reference_payload();
            payload["age"] = value;
            assert_eq!(
                PatientRecord::from_value(&payload).unwrap_err(),
                InferenceError::InvalidFeatureValue {
                    feature: Feature::Age,
                    raw: raw.to_string(),
                }
            );
        }
    }

    #[test]
    fn first_failure_follows_canonical_order() {
        let mut payload = reference_payload();
        let fields = payload.as_object_mut().unwrap();
        fields.remove("thal");
        fields.insert("sex".into(), json!("male"));
        assert_eq!(
            PatientRecord::from_value(&payload).unwrap_err().feature(),
            Some(Feature::Sex)
        );
    }

    #[test]
    fn non_record_payloads_are_invalid_input() {
        for payload in [Value::Null, json!([1, 2, 3]), json!("age=63"), json!(42)] {
            assert!(matches!(
                PatientRecord::from_value(&payload),
                Err(InferenceError::InvalidInput(_))
            ));
        }
    }
}
