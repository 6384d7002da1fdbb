//! Prediction endpoint
//!
//! POST /predict - validate a patient record and return the classifier's
//! label and confidence

use axum::{Json, extract::State};
use heartwise_kernel::{Label, Prediction};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GatewayResult;
use crate::extract::PatientPayload;
use crate::state::AppState;

/// Response body for POST /predict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// `0` or `1`
    pub prediction: u8,
    /// Authoritative confidence in `[0, 1]`
    pub confidence: f64,
    pub label: Label,
    pub message: String,
    /// Confidence as a percentage rounded to two decimals; display only
    pub confidence_display: String,
    /// `[p0, p1]` as returned by the classifier
    pub probabilities: [f64; 2],
}

impl From<Prediction> for PredictionResponse {
    fn from(p: Prediction) -> Self {
        Self {
            prediction: p.label.as_u8(),
            confidence: p.confidence,
            label: p.label,
            message: p.label.message().to_string(),
            confidence_display: p.confidence_display(),
            probabilities: p.probabilities.as_array(),
        }
    }
}

/// POST /predict
pub async fn predict(
    State(state): State<AppState>,
    PatientPayload(payload): PatientPayload,
) -> GatewayResult<Json<PredictionResponse>> {
    let prediction = state.service.predict_value(&payload)?;

    info!(
        label = prediction.label.as_str(),
        confidence = prediction.confidence,
        "prediction served"
    );

    Ok(Json(prediction.into()))
}
