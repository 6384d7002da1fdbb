//! Gateway error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use heartwise_kernel::InferenceError;
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Message returned for internal failures; the detail only goes to the log.
const INTERNAL_MESSAGE: &str = "the classifier failed to produce a prediction";

/// Gateway-level errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("request body exceeds the configured size limit")]
    PayloadTooLarge,
}

impl GatewayError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        GatewayError::Inference(InferenceError::InvalidInput(reason.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Inference(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            GatewayError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Inference(e) => e.code(),
            GatewayError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut error = Map::new();
        error.insert("code".into(), json!(self.code()));

        match &self {
            GatewayError::Inference(InferenceError::ClassifierFailure(detail)) => {
                tracing::error!(code = self.code(), detail = %detail, "inference failed");
                error.insert("message".into(), json!(INTERNAL_MESSAGE));
            }
            GatewayError::Inference(e) => {
                tracing::warn!(code = self.code(), error = %e, "rejected prediction request");
                error.insert("message".into(), json!(e.to_string()));
                if let Some(feature) = e.feature() {
                    error.insert("field".into(), json!(feature.name()));
                }
                if let InferenceError::InvalidFeatureValue { raw, .. } = e {
                    error.insert("value".into(), json!(raw));
                }
            }
            GatewayError::PayloadTooLarge => {
                tracing::warn!(code = self.code(), "rejected oversized request body");
                error.insert("message".into(), json!(self.to_string()));
            }
        }

        (status, Json(json!({ "error": Value::Object(error) }))).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
