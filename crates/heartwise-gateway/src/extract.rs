//! Request body extractor for prediction payloads.
//!
//! Accepts `application/json` (also assumed when no content type is sent,
//! including `+json` suffixed types) and `application/x-www-form-urlencoded`.
//! Both decode into a [`serde_json::Value`]; deciding whether that value is
//! a valid patient record is left to the kernel. An empty body of either
//! kind decodes to `Value::Null`.

use axum::{
    Form,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::GatewayError;

/// Decoded prediction payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientPayload(pub Value);

enum BodyFormat {
    Json,
    Form,
}

fn body_format(content_type: Option<&str>) -> Result<BodyFormat, GatewayError> {
    let Some(content_type) = content_type else {
        return Ok(BodyFormat::Json);
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match mime.as_str() {
        "" | "application/json" => Ok(BodyFormat::Json),
        "application/x-www-form-urlencoded" => Ok(BodyFormat::Form),
        m if m.ends_with("+json") => Ok(BodyFormat::Json),
        m => Err(GatewayError::invalid_input(format!(
            "unsupported content type '{m}'"
        ))),
    }
}

fn rejection(status: StatusCode, body_text: String) -> GatewayError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge
    } else {
        GatewayError::invalid_input(body_text)
    }
}

impl<S: Send + Sync> FromRequest<S> for PatientPayload {
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| {
                v.to_str()
                    .map_err(|_| GatewayError::invalid_input("content type is not valid ASCII"))
            })
            .transpose()?;
        let format = body_format(content_type)?;

        match format {
            BodyFormat::Form => {
                let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(|e| rejection(e.status(), e.body_text()))?;
                if fields.is_empty() {
                    return Ok(Self(Value::Null));
                }
                let record: Map<String, Value> = fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect();
                Ok(Self(Value::Object(record)))
            }
            BodyFormat::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| rejection(e.status(), e.body_text()))?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Self(Value::Null));
                }
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| GatewayError::invalid_input(format!("malformed JSON body: {e}")))?;
                Ok(Self(value))
            }
        }
    }
}
