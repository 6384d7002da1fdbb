//! `heartwise-kernel` — core contracts of the Heartwise inference service.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`schema`] | The 13 canonical features and the ordered [`FeatureRow`]. |
//! | [`record`] | [`PatientRecord`] validation and coercion from a raw payload. |
//! | [`classifier`] | The [`Classifier`] trait, [`Label`] and [`ClassProbabilities`]. |
//! | [`prediction`] | [`Prediction`] and the [`ConfidencePolicy`]. |
//! | [`service`] | [`PredictionService`], the validate → classify → confidence pipeline. |
//! | [`error`] | The closed [`InferenceError`] taxonomy. |
//!
//! Transports (HTTP, form bodies, …) live in `heartwise-gateway`; concrete
//! classifiers live in `heartwise-model`.

pub mod classifier;
pub mod error;
pub mod prediction;
pub mod record;
pub mod schema;
pub mod service;

pub use classifier::{ClassProbabilities, Classifier, ClassifierError, Label};
pub use error::InferenceError;
pub use prediction::{ConfidencePolicy, ParsePolicyError, Prediction};
pub use record::PatientRecord;
pub use schema::{FEATURE_COUNT, FEATURE_NAMES, Feature, FeatureRow};
pub use service::PredictionService;
