//! Shared application state for the inference server

use heartwise_kernel::{ConfidencePolicy, PredictionService};
use heartwise_model::{LoadedModel, ModelInfo};
use std::sync::Arc;

/// State shared across all request handlers.
///
/// Built once at startup; nothing in it changes afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Validation + classifier + confidence policy
    pub service: Arc<PredictionService>,
    /// Provenance of the loaded classifier, reported by `/ready`
    pub model: Arc<ModelInfo>,
}

impl AppState {
    pub fn new(model: LoadedModel, policy: ConfidencePolicy) -> Self {
        Self {
            service: Arc::new(PredictionService::new(model.classifier, policy)),
            model: Arc::new(model.info),
        }
    }
}
