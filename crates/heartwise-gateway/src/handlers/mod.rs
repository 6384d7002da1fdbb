//! Request handlers for the inference API

pub mod health;
pub mod predict;

pub use health::{health, ready, root};
pub use predict::{PredictionResponse, predict};
