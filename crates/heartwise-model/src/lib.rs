//! # heartwise-model
//!
//! Concrete [`Classifier`](heartwise_kernel::Classifier) implementations and
//! the JSON artifact they are loaded from.
//!
//! | `kind` | Type |
//! |--------|------|
//! | `logistic_regression` | [`LogisticRegression`] |
//! | `random_forest` | [`RandomForest`] |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use heartwise_model::load_model;
//!
//! let model = load_model("models/heart_disease_model.json").unwrap();
//! println!("loaded {} from {}", model.info.kind, model.info.path.display());
//! ```

pub mod artifact;
pub mod error;
pub mod forest;
pub mod logistic;

pub use artifact::{LoadedModel, ModelArtifact, ModelInfo, load_model};
pub use error::ModelError;
pub use forest::{DecisionTree, RandomForest};
pub use logistic::{LogisticRegression, StandardScaler};
