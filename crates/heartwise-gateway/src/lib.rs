//! `heartwise-gateway` — HTTP surface of the Heartwise inference service.
//!
//! The [`server::GatewayServer`] loads a classifier artifact through
//! `heartwise-model`, hands it to the kernel's
//! [`PredictionService`](heartwise_kernel::PredictionService), and exposes
//! it over axum.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use heartwise_gateway::config::GatewayConfig;
//! use heartwise_gateway::server::GatewayServer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = GatewayServer::new(GatewayConfig {
//!         port: 5000,
//!         ..Default::default()
//!     });
//!     let state = server.load_state().unwrap();
//!     server.start(state).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod logging;
pub mod server;
pub mod state;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use server::{GatewayServer, build_router};
pub use state::AppState;
