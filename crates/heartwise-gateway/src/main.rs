//! Heartwise inference server — entry point.
//!
//! Reads configuration from the environment (see [`heartwise_gateway::config`]),
//! loads the classifier artifact and serves the prediction API.

use eyre::WrapErr;
use heartwise_gateway::config::GatewayConfig;
use heartwise_gateway::logging::init_tracing;
use heartwise_gateway::server::GatewayServer;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = GatewayConfig::from_env().wrap_err("invalid configuration")?;
    init_tracing(config.log_format);

    info!(
        port = config.port,
        model_path = %config.model_path.display(),
        confidence_policy = %config.confidence_policy,
        max_body_bytes = config.max_body_bytes,
        "Heartwise configuration loaded"
    );

    let server = GatewayServer::new(config);
    let state = server.load_state().wrap_err_with(|| {
        format!(
            "failed to load classifier from {}",
            server.config().model_path.display()
        )
    })?;

    server.start(state).await.wrap_err("server error")?;
    Ok(())
}
