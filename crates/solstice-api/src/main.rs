use std::env;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use solstice_api::config::Config;
use solstice_api::state::AppState;
use solstice_llm::gateway::OpenRouterGateway;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = Config::from_env()?;
    config.log_summary();

    let gateway = OpenRouterGateway::new(&config.llm)?;

    let state = AppState {
        gateway: Arc::new(gateway),
    };
    let app = solstice_api::app(state);

    // Inside a Lambda execution environment the runtime API drives requests;
    // everywhere else we listen on a plain socket.
    if env::var_os("AWS_LAMBDA_RUNTIME_API").is_some() {
        tracing::info!("starting under the Lambda runtime");
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
