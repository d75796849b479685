use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use docqa::infrastructure::observability::{TracingConfig, init_tracing};
use docqa::presentation::{AppState, Environment, Settings, build_answer_service, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let mut settings = Settings::load(environment).context("failed to load settings")?;
    let rejected_port = settings.apply_conventional_env(|key| std::env::var(key).ok());
    settings
        .validate_for_server()
        .context("invalid server settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));
    if let Some(value) = rejected_port {
        tracing::warn!(%value, port = settings.server.port, "Ignoring invalid PORT value");
    }

    let answer_service = build_answer_service(&settings).context("failed to build pipeline")?;
    let state = AppState::new(Arc::new(answer_service), settings.auth.bearer_token.as_str());
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!(%addr, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
