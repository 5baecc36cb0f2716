//! AI Relay server binary.

use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ai_relay::adapters::http::{relay_app, RelayAppState};
use ai_relay::adapters::InMemoryConversationStore;
use ai_relay::application::{Dispatcher, ProviderRegistry};
use ai_relay::config::{AppConfig, LogFormat, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let registry = Arc::new(ProviderRegistry::from_config(&config.providers));
    for provider in registry.list_providers() {
        tracing::info!(
            provider = %provider.id,
            configured = provider.configured,
            "provider registered"
        );
    }

    let dispatcher = Dispatcher::new(registry, Arc::new(InMemoryConversationStore::new()));
    let app = relay_app(RelayAppState::new(dispatcher), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "ai relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Installs the global subscriber: JSON in production, human-readable otherwise.
/// `RUST_LOG` overrides the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    match server.log_format() {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
