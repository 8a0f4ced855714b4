//! # nft-pay
//!
//! Payment intent and webhook backend.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_WEBHOOK_SECRET=whsec_...
//! export PORT=8080
//!
//! # Run the server
//! nft-pay
//! ```

use pay_api::{routes, state::AppState, AppConfig, LogFormat};
use pay_stripe::SUBSCRIBED_WEBHOOK_EVENTS;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    // Initialize application state
    let state = AppState::with_stripe(config)?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.provider.provider_name());

    if !is_prod {
        info!("💳 Intent: POST http://{}/intent", addr);
        info!("🔔 Webhook: POST http://{}/webhook", addr);
        info!("Subscribe the webhook to: {}", SUBSCRIBED_WEBHOOK_EVENTS.join(", "));
    }

    // Create router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at port {}", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
