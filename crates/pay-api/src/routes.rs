//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  / - Liveness probe, returns `ok`
/// - POST /intent - Create a payment intent
/// - POST /webhook - Stripe webhook handler (raw body)
pub fn create_router(state: AppState) -> Router {
    // Browser checkouts may be served from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/intent", post(handlers::create_intent))
        .route("/webhook", post(handlers::stripe_webhook))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
