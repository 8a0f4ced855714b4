//! # pay-api
//!
//! HTTP API layer for nft-pay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Payment intent creation for a buyer wallet
//! - Stripe webhook verification and acknowledgement
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Liveness probe |
//! | POST | `/intent` | Create payment intent |
//! | POST | `/webhook` | Stripe webhook |

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use handlers::WebhookAck;
pub use routes::create_router;
pub use state::{AppConfig, AppState, LogFormat};
