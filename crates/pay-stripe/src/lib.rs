//! # pay-stripe
//!
//! Stripe payment provider for nft-pay.
//!
//! `StripeClient` implements `pay_core::PaymentProvider`:
//! - creates payment intents through the REST API
//! - verifies `Stripe-Signature` headers on webhooks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_stripe::StripeClient;
//! use pay_core::{PaymentIntentParams, PaymentProvider};
//!
//! // Create client from environment
//! let stripe = StripeClient::from_env()?;
//!
//! let intent = stripe
//!     .create_payment_intent(&PaymentIntentParams::for_buyer("0xABC"))
//!     .await?;
//! ```
//!
//! ## Webhook Handling
//!
//! ```rust,ignore
//! use pay_stripe::{dispatch_webhook_event, WebhookHandler};
//!
//! struct MyHandler;
//!
//! impl WebhookHandler for MyHandler {
//!     fn on_charge_succeeded(&self, event: &WebhookEvent, charge: &ChargeObject) -> PaymentResult<()> {
//!         println!("Charge {} settled", charge.id);
//!         Ok(())
//!     }
//! }
//!
//! // In your webhook endpoint:
//! let event = stripe.construct_event(payload, signature)?;
//! dispatch_webhook_event(&MyHandler, &event)?;
//! ```

pub mod client;
pub mod config;
pub mod signature;
pub mod webhook;

// Re-exports
pub use client::StripeClient;
pub use config::StripeConfig;
pub use signature::{construct_event, generate_test_header, SIGNATURE_HEADER};
pub use webhook::{
    dispatch_webhook_event, LoggingWebhookHandler, WebhookHandler, SUBSCRIBED_WEBHOOK_EVENTS,
};
