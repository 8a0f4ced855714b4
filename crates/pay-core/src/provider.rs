//! # Payment Provider Trait
//!
//! The seam between the HTTP handlers and the payment SDK.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   PaymentProvider (trait)                   │
//! │  ├── create_payment_intent()                                │
//! │  ├── construct_event()                                      │
//! │  └── provider_name()                                        │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                  ┌─────────┴─────────┐
//!                  │                   │
//!          ┌───────┴───────┐   ┌───────┴───────┐
//!          │ StripeClient  │   │  test fakes   │
//!          └───────────────┘   └───────────────┘
//! ```
//!
//! The provider is built once at startup and handed to the application
//! state, so tests can swap in a fake without touching the network.

use crate::error::PaymentResult;
use crate::event::WebhookEvent;
use crate::intent::{PaymentIntent, PaymentIntentParams};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent.
    ///
    /// # Arguments
    /// * `params` - Amount, currency and metadata for the intent
    ///
    /// # Returns
    /// The created `PaymentIntent`, including its client secret.
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> PaymentResult<PaymentIntent>;

    /// Verify a webhook signature and parse the event.
    ///
    /// # Arguments
    /// * `payload` - Raw webhook body bytes, exactly as received
    /// * `signature` - Signature header from the request
    ///
    /// # Returns
    /// A parsed `WebhookEvent` if the signature is valid.
    fn construct_event(&self, payload: &[u8], signature: &str) -> PaymentResult<WebhookEvent>;

    /// Get the provider name (for logging and error messages).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;
