//! # pay-core
//!
//! Core types and traits for the nft-pay backend.
//!
//! This crate provides:
//! - `PaymentProvider` trait for the payment SDK seam
//! - `PaymentIntentRequest`, `PaymentIntentParams` and `PaymentIntentResult`
//!   for the fixed-price intent flow
//! - `WebhookEvent` and the `WebhookEventKind` tagged union
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{PaymentIntentParams, PaymentIntentRequest, PaymentProvider};
//!
//! let request = PaymentIntentRequest::new("0xABC");
//! let params = PaymentIntentParams::for_buyer(request.buyer_wallet_address()?);
//!
//! let intent = provider.create_payment_intent(&params).await?;
//! let result = intent.into_result(provider.provider_name())?;
//!
//! // Hand result.client_secret to the browser
//! ```

pub mod error;
pub mod event;
pub mod intent;
pub mod provider;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use event::{
    ChargeObject, PaymentIntentObject, WebhookEvent, WebhookEventKind, CHARGE_SUCCEEDED,
    PAYMENT_INTENT_SUCCEEDED,
};
pub use intent::{
    PaymentIntent, PaymentIntentParams, PaymentIntentRequest, PaymentIntentResult,
    PaymentIntentStatus, INTENT_AMOUNT, INTENT_CURRENCY, INTENT_DESCRIPTION,
    MISSING_BUYER_WALLET,
};
pub use provider::{BoxedPaymentProvider, PaymentProvider};
