//! # Webhook Event Types
//!
//! A verified provider event, and the tagged union of event kinds this
//! backend knows how to read.

use crate::error::{PaymentError, PaymentResult};
use crate::intent::PaymentIntentStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event type tag for a succeeded payment intent
pub const PAYMENT_INTENT_SUCCEEDED: &str = "payment_intent.succeeded";

/// Event type tag for a succeeded charge
pub const CHARGE_SUCCEEDED: &str = "charge.succeeded";

/// A webhook event whose signature has already been verified
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Provider event ID (e.g. `evt_...`)
    pub event_id: String,

    /// Raw type tag (e.g. `payment_intent.succeeded`)
    pub event_type: String,

    /// Payment provider that sent the event
    pub provider: String,

    /// Whether the event came from live mode
    #[serde(default)]
    pub livemode: bool,

    /// The event's `data.object`, untouched
    pub object: serde_json::Value,

    /// When the provider created the event
    pub created: DateTime<Utc>,
}

/// The `data.object` of a `payment_intent.*` event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentIntentObject {
    #[serde(default)]
    pub id: Option<String>,
    pub status: PaymentIntentStatus,
}

/// The `data.object` of a `charge.*` event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChargeObject {
    pub id: String,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub payment_intent: Option<String>,
}

/// Known webhook event kinds, with a fallback for everything else
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventKind {
    PaymentIntentSucceeded(PaymentIntentObject),
    ChargeSucceeded(ChargeObject),
    Unhandled(String),
}

impl WebhookEventKind {
    /// Classify an event by its type tag and read the matching object.
    ///
    /// Unknown tags never fail; a known tag with an unreadable object does.
    pub fn from_event(event: &WebhookEvent) -> PaymentResult<Self> {
        match event.event_type.as_str() {
            PAYMENT_INTENT_SUCCEEDED => {
                let intent = read_object(event)?;
                Ok(WebhookEventKind::PaymentIntentSucceeded(intent))
            }
            CHARGE_SUCCEEDED => {
                let charge = read_object(event)?;
                Ok(WebhookEventKind::ChargeSucceeded(charge))
            }
            other => Ok(WebhookEventKind::Unhandled(other.to_string())),
        }
    }
}

fn read_object<T: for<'de> Deserialize<'de>>(event: &WebhookEvent) -> PaymentResult<T> {
    T::deserialize(&event.object).map_err(|e| {
        PaymentError::WebhookParseError(format!(
            "Failed to read {} object for event {}: {}",
            event.event_type, event.event_id, e
        ))
    })
}
