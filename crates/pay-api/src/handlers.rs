//! # Request Handlers
//!
//! Axum request handlers for the payment API.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use pay_core::{PaymentIntentParams, PaymentIntentRequest, PaymentIntentResult};
use pay_stripe::{dispatch_webhook_event, SIGNATURE_HEADER};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Acknowledgement returned for every verified webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Liveness probe
pub async fn index() -> &'static str {
    "ok"
}

/// Create a fixed-price payment intent for a buyer
#[instrument(skip(state, payload))]
pub async fn create_intent(
    State(state): State<AppState>,
    payload: Result<Json<PaymentIntentRequest>, JsonRejection>,
) -> Result<Json<PaymentIntentResult>, ApiError> {
    // An unreadable body carries no wallet address either
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Unreadable intent body: {}", rejection);
            PaymentIntentRequest::default()
        }
    };

    let buyer = request
        .buyer_wallet_address()
        .map_err(ApiError::InvalidRequest)?;
    let params = PaymentIntentParams::for_buyer(buyer);

    let provider = state.provider.provider_name();
    let result = state
        .provider
        .create_payment_intent(&params)
        .await
        .and_then(|intent| intent.into_result(provider))
        .map_err(|e| {
            error!("Error message: {}", e.message());
            ApiError::Intent(e)
        })?;

    info!("Created payment intent for buyer {}", buyer);
    Ok(Json(result))
}

/// Verify and acknowledge a Stripe webhook
#[instrument(skip(state, headers, body), fields(bytes = body.len()))]
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    // A missing header fails verification like any other bad signature
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let event = state
        .provider
        .construct_event(&body, signature)
        .map_err(|e| {
            error!("Error message: {}", e.message());
            ApiError::Webhook(e)
        })?;

    info!("Success: {}", event.event_id);

    // The event is already received; handler failures are logged, not returned.
    if let Err(e) = dispatch_webhook_event(state.webhook_handler.as_ref(), &event) {
        error!(
            "Webhook handler error: type={}, id={}: {}",
            event.event_type, event.event_id, e
        );
    }

    Ok(Json(WebhookAck { received: true }))
}
