//! # Webhook Signature Verification
//!
//! Stripe signs every webhook with HMAC-SHA256 over `"{timestamp}.{body}"`
//! and sends the result in the `Stripe-Signature` header:
//!
//! ```text
//! Stripe-Signature: t=1492774577,v1=5257a869e7ecebeda32affa62cdca3fa51cad7e77a0e56ff536d0ce8e108d8bd
//! ```
//!
//! The header may carry several `v1` entries while a secret is being
//! rolled; any one of them matching is enough.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use pay_core::{PaymentError, PaymentResult, WebhookEvent};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Name of the header carrying the signature
pub const SIGNATURE_HEADER: &str = "stripe-signature";

const EXPECTED_SCHEME: &str = "v1";

const MISSING_HEADER: &str = "No stripe-signature header value was provided.";
const BAD_HEADER: &str = "Unable to extract timestamp and signatures from header";
const NO_MATCH: &str = "No signatures found matching the expected signature for payload. \
Are you passing the raw request body you received from Stripe?";
const STALE_TIMESTAMP: &str = "Timestamp outside the tolerance zone";

struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<String>,
}

fn parse_signature_header(header: &str) -> PaymentResult<SignatureHeader> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse().ok(),
            EXPECTED_SCHEME => signatures.push(value.to_string()),
            _ => {}
        }
    }

    match timestamp {
        Some(timestamp) if !signatures.is_empty() => Ok(SignatureHeader {
            timestamp,
            signatures,
        }),
        _ => Err(PaymentError::WebhookVerificationFailed(
            BAD_HEADER.to_string(),
        )),
    }
}

fn signed_mac(secret: &str, timestamp: i64, payload: &[u8]) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac
}

/// Hex-encoded `v1` signature for a payload
pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    hex::encode(signed_mac(secret, timestamp, payload).finalize().into_bytes())
}

/// Build a header value the way Stripe would, for exercising webhook endpoints
pub fn generate_test_header(payload: &[u8], secret: &str, timestamp: i64) -> String {
    format!(
        "t={},{}={}",
        timestamp,
        EXPECTED_SCHEME,
        compute_signature(secret, timestamp, payload)
    )
}

/// Check the header against the payload without parsing the event
pub fn verify_header(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
    now: DateTime<Utc>,
) -> PaymentResult<()> {
    if header.trim().is_empty() {
        return Err(PaymentError::WebhookVerificationFailed(
            MISSING_HEADER.to_string(),
        ));
    }

    let parsed = parse_signature_header(header)?;
    let mac = signed_mac(secret, parsed.timestamp, payload);

    // verify_slice compares in constant time
    let matched = parsed.signatures.iter().any(|sig| match hex::decode(sig) {
        Ok(bytes) => mac.clone().verify_slice(&bytes).is_ok(),
        Err(_) => false,
    });

    if !matched {
        return Err(PaymentError::WebhookVerificationFailed(NO_MATCH.to_string()));
    }

    // Only old timestamps are rejected; clock skew ahead of us is tolerated
    if tolerance_secs > 0 && now.timestamp() - parsed.timestamp > tolerance_secs {
        return Err(PaymentError::WebhookVerificationFailed(
            STALE_TIMESTAMP.to_string(),
        ));
    }

    Ok(())
}

/// Verify the signature, then parse the payload into a `WebhookEvent`
pub fn construct_event(
    payload: &[u8],
    header: &str,
    secret: &str,
    tolerance_secs: i64,
) -> PaymentResult<WebhookEvent> {
    verify_header(payload, header, secret, tolerance_secs, Utc::now())?;

    let event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
        PaymentError::WebhookParseError(format!("Failed to parse webhook: {}", e))
    })?;

    Ok(WebhookEvent {
        event_id: event.id,
        event_type: event.event_type,
        provider: "stripe".to_string(),
        livemode: event.livemode,
        object: serde_json::Value::Object(event.data.object),
        created: event
            .created
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(Utc::now),
    })
}

// =============================================================================
// Stripe Event Envelope
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeWebhookEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    created: Option<i64>,
    #[serde(default)]
    livemode: bool,
    data: StripeEventData,
}

#[derive(Debug, Deserialize)]
struct StripeEventData {
    object: serde_json::Map<String, serde_json::Value>,
}
