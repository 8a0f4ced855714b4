//! # Payment Intent Types
//!
//! Request/response types for creating a payment intent, and the
//! fixed terms every intent is created with.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Amount charged for every intent, in minor units ($100.00)
pub const INTENT_AMOUNT: i64 = 100_00;

/// Currency every intent is created in
pub const INTENT_CURRENCY: &str = "usd";

/// Description attached to every intent
pub const INTENT_DESCRIPTION: &str = "Example NFT";

/// Metadata key carrying the buyer's wallet address
pub const BUYER_WALLET_METADATA_KEY: &str = "buyerWalletAddress";

/// Message returned when the buyer wallet address is absent
pub const MISSING_BUYER_WALLET: &str = "Request is missing \"buyerWalletAddress\"";

/// Inbound request body for `POST /intent`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    /// Opaque buyer identifier, passed through to the provider as metadata
    #[serde(default)]
    pub buyer_wallet_address: Option<String>,
}

impl PaymentIntentRequest {
    pub fn new(buyer_wallet_address: impl Into<String>) -> Self {
        Self {
            buyer_wallet_address: Some(buyer_wallet_address.into()),
        }
    }

    /// Returns the wallet address, or `InvalidRequest` if it is missing or empty
    pub fn buyer_wallet_address(&self) -> PaymentResult<&str> {
        match self.buyer_wallet_address.as_deref() {
            Some(addr) if !addr.is_empty() => Ok(addr),
            _ => Err(PaymentError::InvalidRequest(MISSING_BUYER_WALLET.to_string())),
        }
    }
}

/// Response body for `POST /intent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResult {
    pub client_secret: String,
}

/// Parameters sent to the provider when creating an intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentParams {
    /// Amount in smallest currency unit
    pub amount: i64,
    /// Lowercase ISO currency code
    pub currency: String,
    pub description: String,
    /// Allowed payment method types (e.g. "card")
    pub payment_method_types: Vec<String>,
    /// Opaque key/value pairs stored on the intent
    pub metadata: HashMap<String, String>,
}

impl PaymentIntentParams {
    /// Fixed-price card intent tagged with the buyer's wallet address
    pub fn for_buyer(buyer_wallet_address: &str) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(
            BUYER_WALLET_METADATA_KEY.to_string(),
            buyer_wallet_address.to_string(),
        );

        Self {
            amount: INTENT_AMOUNT,
            currency: INTENT_CURRENCY.to_string(),
            description: INTENT_DESCRIPTION.to_string(),
            payment_method_types: vec!["card".to_string()],
            metadata,
        }
    }

    pub fn buyer_wallet_address(&self) -> Option<&str> {
        self.metadata
            .get(BUYER_WALLET_METADATA_KEY)
            .map(|s| s.as_str())
    }
}

/// Payment intent lifecycle status, as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    RequiresCapture,
    Canceled,
    Succeeded,
    /// Any status this build does not know about
    #[serde(other)]
    Unknown,
}

impl PaymentIntentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentIntentStatus::RequiresPaymentMethod => "requires_payment_method",
            PaymentIntentStatus::RequiresConfirmation => "requires_confirmation",
            PaymentIntentStatus::RequiresAction => "requires_action",
            PaymentIntentStatus::Processing => "processing",
            PaymentIntentStatus::RequiresCapture => "requires_capture",
            PaymentIntentStatus::Canceled => "canceled",
            PaymentIntentStatus::Succeeded => "succeeded",
            PaymentIntentStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PaymentIntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment intent as created by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Secret handed to the client to confirm the payment
    #[serde(default)]
    pub client_secret: Option<String>,
    pub status: PaymentIntentStatus,
    pub amount: i64,
    pub currency: String,
}

impl PaymentIntent {
    /// Convert into the caller-facing result.
    ///
    /// A created intent without a client secret is useless to the client,
    /// so it is reported as a provider failure.
    pub fn into_result(self, provider: &str) -> PaymentResult<PaymentIntentResult> {
        match self.client_secret {
            Some(client_secret) if !client_secret.is_empty() => {
                Ok(PaymentIntentResult { client_secret })
            }
            _ => Err(PaymentError::provider(
                provider,
                format!("Payment intent {} has no client secret", self.id),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_missing_field() {
        let req: PaymentIntentRequest = serde_json::from_str("{}").unwrap();
        let err = req.buyer_wallet_address().unwrap_err();
        assert!(matches!(err, PaymentError::InvalidRequest(_)));
        assert_eq!(err.message(), MISSING_BUYER_WALLET);
    }

    #[test]
    fn test_request_empty_and_null() {
        let req: PaymentIntentRequest =
            serde_json::from_str(r#"{"buyerWalletAddress":""}"#).unwrap();
        assert!(req.buyer_wallet_address().is_err());

        let req: PaymentIntentRequest =
            serde_json::from_str(r#"{"buyerWalletAddress":null}"#).unwrap();
        assert!(req.buyer_wallet_address().is_err());
    }

    #[test]
    fn test_request_present() {
        let req: PaymentIntentRequest =
            serde_json::from_str(r#"{"buyerWalletAddress":"0xABC"}"#).unwrap();
        assert_eq!(req.buyer_wallet_address().unwrap(), "0xABC");
    }

    #[test]
    fn test_params_for_buyer() {
        let params = PaymentIntentParams::for_buyer("0xABC");
        assert_eq!(params.amount, 10000);
        assert_eq!(params.currency, "usd");
        assert_eq!(params.description, "Example NFT");
        assert_eq!(params.payment_method_types, vec!["card".to_string()]);
        assert_eq!(params.buyer_wallet_address(), Some("0xABC"));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = PaymentIntentResult {
            client_secret: "pi_123_secret_456".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({ "clientSecret": "pi_123_secret_456" }));
    }

    #[test]
    fn test_status_unknown_fallback() {
        let status: PaymentIntentStatus = serde_json::from_str(r#""succeeded""#).unwrap();
        assert_eq!(status, PaymentIntentStatus::Succeeded);

        let status: PaymentIntentStatus =
            serde_json::from_str(r#""something_new""#).unwrap();
        assert_eq!(status, PaymentIntentStatus::Unknown);
        assert_eq!(PaymentIntentStatus::RequiresPaymentMethod.to_string(), "requires_payment_method");
    }

    #[test]
    fn test_into_result_requires_secret() {
        let intent = PaymentIntent {
            id: "pi_1".to_string(),
            client_secret: None,
            status: PaymentIntentStatus::RequiresPaymentMethod,
            amount: INTENT_AMOUNT,
            currency: "usd".to_string(),
        };
        assert!(intent.into_result("stripe").is_err());

        let intent = PaymentIntent {
            id: "pi_2".to_string(),
            client_secret: Some("pi_2_secret".to_string()),
            status: PaymentIntentStatus::RequiresPaymentMethod,
            amount: INTENT_AMOUNT,
            currency: "usd".to_string(),
        };
        assert_eq!(intent.into_result("stripe").unwrap().client_secret, "pi_2_secret");
    }
}
