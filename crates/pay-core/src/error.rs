//! # Payment Error Types
//!
//! Typed error handling for the nft-pay backend.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data, rejected before the provider is contacted
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Webhook signature verification failed
    #[error("Webhook verification failed: {0}")]
    WebhookVerificationFailed(String),

    /// Webhook payload parsing error
    #[error("Webhook parse error: {0}")]
    WebhookParseError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Shorthand for a provider-side failure
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ProviderError {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// The bare message without the kind prefix.
    ///
    /// This is what callers see in response bodies, e.g. the text Stripe
    /// returned for a rejected payment intent.
    pub fn message(&self) -> &str {
        match self {
            PaymentError::Configuration(m)
            | PaymentError::InvalidRequest(m)
            | PaymentError::NetworkError(m)
            | PaymentError::WebhookVerificationFailed(m)
            | PaymentError::WebhookParseError(m)
            | PaymentError::Serialization(m) => m,
            PaymentError::ProviderError { message, .. } => message,
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            // Every request-level failure is reported as a bad request,
            // including ones the provider raised.
            PaymentError::InvalidRequest(_)
            | PaymentError::ProviderError { .. }
            | PaymentError::NetworkError(_)
            | PaymentError::WebhookVerificationFailed(_)
            | PaymentError::WebhookParseError(_)
            | PaymentError::Serialization(_) => 400,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PaymentError::InvalidRequest("test".into()).status_code(),
            400
        );
        assert_eq!(PaymentError::provider("stripe", "nope").status_code(), 400);
        assert_eq!(
            PaymentError::WebhookParseError("bad json".into()).status_code(),
            400
        );
        assert_eq!(
            PaymentError::Configuration("missing".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_message_strips_kind() {
        let err = PaymentError::provider("stripe", "Invalid API Key provided");
        assert_eq!(err.message(), "Invalid API Key provided");
        assert_eq!(
            err.to_string(),
            "Provider error [stripe]: Invalid API Key provided"
        );
    }
}
