//! # Stripe Configuration
//!
//! Configuration management for Stripe integration.
//! All secrets are loaded from environment variables.

use pay_core::PaymentError;
use std::env;

/// Default Stripe API endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API version the request/response shapes are written against
pub const DEFAULT_API_VERSION: &str = "2022-11-15";

/// Maximum age of a webhook signature timestamp, in seconds
pub const DEFAULT_WEBHOOK_TOLERANCE_SECS: i64 = 300;

/// Stripe API configuration
#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Webhook signing secret (whsec_...)
    pub webhook_secret: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,

    /// Accepted clock skew for webhook signatures
    pub webhook_tolerance_secs: i64,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_WEBHOOK_SECRET`
    ///
    /// Optional:
    /// - `STRIPE_API_BASE_URL`
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY").map_err(|_| {
            PaymentError::Configuration("STRIPE_SECRET_KEY not set".to_string())
        })?;

        let webhook_secret = env::var("STRIPE_WEBHOOK_SECRET").map_err(|_| {
            PaymentError::Configuration("STRIPE_WEBHOOK_SECRET not set".to_string())
        })?;

        let mut config = Self::new(secret_key, webhook_secret);
        if let Ok(url) = env::var("STRIPE_API_BASE_URL") {
            config = config.with_api_base_url(url);
        }

        config.validate()?;
        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            webhook_secret: webhook_secret.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            webhook_tolerance_secs: DEFAULT_WEBHOOK_TOLERANCE_SECS,
        }
    }

    /// Check key formats
    pub fn validate(&self) -> Result<(), PaymentError> {
        if !self.secret_key.starts_with("sk_test_") && !self.secret_key.starts_with("sk_live_") {
            return Err(PaymentError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        if !self.webhook_secret.starts_with("whsec_") {
            return Err(PaymentError::Configuration(
                "STRIPE_WEBHOOK_SECRET must start with whsec_".to_string(),
            ));
        }

        Ok(())
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set webhook timestamp tolerance
    pub fn with_webhook_tolerance(mut self, secs: i64) -> Self {
        self.webhook_tolerance_secs = secs;
        self
    }
}

// Keeps secrets out of logs.
impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("mode", &if self.is_live_mode() { "live" } else { "test" })
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("webhook_tolerance_secs", &self.webhook_tolerance_secs)
            .finish_non_exhaustive()
    }
}
