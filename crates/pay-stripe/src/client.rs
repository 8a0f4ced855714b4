//! # Stripe Client
//!
//! `PaymentProvider` implementation backed by the Stripe REST API.
//! Creates payment intents and verifies webhook signatures.

use crate::config::StripeConfig;
use crate::signature;
use async_trait::async_trait;
use pay_core::{
    PaymentError, PaymentIntent, PaymentIntentParams, PaymentProvider, PaymentResult,
    WebhookEvent,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Stripe payment provider
pub struct StripeClient {
    config: StripeConfig,
    client: Client,
}

impl StripeClient {
    /// Create a new Stripe client
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Flatten intent params into Stripe's bracketed form encoding
    fn build_form_params(params: &PaymentIntentParams) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("amount".to_string(), params.amount.to_string()),
            ("currency".to_string(), params.currency.clone()),
            ("description".to_string(), params.description.clone()),
        ];

        for (i, method) in params.payment_method_types.iter().enumerate() {
            form_params.push((format!("payment_method_types[{}]", i), method.clone()));
        }

        // Sorted so the encoded body is stable
        let mut metadata: Vec<_> = params.metadata.iter().collect();
        metadata.sort();
        for (key, value) in metadata {
            form_params.push((format!("metadata[{}]", key), value.clone()));
        }

        form_params
    }
}

#[async_trait]
impl PaymentProvider for StripeClient {
    #[instrument(skip(self, params), fields(amount = params.amount, currency = %params.currency))]
    async fn create_payment_intent(
        &self,
        params: &PaymentIntentParams,
    ) -> PaymentResult<PaymentIntent> {
        let form_params = Self::build_form_params(params);
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        debug!("Creating Stripe payment intent: {} form fields", form_params.len());

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Parse Stripe error
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(PaymentError::provider(PROVIDER, error_response.error.message));
            }

            return Err(PaymentError::provider(
                PROVIDER,
                format!("HTTP {}: {}", status, body),
            ));
        }

        let intent: PaymentIntent = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!(
            "Created Stripe payment intent: id={}, status={}",
            intent.id, intent.status
        );

        Ok(intent)
    }

    fn construct_event(&self, payload: &[u8], signature: &str) -> PaymentResult<WebhookEvent> {
        let event = signature::construct_event(
            payload,
            signature,
            &self.config.webhook_secret,
            self.config.webhook_tolerance_secs,
        )?;

        debug!("Verified Stripe webhook: type={}", event.event_type);
        Ok(event)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
