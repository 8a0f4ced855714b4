//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the payment provider, the webhook handler and configuration.

use anyhow::Context;
use pay_core::BoxedPaymentProvider;
use pay_stripe::{LoggingWebhookHandler, StripeClient, WebhookHandler};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port: u16 = match var("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {:?}", p))?,
            None => 8080,
        };

        let log_format = match var("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            log_format,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("HOST is not a valid IP address: {:?}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider, built once at startup
    pub provider: BoxedPaymentProvider,
    /// Receives verified webhook events
    pub webhook_handler: Arc<dyn WebhookHandler>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state around an already-built provider
    pub fn new(provider: BoxedPaymentProvider, config: AppConfig) -> Self {
        Self {
            provider,
            webhook_handler: Arc::new(LoggingWebhookHandler),
            config,
        }
    }

    /// Replace the default logging webhook handler
    pub fn with_webhook_handler(mut self, handler: Arc<dyn WebhookHandler>) -> Self {
        self.webhook_handler = handler;
        self
    }

    /// Create state with a Stripe provider configured from the environment
    pub fn with_stripe(config: AppConfig) -> anyhow::Result<Self> {
        let stripe = StripeClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        tracing::debug!("Stripe config: {:?}", stripe.config());

        if stripe.config().is_live_mode() && !config.is_production() {
            tracing::warn!(
                "Live Stripe keys in use outside production (ENVIRONMENT={})",
                config.environment
            );
        }

        Ok(Self::new(Arc::new(stripe), config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "development");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.is_production());
    }

    #[test]
    fn test_app_config_from_vars() {
        let config = AppConfig::from_vars(vars(&[
            ("PORT", "3000"),
            ("HOST", "127.0.0.1"),
            ("ENVIRONMENT", "production"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_invalid_port() {
        assert!(AppConfig::from_vars(vars(&[("PORT", "eighty")])).is_err());
        assert!(AppConfig::from_vars(vars(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn test_invalid_host() {
        let config = AppConfig::from_vars(vars(&[("HOST", "not-an-ip")])).unwrap();
        assert!(config.socket_addr().is_err());
    }
}
