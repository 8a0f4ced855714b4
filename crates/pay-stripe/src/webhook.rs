//! # Stripe Webhook Handling
//!
//! Dispatch of verified webhook events to a handler.
//! Verification itself lives in [`crate::signature`].

use pay_core::{
    ChargeObject, PaymentIntentObject, PaymentResult, WebhookEvent, WebhookEventKind,
    CHARGE_SUCCEEDED, PAYMENT_INTENT_SUCCEEDED,
};
use tracing::{info, warn};

/// Webhook event handler trait
///
/// Implement this trait to react to webhook events. The defaults only log.
#[allow(unused_variables)]
pub trait WebhookHandler: Send + Sync {
    /// Called when a payment intent succeeds
    fn on_payment_intent_succeeded(
        &self,
        event: &WebhookEvent,
        intent: &PaymentIntentObject,
    ) -> PaymentResult<()> {
        info!("PaymentIntent status: {}", intent.status);
        Ok(())
    }

    /// Called when a charge succeeds
    fn on_charge_succeeded(&self, event: &WebhookEvent, charge: &ChargeObject) -> PaymentResult<()> {
        info!("Charge id: {}", charge.id);
        Ok(())
    }

    /// Called for unknown/unhandled events
    fn on_unhandled_event(&self, event: &WebhookEvent, event_type: &str) -> PaymentResult<()> {
        warn!("Unhandled event type: {}", event_type);
        Ok(())
    }
}

/// Default webhook handler (just logs events)
pub struct LoggingWebhookHandler;

impl WebhookHandler for LoggingWebhookHandler {}

/// Dispatch a webhook event to the appropriate handler method
pub fn dispatch_webhook_event(
    handler: &dyn WebhookHandler,
    event: &WebhookEvent,
) -> PaymentResult<()> {
    match WebhookEventKind::from_event(event)? {
        WebhookEventKind::PaymentIntentSucceeded(intent) => {
            handler.on_payment_intent_succeeded(event, &intent)
        }
        WebhookEventKind::ChargeSucceeded(charge) => handler.on_charge_succeeded(event, &charge),
        WebhookEventKind::Unhandled(event_type) => handler.on_unhandled_event(event, &event_type),
    }
}

/// Events that should be enabled on the Stripe webhook endpoint
pub const SUBSCRIBED_WEBHOOK_EVENTS: &[&str] = &[PAYMENT_INTENT_SUCCEEDED, CHARGE_SUCCEEDED];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pay_core::{PaymentError, PaymentIntentStatus};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    fn mock_event(event_type: &str, object: serde_json::Value) -> WebhookEvent {
        WebhookEvent {
            event_id: "evt_test".to_string(),
            event_type: event_type.to_string(),
            provider: "stripe".to_string(),
            livemode: false,
            object,
            created: Utc::now(),
        }
    }

    #[derive(Default)]
    struct RecordingHandler {
        calls: Mutex<Vec<String>>,
    }

    impl WebhookHandler for RecordingHandler {
        fn on_payment_intent_succeeded(
            &self,
            _event: &WebhookEvent,
            intent: &PaymentIntentObject,
        ) -> PaymentResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("intent:{}", intent.status));
            Ok(())
        }

        fn on_charge_succeeded(
            &self,
            _event: &WebhookEvent,
            charge: &ChargeObject,
        ) -> PaymentResult<()> {
            self.calls.lock().unwrap().push(format!("charge:{}", charge.id));
            Ok(())
        }

        fn on_unhandled_event(&self, _event: &WebhookEvent, event_type: &str) -> PaymentResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("unhandled:{}", event_type));
            Ok(())
        }
    }

    #[test]
    fn test_dispatch_payment_intent_succeeded() {
        let handler = RecordingHandler::default();
        let event = mock_event(
            PAYMENT_INTENT_SUCCEEDED,
            json!({ "id": "pi_1", "status": "succeeded" }),
        );

        dispatch_webhook_event(&handler, &event).unwrap();
        assert_eq!(*handler.calls.lock().unwrap(), vec!["intent:succeeded"]);
    }

    #[test]
    fn test_dispatch_charge_succeeded() {
        let handler = RecordingHandler::default();
        let event = mock_event(CHARGE_SUCCEEDED, json!({ "id": "ch_1" }));

        dispatch_webhook_event(&handler, &event).unwrap();
        assert_eq!(*handler.calls.lock().unwrap(), vec!["charge:ch_1"]);
    }

    #[test]
    fn test_dispatch_unhandled() {
        let handler = RecordingHandler::default();
        let event = mock_event("invoice.paid", json!({ "id": "in_1" }));

        dispatch_webhook_event(&handler, &event).unwrap();
        assert_eq!(*handler.calls.lock().unwrap(), vec!["unhandled:invoice.paid"]);
    }

    #[test]
    fn test_dispatch_unreadable_object() {
        let handler = RecordingHandler::default();
        let event = mock_event(PAYMENT_INTENT_SUCCEEDED, json!({ "id": 42 }));

        let err = dispatch_webhook_event(&handler, &event).unwrap_err();
        assert!(matches!(err, PaymentError::WebhookParseError(_)));
        assert!(handler.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_logging_handler_accepts_everything() {
        let handler = LoggingWebhookHandler;
        for (event_type, object) in [
            (PAYMENT_INTENT_SUCCEEDED, json!({ "id": "pi_1", "status": "processing" })),
            (CHARGE_SUCCEEDED, json!({ "id": "ch_1" })),
            ("customer.created", json!({})),
        ] {
            assert!(dispatch_webhook_event(&handler, &mock_event(event_type, object)).is_ok());
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_logging_handler_output() {
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let handler = LoggingWebhookHandler;
            for (event_type, object) in [
                (PAYMENT_INTENT_SUCCEEDED, json!({ "status": "succeeded" })),
                (CHARGE_SUCCEEDED, json!({ "id": "ch_42" })),
                ("invoice.paid", json!({ "id": "in_1" })),
            ] {
                dispatch_webhook_event(&handler, &mock_event(event_type, object)).unwrap();
            }
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("PaymentIntent status: succeeded"));
        assert!(output.contains("Charge id: ch_42"));
        assert!(output.contains("WARN"));
        assert!(output.contains("Unhandled event type: invoice.paid"));
    }

    #[test]
    fn test_status_reaches_handler() {
        let event = mock_event(
            PAYMENT_INTENT_SUCCEEDED,
            json!({ "id": "pi_1", "status": "requires_capture" }),
        );
        match WebhookEventKind::from_event(&event).unwrap() {
            WebhookEventKind::PaymentIntentSucceeded(intent) => {
                assert_eq!(intent.status, PaymentIntentStatus::RequiresCapture)
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }
}
