//! # API Errors
//!
//! Maps `PaymentError` onto plain-text HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pay_core::PaymentError;
use thiserror::Error;

/// Error returned by a request handler, tagged with the operation that failed
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected before the provider was contacted
    #[error("{}", .0.message())]
    InvalidRequest(PaymentError),

    /// Payment intent creation failed at the provider
    #[error("Stripe Intent Error: {}", .0.message())]
    Intent(PaymentError),

    /// Webhook could not be verified
    #[error("Webhook Error: {}", .0.message())]
    Webhook(PaymentError),
}

impl ApiError {
    pub fn payment_error(&self) -> &PaymentError {
        match self {
            ApiError::InvalidRequest(e) | ApiError::Intent(e) | ApiError::Webhook(e) => e,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.payment_error().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
