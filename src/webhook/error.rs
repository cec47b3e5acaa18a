use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub enum WebhookError {
    SignatureMissing,
    SignatureMismatch,
    SigningSecretMissing,
    SchemaViolation(String),
}

impl std::fmt::Display for WebhookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookError::SignatureMissing => write!(f, "Missing webhook signature header"),
            WebhookError::SignatureMismatch => {
                write!(f, "Webhook signature does not match the request body")
            }
            WebhookError::SigningSecretMissing => {
                write!(f, "Webhook signing key is not configured")
            }
            WebhookError::SchemaViolation(msg) => {
                write!(f, "Event payload failed validation: {}", msg)
            }
        }
    }
}

impl std::error::Error for WebhookError {}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        // Senders only see coarse messages; verification internals stay in the logs.
        let (status, message) = match &self {
            WebhookError::SignatureMissing | WebhookError::SignatureMismatch => {
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            WebhookError::SigningSecretMissing => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            WebhookError::SchemaViolation(_) => (StatusCode::BAD_REQUEST, "Invalid payload"),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
