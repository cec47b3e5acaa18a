//! Webhook endpoints for on-chain proposal lifecycle events.
//!
//! Each endpoint authenticates the raw request body against its own signing
//! key before anything is parsed; an unverified byte is never interpreted.

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::AppState;
use crate::config::VerificationMode;
use crate::services::notifier::ProposalStage;
use crate::webhook::{SIGNATURE_HEADER, WebhookError, parse_event, verify_signature};

/// POST /api/webhooks/proposal/created
pub async fn proposal_created(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, WebhookError> {
    handle_proposal_webhook(&state, ProposalStage::Created, &headers, &body).await
}

/// POST /api/webhooks/proposal/executed
pub async fn proposal_executed(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, WebhookError> {
    handle_proposal_webhook(&state, ProposalStage::Executed, &headers, &body).await
}

/// POST /api/webhooks/proposal/rejected
pub async fn proposal_rejected(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, WebhookError> {
    handle_proposal_webhook(&state, ProposalStage::Rejected, &headers, &body).await
}

async fn handle_proposal_webhook(
    state: &AppState,
    stage: ProposalStage,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Json<Value>, WebhookError> {
    match state.env_vars.verification_mode {
        VerificationMode::Enforced => {
            let Some(signing_key) = state.env_vars.webhook_signing_key(stage) else {
                log::error!(
                    "No signing key configured for the proposal {} webhook, rejecting delivery",
                    stage
                );
                return Err(WebhookError::SigningSecretMissing);
            };

            let signature = headers
                .get(SIGNATURE_HEADER)
                .and_then(|value| value.to_str().ok());
            if signature.is_none() {
                log::warn!(
                    "Proposal {} webhook delivered without a signature header",
                    stage
                );
                return Err(WebhookError::SignatureMissing);
            }
            if !verify_signature(body, signature, signing_key) {
                log::warn!(
                    "Proposal {} webhook signature does not match the request body",
                    stage
                );
                return Err(WebhookError::SignatureMismatch);
            }
        }
        VerificationMode::Bypassed => {
            // The only code path that skips the signature check, reachable
            // solely through the explicit configuration flag.
            log::warn!(
                "Webhook signature verification is bypassed by configuration, accepting proposal {} delivery unverified",
                stage
            );
        }
    }

    let event = parse_event(body).map_err(|e| {
        log::warn!("Rejecting signed proposal {} webhook: {}", stage, e);
        e
    })?;

    // Delivery problems are logged inside the notifier and never change the
    // response; the sender has nothing to retry once the event is accepted.
    state.notifier.handle_event(stage, &event).await;

    Ok(Json(json!({ "status": "ok" })))
}
