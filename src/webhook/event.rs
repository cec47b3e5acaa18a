//! Typed decoding of verified webhook payloads.
//!
//! The event source wraps deliveries in an envelope of
//! `{webhookId, id, createdAt, type, event}` with block data, sequence
//! number and network nested under `event`. Parsing flattens that into a
//! [`VerifiedEvent`] and validates the shapes the rest of the service relies
//! on.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::webhook::WebhookError;

/// Source kind of a webhook payload.
///
/// Unknown kinds are carried as-is so new payload sources do not break
/// parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EventKind {
    Graphql,
    Other(String),
}

impl From<String> for EventKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "GRAPHQL" => EventKind::Graphql,
            _ => EventKind::Other(value),
        }
    }
}

/// Network an event was observed on. Unknown networks are carried as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Network {
    BaseMainnet,
    Other(String),
}

impl From<String> for Network {
    fn from(value: String) -> Self {
        match value.as_str() {
            "BASE_MAINNET" => Network::BaseMainnet,
            _ => Network::Other(value),
        }
    }
}

/// Block data carried by an event.
#[derive(Debug, Clone)]
pub struct BlockData {
    pub timestamp: u64,
    /// Raw log records, decoded further only where a consumer needs them.
    pub logs: Vec<Value>,
}

/// A webhook event whose originating request passed signature verification.
///
/// Only [`parse_event`] builds this type, and the webhook handlers only call
/// it on a body the verifier already accepted.
#[derive(Debug, Clone)]
pub struct VerifiedEvent {
    pub webhook_id: String,
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub kind: EventKind,
    pub network: Network,
    pub block: BlockData,
    pub sequence_number: BigDecimal,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope {
    webhook_id: String,
    id: String,
    created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    kind: EventKind,
    event: RawEvent,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    data: RawData,
    #[serde(deserialize_with = "crate::utils::serde::bigint")]
    sequence_number: BigDecimal,
    network: Network,
}

#[derive(Deserialize)]
struct RawData {
    block: RawBlock,
}

#[derive(Deserialize)]
struct RawBlock {
    timestamp: i64,
    #[serde(default)]
    logs: Vec<Value>,
}

/// Decode and validate a verified webhook body into a typed event.
pub fn parse_event(body: &[u8]) -> Result<VerifiedEvent, WebhookError> {
    let raw: RawEnvelope =
        serde_json::from_slice(body).map_err(|e| WebhookError::SchemaViolation(e.to_string()))?;

    let timestamp = u64::try_from(raw.event.data.block.timestamp).map_err(|_| {
        WebhookError::SchemaViolation(format!(
            "negative block timestamp {}",
            raw.event.data.block.timestamp
        ))
    })?;

    Ok(VerifiedEvent {
        webhook_id: raw.webhook_id,
        id: raw.id,
        created_at: raw.created_at,
        kind: raw.kind,
        network: raw.event.network,
        block: BlockData {
            timestamp,
            logs: raw.event.data.block.logs,
        },
        sequence_number: raw.event.sequence_number,
    })
}
