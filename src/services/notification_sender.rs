//! Notification delivery trait
//!
//! This module defines the interface for outbound notification channels.

use async_trait::async_trait;

use super::templates::NotificationMessage;

/// A notification resolved to concrete recipients.
///
/// `event_id` is the id of the verified event the message was derived from,
/// so every delivered message stays attributable to exactly one event.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundNotification {
    pub event_id: String,
    /// Alias ids of the recipients.
    pub recipients: Vec<String>,
    pub message: NotificationMessage,
}

/// Trait for notification delivery channels
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Delivers one notification to its recipients
    ///
    /// Retries and backpressure are the channel's own concern; the caller
    /// only logs failures.
    async fn deliver(
        &self,
        notification: &OutboundNotification,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
