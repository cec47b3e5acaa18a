//! Proposal lifecycle notification dispatch
//!
//! Consumes verified webhook events and turns them into outbound
//! notifications for the proposal creator and the space members. Every
//! failure past the webhook response is logged and consumed here; nothing in
//! this module changes the HTTP outcome of a delivery.

use std::fmt;

use serde_json::Value;

use super::notification_sender::{NotificationSender, OutboundNotification};
use super::proposal_directory::{ProposalContext, ProposalDirectory};
use super::templates::{self, NotificationMessage};
use crate::webhook::VerifiedEvent;

/// Lifecycle stage a webhook endpoint is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalStage {
    Created,
    Executed,
    Rejected,
}

impl fmt::Display for ProposalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            ProposalStage::Created => "created",
            ProposalStage::Executed => "executed",
            ProposalStage::Rejected => "rejected",
        };
        write!(f, "{}", stage)
    }
}

/// Non-fatal dispatch failures. The event stays consumed either way.
#[derive(Debug)]
pub enum NotifyError {
    /// The proposal context resolved to no recipients at all, so no message
    /// content is produced.
    TemplateUnmapped,
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::TemplateUnmapped => {
                write!(f, "No notification recipients could be mapped for this event")
            }
        }
    }
}

impl std::error::Error for NotifyError {}

pub struct ProposalNotifier<D, S> {
    directory: D,
    sender: S,
}

impl<D: ProposalDirectory, S: NotificationSender> ProposalNotifier<D, S> {
    pub fn new(directory: D, sender: S) -> Self {
        Self { directory, sender }
    }

    /// Handle one verified event end to end: resolve the referenced
    /// proposals, render the copy and hand it to the delivery channel.
    pub async fn handle_event(&self, stage: ProposalStage, event: &VerifiedEvent) {
        let proposal_ids = extract_proposal_ids(&event.block.logs);
        if proposal_ids.is_empty() {
            log::warn!(
                "No proposal ids found in the logs of {} event {}, nothing to notify",
                stage,
                event.id
            );
            return;
        }

        for proposal_id in proposal_ids {
            let ctx = match self.directory.find_proposal_context(proposal_id).await {
                Ok(Some(ctx)) => ctx,
                Ok(None) => {
                    log::warn!(
                        "No proposal metadata found for proposal {} (event {})",
                        proposal_id,
                        event.id
                    );
                    continue;
                }
                Err(e) => {
                    log::error!(
                        "Proposal metadata lookup failed for proposal {} (event {}): {}",
                        proposal_id,
                        event.id,
                        e
                    );
                    continue;
                }
            };

            match notifications_for(stage, &ctx, &event.id) {
                Ok(batch) => {
                    for notification in batch {
                        if let Err(e) = self.sender.deliver(&notification).await {
                            log::error!(
                                "Failed to deliver {} notification for event {}: {}",
                                stage,
                                event.id,
                                e
                            );
                        }
                    }
                }
                Err(e) => {
                    log::warn!(
                        "Dropping notification content for proposal {} (event {}): {}",
                        proposal_id,
                        event.id,
                        e
                    );
                }
            }
        }
    }
}

/// Proposal ids referenced by an event's logs.
///
/// The proposal id is the first indexed event argument, i.e. the second
/// topic of each log record. Ids that do not fit in a u64 are skipped, the
/// same safe-integer filter the rest of the platform applies.
pub fn extract_proposal_ids(logs: &[Value]) -> Vec<u64> {
    let mut ids = Vec::new();
    for log in logs {
        let Some(topic) = log
            .get("topics")
            .and_then(|topics| topics.get(1))
            .and_then(Value::as_str)
        else {
            continue;
        };
        match parse_topic(topic) {
            Some(id) if !ids.contains(&id) => ids.push(id),
            Some(_) => {}
            None => log::warn!("Skipping log with unparseable proposal id topic {}", topic),
        }
    }
    ids
}

fn parse_topic(topic: &str) -> Option<u64> {
    let digits = topic.strip_prefix("0x").unwrap_or(topic);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return Some(0);
    }
    if trimmed.len() > 16 {
        return None;
    }
    u64::from_str_radix(trimmed, 16).ok()
}

/// Resolve the outbound batch for one proposal context.
///
/// Creator copy goes to the creator alias, member copy to every member
/// except the creator, each over push and email.
pub fn notifications_for(
    stage: ProposalStage,
    ctx: &ProposalContext,
    event_id: &str,
) -> Result<Vec<OutboundNotification>, NotifyError> {
    let mut batch = Vec::new();
    let creator = ctx.creator_slug.as_deref().filter(|slug| !slug.is_empty());

    if let Some(creator) = creator {
        let (push, email) = match stage {
            ProposalStage::Created => (
                templates::push_proposal_creation_for_creator(ctx),
                templates::email_proposal_creation_for_creator(ctx),
            ),
            ProposalStage::Executed => (
                templates::push_proposal_execution_for_creator(ctx),
                templates::email_proposal_execution_for_creator(ctx),
            ),
            ProposalStage::Rejected => (
                templates::push_proposal_rejection_for_creator(ctx),
                templates::email_proposal_rejection_for_creator(ctx),
            ),
        };
        batch.push(OutboundNotification {
            event_id: event_id.to_string(),
            recipients: vec![creator.to_string()],
            message: NotificationMessage::Push(push),
        });
        batch.push(OutboundNotification {
            event_id: event_id.to_string(),
            recipients: vec![creator.to_string()],
            message: NotificationMessage::Email(email),
        });
    }

    let members: Vec<String> = ctx
        .member_slugs
        .iter()
        .filter(|slug| !slug.is_empty())
        .filter(|slug| Some(slug.as_str()) != creator)
        .cloned()
        .collect();

    if !members.is_empty() {
        let (push, email) = match stage {
            ProposalStage::Created => (
                templates::push_proposal_creation_for_members(ctx),
                templates::email_proposal_creation_for_members(ctx),
            ),
            ProposalStage::Executed => (
                templates::push_proposal_execution_for_members(ctx),
                templates::email_proposal_execution_for_members(ctx),
            ),
            ProposalStage::Rejected => (
                templates::push_proposal_rejection_for_members(ctx),
                templates::email_proposal_rejection_for_members(ctx),
            ),
        };
        batch.push(OutboundNotification {
            event_id: event_id.to_string(),
            recipients: members.clone(),
            message: NotificationMessage::Push(push),
        });
        batch.push(OutboundNotification {
            event_id: event_id.to_string(),
            recipients: members,
            message: NotificationMessage::Email(email),
        });
    }

    if batch.is_empty() {
        return Err(NotifyError::TemplateUnmapped);
    }
    Ok(batch)
}
