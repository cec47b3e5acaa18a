//! Notification copy for proposal lifecycle events.
//!
//! Each function renders one channel/audience combination. Proposals labeled
//! `Invite` use join-request copy, everything else the generic proposal
//! copy. Missing context fields fall back to neutral placeholders so a
//! sparse context still renders a sendable message.

use std::collections::HashMap;

use serde::Serialize;

use super::proposal_directory::ProposalContext;

/// Label marking a proposal as a membership invite.
pub const LABEL_INVITE: &str = "Invite";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// Push payload with per-locale text, keyed by locale tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushContent {
    pub headings: HashMap<String, String>,
    pub contents: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationMessage {
    Email(EmailContent),
    Push(PushContent),
}

fn en(text: impl Into<String>) -> HashMap<String, String> {
    HashMap::from([("en".to_string(), text.into())])
}

fn is_invite(ctx: &ProposalContext) -> bool {
    ctx.proposal_label.as_deref() == Some(LABEL_INVITE)
}

fn creator_name(ctx: &ProposalContext) -> &str {
    ctx.creator_name.as_deref().unwrap_or("Someone")
}

fn space_title(ctx: &ProposalContext) -> &str {
    ctx.space_title.as_deref().unwrap_or("a space")
}

fn proposal_title(ctx: &ProposalContext) -> &str {
    ctx.proposal_title.as_deref().unwrap_or("a proposal")
}

fn proposal_state(ctx: &ProposalContext) -> &str {
    ctx.proposal_state.as_deref().unwrap_or("proposal")
}

pub fn push_proposal_creation_for_creator(ctx: &ProposalContext) -> PushContent {
    if is_invite(ctx) {
        PushContent {
            headings: en("You successfully created a join request"),
            contents: en(format!(
                "Your request to join the space \"{}\" was created.",
                space_title(ctx)
            )),
        }
    } else {
        PushContent {
            headings: en("You successfully created a proposal"),
            contents: en(format!(
                "Your {} \"{}\" in the space \"{}\" was created.",
                proposal_state(ctx),
                proposal_title(ctx),
                space_title(ctx)
            )),
        }
    }
}

pub fn email_proposal_creation_for_creator(ctx: &ProposalContext) -> EmailContent {
    if is_invite(ctx) {
        EmailContent {
            subject: "Your join request was created".to_string(),
            body: format!(
                "Hi {}, your request to join the space \"{}\" was created.",
                creator_name(ctx),
                space_title(ctx)
            ),
        }
    } else {
        EmailContent {
            subject: "Your proposal was created".to_string(),
            body: format!(
                "Hi {}, your {} \"{}\" in the space \"{}\" was created.",
                creator_name(ctx),
                proposal_state(ctx),
                proposal_title(ctx),
                space_title(ctx)
            ),
        }
    }
}

pub fn push_proposal_creation_for_members(ctx: &ProposalContext) -> PushContent {
    if is_invite(ctx) {
        PushContent {
            headings: en(format!("New join request in \"{}\"", space_title(ctx))),
            contents: en(format!(
                "{} requested to join the space \"{}\".",
                creator_name(ctx),
                space_title(ctx)
            )),
        }
    } else {
        PushContent {
            headings: en(format!("New proposal in \"{}\"", space_title(ctx))),
            contents: en(format!(
                "{} published the {} \"{}\" in the space \"{}\".",
                creator_name(ctx),
                proposal_state(ctx),
                proposal_title(ctx),
                space_title(ctx)
            )),
        }
    }
}

pub fn email_proposal_creation_for_members(ctx: &ProposalContext) -> EmailContent {
    if is_invite(ctx) {
        EmailContent {
            subject: format!("New join request in \"{}\"", space_title(ctx)),
            body: format!(
                "{} requested to join the space \"{}\".",
                creator_name(ctx),
                space_title(ctx)
            ),
        }
    } else {
        EmailContent {
            subject: format!("New proposal in \"{}\"", space_title(ctx)),
            body: format!(
                "{} published the {} \"{}\" in the space \"{}\".",
                creator_name(ctx),
                proposal_state(ctx),
                proposal_title(ctx),
                space_title(ctx)
            ),
        }
    }
}

pub fn push_proposal_execution_for_creator(ctx: &ProposalContext) -> PushContent {
    if is_invite(ctx) {
        PushContent {
            headings: en("You joined the space"),
            contents: en(format!(
                "Your request to join the space \"{}\" was accepted.",
                space_title(ctx)
            )),
        }
    } else {
        PushContent {
            headings: en("Your proposal passed"),
            contents: en(format!(
                "Your {} \"{}\" in the space \"{}\" was accepted and executed.",
                proposal_state(ctx),
                proposal_title(ctx),
                space_title(ctx)
            )),
        }
    }
}

pub fn email_proposal_execution_for_creator(ctx: &ProposalContext) -> EmailContent {
    if is_invite(ctx) {
        EmailContent {
            subject: "Your join request was accepted".to_string(),
            body: format!(
                "Hi {}, your request to join the space \"{}\" was accepted.",
                creator_name(ctx),
                space_title(ctx)
            ),
        }
    } else {
        EmailContent {
            subject: "Your proposal was executed".to_string(),
            body: format!(
                "Hi {}, your {} \"{}\" in the space \"{}\" was accepted and executed.",
                creator_name(ctx),
                proposal_state(ctx),
                proposal_title(ctx),
                space_title(ctx)
            ),
        }
    }
}

pub fn push_proposal_execution_for_members(ctx: &ProposalContext) -> PushContent {
    if is_invite(ctx) {
        PushContent {
            headings: en(format!("A new member joined \"{}\"", space_title(ctx))),
            contents: en(format!(
                "{} joined the space \"{}\".",
                creator_name(ctx),
                space_title(ctx)
            )),
        }
    } else {
        PushContent {
            headings: en(format!("Proposal passed in \"{}\"", space_title(ctx))),
            contents: en(format!(
                "The {} \"{}\" was accepted and executed.",
                proposal_state(ctx),
                proposal_title(ctx)
            )),
        }
    }
}

pub fn email_proposal_execution_for_members(ctx: &ProposalContext) -> EmailContent {
    if is_invite(ctx) {
        EmailContent {
            subject: format!("A new member joined \"{}\"", space_title(ctx)),
            body: format!(
                "{} joined the space \"{}\".",
                creator_name(ctx),
                space_title(ctx)
            ),
        }
    } else {
        EmailContent {
            subject: format!("Proposal passed in \"{}\"", space_title(ctx)),
            body: format!(
                "The {} \"{}\" was accepted and executed.",
                proposal_state(ctx),
                proposal_title(ctx)
            ),
        }
    }
}

pub fn push_proposal_rejection_for_creator(ctx: &ProposalContext) -> PushContent {
    if is_invite(ctx) {
        PushContent {
            headings: en("Your join request was rejected"),
            contents: en(format!(
                "Your request to join the space \"{}\" was rejected.",
                space_title(ctx)
            )),
        }
    } else {
        PushContent {
            headings: en("Your proposal was rejected"),
            contents: en(format!(
                "Your {} \"{}\" in the space \"{}\" was rejected.",
                proposal_state(ctx),
                proposal_title(ctx),
                space_title(ctx)
            )),
        }
    }
}

pub fn email_proposal_rejection_for_creator(ctx: &ProposalContext) -> EmailContent {
    if is_invite(ctx) {
        EmailContent {
            subject: "Your join request was rejected".to_string(),
            body: format!(
                "Hi {}, your request to join the space \"{}\" was rejected.",
                creator_name(ctx),
                space_title(ctx)
            ),
        }
    } else {
        EmailContent {
            subject: "Your proposal was rejected".to_string(),
            body: format!(
                "Hi {}, your {} \"{}\" in the space \"{}\" was rejected.",
                creator_name(ctx),
                proposal_state(ctx),
                proposal_title(ctx),
                space_title(ctx)
            ),
        }
    }
}

pub fn push_proposal_rejection_for_members(ctx: &ProposalContext) -> PushContent {
    if is_invite(ctx) {
        PushContent {
            headings: en(format!(
                "A join request in \"{}\" was rejected",
                space_title(ctx)
            )),
            contents: en(format!(
                "{}'s request to join the space \"{}\" was rejected.",
                creator_name(ctx),
                space_title(ctx)
            )),
        }
    } else {
        PushContent {
            headings: en(format!("Proposal rejected in \"{}\"", space_title(ctx))),
            contents: en(format!(
                "The {} \"{}\" was rejected.",
                proposal_state(ctx),
                proposal_title(ctx)
            )),
        }
    }
}

pub fn email_proposal_rejection_for_members(ctx: &ProposalContext) -> EmailContent {
    if is_invite(ctx) {
        EmailContent {
            subject: format!("A join request in \"{}\" was rejected", space_title(ctx)),
            body: format!(
                "{}'s request to join the space \"{}\" was rejected.",
                creator_name(ctx),
                space_title(ctx)
            ),
        }
    } else {
        EmailContent {
            subject: format!("Proposal rejected in \"{}\"", space_title(ctx)),
            body: format!(
                "The {} \"{}\" was rejected.",
                proposal_state(ctx),
                proposal_title(ctx)
            ),
        }
    }
}
