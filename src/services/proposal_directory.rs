//! Proposal metadata lookup
//!
//! Rendering notification copy needs the human-facing metadata of a
//! proposal: creator, label, state, titles and the member roster. That data
//! lives with the platform's own services, so this module only defines the
//! lookup capability and a thin HTTP client for it.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Metadata of one proposal, as needed for notifications.
///
/// Every field is optional on the wire; template rendering substitutes
/// neutral placeholders for whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProposalContext {
    /// Alias id of the proposal creator, the recipient of creator-facing copy.
    pub creator_slug: Option<String>,
    pub creator_name: Option<String>,
    pub proposal_label: Option<String>,
    pub proposal_state: Option<String>,
    pub proposal_title: Option<String>,
    pub space_title: Option<String>,
    pub space_slug: Option<String>,
    /// Alias ids of the space members.
    pub member_slugs: Vec<String>,
}

/// Trait for proposal metadata sources
#[async_trait]
pub trait ProposalDirectory: Send + Sync {
    /// Looks up the notification context for an on-chain proposal id
    ///
    /// # Returns
    /// * `Ok(Some(context))` - Metadata for a proposal the platform knows
    /// * `Ok(None)` - The proposal is not known to the platform
    /// * `Err(_)` - The lookup itself failed
    async fn find_proposal_context(
        &self,
        proposal_id: u64,
    ) -> Result<Option<ProposalContext>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Proposal metadata client backed by the platform's internal API
pub struct HttpProposalDirectory {
    http_client: Client,
    base_url: String,
}

impl HttpProposalDirectory {
    /// Creates a new directory client
    ///
    /// # Arguments
    /// * `http_client` - Shared HTTP client for making requests
    /// * `base_url` - Base URL of the platform metadata API
    pub fn new(http_client: Client, base_url: String) -> Self {
        Self {
            http_client,
            base_url,
        }
    }
}

#[async_trait]
impl ProposalDirectory for HttpProposalDirectory {
    async fn find_proposal_context(
        &self,
        proposal_id: u64,
    ) -> Result<Option<ProposalContext>, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!(
            "{}/api/proposals/{}/notification-context",
            self.base_url.trim_end_matches('/'),
            proposal_id
        );

        let response = self.http_client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(format!(
                "Proposal metadata API returned {} for proposal {}",
                status, proposal_id
            )
            .into());
        }

        Ok(Some(response.json::<ProposalContext>().await?))
    }
}
