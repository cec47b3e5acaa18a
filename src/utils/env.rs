use crate::config::{IdentityProviderConfig, VerificationMode, parse_identity_providers};
use crate::services::notifier::ProposalStage;

#[derive(Clone, Debug)]
pub struct EnvVars {
    pub identity_providers: Vec<IdentityProviderConfig>,
    pub jwks_cache_ttl_secs: u64,
    pub verification_mode: VerificationMode,
    pub wh_proposal_created_sign_key: Option<String>,
    pub wh_proposal_executed_sign_key: Option<String>,
    pub wh_proposal_rejected_sign_key: Option<String>,
    pub proposal_metadata_api_base_url: String, // Platform metadata API (override for testing)
    pub onesignal_app_id: Option<String>,
    pub onesignal_api_key: Option<String>,
    pub onesignal_api_base_url: String, // OneSignal API base URL (override for testing)
}

impl Default for EnvVars {
    fn default() -> Self {
        Self {
            identity_providers: std::env::var("IDENTITY_PROVIDERS")
                .ok()
                .filter(|s| !s.is_empty())
                .map(|s| parse_identity_providers(&s).expect("Invalid IDENTITY_PROVIDERS"))
                .unwrap_or_default(),
            jwks_cache_ttl_secs: std::env::var("JWKS_CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300), // Default: 5 minutes
            verification_mode: std::env::var("WEBHOOK_VERIFICATION_MODE")
                .map(|s| VerificationMode::from_env_value(&s))
                .unwrap_or_default(),
            wh_proposal_created_sign_key: std::env::var("WH_PROPOSAL_CREATED_SIGN_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            wh_proposal_executed_sign_key: std::env::var("WH_PROPOSAL_EXECUTED_SIGN_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            wh_proposal_rejected_sign_key: std::env::var("WH_PROPOSAL_REJECTED_SIGN_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            proposal_metadata_api_base_url: std::env::var("PROPOSAL_METADATA_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            onesignal_app_id: std::env::var("ONESIGNAL_APP_ID")
                .ok()
                .filter(|s| !s.is_empty()),
            onesignal_api_key: std::env::var("ONESIGNAL_API_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            onesignal_api_base_url: std::env::var("ONESIGNAL_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.onesignal.com".to_string()),
        }
    }
}

impl EnvVars {
    /// The signing key registered for one webhook endpoint, if configured.
    pub fn webhook_signing_key(&self, stage: ProposalStage) -> Option<&str> {
        match stage {
            ProposalStage::Created => self.wh_proposal_created_sign_key.as_deref(),
            ProposalStage::Executed => self.wh_proposal_executed_sign_key.as_deref(),
            ProposalStage::Rejected => self.wh_proposal_rejected_sign_key.as_deref(),
        }
    }
}
