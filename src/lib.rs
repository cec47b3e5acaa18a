pub mod config;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod utils;
pub mod webhook;

use std::sync::Arc;
use std::time::Duration;

use services::{
    HttpProposalDirectory, JwksAggregator, KeyProvider, OneSignalClient, ProposalNotifier,
    RemoteIdentityProvider,
};
use utils::env::EnvVars;

pub struct AppState {
    pub http_client: reqwest::Client,
    pub key_aggregator: JwksAggregator,
    pub notifier: ProposalNotifier<HttpProposalDirectory, OneSignalClient>,
    pub env_vars: EnvVars,
}

/// Initialize the application state from resolved configuration
pub fn init_app_state(env_vars: EnvVars) -> AppState {
    let http_client = reqwest::Client::new();

    let providers: Vec<Arc<dyn KeyProvider>> = env_vars
        .identity_providers
        .iter()
        .map(|provider| {
            log::info!(
                "Registering identity provider {} at {}",
                provider.id,
                provider.jwks_url
            );
            Arc::new(RemoteIdentityProvider::new(
                http_client.clone(),
                provider.id.clone(),
                provider.jwks_url.clone(),
            )) as Arc<dyn KeyProvider>
        })
        .collect();

    if providers.is_empty() {
        log::warn!("No identity providers configured, the published key set will be empty");
    }

    let key_aggregator = JwksAggregator::new(
        providers,
        Duration::from_secs(env_vars.jwks_cache_ttl_secs),
    );

    let directory = HttpProposalDirectory::new(
        http_client.clone(),
        env_vars.proposal_metadata_api_base_url.clone(),
    );

    if env_vars.onesignal_app_id.is_none() || env_vars.onesignal_api_key.is_none() {
        log::info!("No OneSignal credentials found, notification delivery will be disabled");
    }
    let sender = OneSignalClient::new(
        http_client.clone(),
        env_vars.onesignal_app_id.clone(),
        env_vars.onesignal_api_key.clone(),
        env_vars.onesignal_api_base_url.clone(),
    );

    let notifier = ProposalNotifier::new(directory, sender);

    AppState {
        http_client,
        key_aggregator,
        notifier,
        env_vars,
    }
}
