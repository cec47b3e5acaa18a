//! HTTP adapter for an identity provider's published key set
//!
//! Fetches and validates the JWKS document one external identity provider
//! serves at its well-known URL.

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use reqwest::Client;
use serde_json::Value;

use super::key_provider::{KeyProvider, ProviderError};

/// Identity provider JWKS client
pub struct RemoteIdentityProvider {
    http_client: Client,
    provider_id: String,
    jwks_url: String,
}

impl RemoteIdentityProvider {
    /// Creates a new provider adapter
    ///
    /// # Arguments
    /// * `http_client` - Shared HTTP client for making requests
    /// * `provider_id` - Stable identifier used in logs and collision reports
    /// * `jwks_url` - The provider's published JWKS URL
    pub fn new(http_client: Client, provider_id: String, jwks_url: String) -> Self {
        Self {
            http_client,
            provider_id,
            jwks_url,
        }
    }
}

#[async_trait]
impl KeyProvider for RemoteIdentityProvider {
    fn provider_id(&self) -> &str {
        &self.provider_id
    }

    async fn fetch_key_set(&self) -> Result<JwkSet, ProviderError> {
        let response = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| {
                ProviderError::Unavailable(format!("request to {} failed: {}", self.jwks_url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Unavailable(format!(
                "{} returned {}",
                self.jwks_url, status
            )));
        }

        // A non-JSON body means the provider itself is broken; a JSON body
        // that fails the JWKS shape is a malformed key set.
        let document: Value = response.json().await.map_err(|e| {
            ProviderError::Unavailable(format!(
                "{} returned a non-JSON body: {}",
                self.jwks_url, e
            ))
        })?;

        let key_set: JwkSet = serde_json::from_value(document)
            .map_err(|e| ProviderError::MalformedKeySet(format!("{}: {}", self.provider_id, e)))?;

        for key in &key_set.keys {
            let kid = key.common.key_id.as_deref().unwrap_or("");
            if kid.is_empty() {
                return Err(ProviderError::MalformedKeySet(format!(
                    "{} published a key without a kid",
                    self.provider_id
                )));
            }
            if key.common.key_algorithm.is_none() {
                return Err(ProviderError::MalformedKeySet(format!(
                    "{} published key {} without an alg",
                    self.provider_id, kid
                )));
            }
        }

        Ok(key_set)
    }
}
