//! Key provider trait for identity provider signing keys
//!
//! This module defines the interface for signing-key sources. Each
//! implementation wraps one external identity provider and exposes its
//! current public key set in the standard JWKS shape.

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;

/// Errors a key-set fetch can produce.
///
/// The aggregator treats both kinds as "this provider currently contributes
/// zero keys", but only `Unavailable` is worth a retry.
#[derive(Debug)]
pub enum ProviderError {
    /// The provider could not be reached, or answered with something that is
    /// not a JSON document.
    Unavailable(String),
    /// The provider answered with JSON, but the key set is missing required
    /// fields (`kid`, `alg`, key material).
    MalformedKeySet(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Unavailable(msg) => write!(f, "Provider unavailable: {}", msg),
            ProviderError::MalformedKeySet(msg) => write!(f, "Malformed key set: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Trait for identity provider signing-key sources
#[async_trait]
pub trait KeyProvider: Send + Sync {
    /// Returns the stable identifier of the provider (e.g. "privy"), used in
    /// logs and collision reports
    fn provider_id(&self) -> &str;

    /// Fetches the provider's current public signing keys
    ///
    /// # Returns
    /// * `Ok(key_set)` - The provider's current key set
    /// * `Err(ProviderError::Unavailable)` - The provider could not be reached
    /// * `Err(ProviderError::MalformedKeySet)` - The response parsed but a key entry is incomplete
    async fn fetch_key_set(&self) -> Result<JwkSet, ProviderError>;
}
