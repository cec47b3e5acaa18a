//! Aggregation of identity provider key sets into one published JWKS
//!
//! Downstream services verify bearer tokens against a single published key
//! set, regardless of which identity provider issued the token. The
//! aggregator fans out to every registered provider, merges the results and
//! caches the combined set. One provider being down degrades the set instead
//! of emptying it; only total failure is an error.

use futures::future::join_all;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use moka::future::Cache;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::key_provider::{KeyProvider, ProviderError};

/// The cache holds this single entry.
const COMBINED_KEY: &str = "jwks:combined";

/// Backoff before the single retry of an unavailable provider.
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub enum AggregationError {
    /// Every registered provider failed; there is nothing to publish.
    AllProvidersUnavailable,
}

impl std::fmt::Display for AggregationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationError::AllProvidersUnavailable => {
                write!(f, "All identity providers are currently unavailable")
            }
        }
    }
}

impl std::error::Error for AggregationError {}

pub struct JwksAggregator {
    providers: Vec<Arc<dyn KeyProvider>>,
    cache: Cache<String, JwkSet>,
}

impl JwksAggregator {
    /// Creates an aggregator over the registered providers with the given
    /// cache TTL.
    pub fn new(providers: Vec<Arc<dyn KeyProvider>>, cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(cache_ttl)
            .build();

        Self { providers, cache }
    }

    /// Returns the combined, deduplicated key set of all providers.
    ///
    /// Served from cache within the TTL. A cache fill recomputes from every
    /// provider and replaces the entry in a single insert, so readers never
    /// observe a partially assembled set; an aborted request drops the fill
    /// before the insert and leaves the cache untouched.
    pub async fn combined_key_set(&self) -> Result<JwkSet, AggregationError> {
        if let Some(cached) = self.cache.get(COMBINED_KEY).await {
            return Ok(cached);
        }

        let combined = self.aggregate().await?;
        self.cache
            .insert(COMBINED_KEY.to_string(), combined.clone())
            .await;

        Ok(combined)
    }

    async fn aggregate(&self) -> Result<JwkSet, AggregationError> {
        let fetches = self
            .providers
            .iter()
            .map(|provider| fetch_with_retry(provider.as_ref()));
        let results = join_all(fetches).await;

        let mut collected: Vec<(&str, JwkSet)> = Vec::new();
        for (provider, result) in self.providers.iter().zip(results) {
            match result {
                Ok(key_set) => collected.push((provider.provider_id(), key_set)),
                Err(e) => {
                    log::warn!(
                        "Identity provider {} contributes zero keys this pass: {}",
                        provider.provider_id(),
                        e
                    );
                }
            }
        }

        if collected.is_empty() && !self.providers.is_empty() {
            return Err(AggregationError::AllProvidersUnavailable);
        }

        Ok(merge_key_sets(&collected))
    }
}

/// Retry a provider once after a short backoff.
///
/// Only network-level failures are retried; a malformed key set is final for
/// this aggregation pass.
async fn fetch_with_retry(provider: &dyn KeyProvider) -> Result<JwkSet, ProviderError> {
    match provider.fetch_key_set().await {
        Err(ProviderError::Unavailable(msg)) => {
            log::warn!(
                "Identity provider {} unavailable ({}), retrying once",
                provider.provider_id(),
                msg
            );
            tokio::time::sleep(RETRY_BACKOFF).await;
            provider.fetch_key_set().await
        }
        other => other,
    }
}

/// Merge provider key sets, deduplicating by `kid`.
///
/// A `kid` served by multiple providers with identical key material collapses
/// to one entry. A `kid` served with *different* material is dropped entirely
/// and logged: picking one side would let a compromised provider shadow a
/// legitimate key. Output order is first-seen order and carries no meaning.
fn merge_key_sets(collected: &[(&str, JwkSet)]) -> JwkSet {
    let mut kid_order: Vec<String> = Vec::new();
    let mut entries: HashMap<String, Vec<(&str, &Jwk)>> = HashMap::new();

    for (provider_id, key_set) in collected {
        for key in &key_set.keys {
            // Providers reject keys without a kid before they get here
            let Some(kid) = key.common.key_id.clone() else {
                continue;
            };
            if !entries.contains_key(&kid) {
                kid_order.push(kid.clone());
            }
            entries.entry(kid).or_default().push((*provider_id, key));
        }
    }

    let mut keys = Vec::new();
    for kid in kid_order {
        let candidates = &entries[&kid];
        let reference = key_material(candidates[0].1);
        if candidates
            .iter()
            .all(|(_, key)| key_material(key) == reference)
        {
            keys.push(candidates[0].1.clone());
        } else {
            let providers: Vec<&str> = candidates
                .iter()
                .map(|(provider_id, _)| *provider_id)
                .collect();
            log::error!(
                "Conflicting key material for kid {} across providers {:?}; dropping every entry for this kid",
                kid,
                providers
            );
        }
    }

    JwkSet { keys }
}

/// Structural view of a key's material, independent of metadata fields.
fn key_material(key: &Jwk) -> Value {
    serde_json::to_value(&key.algorithm).unwrap_or(Value::Null)
}
