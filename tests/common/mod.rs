//! Shared helpers for integration tests.
//!
//! Tests drive the router in-process with `tower::oneshot`, pointing every
//! outbound client at wiremock servers.

use axum::Router;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use sg_be::config::VerificationMode;
use sg_be::routes::create_routes;
use sg_be::utils::env::EnvVars;

pub const CREATED_KEY: &str = "whsec_created_test_key";
pub const EXECUTED_KEY: &str = "whsec_executed_test_key";
pub const REJECTED_KEY: &str = "whsec_rejected_test_key";

/// Environment with webhook keys set and no outbound endpoints configured.
/// Tests override the base URLs with their wiremock servers as needed.
pub fn test_env_vars() -> EnvVars {
    EnvVars {
        identity_providers: Vec::new(),
        jwks_cache_ttl_secs: 300,
        verification_mode: VerificationMode::Enforced,
        wh_proposal_created_sign_key: Some(CREATED_KEY.to_string()),
        wh_proposal_executed_sign_key: Some(EXECUTED_KEY.to_string()),
        wh_proposal_rejected_sign_key: Some(REJECTED_KEY.to_string()),
        proposal_metadata_api_base_url: "http://127.0.0.1:9".to_string(),
        onesignal_app_id: Some("test-app-id".to_string()),
        onesignal_api_key: Some("test-api-key".to_string()),
        onesignal_api_base_url: "http://127.0.0.1:9".to_string(),
    }
}

pub fn build_app(env_vars: EnvVars) -> Router {
    create_routes(Arc::new(sg_be::init_app_state(env_vars)))
}

/// Hex HMAC-SHA256 of `body`, as the event source sends it.
pub fn sign_body(body: &[u8], key: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key.as_bytes()).expect("HMAC accepts any key size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// A well-formed event envelope whose single log references `proposal_id`.
pub fn proposal_event_body(proposal_id: u64) -> Vec<u8> {
    serde_json::json!({
        "webhookId": "wh_test1",
        "id": "whevt_test1",
        "createdAt": "2026-08-05T12:00:00.000Z",
        "type": "GRAPHQL",
        "event": {
            "data": {
                "block": {
                    "timestamp": 1754394000u64,
                    "logs": [
                        {
                            "topics": [
                                "0x3fca3b94c347e8b0c0c2a5d2f5cbdcf0cf3d0f85dfbcfe0c2e30b37662dd4b64",
                                format!("0x{:064x}", proposal_id)
                            ],
                            "data": "0x"
                        }
                    ]
                }
            },
            "sequenceNumber": "10000000000596528",
            "network": "BASE_MAINNET"
        }
    })
    .to_string()
    .into_bytes()
}
