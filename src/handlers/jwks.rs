use axum::{Json, extract::State, http::StatusCode};
use jsonwebtoken::jwk::JwkSet;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::AppState;

/// GET /.well-known/jwks.json
///
/// Serves the combined key set of every configured identity provider.
/// Relying parties resolve bearer-token signing keys against this document,
/// so it only fails when no provider could be reached at all.
pub async fn get_jwks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<JwkSet>, (StatusCode, Json<Value>)> {
    match state.key_aggregator.combined_key_set().await {
        Ok(key_set) => Ok(Json(key_set)),
        Err(e) => {
            log::error!("Failed to aggregate identity provider keys: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Key set temporarily unavailable"
                })),
            ))
        }
    }
}
