use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{AppState, handlers};

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

pub fn create_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))
        // Published key set for bearer-token verification
        .route("/.well-known/jwks.json", get(handlers::jwks::get_jwks))
        // Proposal lifecycle webhooks
        .route(
            "/api/webhooks/proposal/created",
            post(handlers::webhooks::proposal_created),
        )
        .route(
            "/api/webhooks/proposal/executed",
            post(handlers::webhooks::proposal_executed),
        )
        .route(
            "/api/webhooks/proposal/rejected",
            post(handlers::webhooks::proposal_rejected),
        )
        .with_state(state)
}
