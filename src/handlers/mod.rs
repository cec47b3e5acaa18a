pub mod jwks;
pub mod webhooks;
