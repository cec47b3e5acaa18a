//! OneSignal client for delivering push and email notifications.
//!
//! Posts to the OneSignal REST API, addressing recipients by their external
//! alias ids. If the credentials are not configured (missing app id or API
//! key), messages are logged as warnings instead of failing.
//!
//! # Environment Variables
//! - `ONESIGNAL_APP_ID`: The OneSignal application id
//! - `ONESIGNAL_API_KEY`: The OneSignal REST API key
//! - `ONESIGNAL_API_BASE_URL`: API base URL override (for testing)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::notification_sender::{NotificationSender, OutboundNotification};
use super::templates::NotificationMessage;

pub struct OneSignalClient {
    http_client: Client,
    credentials: Option<(String, String)>,
    base_url: String,
}

impl OneSignalClient {
    /// Creates a new OneSignal client with optional credentials.
    ///
    /// If either credential is None, the client will be unconfigured and
    /// messages will be logged as warnings instead of sent.
    pub fn new(
        http_client: Client,
        app_id: Option<String>,
        api_key: Option<String>,
        base_url: String,
    ) -> Self {
        Self {
            http_client,
            credentials: app_id.zip(api_key),
            base_url,
        }
    }
}

#[async_trait]
impl NotificationSender for OneSignalClient {
    /// Sends one notification through the OneSignal REST API.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The network request fails
    /// - The OneSignal API returns a non-success status code
    async fn deliver(
        &self,
        notification: &OutboundNotification,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let Some((app_id, api_key)) = &self.credentials else {
            log::warn!(
                "OneSignal client not configured. Please set ONESIGNAL_APP_ID and ONESIGNAL_API_KEY in the environment variables. Notification for event {} ignored.",
                notification.event_id
            );
            return Ok(());
        };

        let payload = match &notification.message {
            NotificationMessage::Push(push) => json!({
                "app_id": app_id,
                "include_aliases": { "external_id": notification.recipients },
                "target_channel": "push",
                "headings": push.headings,
                "contents": push.contents,
            }),
            NotificationMessage::Email(email) => json!({
                "app_id": app_id,
                "include_aliases": { "external_id": notification.recipients },
                "target_channel": "email",
                "email_subject": email.subject,
                "email_body": email.body,
            }),
        };

        let url = format!(
            "{}/api/v1/notifications",
            self.base_url.trim_end_matches('/')
        );
        let response = self
            .http_client
            .post(url)
            .header("Authorization", format!("Key {}", api_key))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("OneSignal API returned {}: {}", status, body).into());
        }
        Ok(())
    }
}
