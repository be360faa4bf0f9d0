use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::infrastructure::notify::{MessageCreated, MessageNotifier, SendError};
use crate::settings::AppConfig;

/// Sends new-message notifications through the transactional mail
/// service's HTTP API.
pub struct WebhookMailer {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
    to: String,
}

impl WebhookMailer {
    /// Returns `None` when the mail endpoint or recipient is not configured.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let endpoint = config.mail_endpoint.clone()?;
        let to = config.notify_email.clone()?;

        Some(WebhookMailer {
            client: Client::new(),
            endpoint,
            api_key: config.mail_api_key.clone(),
            from: config.mail_from.clone(),
            to,
        })
    }

    fn render_body(event: &MessageCreated) -> String {
        let msg = &event.message;
        format!(
            "<h2>New Contact Form Submission</h2>\
             <p><strong>From:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Subject:</strong> {}</p>\
             <p><strong>Message:</strong></p>\
             <p>{}</p>\
             <hr>\
             <p><small>Received at: {}</small></p>",
            msg.name,
            msg.email,
            msg.subject,
            msg.message,
            msg.timestamp.to_rfc3339(),
        )
    }
}

#[async_trait]
impl MessageNotifier for WebhookMailer {
    async fn notify(&self, event: &MessageCreated) -> Result<(), SendError> {
        let payload = json!({
            "from": self.from,
            "to": self.to,
            "subject": format!("New Contact Message: {}", event.message.subject),
            "html": Self::render_body(event),
        });

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SendError::Dispatch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SendError::Dispatch(format!(
                "mail endpoint returned {}",
                response.status()
            )));
        }

        tracing::info!("Notification email dispatched for message {}", event.message.id);
        Ok(())
    }
}
