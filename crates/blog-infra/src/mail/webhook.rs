//! HTTP mail relay - posts each message as JSON to a configured URL.

use async_trait::async_trait;

use blog_core::ports::{EmailMessage, MailError, Mailer};

/// Sends mail through an HTTP relay that accepts
/// `{"from", "to", "subject", "body"}` payloads.
pub struct WebhookMailer {
    url: String,
    client: reqwest::Client,
}

impl WebhookMailer {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for WebhookMailer {
    async fn send(&self, message: EmailMessage) -> Result<usize, MailError> {
        let payload = serde_json::json!({
            "from": message.from,
            "to": message.to,
            "subject": message.subject,
            "body": message.body,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, url = %self.url, "Mail relay rejected message");
            return Err(MailError::Rejected(format!("relay responded {status}")));
        }

        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_relay_is_transport_error() {
        let mailer = WebhookMailer::new("http://127.0.0.1:9/mail".into());
        let message = EmailMessage {
            subject: "Subject".into(),
            body: "Body".into(),
            from: "admin@example.com".into(),
            to: vec!["friend@example.com".into()],
        };

        let result = mailer.send(message).await;
        assert!(matches!(result, Err(MailError::Transport(_))));
    }
}
