//! Console mailer - writes each message to the log instead of sending it.

use async_trait::async_trait;

use blog_core::ports::{EmailMessage, MailError, Mailer};

/// Development transport. Every message counts as delivered.
#[derive(Debug, Default)]
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, message: EmailMessage) -> Result<usize, MailError> {
        tracing::info!(
            from = %message.from,
            to = ?message.to,
            subject = %message.subject,
            body = %message.body,
            "Email sent to console"
        );
        Ok(1)
    }
}
