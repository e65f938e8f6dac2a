//! In-memory outbox, mainly for tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::ports::{EmailMessage, MailError, Mailer};

/// Keeps every sent message so callers can inspect them.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    outbox: RwLock<Vec<EmailMessage>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub async fn outbox(&self) -> Vec<EmailMessage> {
        self.outbox.read().await.clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: EmailMessage) -> Result<usize, MailError> {
        if message.to.is_empty() {
            return Err(MailError::Rejected("no recipients".into()));
        }
        self.outbox.write().await.push(message);
        Ok(1)
    }
}
