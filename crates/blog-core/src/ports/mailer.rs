//! Outbound email port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

/// Mail transport - console, HTTP relay or in-memory outbox.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message, returning how many were sent.
    async fn send(&self, message: EmailMessage) -> Result<usize, MailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail transport failed: {0}")]
    Transport(String),

    #[error("Mail rejected: {0}")]
    Rejected(String),
}
