//! Mail delivery seam.

use async_trait::async_trait;
use thiserror::Error;

use super::types::ShareEventMail;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail delivery failed: {0}")]
    Delivery(String),
}

/// Delivers a share-event notification. Template rendering and SMTP transport
/// sit behind this trait, out of scope for the core.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &ShareEventMail) -> Result<(), MailerError>;
}

/// Default mailer: logs the delivery instead of talking to an MTA.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMailer;

#[async_trait]
impl Mailer for TracingMailer {
    async fn send(&self, mail: &ShareEventMail) -> Result<(), MailerError> {
        tracing::info!(
            recipient = %mail.recipient_email,
            event_id = %mail.event.id,
            title = %mail.event.title,
            "share-event mail sent"
        );
        Ok(())
    }
}
