pub mod mailer;

use async_trait::async_trait;
use derive_more::Display;

use crate::entities::message::Message;

/// Event published after a message record has been persisted. Delivery is
/// decoupled from persistence: a failed notification never rolls back or
/// fails the write.
#[derive(Debug, Clone)]
pub struct MessageCreated {
    pub message: Message,
}

#[derive(Debug, Display)]
pub enum SendError {
    #[display("Mail endpoint not configured")]
    NotConfigured,

    #[display("Mail dispatch failed: {_0}")]
    Dispatch(String),
}

#[async_trait]
pub trait MessageNotifier: Send + Sync {
    async fn notify(&self, event: &MessageCreated) -> Result<(), SendError>;
}

/// Notifier used when no mail endpoint is configured.
pub struct NoopNotifier;

#[async_trait]
impl MessageNotifier for NoopNotifier {
    async fn notify(&self, event: &MessageCreated) -> Result<(), SendError> {
        tracing::debug!(
            "Email notifications disabled, dropping notification for message {}",
            event.message.id
        );
        Ok(())
    }
}
