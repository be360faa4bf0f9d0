use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::{
    entities::message::{Message, MessageReceipt, NewMessage},
    errors::AppError,
    infrastructure::notify::{MessageCreated, MessageNotifier},
    repositories::record_store::{Collection, RecordStore},
};

pub struct MessagesHandler {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn MessageNotifier>,
}

impl MessagesHandler {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn MessageNotifier>) -> Self {
        MessagesHandler { store, notifier }
    }

    /// Lists the inbox, newest first.
    pub async fn list_messages(&self) -> Result<Vec<Message>, AppError> {
        let docs = self.store.list(Collection::Messages).await?;
        docs.into_iter().map(Message::from_document).collect()
    }

    /// Persists a visitor message and publishes `MessageCreated` to the
    /// notifier. The dispatch runs detached: its outcome never affects the
    /// result of the write.
    pub async fn create_message(&self, request: NewMessage) -> Result<MessageReceipt, AppError> {
        request.validate()?;

        let mut data = serde_json::to_value(&request)?;
        data["read"] = json!(false);

        let doc = self.store.insert(Collection::Messages, data).await?;
        let message = Message::from_document(doc)?;

        let event = MessageCreated { message: message.clone() };
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&event).await {
                tracing::error!("Failed to send notification for message {}: {}", event.message.id, e);
            }
        });

        Ok(MessageReceipt {
            id: message.id,
            message: "Your message has been received.".to_string(),
        })
    }

    /// Marks a message read and stamps `readAt` once; calling it again on
    /// an already-read message changes nothing.
    pub async fn mark_as_read(&self, id: &str) -> Result<Message, AppError> {
        let doc = self
            .store
            .get(Collection::Messages, id)
            .await
            .map_err(message_not_found)?;
        let mut message = Message::from_document(doc)?;

        if message.read {
            return Ok(message);
        }

        let read_at = Utc::now();
        self.store
            .patch(
                Collection::Messages,
                id,
                json!({"read": true, "readAt": read_at}),
            )
            .await
            .map_err(message_not_found)?;

        message.read = true;
        message.read_at = Some(read_at);
        Ok(message)
    }

    pub async fn delete_message(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(Collection::Messages, id).await
    }
}

fn message_not_found(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Message not found".to_string()),
        _ => e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::notify::SendError;
    use crate::repositories::local::LocalStore;
    use async_trait::async_trait;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    /// Records every dispatch attempt on a channel; optionally fails.
    struct RecordingNotifier {
        attempts: mpsc::UnboundedSender<String>,
        fail: bool,
    }

    #[async_trait]
    impl MessageNotifier for RecordingNotifier {
        async fn notify(&self, event: &MessageCreated) -> Result<(), SendError> {
            self.attempts.send(event.message.id.clone()).ok();
            if self.fail {
                Err(SendError::Dispatch("smtp down".into()))
            } else {
                Ok(())
            }
        }
    }

    fn handler_with_notifier(
        fail: bool,
    ) -> (TempDir, MessagesHandler, mpsc::UnboundedReceiver<String>) {
        let dir = TempDir::new().expect("temp dir");
        let store = Arc::new(LocalStore::new(dir.path()).expect("local store"));
        let (tx, rx) = mpsc::unbounded_channel();
        let notifier = Arc::new(RecordingNotifier { attempts: tx, fail });
        (dir, MessagesHandler::new(store, notifier), rx)
    }

    fn valid_message() -> NewMessage {
        NewMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "I enjoyed your projects page.".into(),
        }
    }

    #[tokio::test]
    async fn creating_a_message_dispatches_exactly_one_notification() {
        let (_dir, handler, mut rx) = handler_with_notifier(false);

        let receipt = handler.create_message(valid_message()).await.unwrap();

        let notified_id = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("notification not dispatched")
            .unwrap();
        assert_eq!(notified_id, receipt.id);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_the_write() {
        let (_dir, handler, mut rx) = handler_with_notifier(true);

        let receipt = handler.create_message(valid_message()).await.unwrap();

        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("notification not attempted")
            .unwrap();

        let all = handler.list_messages().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, receipt.id);
        assert!(!all[0].read);
    }

    #[tokio::test]
    async fn invalid_message_is_rejected_before_persistence() {
        let (_dir, handler, mut rx) = handler_with_notifier(false);

        let mut request = valid_message();
        request.email = "not-an-email".into();

        let err = handler.create_message(request).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(handler.list_messages().await.unwrap().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn mark_as_read_is_idempotent() {
        let (_dir, handler, _rx) = handler_with_notifier(false);
        let receipt = handler.create_message(valid_message()).await.unwrap();

        let first = handler.mark_as_read(&receipt.id).await.unwrap();
        assert!(first.read);
        let first_read_at = first.read_at.expect("readAt set on first transition");

        let second = handler.mark_as_read(&receipt.id).await.unwrap();
        assert!(second.read);
        assert_eq!(second.read_at, Some(first_read_at));
    }

    #[tokio::test]
    async fn delete_message_is_idempotent() {
        let (_dir, handler, _rx) = handler_with_notifier(false);
        let receipt = handler.create_message(valid_message()).await.unwrap();

        handler.delete_message(&receipt.id).await.unwrap();
        handler.delete_message(&receipt.id).await.unwrap();

        let err = handler.mark_as_read(&receipt.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
