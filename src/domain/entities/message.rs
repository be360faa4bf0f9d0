use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{errors::AppError, repositories::record_store::StoredDocument};

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(rename = "readAt", skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
}

/// Field shape of the stored message document. `read`/`readAt` default for
/// records written before the inbox tracked read state.
#[derive(Debug, Deserialize)]
struct MessageContent {
    name: String,
    email: String,
    subject: String,
    message: String,
    #[serde(default)]
    read: bool,
    #[serde(default, rename = "readAt")]
    read_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn from_document(doc: StoredDocument) -> Result<Self, AppError> {
        let payload: MessageContent = serde_json::from_value(doc.data)
            .map_err(|e| AppError::InternalError(format!("Corrupt message record {}: {}", doc.id, e)))?;

        Ok(Message {
            id: doc.id,
            name: payload.name,
            email: payload.email,
            subject: payload.subject,
            message: payload.message,
            timestamp: doc.created_at,
            read: payload.read,
            read_at: payload.read_at,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewMessage {
    #[validate(length(min = 1, max = 100, message = "Name cannot be empty"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 150, message = "Subject cannot be empty"))]
    pub subject: String,

    #[validate(length(min = 1, max = 2000, message = "Message cannot be empty"))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageReceipt {
    pub id: String,
    pub message: String,
}
