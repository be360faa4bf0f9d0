use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::errors::AppError;

/// The four document collections the service manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Projects,
    Skills,
    About,
    Messages,
}

impl Collection {
    /// Collection name used by the remote store.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Skills => "skills",
            Collection::About => "about",
            Collection::Messages => "messages",
        }
    }

    /// Storage slot of the local fallback store. The names are shared with
    /// the browser demo stores of the frontend so exported data lines up.
    pub fn slot(&self) -> &'static str {
        match self {
            Collection::Projects => "demoProjects",
            Collection::Skills => "demoSkills",
            Collection::About => "demoAbout",
            Collection::Messages => "demoMessages",
        }
    }

    /// Listing order: newest-first for the project feed and the message
    /// inbox, insertion order for skills.
    pub fn list_order(&self) -> ListOrder {
        match self {
            Collection::Projects | Collection::Messages => ListOrder::NewestFirst,
            Collection::Skills | Collection::About => ListOrder::InsertionOrder,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    NewestFirst,
    InsertionOrder,
}

/// A stored record: an opaque id, the collection-specific JSON payload and
/// the store-assigned timestamps. Both store implementations produce the
/// same shape so the service layer is agnostic to the mode.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every record of the collection in its listing order.
    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, AppError>;

    async fn get(&self, collection: Collection, id: &str) -> Result<StoredDocument, AppError>;

    /// Persists a new record with a store-assigned id and timestamps and
    /// returns it in full.
    async fn insert(&self, collection: Collection, data: Value) -> Result<StoredDocument, AppError>;

    /// Shallow-merges the fields of `patch` into an existing record and
    /// bumps `updated_at`. Fails with `NotFound` for an unknown id.
    async fn patch(&self, collection: Collection, id: &str, patch: Value) -> Result<(), AppError>;

    /// Merge-write under a caller-chosen id, creating the record when it
    /// does not exist yet. Used by the about-profile singleton.
    async fn merge_set(&self, collection: Collection, id: &str, patch: Value) -> Result<(), AppError>;

    /// Idempotent: deleting an unknown id succeeds.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), AppError>;

    async fn check_connection(&self) -> Result<(), AppError>;
}
