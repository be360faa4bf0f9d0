use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::repositories::record_store::{Collection, ListOrder, RecordStore, StoredDocument};

/// Offline fallback store: one JSON array file per collection slot in a
/// data directory. Records carry client-generated timestamp-based ids, the
/// same scheme the browser demo store uses. A single mutex serializes the
/// load-modify-replace cycle of every write, and each replace swaps the
/// slot file in atomically via rename, so readers always see a complete
/// snapshot.
pub struct LocalStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

/// On-disk record shape: metadata first, payload fields flattened beside it
/// so the files stay interchangeable with browser demo-store exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocalRecord {
    id: String,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
    #[serde(flatten)]
    data: Map<String, Value>,
}

impl From<LocalRecord> for StoredDocument {
    fn from(record: LocalRecord) -> Self {
        StoredDocument {
            id: record.id,
            data: Value::Object(record.data),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl LocalStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;

        Ok(LocalStore {
            data_dir,
            write_lock: Mutex::new(()),
        })
    }

    fn slot_path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(format!("{}.json", collection.slot()))
    }

    fn load(&self, collection: Collection) -> Result<Vec<LocalRecord>, AppError> {
        let path = self.slot_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw).map_err(|e| {
            AppError::InternalError(format!("Corrupt demo store slot {}: {}", collection.slot(), e))
        })
    }

    /// Writes to a sibling temp file first and renames it over the slot, so
    /// an unguarded reader never observes a truncated file.
    fn replace(&self, collection: Collection, records: &[LocalRecord]) -> Result<(), AppError> {
        let raw = serde_json::to_string_pretty(records)?;
        let path = self.slot_path(collection);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Millisecond-timestamp id, nudged forward on collision within a slot.
    fn next_id(records: &[LocalRecord]) -> String {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let candidate = millis.to_string();
            if !records.iter().any(|r| r.id == candidate) {
                return candidate;
            }
            millis += 1;
        }
    }

    fn as_object(patch: Value) -> Result<Map<String, Value>, AppError> {
        match patch {
            Value::Object(map) => Ok(map),
            other => Err(AppError::InternalError(format!(
                "Record payload must be a JSON object, got {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl RecordStore for LocalStore {
    async fn list(&self, collection: Collection) -> Result<Vec<StoredDocument>, AppError> {
        // File order already encodes the listing order: inserts prepend to
        // newest-first slots and append to insertion-ordered ones.
        let records = self.load(collection)?;
        Ok(records.into_iter().map(StoredDocument::from).collect())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<StoredDocument, AppError> {
        let records = self.load(collection)?;
        records
            .into_iter()
            .find(|r| r.id == id)
            .map(StoredDocument::from)
            .ok_or_else(|| {
                AppError::NotFound(format!("No {} record with id {}", collection.name(), id))
            })
    }

    async fn insert(&self, collection: Collection, data: Value) -> Result<StoredDocument, AppError> {
        let fields = Self::as_object(data)?;
        let _guard = self.write_lock.lock();

        let mut records = self.load(collection)?;
        let now = Utc::now();
        let record = LocalRecord {
            id: Self::next_id(&records),
            created_at: now,
            updated_at: now,
            data: fields,
        };

        match collection.list_order() {
            ListOrder::NewestFirst => records.insert(0, record.clone()),
            ListOrder::InsertionOrder => records.push(record.clone()),
        }
        self.replace(collection, &records)?;

        Ok(record.into())
    }

    async fn patch(&self, collection: Collection, id: &str, patch: Value) -> Result<(), AppError> {
        let fields = Self::as_object(patch)?;
        let _guard = self.write_lock.lock();

        let mut records = self.load(collection)?;
        let record = records.iter_mut().find(|r| r.id == id).ok_or_else(|| {
            AppError::NotFound(format!("No {} record with id {}", collection.name(), id))
        })?;

        record.data.extend(fields);
        record.updated_at = Utc::now();
        self.replace(collection, &records)
    }

    async fn merge_set(&self, collection: Collection, id: &str, patch: Value) -> Result<(), AppError> {
        let fields = Self::as_object(patch)?;
        let _guard = self.write_lock.lock();

        let mut records = self.load(collection)?;
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.data.extend(fields);
                record.updated_at = Utc::now();
            }
            None => {
                let now = Utc::now();
                records.push(LocalRecord {
                    id: id.to_string(),
                    created_at: now,
                    updated_at: now,
                    data: fields,
                });
            }
        }
        self.replace(collection, &records)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), AppError> {
        let _guard = self.write_lock.lock();

        let mut records = self.load(collection)?;
        records.retain(|r| r.id != id);
        self.replace(collection, &records)
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (TempDir, LocalStore) {
        let dir = TempDir::new().expect("temp dir");
        let store = LocalStore::new(dir.path()).expect("local store");
        (dir, store)
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let (_dir, store) = store();

        let doc = store
            .insert(Collection::Projects, json!({"title": "X"}))
            .await
            .unwrap();

        assert!(!doc.id.is_empty());
        assert_eq!(doc.data["title"], "X");
        assert_eq!(doc.created_at, doc.updated_at);
    }

    #[tokio::test]
    async fn newest_first_slots_prepend_and_skills_append() {
        let (_dir, store) = store();

        let first = store
            .insert(Collection::Projects, json!({"title": "first"}))
            .await
            .unwrap();
        let second = store
            .insert(Collection::Projects, json!({"title": "second"}))
            .await
            .unwrap();

        let projects = store.list(Collection::Projects).await.unwrap();
        assert_eq!(projects[0].id, second.id);
        assert_eq!(projects[1].id, first.id);

        let a = store
            .insert(Collection::Skills, json!({"category": "a", "skills": ["x"]}))
            .await
            .unwrap();
        let b = store
            .insert(Collection::Skills, json!({"category": "b", "skills": ["y"]}))
            .await
            .unwrap();

        let skills = store.list(Collection::Skills).await.unwrap();
        assert_eq!(skills[0].id, a.id);
        assert_eq!(skills[1].id, b.id);
    }

    #[tokio::test]
    async fn patch_merges_only_given_fields() {
        let (_dir, store) = store();

        let doc = store
            .insert(Collection::Projects, json!({"title": "old", "featured": false}))
            .await
            .unwrap();

        store
            .patch(Collection::Projects, &doc.id, json!({"title": "new"}))
            .await
            .unwrap();

        let updated = store.get(Collection::Projects, &doc.id).await.unwrap();
        assert_eq!(updated.data["title"], "new");
        assert_eq!(updated.data["featured"], false);
        assert!(updated.updated_at >= doc.updated_at);
        assert_eq!(updated.created_at, doc.created_at);
    }

    #[tokio::test]
    async fn patch_unknown_id_fails_with_not_found() {
        let (_dir, store) = store();

        let err = store
            .patch(Collection::Projects, "nonexistent-id", json!({"title": "Z"}))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_dir, store) = store();

        let doc = store
            .insert(Collection::Projects, json!({"title": "X"}))
            .await
            .unwrap();

        store.delete(Collection::Projects, &doc.id).await.unwrap();
        let err = store.get(Collection::Projects, &doc.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // Second delete of the same id still succeeds.
        store.delete(Collection::Projects, &doc.id).await.unwrap();
        store.delete(Collection::Projects, "never-existed").await.unwrap();
    }

    #[tokio::test]
    async fn merge_set_creates_then_merges_the_singleton() {
        let (_dir, store) = store();

        store
            .merge_set(Collection::About, "profile", json!({"bio": "hello"}))
            .await
            .unwrap();
        store
            .merge_set(
                Collection::About,
                "profile",
                json!({"profileImageURL": "http://img"}),
            )
            .await
            .unwrap();

        let doc = store.get(Collection::About, "profile").await.unwrap();
        assert_eq!(doc.data["bio"], "hello");
        assert_eq!(doc.data["profileImageURL"], "http://img");

        let all = store.list(Collection::About).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn readers_racing_writers_never_see_a_torn_file() {
        let dir = TempDir::new().expect("temp dir");
        let store = std::sync::Arc::new(LocalStore::new(dir.path()).expect("local store"));

        let mut tasks = Vec::new();
        for i in 0..20 {
            let writer = store.clone();
            tasks.push(tokio::spawn(async move {
                writer
                    .insert(Collection::Projects, json!({"title": format!("p{i}")}))
                    .await
                    .unwrap();
            }));

            let reader = store.clone();
            tasks.push(tokio::spawn(async move {
                // Must never fail with a corrupt-slot error mid-write.
                reader.list(Collection::Projects).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let all = store.list(Collection::Projects).await.unwrap();
        assert_eq!(all.len(), 20);
    }

    #[tokio::test]
    async fn records_survive_a_store_reopen() {
        let dir = TempDir::new().expect("temp dir");

        let doc = {
            let store = LocalStore::new(dir.path()).unwrap();
            store
                .insert(Collection::Messages, json!({"name": "A", "read": false}))
                .await
                .unwrap()
        };

        let reopened = LocalStore::new(dir.path()).unwrap();
        let found = reopened.get(Collection::Messages, &doc.id).await.unwrap();
        assert_eq!(found.data["name"], "A");
    }
}
