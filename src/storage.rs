/// Bookmark and folder store over a `storage.local`-style backend
///
/// Each collection lives under a single key and every mutation is a full
/// read-modify-write of that key. Mutations work on the stored JSON items,
/// so records they do not touch are written back exactly as read. Nothing
/// isolates two concurrent read-modify-write sequences; the last writer wins.
use crate::backend::StorageBackend;
use crate::bookmark_data::{Bookmark, BookmarkUpdate, Folder, INBOX_FOLDER_ID, NewBookmark};
use crate::config::Config;
use crate::error::{BackendError, StoreError, StoreResult};
use crate::folders::folder_slug;
use crate::operations::{ExportData, ImportSummary, plan_import};
use log::{debug, error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use uuid::Uuid;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}

fn field<'a>(item: &'a Value, name: &str) -> Option<&'a str> {
    item.get(name).and_then(Value::as_str)
}

fn encode<T: Serialize>(value: &T, action: &'static str) -> StoreResult<Value> {
    serde_json::to_value(value).map_err(|e| StoreError::storage(action, BackendError(e.to_string())))
}

/// Shallow-merge `fields` into a stored record and decode the result
fn patch<T: DeserializeOwned>(item: &mut Value, fields: Value, action: &'static str) -> StoreResult<T> {
    let mut patched = item.clone();
    if let (Some(record), Value::Object(fields)) = (patched.as_object_mut(), fields) {
        record.extend(fields);
    }
    let decoded = serde_json::from_value(patched.clone())
        .map_err(|e| StoreError::storage(action, BackendError(e.to_string())))?;
    *item = patched;
    Ok(decoded)
}

/// Decode the items that parse as `T`, logging the rest
fn decode_records<T: DeserializeOwned>(key: &str, items: &[Value]) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| {
            serde_json::from_value(item.clone())
                .map_err(|e| warn!("Skipping malformed record under {}: {}", key, e))
                .ok()
        })
        .collect()
}

pub struct Store<B> {
    backend: B,
    config: Config,
    clock: fn() -> f64,
}

impl<B: StorageBackend> Store<B> {
    pub fn new(backend: B, config: Config) -> Self {
        Store {
            backend,
            config,
            clock: now_millis,
        }
    }

    /// Replace the time source used for folder ids and default timestamps
    pub fn with_clock(mut self, clock: fn() -> f64) -> Self {
        self.clock = clock;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current time from the store's clock
    pub fn now(&self) -> f64 {
        (self.clock)()
    }

    // --- Folders ---

    /// Persisted folders (inbox not synthesized); empty on any read failure
    pub async fn get_folders(&self) -> Vec<Folder> {
        let key = &self.config.folder_key;
        match self.read_items(key, "retrieve folders").await {
            Ok(items) => decode_records(key, &items),
            Err(e) => {
                error!("Storage Error: Failed to retrieve folders. {}", e);
                Vec::new()
            }
        }
    }

    pub async fn set_folders(&self, folders: &[Folder]) -> StoreResult<()> {
        self.write_items(&self.config.folder_key, encode(&folders, "set folders")?, "set folders")
            .await
    }

    pub async fn add_folder(&self, name: &str) -> StoreResult<Folder> {
        const ACTION: &str = "add folder";
        if name.is_empty() {
            return Err(StoreError::FolderNameRequired);
        }

        let key = &self.config.folder_key;
        let mut folders = self.read_items(key, ACTION).await?;
        let now = self.now();
        let folder = Folder {
            id: folder_slug(name, now),
            name: name.to_string(),
            timestamp: now,
            ..Default::default()
        };
        if folders.iter().any(|f| field(f, "id") == Some(folder.id.as_str())) {
            warn!("Folder id {} already exists; adding a second folder with it", folder.id);
        }

        folders.push(encode(&folder, ACTION)?);
        self.write_items(key, Value::Array(folders), ACTION).await?;
        info!("Folder added: {} ({})", folder.name, folder.id);
        Ok(folder)
    }

    pub async fn delete_folder(&self, id: &str) -> StoreResult<()> {
        const ACTION: &str = "delete folder";
        if id.is_empty() || id == INBOX_FOLDER_ID {
            return Err(StoreError::ProtectedFolder);
        }

        let key = &self.config.folder_key;
        let mut folders = self.read_items(key, ACTION).await?;
        let original_len = folders.len();
        folders.retain(|f| field(f, "id") != Some(id));
        if folders.len() == original_len {
            return Err(StoreError::FolderNotFound(id.to_string()));
        }

        self.write_items(key, Value::Array(folders), ACTION).await?;
        info!("Folder deleted: {}", id);
        Ok(())
    }

    pub async fn rename_folder(&self, id: &str, name: &str) -> StoreResult<Folder> {
        const ACTION: &str = "rename folder";
        if id.is_empty() || id == INBOX_FOLDER_ID {
            return Err(StoreError::ProtectedFolder);
        }
        if name.is_empty() {
            return Err(StoreError::FolderNameRequired);
        }

        let key = &self.config.folder_key;
        let mut folders = self.read_items(key, ACTION).await?;
        let item = folders
            .iter_mut()
            .find(|f| field(f, "id") == Some(id))
            .ok_or_else(|| StoreError::FolderNotFound(id.to_string()))?;
        let renamed: Folder = patch(item, json!({ "name": name }), ACTION)?;

        self.write_items(key, Value::Array(folders), ACTION).await?;
        Ok(renamed)
    }

    // --- Bookmarks ---

    /// All bookmarks; empty on any read failure
    pub async fn get_bookmarks(&self) -> Vec<Bookmark> {
        let key = &self.config.bookmark_key;
        match self.read_items(key, "retrieve bookmarks").await {
            Ok(items) => decode_records(key, &items),
            Err(e) => {
                error!("Storage Error: Failed to retrieve bookmarks. {}", e);
                Vec::new()
            }
        }
    }

    pub async fn set_bookmarks(&self, bookmarks: &[Bookmark]) -> StoreResult<()> {
        self.write_items(&self.config.bookmark_key, encode(&bookmarks, "set bookmarks")?, "set bookmarks")
            .await
    }

    pub async fn save_bookmark(&self, data: NewBookmark) -> StoreResult<Bookmark> {
        const ACTION: &str = "save bookmark";
        if data.url.is_empty() || data.title.is_empty() {
            return Err(StoreError::MissingBookmarkFields);
        }

        let key = &self.config.bookmark_key;
        let mut bookmarks = self.read_items(key, ACTION).await?;
        if bookmarks.iter().any(|b| field(b, "url") == Some(data.url.as_str())) {
            return Err(StoreError::DuplicateUrl(data.url));
        }

        let mut extra = data.extra;
        extra.remove("id");
        let bookmark = Bookmark {
            id: Uuid::new_v4().to_string(),
            url: data.url,
            title: data.title,
            tags: data.tags,
            folder_id: data.folder_id,
            timestamp: data.timestamp.unwrap_or_else(|| self.now()),
            extra,
        };

        bookmarks.push(encode(&bookmark, ACTION)?);
        self.write_items(key, Value::Array(bookmarks), ACTION).await?;
        debug!("Bookmark saved: {} ({})", bookmark.title, bookmark.id);
        Ok(bookmark)
    }

    /// Merge `updates` onto the bookmark. URL uniqueness is not re-checked.
    pub async fn update_bookmark(&self, id: &str, updates: &BookmarkUpdate) -> StoreResult<Bookmark> {
        const ACTION: &str = "update bookmark";
        if id.is_empty() || updates.is_empty() {
            return Err(StoreError::MissingUpdate);
        }

        let key = &self.config.bookmark_key;
        let mut bookmarks = self.read_items(key, ACTION).await?;
        let item = bookmarks
            .iter_mut()
            .find(|b| field(b, "id") == Some(id))
            .ok_or_else(|| StoreError::BookmarkNotFound(id.to_string()))?;
        let updated: Bookmark = patch(item, encode(updates, ACTION)?, ACTION)?;

        self.write_items(key, Value::Array(bookmarks), ACTION).await?;
        debug!("Bookmark updated: {}", id);
        Ok(updated)
    }

    pub async fn delete_bookmark(&self, id: &str) -> StoreResult<()> {
        const ACTION: &str = "delete bookmark";
        if id.is_empty() {
            return Err(StoreError::MissingId);
        }

        let key = &self.config.bookmark_key;
        let mut bookmarks = self.read_items(key, ACTION).await?;
        let original_len = bookmarks.len();
        bookmarks.retain(|b| field(b, "id") != Some(id));
        if bookmarks.len() == original_len {
            return Err(StoreError::BookmarkNotFound(id.to_string()));
        }

        self.write_items(key, Value::Array(bookmarks), ACTION).await?;
        debug!("Bookmark deleted: {}", id);
        Ok(())
    }

    pub async fn clear_all_bookmarks(&self) -> StoreResult<()> {
        self.set_bookmarks(&[]).await?;
        info!("All bookmarks cleared");
        Ok(())
    }

    /// Append the new records of an export file; nothing is written when
    /// everything in it is already stored
    pub async fn import(&self, data: ExportData) -> StoreResult<ImportSummary> {
        const ACTION: &str = "import data";
        let (bookmark_key, folder_key) = (&self.config.bookmark_key, &self.config.folder_key);
        let mut bookmarks = self.read_items(bookmark_key, ACTION).await?;
        let mut folders = self.read_items(folder_key, ACTION).await?;

        let batch = plan_import(
            &decode_records::<Bookmark>(bookmark_key, &bookmarks),
            &decode_records::<Folder>(folder_key, &folders),
            data,
        );
        if !batch.folders.is_empty() {
            for folder in &batch.folders {
                folders.push(encode(folder, ACTION)?);
            }
            self.write_items(folder_key, Value::Array(folders), ACTION).await?;
        }
        if !batch.bookmarks.is_empty() {
            for bookmark in &batch.bookmarks {
                bookmarks.push(encode(bookmark, ACTION)?);
            }
            self.write_items(bookmark_key, Value::Array(bookmarks), ACTION).await?;
        }

        let summary = batch.summary();
        info!(
            "Imported {} folders and {} bookmarks",
            summary.folders_added, summary.bookmarks_added
        );
        Ok(summary)
    }

    // --- Helpers ---

    /// Stored items under `key`. Mutations read through this so a failed
    /// read aborts instead of being written back as an empty collection.
    async fn read_items(&self, key: &str, action: &'static str) -> StoreResult<Vec<Value>> {
        let value = self
            .backend
            .get(key)
            .await
            .map_err(|e| StoreError::storage(action, e))?;

        match value {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(StoreError::storage(
                action,
                BackendError(format!("expected an array under {}, found {}", key, other)),
            )),
        }
    }

    async fn write_items(&self, key: &str, items: Value, action: &'static str) -> StoreResult<()> {
        self.backend.set(key, items).await.map_err(|e| {
            error!("Storage Error: Failed to {}. {}", action, e);
            StoreError::storage(action, e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::error::ErrorKind;
    use regex::Regex;
    use serde_json::json;

    fn fixed_clock() -> f64 {
        1_700_000_001_234.0
    }

    fn create_test_store() -> Store<MemoryBackend> {
        Store::new(MemoryBackend::new(), Config::default()).with_clock(fixed_clock)
    }

    fn new_bookmark(url: &str, title: &str) -> NewBookmark {
        NewBookmark {
            url: url.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_storage_reads_empty() {
        let store = create_test_store();

        assert!(store.get_bookmarks().await.is_empty());
        assert!(store.get_folders().await.is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_downgrades_to_empty() {
        let backend = MemoryBackend::new().with_value(
            "blasphemySlateBookmarks",
            json!([{"id": "1", "url": "http://a.com", "title": "A"}]),
        );
        backend.fail_reads(true);
        let store = Store::new(backend, Config::default());

        assert!(store.get_bookmarks().await.is_empty());
    }

    #[tokio::test]
    async fn test_mutation_does_not_clobber_on_read_failure() {
        let store = create_test_store();
        store.save_bookmark(new_bookmark("http://a.com", "A")).await.unwrap();
        store.backend().fail_reads(true);

        let result = store.save_bookmark(new_bookmark("http://b.com", "B")).await;

        assert_eq!(result.unwrap_err().kind(), ErrorKind::Storage);
        store.backend().fail_reads(false);
        assert_eq!(store.get_bookmarks().await.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_records_are_skipped() {
        let backend = MemoryBackend::new().with_value(
            "blasphemySlateBookmarks",
            json!([{"id": "1", "url": "http://a.com", "title": "A"}, {"bogus": true}]),
        );
        let store = Store::new(backend, Config::default());

        let bookmarks = store.get_bookmarks().await;

        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].url, "http://a.com");
    }

    #[tokio::test]
    async fn test_non_array_value_reads_empty() {
        let backend = MemoryBackend::new().with_value("blasphemySlateFolders", json!({"a": 1}));
        let store = Store::new(backend, Config::default());

        assert!(store.get_folders().await.is_empty());
    }

    #[tokio::test]
    async fn test_set_failure_is_storage_error() {
        let store = create_test_store();
        store.backend().fail_writes(true);

        let err = store.set_folders(&[]).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().starts_with("Error: Failed to set folders."));
    }

    #[tokio::test]
    async fn test_save_bookmark() {
        let store = create_test_store();

        let saved = store
            .save_bookmark(new_bookmark("http://a.com", "A"))
            .await
            .unwrap();

        let bookmarks = store.get_bookmarks().await;
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0], saved);
        assert_eq!(bookmarks[0].title, "A");
        assert!(Uuid::parse_str(&saved.id).is_ok());
        assert_eq!(saved.timestamp, fixed_clock());
    }

    #[tokio::test]
    async fn test_save_bookmark_keeps_given_timestamp() {
        let store = create_test_store();
        let mut data = new_bookmark("http://a.com", "A");
        data.timestamp = Some(42.0);

        let saved = store.save_bookmark(data).await.unwrap();

        assert_eq!(saved.timestamp, 42.0);
    }

    #[tokio::test]
    async fn test_save_bookmark_requires_url_and_title() {
        let store = create_test_store();

        let no_url = store.save_bookmark(new_bookmark("", "A")).await;
        let no_title = store.save_bookmark(new_bookmark("http://a.com", "")).await;

        assert_eq!(no_url.unwrap_err(), StoreError::MissingBookmarkFields);
        assert_eq!(no_title.unwrap_err(), StoreError::MissingBookmarkFields);
        assert_eq!(store.backend().write_count(), 0);
    }

    #[tokio::test]
    async fn test_save_duplicate_url_leaves_collection_unchanged() {
        let store = create_test_store();
        store.save_bookmark(new_bookmark("http://a.com", "A")).await.unwrap();
        let before = store.get_bookmarks().await;

        let err = store
            .save_bookmark(new_bookmark("http://a.com", "Other title"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(store.get_bookmarks().await, before);
        assert_eq!(store.backend().write_count(), 1);
    }

    #[tokio::test]
    async fn test_update_bookmark() {
        let store = create_test_store();
        let saved = store.save_bookmark(new_bookmark("http://a.com", "A")).await.unwrap();

        store
            .update_bookmark(&saved.id, &BookmarkUpdate {
                tags: Some("rust,wasm".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let bookmarks = store.get_bookmarks().await;
        assert_eq!(bookmarks[0].tags, "rust,wasm");
        assert_eq!(bookmarks[0].url, saved.url);
        assert_eq!(bookmarks[0].title, saved.title);
        assert_eq!(bookmarks[0].id, saved.id);
        assert_eq!(bookmarks[0].timestamp, saved.timestamp);
    }

    #[tokio::test]
    async fn test_update_nonexistent_bookmark() {
        let store = create_test_store();
        store.save_bookmark(new_bookmark("http://a.com", "A")).await.unwrap();
        let before = store.get_bookmarks().await;

        let err = store
            .update_bookmark("missing", &BookmarkUpdate::move_to("inbox"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(store.get_bookmarks().await, before);
    }

    #[tokio::test]
    async fn test_update_requires_id_and_fields() {
        let store = create_test_store();

        let no_id = store.update_bookmark("", &BookmarkUpdate::move_to("inbox")).await;
        let no_fields = store.update_bookmark("1", &BookmarkUpdate::default()).await;

        assert_eq!(no_id.unwrap_err(), StoreError::MissingUpdate);
        assert_eq!(no_fields.unwrap_err(), StoreError::MissingUpdate);
    }

    #[tokio::test]
    async fn test_update_may_create_duplicate_url() {
        let store = create_test_store();
        store.save_bookmark(new_bookmark("http://a.com", "A")).await.unwrap();
        let b = store.save_bookmark(new_bookmark("http://b.com", "B")).await.unwrap();

        let result = store
            .update_bookmark(&b.id, &BookmarkUpdate {
                url: Some("http://a.com".to_string()),
                ..Default::default()
            })
            .await;

        assert!(result.is_ok());
        let urls: Vec<String> = store.get_bookmarks().await.into_iter().map(|b| b.url).collect();
        assert_eq!(urls, vec!["http://a.com", "http://a.com"]);
    }

    #[tokio::test]
    async fn test_delete_bookmark() {
        let store = create_test_store();
        let a = store.save_bookmark(new_bookmark("http://a.com", "A")).await.unwrap();
        store.save_bookmark(new_bookmark("http://b.com", "B")).await.unwrap();

        store.delete_bookmark(&a.id).await.unwrap();

        let bookmarks = store.get_bookmarks().await;
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].url, "http://b.com");
    }

    #[tokio::test]
    async fn test_delete_nonexistent_bookmark() {
        let store = create_test_store();
        store.save_bookmark(new_bookmark("http://a.com", "A")).await.unwrap();

        let missing = store.delete_bookmark("missing").await.unwrap_err();
        let empty = store.delete_bookmark("").await.unwrap_err();

        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert_eq!(empty, StoreError::MissingId);
        assert_eq!(store.get_bookmarks().await.len(), 1);
        assert_eq!(store.backend().write_count(), 1);
    }

    fn create_loose_records() -> Value {
        json!([
            {"id": "1", "url": "http://a.com", "title": "A", "tags": null, "timestamp": 1.0},
            {"id": "2", "url": "http://b.com", "title": "B", "timestamp": 2.0, "favicon": "http://b.com/favicon.ico"},
            {"id": "3", "url": "http://c.com", "title": "C", "tags": "", "timestamp": 3.0}
        ])
    }

    #[tokio::test]
    async fn test_delete_leaves_other_records_untouched() {
        let backend = MemoryBackend::new().with_value("blasphemySlateBookmarks", create_loose_records());
        let store = Store::new(backend, Config::default());

        store.delete_bookmark("3").await.unwrap();

        let stored = store.backend().raw("blasphemySlateBookmarks").unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 2);
        assert_eq!(stored[0], create_loose_records()[0]);
        assert_eq!(stored[1], create_loose_records()[1]);
    }

    #[tokio::test]
    async fn test_loose_records_are_readable() {
        let backend = MemoryBackend::new().with_value("blasphemySlateBookmarks", create_loose_records());
        let store = Store::new(backend, Config::default());

        let bookmarks = store.get_bookmarks().await;

        assert_eq!(bookmarks.len(), 3);
        assert_eq!(bookmarks[0].tags, "");
        assert_eq!(bookmarks[1].extra["favicon"], "http://b.com/favicon.ico");
    }

    #[tokio::test]
    async fn test_update_keeps_unknown_fields() {
        let backend = MemoryBackend::new().with_value("blasphemySlateBookmarks", create_loose_records());
        let store = Store::new(backend, Config::default());

        let updated = store
            .update_bookmark("2", &BookmarkUpdate::move_to("work-0001"))
            .await
            .unwrap();

        let stored = store.backend().raw("blasphemySlateBookmarks").unwrap();
        assert_eq!(updated.folder_id.as_deref(), Some("work-0001"));
        assert_eq!(stored[1]["favicon"], "http://b.com/favicon.ico");
        assert_eq!(stored[1]["folderId"], "work-0001");
        assert_eq!(stored[0], create_loose_records()[0]);
    }

    #[tokio::test]
    async fn test_unreadable_record_survives_save() {
        let backend = MemoryBackend::new().with_value(
            "blasphemySlateBookmarks",
            json!([{"id": "1", "title": "No URL"}]),
        );
        let store = Store::new(backend, Config::default()).with_clock(fixed_clock);

        store.save_bookmark(new_bookmark("http://a.com", "A")).await.unwrap();

        let stored = store.backend().raw("blasphemySlateBookmarks").unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 2);
        assert_eq!(stored[0], json!({"id": "1", "title": "No URL"}));
        assert_eq!(store.get_bookmarks().await.len(), 1);
    }

    #[tokio::test]
    async fn test_save_bookmark_carries_extra_fields() {
        let store = create_test_store();
        let mut data = new_bookmark("http://a.com", "A");
        data.extra.insert("favicon".to_string(), json!("http://a.com/favicon.ico"));
        data.extra.insert("id".to_string(), json!("caller-id"));

        let saved = store.save_bookmark(data).await.unwrap();

        let stored = store.backend().raw("blasphemySlateBookmarks").unwrap();
        assert_eq!(stored[0]["favicon"], "http://a.com/favicon.ico");
        assert_eq!(stored[0]["id"], saved.id.as_str());
        assert_ne!(saved.id, "caller-id");
    }

    #[tokio::test]
    async fn test_rename_folder_keeps_unknown_fields() {
        let backend = MemoryBackend::new().with_value(
            "blasphemySlateFolders",
            json!([{"id": "reading-1234", "name": "Reading", "color": "red"}]),
        );
        let store = Store::new(backend, Config::default());

        store.rename_folder("reading-1234", "Later").await.unwrap();

        assert_eq!(
            store.backend().raw("blasphemySlateFolders"),
            Some(json!([{"id": "reading-1234", "name": "Later", "color": "red"}]))
        );
    }

    #[tokio::test]
    async fn test_clear_all_bookmarks() {
        let store = create_test_store();
        store.save_bookmark(new_bookmark("http://a.com", "A")).await.unwrap();
        store.save_bookmark(new_bookmark("http://b.com", "B")).await.unwrap();

        store.clear_all_bookmarks().await.unwrap();

        assert!(store.get_bookmarks().await.is_empty());
        assert_eq!(store.backend().raw("blasphemySlateBookmarks"), Some(json!([])));
    }

    #[tokio::test]
    async fn test_add_folder() {
        let store = create_test_store();

        let folder = store.add_folder("Reading").await.unwrap();

        let folders = store.get_folders().await;
        assert_eq!(folders, vec![folder]);
        assert_eq!(folders[0].name, "Reading");
        assert!(Regex::new(r"^reading-\d{4}$").unwrap().is_match(&folders[0].id));
    }

    #[tokio::test]
    async fn test_add_folder_uses_real_clock() {
        let store = Store::new(MemoryBackend::new(), Config::default());

        let folder = store.add_folder("Side Projects").await.unwrap();

        assert!(Regex::new(r"^side-projects-\d{4}$").unwrap().is_match(&folder.id));
    }

    #[tokio::test]
    async fn test_add_folder_requires_name() {
        let store = create_test_store();

        let err = store.add_folder("").await.unwrap_err();

        assert_eq!(err, StoreError::FolderNameRequired);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_inbox_is_not_persisted() {
        let store = create_test_store();
        store.add_folder("Reading").await.unwrap();

        let folders = store.get_folders().await;

        assert!(folders.iter().all(|f| !f.is_inbox()));
    }

    #[tokio::test]
    async fn test_delete_inbox_always_fails() {
        let store = create_test_store();
        assert_eq!(store.delete_folder("inbox").await, Err(StoreError::ProtectedFolder));

        store.add_folder("Reading").await.unwrap();
        store
            .set_folders(&[Folder::inbox("Inbox")])
            .await
            .unwrap();
        assert_eq!(store.delete_folder("inbox").await, Err(StoreError::ProtectedFolder));
        assert_eq!(store.delete_folder("").await, Err(StoreError::ProtectedFolder));
    }

    #[tokio::test]
    async fn test_delete_folder() {
        let store = create_test_store();
        let folder = store.add_folder("Reading").await.unwrap();

        store.delete_folder(&folder.id).await.unwrap();

        assert!(store.get_folders().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_folder() {
        let store = create_test_store();
        store.add_folder("Reading").await.unwrap();

        let err = store.delete_folder("work-0000").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(store.get_folders().await.len(), 1);
    }

    #[tokio::test]
    async fn test_rename_folder() {
        let store = create_test_store();
        let folder = store.add_folder("Reading").await.unwrap();

        let renamed = store.rename_folder(&folder.id, "Later").await.unwrap();

        assert_eq!(renamed.id, folder.id);
        assert_eq!(store.get_folders().await[0].name, "Later");
    }

    #[tokio::test]
    async fn test_rename_folder_errors() {
        let store = create_test_store();
        let folder = store.add_folder("Reading").await.unwrap();

        assert_eq!(store.rename_folder("inbox", "X").await, Err(StoreError::ProtectedFolder));
        assert_eq!(store.rename_folder(&folder.id, "").await, Err(StoreError::FolderNameRequired));
        assert_eq!(
            store.rename_folder("nope-0000", "X").await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_custom_keys() {
        let config = Config {
            bookmark_key: "b".to_string(),
            folder_key: "f".to_string(),
            ..Config::default()
        };
        let store = Store::new(MemoryBackend::new(), config).with_clock(fixed_clock);

        store.save_bookmark(new_bookmark("http://a.com", "A")).await.unwrap();
        store.add_folder("Reading").await.unwrap();

        assert!(store.backend().raw("b").is_some());
        assert!(store.backend().raw("f").is_some());
        assert!(store.backend().raw("blasphemySlateBookmarks").is_none());
    }

    #[tokio::test]
    async fn test_folder_scenario() {
        let store = create_test_store();

        let folder = store.add_folder("Reading").await.unwrap();
        let folders = store.get_folders().await;
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "Reading");
        assert!(Regex::new(r"^reading-\d{4}$").unwrap().is_match(&folder.id));

        let bookmark = store
            .save_bookmark(NewBookmark {
                url: "http://a.com".to_string(),
                title: "A".to_string(),
                folder_id: Some(folder.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();

        store
            .update_bookmark(&bookmark.id, &BookmarkUpdate::move_to(INBOX_FOLDER_ID))
            .await
            .unwrap();
        store.delete_folder(&folder.id).await.unwrap();

        let bookmarks = store.get_bookmarks().await;
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].folder_id.as_deref(), Some("inbox"));
        assert!(store.get_folders().await.iter().all(|f| f.id != folder.id));
    }
}
