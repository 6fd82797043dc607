/// Options page: folder management, bookmark editing, bulk operations
use crate::backend::StorageBackend;
use crate::bookmark_data::{Bookmark, BookmarkUpdate, Folder, INBOX_FOLDER_ID};
use crate::error::{BackendError, StoreError, StoreResult};
use crate::operations::{ExportData, ImportSummary};
use crate::snapshot::{FolderSummary, Snapshot};
use crate::storage::Store;
use log::{info, warn};
use serde::Serialize;

/// Outcome of deleting a folder and moving its bookmarks to the inbox
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FolderDeletion {
    pub name: String,
    pub moved: usize,
}

impl FolderDeletion {
    pub fn message(&self) -> String {
        format!(
            "Folder \"{}\" deleted. {} bookmarks moved to Inbox.",
            self.name, self.moved
        )
    }
}

pub struct OptionsPage<B> {
    store: Store<B>,
    pub snapshot: Snapshot,
}

impl<B: StorageBackend> OptionsPage<B> {
    pub async fn open(store: Store<B>) -> Self {
        let snapshot = Snapshot::load(&store).await;
        OptionsPage { store, snapshot }
    }

    pub fn folders(&self) -> Vec<FolderSummary> {
        self.snapshot.folder_summaries()
    }

    /// All bookmarks, newest first
    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.snapshot.search("")
    }

    /// Create a folder unless one with the same name (ignoring case) exists
    pub async fn add_folder(&mut self, name: &str) -> StoreResult<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::FolderNameRequired);
        }
        let taken = self
            .snapshot
            .display_folders()
            .iter()
            .any(|f| f.name.to_lowercase() == name.to_lowercase());
        if taken {
            return Err(StoreError::DuplicateFolderName(name.to_string()));
        }

        let folder = self.store.add_folder(name).await?;
        self.snapshot.reload(&self.store).await;
        Ok(folder)
    }

    pub async fn rename_folder(&mut self, id: &str, new_name: &str) -> StoreResult<Folder> {
        let folder = self.store.rename_folder(id, new_name.trim()).await?;
        self.snapshot.reload(&self.store).await;
        Ok(folder)
    }

    /// Move every bookmark of the folder to the inbox, then delete it
    pub async fn delete_folder(&mut self, id: &str) -> StoreResult<FolderDeletion> {
        if id == INBOX_FOLDER_ID {
            return Err(StoreError::ProtectedFolder);
        }
        let folder = self
            .snapshot
            .find_folder(id)
            .ok_or_else(|| StoreError::FolderNotFound(id.to_string()))?;

        let members: Vec<String> = self
            .snapshot
            .bookmarks
            .iter()
            .filter(|b| b.folder_id.as_deref() == Some(id))
            .map(|b| b.id.clone())
            .collect();

        // One at a time: each update is a full read-modify-write
        for bookmark_id in &members {
            self.store
                .update_bookmark(bookmark_id, &BookmarkUpdate::move_to(INBOX_FOLDER_ID))
                .await?;
        }
        self.store.delete_folder(id).await?;
        self.snapshot.reload(&self.store).await;

        let deletion = FolderDeletion {
            name: folder.name,
            moved: members.len(),
        };
        info!("{}", deletion.message());
        Ok(deletion)
    }

    /// Drag-and-drop target; returns false when the bookmark is already there
    pub async fn move_bookmark(&mut self, bookmark_id: &str, folder_id: &str) -> StoreResult<bool> {
        let bookmark = self
            .snapshot
            .find_bookmark(bookmark_id)
            .ok_or_else(|| StoreError::BookmarkNotFound(bookmark_id.to_string()))?;
        if bookmark.effective_folder_id() == folder_id {
            return Ok(false);
        }

        self.store
            .update_bookmark(bookmark_id, &BookmarkUpdate::move_to(folder_id))
            .await?;
        self.snapshot.reload(&self.store).await;
        Ok(true)
    }

    pub async fn edit_bookmark(&mut self, id: &str, update: BookmarkUpdate) -> StoreResult<Bookmark> {
        let update = BookmarkUpdate {
            url: update.url.map(|s| s.trim().to_string()),
            title: update.title.map(|s| s.trim().to_string()),
            tags: update.tags.map(|s| s.trim().to_string()),
            folder_id: update.folder_id,
        };
        if update.url.as_deref() == Some("") || update.title.as_deref() == Some("") {
            return Err(StoreError::MissingBookmarkFields);
        }

        let bookmark = self.store.update_bookmark(id, &update).await?;
        self.snapshot.reload(&self.store).await;
        Ok(bookmark)
    }

    pub async fn delete_bookmark(&mut self, id: &str) -> StoreResult<()> {
        self.store.delete_bookmark(id).await?;
        self.snapshot.reload(&self.store).await;
        Ok(())
    }

    /// Delete all bookmarks and every custom folder
    pub async fn clear_all(&mut self) -> StoreResult<()> {
        self.store.clear_all_bookmarks().await?;
        for folder in self.snapshot.folders.iter().filter(|f| !f.is_inbox()) {
            match self.store.delete_folder(&folder.id).await {
                Ok(()) | Err(StoreError::FolderNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        self.snapshot.reload(&self.store).await;
        Ok(())
    }

    pub fn export_json(&self) -> StoreResult<String> {
        let data = ExportData {
            bookmarks: self.snapshot.bookmarks.clone(),
            folders: self.snapshot.folders.clone(),
        };
        serde_json::to_string_pretty(&data)
            .map_err(|e| StoreError::storage("export data", BackendError(e.to_string())))
    }

    /// Merge an export file into storage
    pub async fn import_json(&mut self, json: &str) -> StoreResult<ImportSummary> {
        let data: ExportData =
            serde_json::from_str(json).map_err(|e| StoreError::InvalidImport(e.to_string()))?;

        let summary = self.store.import(data).await?;
        if summary.bookmarks_skipped > 0 {
            warn!("Import skipped {} bookmarks", summary.bookmarks_skipped);
        }
        self.snapshot.reload(&self.store).await;
        Ok(summary)
    }
}
