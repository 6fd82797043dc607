/// Per-consumer view of both collections
///
/// Each page (popup, options, background) owns a `Snapshot`, reads from it
/// while rendering, and calls `reload` after every store mutation. Two pages
/// never share one; a write made from a stale snapshot overwrites whatever
/// another page stored in between.
use crate::backend::StorageBackend;
use crate::bookmark_data::{Bookmark, Folder, INBOX_FOLDER_ID};
use crate::folders::normalize_folders;
use crate::operations::{count_in_folder, filter_bookmarks, resolve_folder_name, sort_newest_first};
use crate::storage::Store;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub bookmarks: Vec<Bookmark>,
    /// As persisted: the inbox is only present if storage holds it
    pub folders: Vec<Folder>,
    inbox_name: String,
}

/// A folder as listed by the options page
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FolderSummary {
    pub folder: Folder,
    pub bookmark_count: usize,
    pub deletable: bool,
}

impl Snapshot {
    pub async fn load<B: StorageBackend>(store: &Store<B>) -> Self {
        let mut snapshot = Snapshot::default();
        snapshot.reload(store).await;
        snapshot
    }

    pub async fn reload<B: StorageBackend>(&mut self, store: &Store<B>) {
        self.folders = store.get_folders().await;
        self.bookmarks = store.get_bookmarks().await;
        self.inbox_name = store.config().inbox_name.clone();
    }

    /// Folders as displayed, inbox included
    pub fn display_folders(&self) -> Vec<Folder> {
        normalize_folders(&self.folders, &self.inbox_name)
    }

    pub fn folder_name(&self, id: Option<&str>) -> String {
        let folders = self.display_folders();
        resolve_folder_name(&folders, id.unwrap_or(INBOX_FOLDER_ID)).to_string()
    }

    pub fn find_bookmark(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    pub fn find_folder(&self, id: &str) -> Option<Folder> {
        self.display_folders().into_iter().find(|f| f.id == id)
    }

    /// Matching bookmarks, newest first
    pub fn search(&self, query: &str) -> Vec<Bookmark> {
        let folders = self.display_folders();
        let mut matched = filter_bookmarks(&self.bookmarks, &folders, query);
        sort_newest_first(&mut matched);
        matched.into_iter().cloned().collect()
    }

    pub fn folder_summaries(&self) -> Vec<FolderSummary> {
        self.display_folders()
            .into_iter()
            .map(|folder| FolderSummary {
                bookmark_count: count_in_folder(&self.bookmarks, &folder.id),
                deletable: !folder.is_inbox(),
                folder,
            })
            .collect()
    }
}
