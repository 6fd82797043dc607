/// Bookmark list operations: search, ordering, folder counts, export/import.

use crate::bookmark_data::{Bookmark, Folder, INBOX_FOLDER_ID};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use uuid::Uuid;

/// Shown for a bookmark whose folder no longer exists
pub const MISSING_FOLDER_NAME: &str = "Inbox (Missing)";

/// Name of the folder with `id` among the displayed folders
pub fn resolve_folder_name<'a>(folders: &'a [Folder], id: &str) -> &'a str {
    folders
        .iter()
        .find(|f| f.id == id)
        .map_or(MISSING_FOLDER_NAME, |f| f.name.as_str())
}

/// Case-insensitive substring match over title, URL, tags and folder name.
/// An empty query matches everything.
pub fn filter_bookmarks<'a>(bookmarks: &'a [Bookmark], folders: &[Folder], query: &str) -> Vec<&'a Bookmark> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return bookmarks.iter().collect();
    }

    bookmarks
        .iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&query)
                || b.url.to_lowercase().contains(&query)
                || b.tags.to_lowercase().contains(&query)
                || resolve_folder_name(folders, b.effective_folder_id())
                    .to_lowercase()
                    .contains(&query)
        })
        .collect()
}

/// Newest first: by timestamp, then by id (numerically for legacy
/// timestamp ids, otherwise lexically)
pub fn sort_newest_first(bookmarks: &mut [&Bookmark]) {
    bookmarks.sort_by(|a, b| {
        b.timestamp
            .partial_cmp(&a.timestamp)
            .unwrap_or(Ordering::Equal)
            .then_with(|| compare_ids(&b.id, &a.id))
    });
}

fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// Number of bookmarks filed under `folder_id` (absent folder counts as inbox)
pub fn count_in_folder(bookmarks: &[Bookmark], folder_id: &str) -> usize {
    bookmarks
        .iter()
        .filter(|b| b.effective_folder_id() == folder_id)
        .count()
}

/// Export file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportData {
    pub bookmarks: Vec<Bookmark>,
    pub folders: Vec<Folder>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub folders_added: usize,
    pub bookmarks_added: usize,
    pub bookmarks_skipped: usize,
}

/// Imported records that are new to the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportBatch {
    pub bookmarks: Vec<Bookmark>,
    pub folders: Vec<Folder>,
    pub skipped: usize,
}

impl ImportBatch {
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            folders_added: self.folders.len(),
            bookmarks_added: self.bookmarks.len(),
            bookmarks_skipped: self.skipped,
        }
    }
}

/// Pick the imported records to append to the current collections.
///
/// Folders are taken when their id is new (the inbox is never imported).
/// Bookmarks are taken when their URL is new, keeping URLs unique; an
/// imported bookmark whose id is already taken gets a fresh one.
pub fn plan_import(bookmarks: &[Bookmark], folders: &[Folder], import: ExportData) -> ImportBatch {
    let mut batch = ImportBatch::default();

    let mut folder_ids: HashSet<String> = folders.iter().map(|f| f.id.clone()).collect();
    for folder in import.folders {
        if folder.id != INBOX_FOLDER_ID && folder_ids.insert(folder.id.clone()) {
            batch.folders.push(folder);
        }
    }

    let mut urls: HashSet<String> = bookmarks.iter().map(|b| b.url.clone()).collect();
    let mut ids: HashSet<String> = bookmarks.iter().map(|b| b.id.clone()).collect();
    for mut bookmark in import.bookmarks {
        if bookmark.url.is_empty() || bookmark.title.is_empty() || !urls.insert(bookmark.url.clone()) {
            batch.skipped += 1;
            continue;
        }
        if bookmark.id.is_empty() || ids.contains(&bookmark.id) {
            bookmark.id = Uuid::new_v4().to_string();
        }
        ids.insert(bookmark.id.clone());
        batch.bookmarks.push(bookmark);
    }

    batch
}
