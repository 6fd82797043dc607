/// Popup page: save the current tab, list and search bookmarks
use crate::backend::StorageBackend;
use crate::bookmark_data::{ActiveTab, Bookmark, Folder, INBOX_FOLDER_ID, NewBookmark};
use crate::error::{StoreError, StoreResult};
use crate::snapshot::Snapshot;
use crate::storage::Store;
use crate::ui::is_web_page;
use log::error;
use serde::{Deserialize, Serialize};

const SYSTEM_PAGE_TITLE: &str = "Local or System Page";

/// Contents of the popup's add-bookmark form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BookmarkForm {
    pub title: String,
    pub url: String,
    pub tags: String,
    pub folder_id: String,
}

impl BookmarkForm {
    fn into_new_bookmark(self, now: f64) -> StoreResult<NewBookmark> {
        let title = self.title.trim().to_string();
        let url = self.url.trim().to_string();
        if title.is_empty() || url.is_empty() {
            return Err(StoreError::MissingBookmarkFields);
        }
        let folder_id = match self.folder_id.trim() {
            "" => INBOX_FOLDER_ID.to_string(),
            id => id.to_string(),
        };

        Ok(NewBookmark {
            url,
            title,
            tags: self.tags.trim().to_string(),
            folder_id: Some(folder_id),
            timestamp: Some(now),
            ..Default::default()
        })
    }
}

/// Form prefilled from the active tab; `None` when the tab is unusable
pub fn prefill_from_tab(tab: &ActiveTab) -> Option<BookmarkForm> {
    let (Some(url), Some(title)) = (&tab.url, &tab.title) else {
        return None;
    };
    if url.is_empty() || title.is_empty() {
        return None;
    }

    let title = if is_web_page(url) { title.clone() } else { SYSTEM_PAGE_TITLE.to_string() };
    Some(BookmarkForm {
        title,
        url: url.clone(),
        ..Default::default()
    })
}

pub struct Popup<B> {
    store: Store<B>,
    pub snapshot: Snapshot,
}

impl<B: StorageBackend> Popup<B> {
    pub async fn open(store: Store<B>) -> Self {
        let snapshot = Snapshot::load(&store).await;
        Popup { store, snapshot }
    }

    /// Entries of the folder picker
    pub fn folder_options(&self) -> Vec<Folder> {
        self.snapshot.display_folders()
    }

    pub fn search(&self, query: &str) -> Vec<Bookmark> {
        self.snapshot.search(query)
    }

    pub async fn save(&mut self, form: BookmarkForm) -> StoreResult<Bookmark> {
        let data = form.into_new_bookmark(self.store.now())?;
        let saved = self.store.save_bookmark(data).await.inspect_err(|e| {
            error!("Save failed: {}", e);
        })?;

        self.snapshot.reload(&self.store).await;
        Ok(saved)
    }

    pub async fn delete(&mut self, id: &str) -> StoreResult<()> {
        self.store.delete_bookmark(id).await?;
        self.snapshot.reload(&self.store).await;
        Ok(())
    }
}
