/// Data structures for Blasphemy Slate
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reserved id of the default folder
pub const INBOX_FOLDER_ID: &str = "inbox";

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A saved page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub url: String,
    pub title: String,
    /// Comma-separated free text
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: String,
    /// Absent means the inbox
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: f64,
    /// Fields this crate does not know about, kept as stored
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Bookmark {
    /// Folder the bookmark belongs to, with the inbox fallback applied
    pub fn effective_folder_id(&self) -> &str {
        self.folder_id.as_deref().unwrap_or(INBOX_FOLDER_ID)
    }

    pub fn apply(&mut self, update: &BookmarkUpdate) {
        if let Some(url) = &update.url {
            self.url = url.clone();
        }
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(tags) = &update.tags {
            self.tags = tags.clone();
        }
        if let Some(folder_id) = &update.folder_id {
            self.folder_id = Some(folder_id.clone());
        }
    }
}

/// A user-defined grouping bucket
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Folder {
    pub fn inbox(name: &str) -> Folder {
        Folder {
            id: INBOX_FOLDER_ID.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn is_inbox(&self) -> bool {
        self.id == INBOX_FOLDER_ID
    }
}

/// Input for saving a bookmark; the store assigns the id
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NewBookmark {
    pub url: String,
    pub title: String,
    pub tags: String,
    pub folder_id: Option<String>,
    pub timestamp: Option<f64>,
    /// Carried onto the saved bookmark
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shallow field overwrite applied by `update_bookmark`; serializes to just
/// the fields being set
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BookmarkUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

impl BookmarkUpdate {
    pub fn move_to(folder_id: &str) -> Self {
        BookmarkUpdate {
            folder_id: Some(folder_id.to_string()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.title.is_none() && self.tags.is_none() && self.folder_id.is_none()
    }
}

/// The browser tab a popup or context-menu action refers to
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ActiveTab {
    pub url: Option<String>,
    pub title: Option<String>,
}
