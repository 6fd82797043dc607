/// Extension configuration
use serde::{Deserialize, Serialize};

pub const BOOKMARK_KEY: &str = "blasphemySlateBookmarks";
pub const FOLDER_KEY: &str = "blasphemySlateFolders";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// storage.local key holding the bookmark array
    pub bookmark_key: String,
    /// storage.local key holding the folder array (inbox excluded)
    pub folder_key: String,
    pub inbox_name: String,
    /// Tag applied to pages saved from the context menu
    pub quick_add_tag: String,
    pub notification_icon: String,
    pub context_menu_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bookmark_key: BOOKMARK_KEY.to_string(),
            folder_key: FOLDER_KEY.to_string(),
            inbox_name: "Inbox".to_string(),
            quick_add_tag: "quick-add".to_string(),
            notification_icon: "../icons/icon48.png".to_string(),
            context_menu_title: "Save Page to Blasphemy Slate".to_string(),
        }
    }
}

impl Config {
    /// Parse overrides; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
