/// Background service worker: the "save this page" context-menu action
use crate::backend::StorageBackend;
use crate::bookmark_data::{ActiveTab, INBOX_FOLDER_ID, NewBookmark};
use crate::config::Config;
use crate::storage::Store;
use crate::ui::is_web_page;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

pub const CONTEXT_MENU_ID: &str = "bookmark-current-page";

const UNTITLED_PAGE: &str = "Untitled Page";

/// Argument for `contextMenus.create`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextMenuEntry {
    pub id: String,
    pub title: String,
    pub contexts: Vec<String>,
}

pub fn context_menu_entry(config: &Config) -> ContextMenuEntry {
    ContextMenuEntry {
        id: CONTEXT_MENU_ID.to_string(),
        title: config.context_menu_title.clone(),
        contexts: vec!["page".to_string()],
    }
}

/// Argument for `notifications.create` (type "basic")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: String,
    pub icon_url: String,
    pub title: String,
    pub message: String,
    pub silent: bool,
}

impl Notification {
    fn basic(config: &Config, title: &str, message: String, silent: bool) -> Self {
        Notification {
            kind: "basic".to_string(),
            icon_url: config.notification_icon.clone(),
            title: title.to_string(),
            message,
            silent,
        }
    }
}

/// Save the clicked page to the inbox and describe the result.
/// Returns `None` for clicks on other menu entries.
pub async fn handle_context_menu_click<B: StorageBackend>(
    store: &Store<B>,
    menu_item_id: &str,
    tab: &ActiveTab,
) -> Option<Notification> {
    if menu_item_id != CONTEXT_MENU_ID {
        return None;
    }
    let config = store.config();

    let url = match tab.url.as_deref() {
        Some(url) if is_web_page(url) => url.to_string(),
        _ => {
            warn!("Cannot bookmark this system page or non-HTTP URL.");
            return Some(Notification::basic(
                config,
                "Blasphemy Slate",
                "Cannot save this type of page (e.g., system page or local file).".to_string(),
                false,
            ));
        }
    };

    let title = tab
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED_PAGE)
        .to_string();
    let data = NewBookmark {
        url,
        title,
        tags: config.quick_add_tag.clone(),
        folder_id: Some(INBOX_FOLDER_ID.to_string()),
        timestamp: Some(store.now()),
        ..Default::default()
    };

    match store.save_bookmark(data).await {
        Ok(bookmark) => {
            info!("Bookmark saved successfully via background: {}", bookmark.title);
            Some(Notification::basic(
                config,
                "Bookmark Saved!",
                format!("Saved: {}", bookmark.title),
                true,
            ))
        }
        Err(e) => {
            error!("Failed to save bookmark via background: {}", e);
            Some(Notification::basic(
                config,
                "Blasphemy Slate Error",
                format!("Failed to save bookmark: {}", e),
                false,
            ))
        }
    }
}
