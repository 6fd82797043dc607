/// Functions exported to the extension's JS pages.
///
/// Every call builds a store over `storage.local`, so pages never share
/// in-memory state. Failures reject the returned promise with the error
/// message, which always starts with "Error".
use crate::backend::ChromeStorage;
use crate::bookmark_data::{ActiveTab, Bookmark, BookmarkUpdate, Folder, NewBookmark};
use crate::config::Config;
use crate::error::StoreError;
use crate::snapshot::Snapshot;
use crate::storage::Store;
use crate::ui::background::{context_menu_entry, handle_context_menu_click};
use crate::ui::options::OptionsPage;
use crate::ui::popup::{BookmarkForm, Popup, prefill_from_tab};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static CONFIG: RefCell<Config> = RefCell::new(Config::default());
}

impl From<StoreError> for JsValue {
    fn from(e: StoreError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

fn store() -> Store<ChromeStorage> {
    Store::new(ChromeStorage, CONFIG.with(|c| c.borrow().clone()))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Error: Failed to serialize result. {}", e)))
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Error: Invalid argument. {}", e)))
}

/// Override configuration for the rest of this page's lifetime
#[wasm_bindgen]
pub fn configure(config: JsValue) -> Result<(), JsValue> {
    let config: Config = from_js(config)?;
    CONFIG.with(|c| *c.borrow_mut() = config);
    Ok(())
}

// --- Store operations ---

#[wasm_bindgen(js_name = getBookmarks)]
pub async fn get_bookmarks() -> Result<JsValue, JsValue> {
    to_js(&store().get_bookmarks().await)
}

#[wasm_bindgen(js_name = setBookmarks)]
pub async fn set_bookmarks(bookmarks: JsValue) -> Result<JsValue, JsValue> {
    let bookmarks: Vec<Bookmark> = from_js(bookmarks)?;
    store().set_bookmarks(&bookmarks).await?;
    Ok("Bookmarks saved successfully.".into())
}

#[wasm_bindgen(js_name = getFolders)]
pub async fn get_folders() -> Result<JsValue, JsValue> {
    to_js(&store().get_folders().await)
}

#[wasm_bindgen(js_name = setFolders)]
pub async fn set_folders(folders: JsValue) -> Result<JsValue, JsValue> {
    let folders: Vec<Folder> = from_js(folders)?;
    store().set_folders(&folders).await?;
    Ok("Folders saved successfully.".into())
}

#[wasm_bindgen(js_name = addFolder)]
pub async fn add_folder(name: String) -> Result<JsValue, JsValue> {
    store().add_folder(&name).await?;
    Ok("Folder added.".into())
}

#[wasm_bindgen(js_name = deleteFolder)]
pub async fn delete_folder(id: String) -> Result<JsValue, JsValue> {
    store().delete_folder(&id).await?;
    Ok("Folder deleted.".into())
}

#[wasm_bindgen(js_name = saveBookmark)]
pub async fn save_bookmark(data: JsValue) -> Result<JsValue, JsValue> {
    let data: NewBookmark = from_js(data)?;
    store().save_bookmark(data).await?;
    Ok("Bookmark saved successfully.".into())
}

#[wasm_bindgen(js_name = updateBookmark)]
pub async fn update_bookmark(id: String, updates: JsValue) -> Result<JsValue, JsValue> {
    let updates: BookmarkUpdate = from_js(updates)?;
    store().update_bookmark(&id, &updates).await?;
    Ok("Bookmark updated successfully.".into())
}

#[wasm_bindgen(js_name = deleteBookmark)]
pub async fn delete_bookmark(id: String) -> Result<JsValue, JsValue> {
    store().delete_bookmark(&id).await?;
    Ok("Bookmark deleted successfully.".into())
}

#[wasm_bindgen(js_name = clearAllBookmarks)]
pub async fn clear_all_bookmarks() -> Result<JsValue, JsValue> {
    store().clear_all_bookmarks().await?;
    Ok("All bookmarks cleared successfully.".into())
}

// --- Popup ---

#[wasm_bindgen(js_name = prefillFromTab)]
pub fn prefill_tab(tab: JsValue) -> Result<JsValue, JsValue> {
    let tab: ActiveTab = from_js(tab)?;
    to_js(&prefill_from_tab(&tab))
}

#[wasm_bindgen(js_name = displayFolders)]
pub async fn display_folders() -> Result<JsValue, JsValue> {
    to_js(&Snapshot::load(&store()).await.display_folders())
}

#[wasm_bindgen(js_name = searchBookmarks)]
pub async fn search_bookmarks(query: String) -> Result<JsValue, JsValue> {
    to_js(&Snapshot::load(&store()).await.search(&query))
}

#[wasm_bindgen(js_name = savePopupForm)]
pub async fn save_popup_form(form: JsValue) -> Result<JsValue, JsValue> {
    let form: BookmarkForm = from_js(form)?;
    let saved = Popup::open(store()).await.save(form).await?;
    to_js(&saved)
}

// --- Options page ---

#[wasm_bindgen(js_name = folderSummaries)]
pub async fn folder_summaries() -> Result<JsValue, JsValue> {
    to_js(&OptionsPage::open(store()).await.folders())
}

#[wasm_bindgen(js_name = createFolder)]
pub async fn create_folder(name: String) -> Result<JsValue, JsValue> {
    let folder = OptionsPage::open(store()).await.add_folder(&name).await?;
    Ok(format!("Folder \"{}\" created successfully.", folder.name).into())
}

#[wasm_bindgen(js_name = renameFolder)]
pub async fn rename_folder(id: String, name: String) -> Result<JsValue, JsValue> {
    let folder = OptionsPage::open(store()).await.rename_folder(&id, &name).await?;
    Ok(format!("Folder renamed to \"{}\" successfully.", folder.name).into())
}

#[wasm_bindgen(js_name = deleteFolderAndReassign)]
pub async fn delete_folder_and_reassign(id: String) -> Result<JsValue, JsValue> {
    let deletion = OptionsPage::open(store()).await.delete_folder(&id).await?;
    Ok(deletion.message().into())
}

#[wasm_bindgen(js_name = moveBookmark)]
pub async fn move_bookmark(bookmark_id: String, folder_id: String) -> Result<JsValue, JsValue> {
    let moved = OptionsPage::open(store())
        .await
        .move_bookmark(&bookmark_id, &folder_id)
        .await?;
    Ok(moved.into())
}

#[wasm_bindgen(js_name = editBookmark)]
pub async fn edit_bookmark(id: String, updates: JsValue) -> Result<JsValue, JsValue> {
    let updates: BookmarkUpdate = from_js(updates)?;
    OptionsPage::open(store()).await.edit_bookmark(&id, updates).await?;
    Ok("Bookmark updated successfully.".into())
}

#[wasm_bindgen(js_name = clearAllData)]
pub async fn clear_all_data() -> Result<JsValue, JsValue> {
    OptionsPage::open(store()).await.clear_all().await?;
    Ok("All data (bookmarks and custom folders) cleared successfully.".into())
}

#[wasm_bindgen(js_name = exportData)]
pub async fn export_data() -> Result<JsValue, JsValue> {
    let json = OptionsPage::open(store()).await.export_json()?;
    Ok(json.into())
}

#[wasm_bindgen(js_name = importData)]
pub async fn import_data(json: String) -> Result<JsValue, JsValue> {
    let summary = OptionsPage::open(store()).await.import_json(&json).await?;
    to_js(&summary)
}

// --- Background ---

#[wasm_bindgen(js_name = contextMenuEntry)]
pub fn context_menu() -> Result<JsValue, JsValue> {
    CONFIG.with(|c| to_js(&context_menu_entry(&c.borrow())))
}

/// Resolves to the notification to show, or `null` for other menu items
#[wasm_bindgen(js_name = handleContextMenuClick)]
pub async fn context_menu_click(menu_item_id: String, tab: JsValue) -> Result<JsValue, JsValue> {
    let tab: ActiveTab = from_js(tab)?;
    let notification = handle_context_menu_click(&store(), &menu_item_id, &tab).await;
    to_js(&notification)
}
