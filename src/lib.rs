/// Blasphemy Slate - Browser Extension for Bookmarks in Folders
/// Built with Rust + WASM

pub mod backend;
pub mod bindings;
pub mod bookmark_data;
pub mod config;
pub mod error;
pub mod folders;
pub mod operations;
pub mod snapshot;
pub mod storage;
pub mod ui;

pub use backend::{ChromeStorage, MemoryBackend, StorageBackend};
pub use bookmark_data::{ActiveTab, Bookmark, BookmarkUpdate, Folder, INBOX_FOLDER_ID, NewBookmark};
pub use config::Config;
pub use error::{BackendError, ErrorKind, StoreError, StoreResult};
pub use folders::normalize_folders;
pub use snapshot::Snapshot;
pub use storage::Store;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}
