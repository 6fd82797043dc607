/// Key/value persistence backends behind the store
use crate::error::BackendError;
use serde::Serialize;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

/// Async get/set pair modelled on `storage.local`.
///
/// Futures are not `Send`: everything runs on the browser's single thread.
#[allow(async_fn_in_trait)]
pub trait StorageBackend {
    /// `Ok(None)` when the key has never been written
    async fn get(&self, key: &str) -> Result<Option<Value>, BackendError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), BackendError>;
}

// Import JS bridge functions
#[wasm_bindgen(module = "/storage.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;
}

/// `browser.storage.local` / `chrome.storage.local` through storage.js
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeStorage;

impl StorageBackend for ChromeStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, BackendError> {
        let value_js = getStorage(key)
            .await
            .map_err(|e| BackendError(format!("Failed to get storage: {:?}", e)))?;

        if value_js.is_null() || value_js.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value_js)
            .map(Some)
            .map_err(|e| BackendError(format!("Failed to parse storage: {:?}", e)))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), BackendError> {
        // Plain objects rather than ES Maps, so storage.local can persist them
        let value_js = value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| BackendError(format!("Failed to serialize storage: {:?}", e)))?;

        setStorage(key, value_js)
            .await
            .map_err(|e| BackendError(format!("Failed to save storage: {:?}", e)))
    }
}

/// In-process backend for tests and native callers
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RefCell<HashMap<String, Value>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: Value) -> Self {
        self.values.borrow_mut().insert(key.to_string(), value);
        self
    }

    pub fn raw(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful `set` calls
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>, BackendError> {
        if self.fail_reads.get() {
            return Err(BackendError(format!("read of {} refused", key)));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), BackendError> {
        if self.fail_writes.get() {
            return Err(BackendError(format!("write of {} refused", key)));
        }
        self.values.borrow_mut().insert(key.to_string(), value);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
