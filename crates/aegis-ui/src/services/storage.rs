//! `localStorage` backend for the credential store.

use crate::core::storage::{KeyValueStore, StorageError};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};

/// [`KeyValueStore`] over `window.localStorage`, storing raw strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw().set_item(key, value).map_err(|err| {
            let detail = format!("{err:?}");
            log_storage_error("set", key, &detail);
            StorageError::WriteFailed {
                key: key.to_string(),
                detail,
            }
        })
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

fn log_storage_error(operation: &'static str, key: &str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
