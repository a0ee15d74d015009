//! `localStorage` backend for progress persistence
use scamducation_game::KeyValueStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebStorageError {
    #[error("localStorage is unavailable: {0}")]
    Unavailable(String),
    #[error("localStorage rejected `{key}`: {reason}")]
    Operation { key: String, reason: String },
}

/// Web-specific key-value storage using `localStorage`
///
/// Off the browser every call reports [`WebStorageError::Unavailable`], so
/// server-rendered widgets start from fresh progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::WebStorageError;
    use crate::dom;

    fn storage() -> Result<web_sys::Storage, WebStorageError> {
        dom::local_storage()
            .map_err(|err| WebStorageError::Unavailable(dom::js_error_message(&err)))
    }

    fn operation_error(key: &str, err: &wasm_bindgen::JsValue) -> WebStorageError {
        WebStorageError::Operation {
            key: key.to_string(),
            reason: dom::js_error_message(err),
        }
    }

    pub fn get(key: &str) -> Result<Option<String>, WebStorageError> {
        storage()?
            .get_item(key)
            .map_err(|err| operation_error(key, &err))
    }

    pub fn set(key: &str, value: &str) -> Result<(), WebStorageError> {
        storage()?
            .set_item(key, value)
            .map_err(|err| operation_error(key, &err))
    }

    pub fn remove(key: &str) -> Result<(), WebStorageError> {
        storage()?
            .remove_item(key)
            .map_err(|err| operation_error(key, &err))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::WebStorageError;

    fn unavailable() -> WebStorageError {
        WebStorageError::Unavailable("not running in a browser".to_string())
    }

    pub fn get(_key: &str) -> Result<Option<String>, WebStorageError> {
        Err(unavailable())
    }

    pub fn set(_key: &str, _value: &str) -> Result<(), WebStorageError> {
        Err(unavailable())
    }

    pub fn remove(_key: &str) -> Result<(), WebStorageError> {
        Err(unavailable())
    }
}

impl KeyValueStore for LocalStorageStore {
    type Error = WebStorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        backend::get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        backend::set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        backend::remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scamducation_game::{ProgressRecord, ProgressStore};

    #[test]
    fn host_store_reports_unavailable() {
        let store = LocalStorageStore::new();
        assert!(matches!(
            store.get("Scambert_achievements"),
            Err(WebStorageError::Unavailable(_))
        ));
        assert!(store.set("Scambert_welcome_seen", "true").is_err());
    }

    #[test]
    fn progress_store_degrades_to_fresh_record() {
        let store = ProgressStore::load(LocalStorageStore::new());
        assert_eq!(store.progress(), &ProgressRecord::new());
        assert!(!store.welcome_seen());
    }
}
