//! Progress persistence over a key-value backend
use crate::KeyValueStore;
use crate::achievements::{self, ProgressEvent, Unlocks};
use crate::constants::{BOSS_DEFEATED_KEY, FLAG_TRUE, PROGRESS_KEY, WELCOME_SEEN_KEY};
use crate::progress::ProgressRecord;
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage backend failed: {0}")]
    Backend(String),
}

impl StoreError {
    fn backend(err: &impl std::error::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

/// In-memory backend; clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Owns the live [`ProgressRecord`] and writes it back after every change.
#[derive(Debug)]
pub struct ProgressStore<S: KeyValueStore> {
    backend: S,
    progress: ProgressRecord,
}

impl<S: KeyValueStore> ProgressStore<S> {
    /// Read progress from `backend`, starting fresh when nothing usable is stored.
    pub fn load(backend: S) -> Self {
        let progress = match backend.get(PROGRESS_KEY) {
            Ok(Some(raw)) => ProgressRecord::from_json(&raw).unwrap_or_else(|err| {
                log::warn!("stored progress unreadable, starting fresh: {err}");
                ProgressRecord::new()
            }),
            Ok(None) => ProgressRecord::new(),
            Err(err) => {
                log::warn!("progress storage unavailable, starting fresh: {err}");
                ProgressRecord::new()
            }
        };
        Self { backend, progress }
    }

    #[must_use]
    pub const fn progress(&self) -> &ProgressRecord {
        &self.progress
    }

    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Fold an event into the live record and persist it.
    ///
    /// A failed write is logged; the in-memory record still advances.
    pub fn apply(&mut self, event: &ProgressEvent) -> Unlocks {
        let (next, unlocked) = achievements::apply(&self.progress, event);
        self.progress = next;
        if let Err(err) = self.save() {
            log::warn!("progress not persisted: {err}");
        }
        unlocked
    }

    /// Write the live record to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.progress)?;
        self.backend
            .set(PROGRESS_KEY, &raw)
            .map_err(|err| StoreError::backend(&err))
    }

    /// Replace progress with the zero record and clear the related flags.
    ///
    /// Every step is attempted. The stored record is removed before the zero
    /// record is written, so a failed write still loads as fresh progress.
    ///
    /// # Errors
    ///
    /// Returns the first backend failure; the in-memory record is reset regardless.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.progress = ProgressRecord::new();
        let outcomes = [
            self.remove(PROGRESS_KEY),
            self.remove(WELCOME_SEEN_KEY),
            self.remove(BOSS_DEFEATED_KEY),
            self.save(),
        ];
        outcomes.into_iter().find_map(Result::err).map_or(Ok(()), Err)
    }

    #[must_use]
    pub fn welcome_seen(&self) -> bool {
        self.flag(WELCOME_SEEN_KEY)
    }

    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn mark_welcome_seen(&self) -> Result<(), StoreError> {
        self.set_flag(WELCOME_SEEN_KEY)
    }

    #[must_use]
    pub fn boss_defeated(&self) -> bool {
        self.flag(BOSS_DEFEATED_KEY)
    }

    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn mark_boss_defeated(&self) -> Result<(), StoreError> {
        self.set_flag(BOSS_DEFEATED_KEY)
    }

    /// The boss appears once every regular scam was avoided and every
    /// category learned, until the boss is beaten.
    #[must_use]
    pub fn boss_available(&self) -> bool {
        self.progress.all_avoided() && self.progress.all_learned() && !self.boss_defeated()
    }

    fn flag(&self, key: &str) -> bool {
        match self.backend.get(key) {
            Ok(value) => value.as_deref() == Some(FLAG_TRUE),
            Err(err) => {
                log::warn!("could not read `{key}`: {err}");
                false
            }
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.backend.remove(key).map_err(|err| {
            log::warn!("could not clear `{key}`: {err}");
            StoreError::backend(&err)
        })
    }

    fn set_flag(&self, key: &str) -> Result<(), StoreError> {
        self.backend
            .set(key, FLAG_TRUE)
            .map_err(|err| StoreError::backend(&err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryId;

    #[derive(Debug)]
    struct BrokenStore;

    #[derive(Debug, Error)]
    #[error("quota exceeded")]
    struct QuotaExceeded;

    impl KeyValueStore for BrokenStore {
        type Error = QuotaExceeded;

        fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> {
            Err(QuotaExceeded)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), Self::Error> {
            Err(QuotaExceeded)
        }

        fn remove(&self, _key: &str) -> Result<(), Self::Error> {
            Err(QuotaExceeded)
        }
    }

    /// Accepts everything except writes of the progress record.
    #[derive(Debug, Clone, Default)]
    struct FullQuotaStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for FullQuotaStore {
        type Error = QuotaExceeded;

        fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
            Ok(self.inner.get(key).unwrap_or_default())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
            if key == PROGRESS_KEY {
                return Err(QuotaExceeded);
            }
            self.inner.set(key, value).map_err(|never| match never {})
        }

        fn remove(&self, key: &str) -> Result<(), Self::Error> {
            self.inner.remove(key).map_err(|never| match never {})
        }
    }

    #[test]
    fn progress_survives_reload() {
        let backend = MemoryStore::new();
        let mut store = ProgressStore::load(backend.clone());
        store.apply(&ProgressEvent::CategoryLearned {
            category: CategoryId::Delivery,
        });

        let reloaded = ProgressStore::load(backend);
        assert!(reloaded.progress().learned.contains(&CategoryId::Delivery));
    }

    #[test]
    fn corrupt_payload_loads_zero_record() {
        let backend = MemoryStore::new();
        backend.set(PROGRESS_KEY, "{not json").unwrap();
        let store = ProgressStore::load(backend);
        assert_eq!(store.progress(), &ProgressRecord::new());
    }

    #[test]
    fn reset_clears_flags() {
        let backend = MemoryStore::new();
        let mut store = ProgressStore::load(backend.clone());
        store.mark_welcome_seen().unwrap();
        store.mark_boss_defeated().unwrap();
        assert!(store.welcome_seen());
        assert!(store.boss_defeated());

        store.reset().unwrap();
        assert!(!store.welcome_seen());
        assert!(!store.boss_defeated());
        assert_eq!(backend.get(WELCOME_SEEN_KEY).unwrap(), None);
    }

    #[test]
    fn reset_with_full_quota_still_clears_everything() {
        let backend = FullQuotaStore::default();
        backend
            .inner
            .set(PROGRESS_KEY, r#"{"totalRoutesCompleted":7,"rickRollCompleted":true}"#)
            .unwrap();
        let mut store = ProgressStore::load(backend.clone());
        assert_eq!(store.progress().routes_completed, 7);
        store.mark_welcome_seen().unwrap();
        store.mark_boss_defeated().unwrap();

        assert!(matches!(store.reset(), Err(StoreError::Backend(_))));
        assert_eq!(store.progress(), &ProgressRecord::new());
        assert!(!store.welcome_seen());
        assert!(!store.boss_defeated());

        let reloaded = ProgressStore::load(backend);
        assert_eq!(reloaded.progress(), &ProgressRecord::new());
    }

    #[test]
    fn failing_backend_degrades_gracefully() {
        let mut store = ProgressStore::load(BrokenStore);
        assert_eq!(store.progress(), &ProgressRecord::new());
        let unlocked = store.apply(&ProgressEvent::EasterEggTextRead);
        assert_eq!(unlocked.len(), 1);
        assert!(store.progress().read_easter_egg_text);
        assert!(matches!(store.save(), Err(StoreError::Backend(_))));
        assert!(!store.boss_defeated());
    }

    #[test]
    fn boss_requires_mastery() {
        let backend = MemoryStore::new();
        let mut store = ProgressStore::load(backend);
        assert!(!store.boss_available());
        for category in CategoryId::REGULAR {
            store.apply(&ProgressEvent::RouteCompleted {
                category: Some(category),
                succeeded: true,
                raw_prompt_text: String::new(),
            });
        }
        for category in CategoryId::ALL {
            store.apply(&ProgressEvent::CategoryLearned { category });
        }
        assert!(store.boss_available());
        store.mark_boss_defeated().unwrap();
        assert!(!store.boss_available());
    }
}
