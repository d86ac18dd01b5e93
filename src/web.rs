//! Browser storage for the board.
//!
//! `LocalStorageStore` keeps the snapshot under a single `localStorage` key.
//! Other tabs see each save as a `storage` event; hosts check the event key
//! with [`LocalStorageStore::is_state_key`] and pass the new value to
//! [`crate::engine::Editor::on_external_snapshot`].

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use tracing::debug;
use web_sys::Storage;

use crate::config::EditorConfig;
use crate::doc::EditorState;
use crate::persist::{self, StateStore, StoreError};

#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Store under the key named by `SHAPEBOARD_STORAGE_KEY`.
    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.storage_key.clone())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether a `storage` event for `event_key` concerns this store.
    ///
    /// A `None` key means the whole storage area was cleared.
    #[must_use]
    pub fn is_state_key(&self, event_key: Option<&str>) -> bool {
        event_key.is_none_or(|k| k == self.key)
    }

    fn storage() -> Result<Storage, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StoreError::Unavailable("localStorage disabled".into())),
            Err(e) => Err(StoreError::Unavailable(format!("{e:?}"))),
        }
    }
}

impl StateStore for LocalStorageStore {
    fn load(&self) -> Result<Option<EditorState>, StoreError> {
        let raw = Self::storage()?
            .get_item(&self.key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        match raw {
            Some(raw) if !raw.trim().is_empty() => persist::decode_snapshot(&raw).map(Some),
            _ => Ok(None),
        }
    }

    fn save(&mut self, state: &EditorState) -> Result<(), StoreError> {
        let encoded = persist::encode_snapshot(state)?;
        Self::storage()?
            .set_item(&self.key, &encoded)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?;
        debug!(key = %self.key, bytes = encoded.len(), "state saved to localStorage");
        Ok(())
    }
}
