//! Persistence: the snapshot codec and the stores that hold it.
//!
//! DESIGN
//! ======
//! A saved board is the JSON encoding of an [`EditorState`] at rest. Gesture
//! state is not part of `EditorState`, so it is never written. Older documents
//! that still carry `resizing` / `dragging` keys decode fine; those keys are
//! ignored.
//!
//! ERROR HANDLING
//! ==============
//! Stores report failures as [`StoreError`]. The editor decides what they
//! mean: a failed load is "no saved board", a failed save is logged and the
//! session carries on.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::doc::EditorState;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid saved state: {0}")]
    Decode(serde_json::Error),
    #[error("state encode failed: {0}")]
    Encode(serde_json::Error),
}

/// Serialize a state for storage.
///
/// # Errors
///
/// Returns `Encode` if serialization fails.
pub fn encode_snapshot(state: &EditorState) -> Result<String, StoreError> {
    serde_json::to_string(state).map_err(StoreError::Encode)
}

/// Parse a stored state and repair anything that breaks editor invariants.
///
/// # Errors
///
/// Returns `Decode` if `raw` is not a valid state document.
pub fn decode_snapshot(raw: &str) -> Result<EditorState, StoreError> {
    let state: EditorState = serde_json::from_str(raw).map_err(StoreError::Decode)?;
    Ok(state.sanitized())
}

/// Durable home for the editor's state.
pub trait StateStore {
    /// Load the saved state. `Ok(None)` means nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the store cannot be read or holds garbage.
    fn load(&self) -> Result<Option<EditorState>, StoreError>;

    /// Replace the saved state.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the state cannot be written.
    fn save(&mut self, state: &EditorState) -> Result<(), StoreError>;
}

/// In-memory store holding the encoded snapshot. Used by tests and embedders
/// that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with raw (possibly invalid) snapshot text.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { raw: Some(raw.into()), saves: 0 }
    }

    /// The encoded snapshot currently held.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// How many times `save` has been called.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<EditorState>, StoreError> {
        self.raw.as_deref().map(decode_snapshot).transpose()
    }

    fn save(&mut self, state: &EditorState) -> Result<(), StoreError> {
        self.raw = Some(encode_snapshot(state)?);
        self.saves += 1;
        Ok(())
    }
}

/// Store backed by a JSON file on disk.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Result<Option<EditorState>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        decode_snapshot(&raw).map(Some)
    }

    fn save(&mut self, state: &EditorState) -> Result<(), StoreError> {
        let encoded = encode_snapshot(state)?;
        let tmp = self.temp_path();
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
