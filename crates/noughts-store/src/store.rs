//! File-backed token store with atomic replace semantics.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::{CredentialSet, StoreError};

/// Durable store for the current [`CredentialSet`].
///
/// One JSON file holds the whole set, so persistence is naturally
/// all-or-nothing: a reader sees either the previous complete set or the
/// new complete set, never a mix. Writes go through a temp file in the
/// same directory followed by a rename.
///
/// The store is cheap to clone. Each handle re-reads the file on every
/// operation rather than caching, so the lifecycle's writes are visible
/// to the session client's handle immediately.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by the given file path.
    ///
    /// The file does not need to exist yet; [`load`](Self::load) returns
    /// `Ok(None)` until the first [`save`](Self::save).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persists a complete credential set, replacing any previous one.
    pub fn save(&self, credentials: &CredentialSet) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(credentials).map_err(StoreError::Encode)?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &bytes).map_err(StoreError::Write)?;
        fs::rename(&tmp, &self.path).map_err(StoreError::Write)?;

        tracing::debug!(path = %self.path.display(), "credential set persisted");
        Ok(())
    }

    /// Loads the stored credential set, or `None` if nothing is persisted.
    pub fn load(&self) -> Result<Option<CredentialSet>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Read(e)),
        };

        let credentials = serde_json::from_slice(&bytes).map_err(StoreError::Decode)?;
        Ok(Some(credentials))
    }

    /// Removes all persisted credentials. Safe to call when none exist.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "credential set cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write(e)),
        }
    }
}
