use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::assets::record::{AssetKey, FileBlob};
use crate::foundation::error::StoreError;

/// Durable key/value storage primitive behind an [`AssetStore`](crate::AssetStore).
///
/// Every write is a single independent upsert; there is no delete and no multi-key
/// transaction. Implementations must be usable from several threads.
pub trait BlobBackend: Send + Sync {
    /// Open (or create) the backing namespace. Called before every operation.
    fn open(&self) -> Result<(), StoreError>;
    /// Insert or overwrite the blob stored under `key`.
    fn put(&self, key: &AssetKey, blob: &FileBlob) -> Result<(), StoreError>;
    /// Every stored record, ordered by key.
    fn scan(&self) -> Result<Vec<(AssetKey, FileBlob)>, StoreError>;
}

/// Injected failure for [`MemoryBackend`], modelling restricted browser storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Operate normally.
    #[default]
    None,
    /// `open` fails (private browsing, storage disabled).
    Unavailable,
    /// `scan` fails after a successful open.
    ReadFailure,
    /// `put` fails after a successful open (quota exceeded).
    WriteFailure,
}

/// Process-local backend, used for tests and for sessions without durable storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: RwLock<BTreeMap<AssetKey, FileBlob>>,
    failure: RwLock<FailureMode>,
}

impl MemoryBackend {
    /// Empty, working backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose `open` always fails.
    pub fn unavailable() -> Self {
        let b = Self::default();
        b.set_failure(FailureMode::Unavailable);
        b
    }

    /// Switch the injected failure mode.
    pub fn set_failure(&self, mode: FailureMode) {
        *self.failure.write() = mode;
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl BlobBackend for MemoryBackend {
    fn open(&self) -> Result<(), StoreError> {
        match *self.failure.read() {
            FailureMode::Unavailable => Err(StoreError::unavailable("memory storage disabled")),
            _ => Ok(()),
        }
    }

    fn put(&self, key: &AssetKey, blob: &FileBlob) -> Result<(), StoreError> {
        if *self.failure.read() == FailureMode::WriteFailure {
            return Err(StoreError::write("memory storage quota exceeded"));
        }
        self.records.write().insert(key.clone(), blob.clone());
        Ok(())
    }

    fn scan(&self) -> Result<Vec<(AssetKey, FileBlob)>, StoreError> {
        if *self.failure.read() == FailureMode::ReadFailure {
            return Err(StoreError::read("memory storage cursor failed"));
        }
        Ok(self
            .records
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/backend.rs"]
mod tests;
