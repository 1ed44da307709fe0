use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::assets::backend::{BlobBackend, MemoryBackend};
use crate::assets::dir::DirBackend;
use crate::assets::handles::{DisplayHandle, HandleRegistry};
use crate::assets::record::{AssetKey, FileBlob};
use crate::config::StoreConfig;
use crate::foundation::error::StoreError;

/// Shared media slot store: durable key to blob persistence plus display-handle tracking.
///
/// One instance replaces the per-view copies of the persistence logic; inject it (or an
/// `Arc` of it) into every view that owns an upload slot.
pub struct AssetStore<B: BlobBackend = DirBackend> {
    backend: B,
    handles: Mutex<HandleRegistry>,
}

impl AssetStore<DirBackend> {
    /// Directory-backed store at `config`'s location.
    pub fn open_dir(config: StoreConfig) -> Self {
        Self::new(DirBackend::new(config))
    }
}

impl AssetStore<MemoryBackend> {
    /// Store backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl<B: BlobBackend> AssetStore<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            handles: Mutex::new(HandleRegistry::new()),
        }
    }

    /// Underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Persist `file` under `key`, overwriting any previous value.
    ///
    /// Failures are logged here and returned; callers are expected to carry on as if the
    /// slot had never been persisted.
    #[tracing::instrument(skip(self, file), fields(size = file.size()))]
    pub fn put(&self, key: &str, file: FileBlob) -> Result<(), StoreError> {
        let key = AssetKey::new(key)?;
        let res = self.backend.open().and_then(|()| self.backend.put(&key, &file));
        if let Err(err) = &res {
            tracing::warn!(%key, error = %err, "failed to save asset");
        }
        res
    }

    /// Upload flow: issue a display handle for `file` right away and persist it.
    ///
    /// Only an invalid key is an error. A persistence failure is logged and the handle is
    /// still returned, so the new media shows for the rest of the session.
    pub fn put_and_display(&self, key: &str, file: FileBlob) -> Result<DisplayHandle, StoreError> {
        let slot = AssetKey::new(key)?;
        let handle = self.handles.lock().issue(&slot, &file);
        // `put` already logged the cause; the handle stays valid for this session.
        if self.put(key, file).is_err() {
            tracing::debug!(%slot, "upload shown for this session only");
        }
        Ok(handle)
    }

    /// Rehydrate every stored slot, failing soft to an empty map.
    pub fn get_all(&self) -> BTreeMap<String, DisplayHandle> {
        match self.try_get_all() {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load assets; slots fall back to empty");
                BTreeMap::new()
            }
        }
    }

    /// Rehydrate every stored slot, reporting backend failures.
    ///
    /// Each returned handle supersedes any handle previously issued for the same key.
    #[tracing::instrument(skip(self))]
    pub fn try_get_all(&self) -> Result<BTreeMap<String, DisplayHandle>, StoreError> {
        self.backend.open()?;
        let records = self.backend.scan()?;
        let mut handles = self.handles.lock();
        let out: BTreeMap<_, _> = records
            .iter()
            .map(|(key, blob)| (key.as_str().to_string(), handles.issue(key, blob)))
            .collect();
        tracing::debug!(count = out.len(), "assets rehydrated");
        Ok(out)
    }

    /// Blob behind a live handle URL.
    pub fn resolve(&self, url: &str) -> Option<FileBlob> {
        self.handles.lock().resolve(url).cloned()
    }

    /// Release a handle (view unmounted). Returns `false` if it was already released or
    /// superseded.
    pub fn release(&self, handle: &DisplayHandle) -> bool {
        self.handles.lock().revoke(handle.url())
    }

    /// Release whatever handle is live for `key`.
    pub fn release_key(&self, key: &str) -> bool {
        match AssetKey::new(key) {
            Ok(key) => self.handles.lock().revoke_key(&key),
            Err(_) => false,
        }
    }

    /// Number of unreleased handles.
    pub fn live_handles(&self) -> usize {
        self.handles.lock().live()
    }
}

/// Presentation state of one upload slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// Nothing stored (or storage unavailable): show the upload prompt.
    Empty,
    /// Stored media is available.
    Filled(DisplayHandle),
}

impl SlotState {
    /// Look up `key` in a map returned by [`AssetStore::get_all`].
    pub fn lookup(handles: &BTreeMap<String, DisplayHandle>, key: &str) -> Self {
        handles
            .get(key)
            .cloned()
            .map_or(Self::Empty, Self::Filled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
