use std::collections::HashMap;

use crate::assets::record::{AssetKey, FileBlob, MediaKind};

/// Ephemeral, revocable reference a view can render as an image or video source.
///
/// Handles are only meaningful while live in the [`HandleRegistry`] that issued them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DisplayHandle {
    url: String,
    key: AssetKey,
    content_type: String,
    size: u64,
    kind: MediaKind,
}

impl DisplayHandle {
    /// Opaque `blob:` URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Slot the handle was issued for.
    pub fn key(&self) -> &AssetKey {
        &self.key
    }

    /// MIME type of the referenced blob.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Size of the referenced blob in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Media family, for choosing an image or video element.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}

/// Tracks issued display handles so they can be released.
///
/// At most one handle is live per key: issuing a new one revokes the handle it supersedes.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    next_serial: u64,
    by_url: HashMap<String, FileBlob>,
    url_by_key: HashMap<AssetKey, String>,
}

impl HandleRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a handle for `blob` under `key`, revoking any previous handle for that key.
    pub fn issue(&mut self, key: &AssetKey, blob: &FileBlob) -> DisplayHandle {
        self.revoke_key(key);

        let serial = self.next_serial;
        self.next_serial += 1;
        let url = format!("blob:scrollreel/{serial}-{:016x}", blob.fingerprint());

        self.by_url.insert(url.clone(), blob.clone());
        self.url_by_key.insert(key.clone(), url.clone());
        DisplayHandle {
            url,
            key: key.clone(),
            content_type: blob.content_type().to_string(),
            size: blob.size(),
            kind: blob.kind(),
        }
    }

    /// Blob behind a live handle URL.
    pub fn resolve(&self, url: &str) -> Option<&FileBlob> {
        self.by_url.get(url)
    }

    /// Whether `url` is still live.
    pub fn is_live(&self, url: &str) -> bool {
        self.by_url.contains_key(url)
    }

    /// Revoke a handle by URL. Returns `false` if it was not live.
    pub fn revoke(&mut self, url: &str) -> bool {
        if self.by_url.remove(url).is_none() {
            return false;
        }
        self.url_by_key.retain(|_, u| u != url);
        true
    }

    /// Revoke the live handle for `key`, if any.
    pub fn revoke_key(&mut self, key: &AssetKey) -> bool {
        match self.url_by_key.remove(key) {
            Some(url) => {
                self.by_url.remove(&url);
                tracing::debug!(%key, %url, "display handle revoked");
                true
            }
            None => false,
        }
    }

    /// Number of live handles.
    pub fn live(&self) -> usize {
        self.by_url.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/handles.rs"]
mod tests;
