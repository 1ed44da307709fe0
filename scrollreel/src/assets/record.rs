use std::fmt;
use std::sync::Arc;

use crate::foundation::error::StoreError;

const MAX_KEY_BYTES: usize = 256;
const OCTET_STREAM: &str = "application/octet-stream";

/// Stable logical slot identifier, e.g. `"LEGACY_01"` or `"DISCIPLINE_VIDEO_MAIN"`.
///
/// One key per content placeholder; writing twice to the same key overwrites.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct AssetKey(String);

impl AssetKey {
    /// Validate a slot key: non-empty, at most 256 bytes, no control characters.
    pub fn new(key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        if key.is_empty() {
            return Err(StoreError::invalid_key("key must be non-empty"));
        }
        if key.len() > MAX_KEY_BYTES {
            return Err(StoreError::invalid_key(format!(
                "key exceeds {MAX_KEY_BYTES} bytes"
            )));
        }
        if key.chars().any(char::is_control) {
            return Err(StoreError::invalid_key(
                "key must not contain control characters",
            ));
        }
        Ok(Self(key))
    }

    /// Key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse media family derived from a MIME type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// `image/*`.
    Image,
    /// `video/*`.
    Video,
    /// Anything else.
    Other,
}

impl MediaKind {
    /// Classify a MIME type string.
    pub fn from_content_type(content_type: &str) -> Self {
        let major = content_type
            .split('/')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match major.as_str() {
            "image" => Self::Image,
            "video" => Self::Video,
            _ => Self::Other,
        }
    }
}

/// User-selected file: name, MIME type and bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileBlob {
    name: String,
    content_type: String,
    bytes: Arc<[u8]>,
}

impl FileBlob {
    /// Build a blob with an explicit content type; an empty type is sniffed from the bytes.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let name = name.into();
        let bytes = bytes.into();
        let mut content_type = content_type.into();
        if content_type.trim().is_empty() {
            content_type = sniff_content_type(&name, &bytes).to_string();
        }
        Self {
            name,
            content_type,
            bytes,
        }
    }

    /// Build a blob whose content type is sniffed from its bytes and name.
    pub fn sniffed(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(name, String::new(), bytes)
    }

    /// Original file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the raw bytes.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Media family of this blob.
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_content_type(&self.content_type)
    }

    /// Content fingerprint (xxh3-64 of the bytes).
    pub fn fingerprint(&self) -> u64 {
        xxhash_rust::xxh3::xxh3_64(&self.bytes)
    }
}

/// Best-effort MIME type from magic bytes, falling back to the file extension.
pub fn sniff_content_type(name: &str, bytes: &[u8]) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        return if &bytes[8..12] == b"qt  " {
            "video/quicktime"
        } else {
            "video/mp4"
        };
    }
    if bytes.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        let head = &bytes[..bytes.len().min(64)];
        return if head.windows(4).any(|w| w == b"webm") {
            "video/webm"
        } else {
            "video/x-matroska"
        };
    }

    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        _ => OCTET_STREAM,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/record.rs"]
mod tests;
