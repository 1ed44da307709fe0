use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::assets::backend::BlobBackend;
use crate::assets::record::{AssetKey, FileBlob};
use crate::config::StoreConfig;
use crate::foundation::error::StoreError;

/// Header schema written at the top of every record.
pub const RECORD_SCHEMA: u32 = 1;

const RECORD_EXT: &str = "rec";

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct RecordMeta {
    schema: u32,
    key: String,
    name: String,
    content_type: String,
    size: u64,
    xxh3: String,
}

/// Directory-backed store under `<root>/<namespace>/<store_name>/`.
///
/// Each record is one `<digest(key)>.rec` file: a single-line JSON header, a newline, then the
/// payload bytes. Records are written to a temporary file and renamed into place, so the rename
/// is the only commit point and a failed write leaves the previous record intact.
#[derive(Clone, Debug)]
pub struct DirBackend {
    config: StoreConfig,
}

impl DirBackend {
    /// Backend for the given location. Nothing touches the filesystem until `open`.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Directory holding the records.
    pub fn dir(&self) -> PathBuf {
        self.config.dir()
    }

    fn record_path(&self, key: &AssetKey) -> PathBuf {
        self.dir().join(record_file_name(key))
    }

    fn read_record(&self, path: &Path) -> Result<(AssetKey, FileBlob), String> {
        let raw = fs::read(path).map_err(|e| format!("read record: {e}"))?;
        let split = raw
            .iter()
            .position(|b| *b == b'\n')
            .ok_or_else(|| "record has no header line".to_string())?;
        let meta: RecordMeta = serde_json::from_slice(&raw[..split])
            .map_err(|e| format!("parse header: {e}"))?;
        if meta.schema != RECORD_SCHEMA {
            return Err(format!("unsupported record schema {}", meta.schema));
        }
        let key = AssetKey::new(meta.key).map_err(|e| e.to_string())?;
        if path.file_name().and_then(|n| n.to_str()) != Some(record_file_name(&key).as_str()) {
            return Err("record file name does not match its key".to_string());
        }
        let blob = FileBlob::new(meta.name, meta.content_type, raw[split + 1..].to_vec());
        if blob.size() != meta.size || format!("{:016x}", blob.fingerprint()) != meta.xxh3 {
            return Err("payload does not match its header".to_string());
        }
        Ok((key, blob))
    }
}

impl BlobBackend for DirBackend {
    fn open(&self) -> Result<(), StoreError> {
        self.config
            .validate()
            .map_err(|e| StoreError::unavailable(e.to_string()))?;
        let dir = self.dir();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::unavailable(format!("open '{}': {e}", dir.display())))
    }

    fn put(&self, key: &AssetKey, blob: &FileBlob) -> Result<(), StoreError> {
        let path = self.record_path(key);
        let meta = RecordMeta {
            schema: RECORD_SCHEMA,
            key: key.as_str().to_string(),
            name: blob.name().to_string(),
            content_type: blob.content_type().to_string(),
            size: blob.size(),
            xxh3: format!("{:016x}", blob.fingerprint()),
        };
        // Compact JSON never contains a raw newline, so the first one ends the header.
        let mut record =
            serde_json::to_vec(&meta).map_err(|e| StoreError::write(e.to_string()))?;
        record.reserve(blob.bytes().len() + 1);
        record.push(b'\n');
        record.extend_from_slice(blob.bytes());

        write_replace(&path, &record)?;
        tracing::debug!(key = %key, path = %path.display(), "record written");
        Ok(())
    }

    fn scan(&self) -> Result<Vec<(AssetKey, FileBlob)>, StoreError> {
        let dir = self.dir();
        let entries = fs::read_dir(&dir)
            .map_err(|e| StoreError::read(format!("list '{}': {e}", dir.display())))?;

        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::read(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            match self.read_record(&path) {
                Ok(rec) => out.push(rec),
                Err(reason) => {
                    tracing::warn!(path = %path.display(), %reason, "skipping unreadable record");
                }
            }
        }
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }
}

fn write_replace(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| StoreError::write("record path has no file name"))?;
    // Unique per writer so concurrent puts to one key never share a temp file.
    let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let tmp = path.with_file_name(format!(".{file_name}.{}-{seq}.tmp", std::process::id()));

    let write = || -> std::io::Result<()> {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
        fs::rename(&tmp, path)
    };
    write().map_err(|e| {
        let _ = fs::remove_file(&tmp);
        StoreError::write(format!("write '{}': {e}", path.display()))
    })
}

/// Fixed-length file name for `key`, independent of the key's length and characters.
fn record_file_name(key: &AssetKey) -> String {
    let digest = xxhash_rust::xxh3::xxh3_128(key.as_str().as_bytes());
    format!("{digest:032x}.{RECORD_EXT}")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/dir.rs"]
mod tests;
