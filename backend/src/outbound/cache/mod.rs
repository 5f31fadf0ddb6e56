//! File-backed fallback snapshot cache.
//!
//! Persists the last record list the store returned as a JSON file inside a
//! cap-std directory sandbox, so degraded-mode reads never touch anything
//! outside the configured cache directory. The snapshot is best-effort: a
//! missing or corrupt file reads as "no snapshot", never as an error that
//! could block the sentinel-only fallback.

use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::warn;

use crate::domain::ports::{FallbackCache, FallbackCacheError};
use crate::domain::record::Record;

/// Snapshot cache holding one JSON file in a sandboxed directory.
pub struct SnapshotFileCache {
    dir: Dir,
    file_name: PathBuf,
}

impl SnapshotFileCache {
    /// Open (creating if needed) the cache directory containing `path`.
    ///
    /// Ambient filesystem authority is used exactly once, here; every later
    /// read and write goes through the directory handle.
    pub fn open(path: &Path) -> Result<Self, FallbackCacheError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| FallbackCacheError::io("cache path must name a file"))?;

        std::fs::create_dir_all(parent)
            .map_err(|error| FallbackCacheError::io(error.to_string()))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|error| FallbackCacheError::io(error.to_string()))?;
        Ok(Self { dir, file_name })
    }
}

impl FallbackCache for SnapshotFileCache {
    fn load(&self) -> Result<Option<Vec<Record>>, FallbackCacheError> {
        let bytes = match self.dir.read(&self.file_name) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(FallbackCacheError::io(error.to_string())),
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(Some(records)),
            Err(error) => {
                warn!(error = %error, "discarding unreadable fallback snapshot");
                Ok(None)
            }
        }
    }

    fn store(&self, records: &[Record]) -> Result<(), FallbackCacheError> {
        let bytes = serde_json::to_vec(records)
            .map_err(|error| FallbackCacheError::io(error.to_string()))?;
        self.dir
            .write(&self.file_name, bytes)
            .map_err(|error| FallbackCacheError::io(error.to_string()))
    }
}
