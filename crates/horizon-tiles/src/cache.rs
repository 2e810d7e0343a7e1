//! On-disk cache of component state.
//!
//! A [`StateCache`] remembers the last list of components shown for a key
//! so a screen can render immediately on the next launch, before fresh data
//! arrives. Files are stored as `<dir>/<key>.json` holding a page document:
//!
//! ```json
//! {"components": [{"kind": "list", "items": []}]}
//! ```
//!
//! # Example
//!
//! ```no_run
//! use horizon_tiles::{ComponentKind, ComponentModel, StateCache};
//!
//! let cache = StateCache::new("home-feed")?;
//! cache.save(&[ComponentModel::new(ComponentKind::Carousel)])?;
//!
//! let components = cache.load()?;
//! assert_eq!(components.len(), 1);
//! # Ok::<(), horizon_tiles::CacheError>(())
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use horizon_tiles_core::logging::targets;
use horizon_tiles_core::{Document, DocumentError, PerfSpan, tiles_debug, tiles_warn};
use parking_lot::RwLock;

use crate::component::ComponentModel;

/// Directory below the platform cache directory that holds state files.
const STATE_DIR: [&str; 2] = ["horizon-tiles", "state"];

/// Errors produced by [`StateCache`].
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Reading or writing the cache file failed.
    #[error("cache I/O error at '{}': {source}", path.display())]
    Io {
        /// The file or directory being accessed.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// The cache file does not hold a valid page document.
    #[error("invalid cache file '{}': {source}", path.display())]
    Document {
        /// The cache file.
        path: PathBuf,
        /// The underlying error.
        source: DocumentError,
    },

    /// The key contains no usable characters.
    #[error("invalid cache key '{0}'")]
    InvalidKey(String),

    /// The platform has no cache directory.
    #[error("could not determine the platform cache directory")]
    NoCacheDirectory,
}

impl CacheError {
    fn io(source: io::Error, path: &Path) -> Self {
        CacheError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// A keyed, file-backed store for a list of component models.
///
/// The last saved or loaded list is also kept in memory, so repeated
/// [`load`](Self::load) calls read the disk once. The cache is `Send + Sync`
/// and can be shared between threads behind an `Arc`.
#[derive(Debug)]
pub struct StateCache {
    key: String,
    path: PathBuf,
    state: RwLock<Option<Vec<ComponentModel>>>,
}

impl StateCache {
    /// Creates a cache for `key` in the platform cache directory.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidKey`] for an empty key and
    /// [`CacheError::NoCacheDirectory`] when the platform provides no cache
    /// directory.
    pub fn new(key: &str) -> CacheResult<Self> {
        let base = BaseDirs::new().ok_or(CacheError::NoCacheDirectory)?;
        let dir = STATE_DIR
            .iter()
            .fold(base.cache_dir().to_path_buf(), |dir, part| dir.join(part));
        Self::in_dir(dir, key)
    }

    /// Creates a cache for `key` stored in `dir`.
    ///
    /// The directory is created on the first save.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidKey`] for an empty key.
    pub fn in_dir(dir: impl AsRef<Path>, key: &str) -> CacheResult<Self> {
        let key = sanitize_key(key)?;
        let path = dir.as_ref().join(format!("{key}.json"));
        Ok(Self {
            key,
            path,
            state: RwLock::new(None),
        })
    }

    /// Returns the sanitised key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the cache file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Writes `models` to disk, replacing any previous state atomically.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the directory or file cannot be written.
    pub fn save(&self, models: &[ComponentModel]) -> CacheResult<()> {
        let _span = PerfSpan::new("state_cache_save");

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| CacheError::io(e, parent))?;
        }

        let bytes = ComponentModel::list_document(models).to_bytes_pretty();
        write_atomic(&self.path, &bytes)?;

        tiles_debug!(
            targets::CACHE,
            key = %self.key,
            components = models.len(),
            "saved component state"
        );
        *self.state.write() = Some(models.to_vec());
        Ok(())
    }

    /// Returns the cached components.
    ///
    /// A missing cache file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the file cannot be read and
    /// [`CacheError::Document`] if it does not hold a JSON object.
    pub fn load(&self) -> CacheResult<Vec<ComponentModel>> {
        if let Some(models) = self.state.read().as_ref() {
            tiles_debug!(targets::CACHE, key = %self.key, "state cache hit");
            return Ok(models.clone());
        }

        let models = match fs::read(&self.path) {
            Ok(bytes) => {
                let doc = Document::from_slice(&bytes).map_err(|source| CacheError::Document {
                    path: self.path.clone(),
                    source,
                })?;
                ComponentModel::list_from_document(&doc)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(CacheError::io(e, &self.path)),
        };

        tiles_debug!(
            targets::CACHE,
            key = %self.key,
            components = models.len(),
            "loaded component state"
        );
        *self.state.write() = Some(models.clone());
        Ok(models)
    }

    /// Like [`load`](Self::load), but logs failures and returns an empty list.
    pub fn load_or_default(&self) -> Vec<ComponentModel> {
        self.load().unwrap_or_else(|err| {
            tiles_warn!(targets::CACHE, key = %self.key, %err, "discarding unreadable state");
            Vec::new()
        })
    }

    /// Removes the cache file and the in-memory copy.
    ///
    /// Clearing a cache that has no file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the file exists but cannot be removed.
    pub fn clear(&self) -> CacheResult<()> {
        *self.state.write() = None;
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tiles_debug!(targets::CACHE, key = %self.key, "cleared component state");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(e, &self.path)),
        }
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `-`.
fn sanitize_key(key: &str) -> CacheResult<String> {
    if key.trim().is_empty() {
        return Err(CacheError::InvalidKey(key.to_string()));
    }
    Ok(key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect())
}

/// Writes `bytes` to a temporary sibling of `path`, syncs it, then renames
/// it over `path`. On failure the temporary file is removed and `path` is
/// left untouched.
fn write_atomic(path: &Path, bytes: &[u8]) -> CacheResult<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "state".to_string());
    let temp_path = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

    write_synced(&temp_path, bytes)
        .and_then(|()| fs::rename(&temp_path, path))
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            CacheError::io(e, path)
        })
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::kind::ComponentKind;
    use tempfile::tempdir;

    fn components() -> Vec<ComponentModel> {
        vec![
            ComponentModel::new(ComponentKind::Carousel)
                .with_identifier("hero")
                .with_items(vec![Item::new("slide")]),
            ComponentModel::new(ComponentKind::List).with_identifier("feed"),
        ]
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("home feed/v2").unwrap(), "home-feed-v2");
        assert_eq!(sanitize_key("a.b_c-d").unwrap(), "a.b_c-d");
        assert!(matches!(sanitize_key(""), Err(CacheError::InvalidKey(_))));
        assert!(matches!(sanitize_key("  "), Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_missing_cache_loads_empty() {
        let dir = tempdir().unwrap();
        let cache = StateCache::in_dir(dir.path(), "missing").unwrap();
        assert!(!cache.exists());
        assert!(cache.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let cache = StateCache::in_dir(dir.path().join("nested"), "home").unwrap();
        cache.save(&components()).unwrap();

        assert!(cache.exists());
        assert_eq!(cache.path(), dir.path().join("nested").join("home.json"));

        // A second cache on the same file has no in-memory copy.
        let fresh = StateCache::in_dir(dir.path().join("nested"), "home").unwrap();
        let loaded = fresh.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded[0].equals_deep(&components()[0]));
        assert_eq!(loaded[1].index, 1);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let cache = StateCache::in_dir(dir.path(), "home").unwrap();
        cache.save(&components()).unwrap();
        cache.save(&components()[..1]).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("home.json")]);
        assert_eq!(cache.load().unwrap().len(), 1);
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let cache = StateCache::in_dir(dir.path(), "home").unwrap();
        cache.save(&components()).unwrap();

        cache.clear().unwrap();
        assert!(!cache.exists());
        assert!(cache.load().unwrap().is_empty());
        cache.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let cache = StateCache::in_dir(dir.path(), "broken").unwrap();
        fs::write(cache.path(), b"[1, 2, 3]").unwrap();

        assert!(matches!(cache.load(), Err(CacheError::Document { .. })));
        assert!(cache.load_or_default().is_empty());
    }
}
