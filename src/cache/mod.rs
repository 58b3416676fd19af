//! Caching repository
//!
//! Wraps a [`ContentLoader`] and keeps the last index it produced. Before
//! handing the cached copy out it fingerprints the content directory (the set
//! of matching files with their sizes and modification times); any difference
//! triggers a full reload. Without this decorator every load re-reads disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use crate::cancel::CancellationToken;
use crate::content::{ContentIndex, ContentLoader, ContentRepository};
use crate::error::Result;

/// Observable state of one content file
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileStamp {
    path: PathBuf,
    len: u64,
    mtime: Option<SystemTime>,
}

impl FileStamp {
    fn of(path: &Path) -> Self {
        let metadata = fs::metadata(path).ok();
        Self {
            path: path.to_path_buf(),
            len: metadata.as_ref().map(|m| m.len()).unwrap_or_default(),
            mtime: metadata.and_then(|m| m.modified().ok()),
        }
    }
}

/// Fingerprint of everything a load reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    files: Vec<FileStamp>,
}

impl Fingerprint {
    /// Stamp the site index and every post file the loader would read
    pub fn capture(loader: &ContentLoader) -> Result<Self> {
        let mut files = vec![FileStamp::of(&loader.index_path())];
        files.extend(loader.post_paths()?.iter().map(|p| FileStamp::of(p)));
        Ok(Self { files })
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

struct CacheEntry {
    fingerprint: Fingerprint,
    index: ContentIndex,
}

/// Repository that reuses the last index until the content files change
pub struct CachedRepository {
    loader: ContentLoader,
    entry: Mutex<Option<CacheEntry>>,
}

impl CachedRepository {
    pub fn new(loader: ContentLoader) -> Self {
        Self {
            loader,
            entry: Mutex::new(None),
        }
    }

    /// Drop the cached index so the next load reads from disk
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// Whether an index is currently cached
    pub fn is_warm(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CacheEntry>> {
        // A panic while holding the lock leaves at worst a stale entry
        self.entry.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ContentRepository for CachedRepository {
    fn load(&self, cancel: &CancellationToken) -> Result<ContentIndex> {
        let mut entry = self.lock();
        let fingerprint = Fingerprint::capture(&self.loader)?;

        if let Some(cached) = entry.as_ref() {
            if cached.fingerprint == fingerprint {
                tracing::debug!(
                    "Content unchanged ({} files), serving cached index",
                    fingerprint.file_count()
                );
                return Ok(cached.index.clone());
            }
            tracing::info!("Content changed, reloading index");
        }

        let index = self.loader.load(cancel)?;
        *entry = Some(CacheEntry {
            fingerprint,
            index: index.clone(),
        });
        Ok(index)
    }

    fn reload(&self, cancel: &CancellationToken) -> Result<ContentIndex> {
        self.invalidate();
        self.load(cancel)
    }
}
