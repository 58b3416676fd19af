//! folio-rs: the content pipeline of a small flat-file blog
//!
//! Posts, categories and site metadata live as YAML documents on disk. This
//! crate loads them into a [`ContentIndex`], answers listing queries (tag and
//! category filters, pagination), derives featured/recent/related views, and
//! renders an RSS feed.

pub mod cache;
pub mod cancel;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod query;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use cancel::CancellationToken;
pub use content::{ContentIndex, ContentRepository, Post};
pub use error::ContentError;

/// The application: configuration plus the content repository built from it
#[derive(Clone)]
pub struct Folio {
    /// Configuration
    pub config: config::FolioConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root (holds the site index and `posts/`)
    pub content_dir: PathBuf,
    repository: Arc<dyn ContentRepository>,
}

impl Folio {
    /// Create a new instance from a base directory, reading `folio.yml` when
    /// it exists
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let config = config::FolioConfig::discover(base_dir.as_ref())?;
        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::FolioConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = config.content_root(&base_dir);

        let loader = content::ContentLoader::new(&content_dir)
            .with_index_file(config.index_file.clone())
            .with_posts_glob(config.posts_glob.clone());

        let repository: Arc<dyn ContentRepository> = if config.cache {
            Arc::new(cache::CachedRepository::new(loader))
        } else {
            Arc::new(content::FsRepository::new(loader))
        };

        Self {
            config,
            base_dir,
            content_dir,
            repository,
        }
    }

    /// The repository handlers should load content from
    pub fn repository(&self) -> Arc<dyn ContentRepository> {
        Arc::clone(&self.repository)
    }

    /// Load the current content index
    pub fn load(&self, cancel: &CancellationToken) -> error::Result<ContentIndex> {
        self.repository.load(cancel)
    }

    /// Load the content index, bypassing any cached copy
    pub fn reload(&self, cancel: &CancellationToken) -> error::Result<ContentIndex> {
        self.repository.reload(cancel)
    }
}
