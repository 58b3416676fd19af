//! Content loader - builds a content index from the content directory

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use super::document::{IndexDocument, PostDocument};
use super::{ContentIndex, Post};
use crate::cancel::CancellationToken;
use crate::error::{ContentError, IndexSourceError, Result};

/// Default site index file name
pub const INDEX_FILE: &str = "blogs.yaml";

/// Default glob for post documents, relative to the content root
pub const POSTS_GLOB: &str = "posts/*.yaml";

/// Loads the site index and every post document under a content root
#[derive(Debug, Clone)]
pub struct ContentLoader {
    root: PathBuf,
    index_file: String,
    posts_glob: String,
}

impl ContentLoader {
    /// Create a loader using the default file layout
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            index_file: INDEX_FILE.to_string(),
            posts_glob: POSTS_GLOB.to_string(),
        }
    }

    /// Override the site index file name
    pub fn with_index_file(mut self, index_file: impl Into<String>) -> Self {
        self.index_file = index_file.into();
        self
    }

    /// Override the posts glob
    pub fn with_posts_glob(mut self, posts_glob: impl Into<String>) -> Self {
        self.posts_glob = posts_glob.into();
        self
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index_file)
    }

    /// Every file the posts glob currently matches, in sorted order
    pub fn post_paths(&self) -> Result<Vec<PathBuf>> {
        // The root is a literal path; only the configured glob may expand
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let pattern = Path::new(&root).join(&self.posts_glob);
        let mut paths: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("Failed to access {:?}: {}", e.path(), e.error());
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// Build a fresh content index.
    ///
    /// A missing or malformed site index aborts the load. Individual post
    /// documents that fail to read or parse are logged and skipped, and
    /// unpublished posts are dropped. `cancel` is checked before every file
    /// read.
    pub fn load(&self, cancel: &CancellationToken) -> Result<ContentIndex> {
        let mut index = self.load_index(cancel)?;

        let mut posts = Vec::new();
        let mut skipped = 0usize;

        for path in self.post_paths()? {
            if cancel.is_cancelled() {
                return Err(ContentError::Cancelled);
            }

            match load_post(&path) {
                Some(post) if post.published => posts.push(post),
                Some(post) => {
                    tracing::debug!("Skipping unpublished post {:?} ({})", path, post.id);
                }
                None => skipped += 1,
            }
        }

        sort_posts(&mut posts);

        tracing::info!(
            "Loaded {} published posts from {:?} ({} unparsable)",
            posts.len(),
            self.root,
            skipped
        );

        index.posts = posts;
        Ok(index)
    }

    fn load_index(&self, cancel: &CancellationToken) -> Result<ContentIndex> {
        if cancel.is_cancelled() {
            return Err(ContentError::Cancelled);
        }

        let path = self.index_path();
        let unavailable = |source: IndexSourceError| ContentError::IndexUnavailable {
            path: path.clone(),
            source,
        };

        let content = fs::read_to_string(&path).map_err(|e| unavailable(e.into()))?;
        let doc = IndexDocument::parse(&content).map_err(|e| unavailable(e.into()))?;
        Ok(doc.into_index())
    }
}

/// Load the content index under `root` with the default layout
pub fn load<P: AsRef<Path>>(root: P) -> Result<ContentIndex> {
    ContentLoader::new(root).load(&CancellationToken::new())
}

/// Read and parse one post document, logging why it was rejected
fn load_post(path: &Path) -> Option<Post> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Failed to read post: {}", e);
            return None;
        }
    };

    match PostDocument::parse(&content) {
        Ok(doc) => Some(doc.into_post(path)),
        Err(e) => {
            tracing::warn!(path = %path.display(), "Failed to parse post: {}", e);
            None
        }
    }
}

/// Newest first; posts with equal dates are ordered by id ascending, and
/// posts without a usable date come last.
pub fn compare_posts(a: &Post, b: &Post) -> Ordering {
    b.publish_date
        .cmp(&a.publish_date)
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort posts into index order
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(compare_posts);
}
