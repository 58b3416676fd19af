//! Content repositories - the seam between consumers and the loader

use super::loader::ContentLoader;
use super::ContentIndex;
use crate::cancel::CancellationToken;
use crate::error::Result;

/// Source of content indexes.
///
/// Consumers hold a repository instead of reaching for global state.
/// Every call hands back an owned index the caller may modify freely.
pub trait ContentRepository: Send + Sync {
    /// Materialize the current content index
    fn load(&self, cancel: &CancellationToken) -> Result<ContentIndex>;

    /// Materialize the index, discarding anything a repository may have kept
    /// from earlier loads
    fn reload(&self, cancel: &CancellationToken) -> Result<ContentIndex> {
        self.load(cancel)
    }
}

/// Reads the content directory from scratch on every call
#[derive(Debug, Clone)]
pub struct FsRepository {
    loader: ContentLoader,
}

impl FsRepository {
    pub fn new(loader: ContentLoader) -> Self {
        Self { loader }
    }
}

impl ContentRepository for FsRepository {
    fn load(&self, cancel: &CancellationToken) -> Result<ContentIndex> {
        self.loader.load(cancel)
    }
}

impl<R: ContentRepository + ?Sized> ContentRepository for Box<R> {
    fn load(&self, cancel: &CancellationToken) -> Result<ContentIndex> {
        (**self).load(cancel)
    }

    fn reload(&self, cancel: &CancellationToken) -> Result<ContentIndex> {
        (**self).reload(cancel)
    }
}

impl<R: ContentRepository + ?Sized> ContentRepository for std::sync::Arc<R> {
    fn load(&self, cancel: &CancellationToken) -> Result<ContentIndex> {
        (**self).load(cancel)
    }

    fn reload(&self, cancel: &CancellationToken) -> Result<ContentIndex> {
        (**self).reload(cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fs_repository_sees_new_posts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blogs.yaml"), "title: Site\n").unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();

        let repo = FsRepository::new(ContentLoader::new(dir.path()));
        let token = CancellationToken::new();
        assert!(repo.load(&token).unwrap().posts.is_empty());

        fs::write(
            dir.path().join("posts/a.yaml"),
            "id: a\npublish_date: 2024-01-01\npublished: true\n",
        )
        .unwrap();
        assert_eq!(repo.load(&token).unwrap().posts.len(), 1);
        assert_eq!(repo.reload(&token).unwrap().posts.len(), 1);
    }

    #[test]
    fn test_boxed_repository() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blogs.yaml"), "title: Boxed\n").unwrap();
        let repo: Box<dyn ContentRepository> =
            Box::new(FsRepository::new(ContentLoader::new(dir.path())));
        let index = repo.load(&CancellationToken::new()).unwrap();
        assert_eq!(index.title, "Boxed");
    }

    #[test]
    fn test_concurrent_loads_agree() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blogs.yaml"), "title: Shared\n").unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        for i in 0..20 {
            fs::write(
                dir.path().join(format!("posts/{:02}.yaml", i)),
                format!(
                    "id: \"{:02}\"\npublish_date: 2024-01-{:02}\npublished: true\ntags: [t{}]\n",
                    i,
                    i % 5 + 1,
                    i % 3
                ),
            )
            .unwrap();
        }

        let repo = Arc::new(FsRepository::new(ContentLoader::new(dir.path())));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                thread::spawn(move || repo.load(&CancellationToken::new()).unwrap())
            })
            .collect();

        let indexes: Vec<ContentIndex> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(indexes[0].posts.len(), 20);
        assert!(indexes.iter().all(|index| *index == indexes[0]));
    }
}
