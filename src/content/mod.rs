//! Content module - site index, posts, and loading them from disk

mod document;
pub mod loader;
mod markdown;
mod post;
pub mod repository;

pub use document::{parse_date, IndexDocument, PostDocument, DATE_FORMAT};
pub use loader::{compare_posts, load, sort_posts, ContentLoader};
pub use post::{Category, ContentIndex, Post, PostMeta, SiteMeta};
pub use repository::{ContentRepository, FsRepository};

#[cfg(test)]
pub(crate) use post::tests::post as test_post;
