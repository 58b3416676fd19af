//! Derived views over an index's post list

use crate::content::Post;
use crate::error::{ContentError, Result};

/// Featured posts, newest first
pub fn featured(posts: &[Post]) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.published && p.featured)
        .cloned()
        .collect()
}

/// The first `limit` posts
pub fn recent(posts: &[Post], limit: usize) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.published)
        .take(limit)
        .cloned()
        .collect()
}

/// Up to `limit` other posts in the same category as `current`
pub fn related(posts: &[Post], current: &Post, limit: usize) -> Vec<Post> {
    posts
        .iter()
        .filter(|p| p.published && p.id != current.id && p.category == current.category)
        .take(limit)
        .cloned()
        .collect()
}

/// The published post with `slug`
pub fn find_by_slug<'a>(posts: &'a [Post], slug: &str) -> Result<&'a Post> {
    posts
        .iter()
        .find(|p| p.published && p.slug == slug)
        .ok_or_else(|| ContentError::NotFound {
            slug: slug.to_string(),
        })
}

/// The newer and older neighbours of `current`
pub fn adjacent<'a>(posts: &'a [Post], current: &Post) -> (Option<&'a Post>, Option<&'a Post>) {
    let Some(pos) = posts.iter().position(|p| p.id == current.id) else {
        return (None, None);
    };
    let newer = pos.checked_sub(1).and_then(|i| posts.get(i));
    (newer, posts.get(pos + 1))
}
