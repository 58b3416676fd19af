//! Page-window slicing

use serde::Serialize;

use crate::content::Post;

/// One page of a post listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T = Post> {
    /// Items on this page
    pub items: Vec<T>,
    /// 1-based page number actually served
    pub current: usize,
    /// Number of pages; zero for an empty listing
    pub total_pages: usize,
    pub per_page: usize,
    /// Length of the whole listing
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// Previous page number, if any
    pub fn prev(&self) -> Option<usize> {
        self.has_prev().then(|| self.current - 1)
    }

    /// Next page number, if any
    pub fn next(&self) -> Option<usize> {
        self.has_next().then(|| self.current + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice `items` into the 1-based page `page` of `per_page` items.
///
/// Page 0 is served as page 1, and a page past the end is clamped to the
/// last page. An empty listing has zero pages and an empty window whatever
/// page was asked for. A zero `per_page` falls back to [`super::PER_PAGE`].
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = if per_page == 0 { super::PER_PAGE } else { per_page };
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let mut current = page.max(1);
    if total_pages > 0 && current > total_pages {
        current = total_pages;
    }

    // An unclamped page on an empty listing may be arbitrarily large
    let window = match (current - 1).checked_mul(per_page) {
        Some(start) if start < total_items => {
            let end = start.saturating_add(per_page).min(total_items);
            items[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    Page {
        items: window,
        current,
        total_pages,
        per_page,
        total_items,
    }
}
