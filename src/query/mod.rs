//! Query engine - filtering, pagination and derived post views

mod pagination;
mod selectors;

use serde::{Deserialize, Serialize};

use crate::content::Post;

pub use pagination::{paginate, Page};
pub use selectors::{adjacent, featured, find_by_slug, recent, related};

/// Posts per listing page
pub const PER_PAGE: usize = 10;

/// Keep the posts matching `tag` and `category`, in their original order.
///
/// `None` or an empty string leaves that dimension unconstrained.
pub fn filter_posts(posts: &[Post], tag: Option<&str>, category: Option<&str>) -> Vec<Post> {
    let tag = tag.filter(|t| !t.is_empty());
    let category = category.filter(|c| !c.is_empty());

    posts
        .iter()
        .filter(|post| post.published)
        .filter(|post| category.map_or(true, |c| post.category == c))
        .filter(|post| tag.map_or(true, |t| post.has_tag(t)))
        .cloned()
        .collect()
}

/// Resolve a raw `page` parameter. Missing, non-numeric and non-positive
/// values all mean the first page.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(1)
}

/// The listing query surface: optional tag and category filters plus a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostQuery {
    pub tag: Option<String>,
    pub category: Option<String>,
    pub page: Option<String>,
}

impl PostQuery {
    /// Filter `posts` and return the requested page of the result
    pub fn run(&self, posts: &[Post], per_page: usize) -> Page {
        let filtered = filter_posts(posts, self.tag.as_deref(), self.category.as_deref());
        paginate(&filtered, parse_page(self.page.as_deref()), per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_post as post;

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    fn sample() -> Vec<Post> {
        vec![
            post("A", "2024-03-01", "go", &["x", "y"]),
            post("B", "2024-02-01", "web", &["y"]),
            post("C", "2024-01-01", "go", &["z"]),
        ]
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let posts = sample();
        assert_eq!(filter_posts(&posts, None, None), posts);
        assert_eq!(filter_posts(&posts, Some(""), Some("")), posts);
    }

    #[test]
    fn test_filter_by_category_keeps_order() {
        let posts = sample();
        assert_eq!(ids(&filter_posts(&posts, None, Some("go"))), vec!["A", "C"]);
    }

    #[test]
    fn test_filter_by_tag() {
        let posts = sample();
        let filtered = filter_posts(&posts, Some("y"), None);
        assert_eq!(ids(&filtered), vec!["A", "B"]);
        assert!(filtered.iter().all(|p| p.has_tag("y")));
        assert!(filter_posts(&posts, Some("nope"), None).is_empty());
    }

    #[test]
    fn test_filter_by_tag_and_category() {
        let posts = sample();
        assert_eq!(ids(&filter_posts(&posts, Some("y"), Some("go"))), vec!["A"]);
        assert!(filter_posts(&posts, Some("z"), Some("web")).is_empty());
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-4")), 1);
        assert_eq!(parse_page(Some("3")), 3);
        assert_eq!(parse_page(Some(" 2 ")), 2);
    }

    #[test]
    fn test_query_run() {
        let posts: Vec<Post> = (0..25)
            .map(|i| post(&format!("{:02}", i), "2024-01-01", "go", &["x"]))
            .collect();

        let query = PostQuery {
            tag: Some("x".to_string()),
            category: None,
            page: Some("4".to_string()),
        };
        let page = query.run(&posts, PER_PAGE);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current, 3);
        assert_eq!(page.items.len(), 5);

        let query = PostQuery {
            page: Some("first".to_string()),
            ..Default::default()
        };
        let page = query.run(&posts, PER_PAGE);
        assert_eq!(page.current, 1);
        assert_eq!(page.items[0].id, "00");
    }

    #[test]
    fn test_query_huge_page_with_no_matches() {
        let query = PostQuery {
            tag: Some("absent".to_string()),
            category: None,
            page: Some(i64::MAX.to_string()),
        };
        let page = query.run(&sample(), PER_PAGE);
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
    }
}
