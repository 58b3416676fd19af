//! Post, category and content index models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of words kept when a summary is derived from the content
const SUMMARY_WORDS: usize = 30;

/// A published blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier, also the sort tie-breaker
    pub id: String,

    /// Post title
    pub title: String,

    /// URL-safe identifier used in links
    pub slug: String,

    /// Short summary shown in listings and the feed
    pub excerpt: String,

    /// Raw body (markdown or HTML)
    pub content: String,

    pub author: String,

    /// Publication date. `None` when the source text did not parse; such
    /// posts sort after every dated post.
    pub publish_date: Option<NaiveDate>,

    /// Last updated date
    pub updated_date: Option<NaiveDate>,

    /// Single category label
    pub category: String,

    /// Tags, deduplicated at load time
    pub tags: Vec<String>,

    /// Estimated reading time in minutes
    pub reading_time: u32,

    pub featured: bool,

    pub published: bool,

    pub meta: PostMeta,
}

/// Per-post SEO metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostMeta {
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

impl Post {
    /// Whether the post carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Canonical URL of the post under `site_url`
    pub fn url(&self, site_url: &str) -> String {
        format!("{}/blog/{}", site_url.trim_end_matches('/'), self.slug)
    }

    /// Publish date formatted like "January 2, 2006"
    pub fn display_date(&self) -> String {
        self.publish_date
            .map(|d| crate::helpers::full_date(&d))
            .unwrap_or_default()
    }

    /// Reading time formatted like "5 min read"
    pub fn reading_time_text(&self) -> String {
        format!("{} min read", self.reading_time)
    }

    /// The excerpt, or the first words of the content when the excerpt is empty
    pub fn summary(&self) -> String {
        if !self.excerpt.is_empty() {
            return self.excerpt.clone();
        }

        let words: Vec<&str> = self.content.split_whitespace().collect();
        if words.len() > SUMMARY_WORDS {
            format!("{}...", words[..SUMMARY_WORDS].join(" "))
        } else {
            self.content.clone()
        }
    }

    /// Render the body as HTML
    pub fn content_html(&self) -> String {
        super::markdown::render(&self.content)
    }
}

/// A category declared in the site index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Display hint for the renderer
    pub color: String,
}

/// Site-wide metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMeta {
    pub keywords: Vec<String>,
    pub author: String,
    pub site_url: String,
}

/// Everything one load produces: site metadata, categories and the
/// published posts, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentIndex {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub meta: SiteMeta,
    pub categories: Vec<Category>,
    pub posts: Vec<Post>,
}

impl ContentIndex {
    /// Look up a declared category by its slug
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }
}
