//! Show one post with its related posts

use anyhow::Result;
use std::io::Write;

use crate::content::ContentIndex;
use crate::query::{adjacent, find_by_slug, related};
use crate::Folio;

/// Print the post with `slug`. A missing slug surfaces as
/// [`crate::ContentError::NotFound`] so the caller can tell it apart.
pub fn run<W: Write>(
    folio: &Folio,
    index: &ContentIndex,
    slug: &str,
    html: bool,
    out: &mut W,
) -> Result<()> {
    let post = find_by_slug(&index.posts, slug)?;

    writeln!(out, "{}", post.title)?;
    writeln!(
        out,
        "{} · {} · {}",
        post.author,
        post.display_date(),
        post.reading_time_text()
    )?;
    if let Some(updated) = post.updated_date {
        writeln!(out, "Updated {}", crate::helpers::full_date(&updated))?;
    }
    let category = index
        .category_by_slug(&post.category)
        .map(|c| c.name.as_str())
        .unwrap_or(&post.category);
    writeln!(out, "Category: {}", category)?;
    if !post.tags.is_empty() {
        writeln!(out, "Tags: {}", post.tags.join(", "))?;
    }
    writeln!(out, "{}", post.url(&index.meta.site_url))?;
    writeln!(out)?;

    if html {
        write!(out, "{}", post.content_html())?;
    } else {
        writeln!(out, "{}", post.content)?;
    }

    let related = related(&index.posts, post, folio.config.related_limit);
    if !related.is_empty() {
        writeln!(out)?;
        writeln!(out, "Related:")?;
        for p in &related {
            writeln!(out, "  {} [{}]", p.title, p.slug)?;
        }
    }

    let (newer, older) = adjacent(&index.posts, post);
    if let Some(p) = newer {
        writeln!(out, "Newer: {} [{}]", p.title, p.slug)?;
    }
    if let Some(p) = older {
        writeln!(out, "Older: {} [{}]", p.title, p.slug)?;
    }

    Ok(())
}
