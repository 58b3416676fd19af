//! List a page of posts

use anyhow::Result;
use std::io::Write;

use crate::content::{ContentIndex, Post};
use crate::helpers::all_tags;
use crate::query::{featured, recent, PostQuery};
use crate::Folio;

/// Print one page of posts matching `query`, followed by the featured and
/// recent sidebars and every tag in the index
pub fn run<W: Write>(
    folio: &Folio,
    index: &ContentIndex,
    query: &PostQuery,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let page = query.run(&index.posts, folio.config.per_page);

    if json {
        serde_json::to_writer_pretty(&mut *out, &page)?;
        writeln!(out)?;
        return Ok(());
    }

    let mut heading = format!("Posts ({})", page.total_items);
    if let Some(tag) = query.tag.as_deref().filter(|t| !t.is_empty()) {
        heading.push_str(&format!(" tagged {:?}", tag));
    }
    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        match index.category_by_slug(category) {
            Some(c) => heading.push_str(&format!(" in {}", c.name)),
            None => heading.push_str(&format!(" in {:?}", category)),
        }
    }
    writeln!(out, "{}:", heading)?;

    for post in &page.items {
        let date = post
            .publish_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let marker = if post.featured { " *" } else { "" };
        writeln!(
            out,
            "  {} - {} [{}] ({}){}",
            date,
            post.title,
            post.slug,
            post.reading_time_text(),
            marker
        )?;
    }

    if page.total_pages > 0 {
        writeln!(out, "Page {} of {}", page.current, page.total_pages)?;
    }

    write_section(out, "Featured", &featured(&index.posts))?;
    write_section(
        out,
        "Recent",
        &recent(&index.posts, folio.config.recent_limit),
    )?;

    let tags = all_tags(&index.posts);
    if !tags.is_empty() {
        writeln!(out)?;
        writeln!(out, "Tags: {}", tags.join(", "))?;
    }

    Ok(())
}

fn write_section<W: Write>(out: &mut W, title: &str, posts: &[Post]) -> Result<()> {
    if posts.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "{}:", title)?;
    for post in posts {
        writeln!(out, "  {} [{}]", post.title, post.slug)?;
    }
    Ok(())
}
