//! Print the tag and category indexes

use anyhow::Result;
use std::io::Write;

use crate::content::ContentIndex;
use crate::helpers::{all_tags, category_counts, tag_counts};

/// Print every tag, alphabetically, or with post counts when `counts` is set
pub fn run<W: Write>(index: &ContentIndex, counts: bool, out: &mut W) -> Result<()> {
    if counts {
        let tags = tag_counts(&index.posts);
        writeln!(out, "Tags ({}):", tags.len())?;
        for (tag, count) in tags {
            writeln!(out, "  {} ({})", tag, count)?;
        }
    } else {
        let tags = all_tags(&index.posts);
        writeln!(out, "Tags ({}):", tags.len())?;
        for tag in tags {
            writeln!(out, "  {}", tag)?;
        }
    }
    Ok(())
}

/// Print the declared categories with their post counts
pub fn run_categories<W: Write>(index: &ContentIndex, out: &mut W) -> Result<()> {
    let counts = category_counts(&index.posts);
    let count_of = |slug: &str| {
        counts
            .iter()
            .find(|(name, _)| name == slug)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    };

    writeln!(out, "Categories ({}):", index.categories.len())?;
    for category in &index.categories {
        writeln!(
            out,
            "  {} [{}] ({})",
            category.name,
            category.slug,
            count_of(&category.slug)
        )?;
    }

    // Posts may name categories the site index never declared
    let undeclared: Vec<_> = counts
        .iter()
        .filter(|(name, _)| index.category_by_slug(name).is_none())
        .collect();
    if !undeclared.is_empty() {
        writeln!(out, "Undeclared:")?;
        for (name, count) in undeclared {
            writeln!(out, "  {} ({})", name, count)?;
        }
    }
    Ok(())
}
