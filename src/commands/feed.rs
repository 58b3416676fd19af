//! Render the RSS feed

use anyhow::Result;
use std::io::Write;
use std::path::Path;

use crate::content::ContentIndex;
use crate::generator::{render_feed, write_feed};

/// Render the feed to `output`, or to `out` when no path is given
pub fn run<W: Write>(
    index: &ContentIndex,
    limit: usize,
    output: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    let feed = render_feed(index, limit);
    match output {
        Some(path) => write_feed(path, &feed)?,
        None => out.write_all(&feed)?,
    }
    Ok(())
}
