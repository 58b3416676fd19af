//! Output generation - the syndication feed and XML text helpers

pub mod rss;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub use self::rss::{render_feed, render_feed_at, FEED_CONTENT_TYPE, FEED_LIMIT};

/// Write a rendered feed to `path`, creating parent directories
pub fn write_feed(path: &Path, feed: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {:?}", parent))?;
        }
    }
    fs::write(path, feed).with_context(|| format!("failed to write {:?}", path))?;
    tracing::info!("Wrote feed to {:?} ({} bytes)", path, feed.len());
    Ok(())
}

/// Escape text for use in XML character data or attribute values
pub(crate) fn escape_xml(s: &str) -> String {
    strip_invalid_xml_chars(s)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Wrap text in a CDATA section. A `]]>` inside the text is split across two
/// sections so it cannot terminate the wrapper early.
pub(crate) fn cdata(s: &str) -> String {
    let clean = strip_invalid_xml_chars(s);
    format!("<![CDATA[{}]]>", clean.replace("]]>", "]]]]><![CDATA[>"))
}

/// Drop characters that XML 1.0 does not allow anywhere in a document
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}
