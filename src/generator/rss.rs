//! RSS 2.0 feed of the most recent posts

use chrono::{DateTime, Utc};
use std::fmt::Write;

use super::{cdata, escape_xml};
use crate::content::ContentIndex;
use crate::helpers::{rfc2822, start_of_day_utc};
use crate::query::recent;

/// Number of posts included in the feed by default
pub const FEED_LIMIT: usize = 20;

/// Content type the feed should be served with
pub const FEED_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Render the `limit` most recent posts of `index`, stamped with the current
/// time as the build date
pub fn render_feed(index: &ContentIndex, limit: usize) -> Vec<u8> {
    render_feed_at(index, limit, Utc::now())
}

/// Render the feed with an explicit build timestamp
pub fn render_feed_at(index: &ContentIndex, limit: usize, built_at: DateTime<Utc>) -> Vec<u8> {
    let site_url = index.meta.site_url.trim_end_matches('/');
    let posts = recent(&index.posts, limit);

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<rss version="2.0">"#);
    feed.push('\n');
    feed.push_str("<channel>\n");

    // `write!` into a String cannot fail
    let _ = writeln!(feed, "  <title>{}</title>", escape_xml(&index.title));
    let _ = writeln!(
        feed,
        "  <description>{}</description>",
        escape_xml(&index.description)
    );
    let _ = writeln!(feed, "  <link>{}</link>", escape_xml(&index.meta.site_url));
    feed.push_str("  <language>en-us</language>\n");
    let _ = writeln!(
        feed,
        "  <lastBuildDate>{}</lastBuildDate>",
        rfc2822(&built_at)
    );

    for post in &posts {
        let link = escape_xml(&post.url(site_url));

        feed.push_str("  <item>\n");
        let _ = writeln!(feed, "    <title>{}</title>", escape_xml(&post.title));
        let _ = writeln!(feed, "    <description>{}</description>", cdata(&post.excerpt));
        let _ = writeln!(feed, "    <link>{}</link>", link);
        let _ = writeln!(feed, r#"    <guid isPermaLink="true">{}</guid>"#, link);
        if let Some(date) = post.publish_date {
            let _ = writeln!(
                feed,
                "    <pubDate>{}</pubDate>",
                rfc2822(&start_of_day_utc(&date))
            );
        }
        let _ = writeln!(feed, "    <author>{}</author>", escape_xml(&post.author));
        feed.push_str("  </item>\n");
    }

    feed.push_str("</channel>\n");
    feed.push_str("</rss>\n");

    tracing::debug!("Rendered feed with {} items", posts.len());
    feed.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{test_post as post, Post, SiteMeta};
    use chrono::TimeZone;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    fn index(posts: Vec<Post>) -> ContentIndex {
        ContentIndex {
            title: "Writings".to_string(),
            subtitle: String::new(),
            description: "Things I wrote".to_string(),
            meta: SiteMeta {
                keywords: Vec::new(),
                author: "Jane".to_string(),
                site_url: "https://example.com".to_string(),
            },
            categories: Vec::new(),
            posts,
        }
    }

    fn built_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap()
    }

    fn render(index: &ContentIndex, limit: usize) -> String {
        String::from_utf8(render_feed_at(index, limit, built_at())).unwrap()
    }

    /// Parse the whole document, returning the names of the start tags seen
    fn parse(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        let mut tags = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    tags.push(String::from_utf8_lossy(e.name().as_ref()).into_owned())
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("feed is not well-formed: {e}\n{xml}"),
            }
        }
        tags
    }

    #[test]
    fn test_channel_fields() {
        let xml = render(&index(vec![]), FEED_LIMIT);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<title>Writings</title>"));
        assert!(xml.contains("<description>Things I wrote</description>"));
        assert!(xml.contains("<link>https://example.com</link>"));
        assert!(xml.contains("<lastBuildDate>Sat, 01 Jun 2024 12:30:00 +0000</lastBuildDate>"));
        let tags = parse(&xml);
        assert!(!tags.contains(&"item".to_string()));
    }

    #[test]
    fn test_item_fields() {
        let mut p = post("1", "2024-03-01", "go", &[]);
        p.slug = "hello-world".to_string();
        p.title = "Hello".to_string();
        p.excerpt = "<p>An <em>excerpt</em></p>".to_string();
        let xml = render(&index(vec![p]), FEED_LIMIT);

        assert!(xml.contains("<title>Hello</title>"));
        assert!(xml.contains("<description><![CDATA[<p>An <em>excerpt</em></p>]]></description>"));
        assert!(xml.contains("<link>https://example.com/blog/hello-world</link>"));
        assert!(xml.contains(
            r#"<guid isPermaLink="true">https://example.com/blog/hello-world</guid>"#
        ));
        assert!(xml.contains("<pubDate>Fri, 01 Mar 2024 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("<author>Tester</author>"));
        parse(&xml);
    }

    #[test]
    fn test_markup_in_fields_stays_well_formed() {
        let mut p = post("1", "2024-03-01", "go", &[]);
        p.title = "Generics <T> & \"friends\"".to_string();
        p.author = "Tom <tom@example.com>".to_string();
        p.slug = "a&b".to_string();
        p.excerpt = "Ends early ]]> <oops>".to_string();
        let mut idx = index(vec![p]);
        idx.title = "Q&A <blog>".to_string();

        let xml = render(&idx, FEED_LIMIT);
        assert!(xml.contains("<title>Generics &lt;T&gt; &amp; &quot;friends&quot;</title>"));
        assert!(xml.contains("<author>Tom &lt;tom@example.com&gt;</author>"));
        assert!(xml.contains("<link>https://example.com/blog/a&amp;b</link>"));

        let tags = parse(&xml);
        assert_eq!(tags.iter().filter(|t| *t == "item").count(), 1);
        assert!(!tags.contains(&"T".to_string()));
        assert!(!tags.contains(&"oops".to_string()));
    }

    #[test]
    fn test_limit_and_order() {
        let posts: Vec<Post> = (1..=25)
            .rev()
            .map(|i| post(&format!("{:02}", i), &format!("2024-01-{:02}", i), "go", &[]))
            .collect();
        let xml = render(&index(posts), FEED_LIMIT);
        let tags = parse(&xml);
        assert_eq!(tags.iter().filter(|t| *t == "item").count(), FEED_LIMIT);

        let newest = xml.find("post-25").unwrap();
        let older = xml.find("post-24").unwrap();
        assert!(newest < older);
        assert!(!xml.contains("post-05<"));
    }

    #[test]
    fn test_unknown_date_omits_pub_date() {
        let mut p = post("1", "2024-03-01", "go", &[]);
        p.publish_date = None;
        let xml = render(&index(vec![p]), FEED_LIMIT);
        assert!(!xml.contains("<pubDate>"));
        parse(&xml);
    }

    #[test]
    fn test_trailing_slash_site_url() {
        let mut idx = index(vec![post("1", "2024-03-01", "go", &[])]);
        idx.meta.site_url = "https://example.com/".to_string();
        let xml = render(&idx, FEED_LIMIT);
        assert!(xml.contains("<link>https://example.com/blog/post-1</link>"));
    }

    #[test]
    fn test_render_feed_uses_current_time() {
        let xml = String::from_utf8(render_feed(&index(vec![]), FEED_LIMIT)).unwrap();
        assert!(xml.contains("<lastBuildDate>"));
        assert!(xml.contains("+0000</lastBuildDate>"));
    }
}
