//! Markdown rendering for post bodies

use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};

/// Schemes a link or image may point at; relative targets are always allowed
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "ftp"];

/// State of the link currently being rendered
#[derive(Clone, Copy, PartialEq)]
enum OpenLink {
    None,
    External,
    Dropped,
}

/// Render a post body to HTML.
///
/// Bodies may already be HTML; raw HTML passes through untouched. External
/// links open in a new tab, links with an unsafe scheme such as
/// `javascript:` keep their text but lose the anchor, and images load lazily.
pub fn render(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES;
    let parser = Parser::new_ext(markdown, options);

    let mut events: Vec<Event> = Vec::new();
    let mut link = OpenLink::None;
    // (src, title, alt) of the image being collected
    let mut image: Option<(CowStr, CowStr, String)> = None;

    for event in parser {
        if let Some((_, _, alt)) = image.as_mut() {
            match event {
                Event::End(TagEnd::Image) => {
                    if let Some((src, title, alt)) = image.take() {
                        events.push(image_event(&src, &title, &alt));
                    }
                }
                Event::Text(text) | Event::Code(text) => alt.push_str(&text),
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::Link { dest_url, .. }) if !is_safe(&dest_url) => {
                tracing::debug!("Dropping link with unsafe target {:?}", dest_url);
                link = OpenLink::Dropped;
            }
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            }) if is_external(&dest_url) && link_type != LinkType::Email => {
                let title_attr = if title.is_empty() {
                    String::new()
                } else {
                    format!(r#" title="{}""#, html_escape(&title))
                };
                events.push(Event::Html(CowStr::from(format!(
                    r#"<a href="{}"{} target="_blank" rel="noopener noreferrer">"#,
                    html_escape(&dest_url),
                    title_attr
                ))));
                link = OpenLink::External;
            }
            Event::End(TagEnd::Link) if link != OpenLink::None => {
                if link == OpenLink::External {
                    events.push(Event::Html(CowStr::from("</a>")));
                }
                link = OpenLink::None;
            }
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                image = Some((dest_url, title, String::new()));
            }
            _ => events.push(event),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

fn image_event(src: &str, title: &str, alt: &str) -> Event<'static> {
    if !is_safe(src) {
        return Event::Text(CowStr::from(alt.to_string()));
    }
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, html_escape(title))
    };
    Event::Html(CowStr::from(format!(
        r#"<img src="{}" alt="{}"{} loading="lazy" />"#,
        html_escape(src),
        html_escape(alt),
        title_attr
    )))
}

fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// A target is safe when it is relative or uses one of [`SAFE_SCHEMES`]
fn is_safe(url: &str) -> bool {
    let url = url.trim();
    let scheme_end = url.find(|c| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(i) if url[i..].starts_with(':') => {
            let scheme = url[..i].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let html = render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let html = render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<code class="language-rust">"#));
    }

    #[test]
    fn test_external_links_open_in_new_tab() {
        let html = render("[site](https://example.com) and [local](/about)");
        assert!(html.contains(r#"<a href="https://example.com" target="_blank""#));
        assert!(html.contains(r#"<a href="/about">local</a>"#));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = render("<div class=\"note\">hi</div>\n");
        assert!(html.contains("<div class=\"note\">hi</div>"));
    }

    #[test]
    fn test_unsafe_links_lose_their_anchor() {
        let html = render("[click](javascript:alert(1)) and [mail](mailto:me@example.com)");
        assert!(!html.contains("javascript"));
        assert!(html.contains("click and "));
        assert!(html.contains(r#"<a href="mailto:me@example.com">mail</a>"#));
    }

    #[test]
    fn test_images_load_lazily() {
        let html = render(r#"![a *cat*](/img/cat.png "Cat")"#);
        assert!(html.contains(
            r#"<img src="/img/cat.png" alt="a cat" title="Cat" loading="lazy" />"#
        ));
    }

    #[test]
    fn test_unsafe_image_keeps_alt_text() {
        let html = render("![pic](data:text/html,boom)");
        assert!(!html.contains("<img"));
        assert!(html.contains("pic"));
    }

    #[test]
    fn test_is_safe() {
        assert!(is_safe("/about"));
        assert!(is_safe("#top"));
        assert!(is_safe("post?a=b:c"));
        assert!(is_safe("HTTPS://example.com"));
        assert!(!is_safe("javascript:alert(1)"));
        assert!(!is_safe(" vbscript:x"));
    }
}
