//! Markdown rendering and word truncation for post bodies.

use pulldown_cmark::{Event, Options, Parser, Tag, html};

const ELLIPSIS: &str = "…";

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render a Markdown body to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut html_output = String::new();
    html::push_html(&mut html_output, Parser::new_ext(markdown, options()));
    html_output
}

/// Render Markdown keeping at most `limit` words of text.
///
/// Elements still open at the cut are closed, so the result is always
/// well-formed HTML.
pub fn markdown_excerpt(markdown: &str, limit: usize) -> String {
    let mut events: Vec<Event> = Vec::new();
    let mut open: Vec<Tag> = Vec::new();
    let mut words = 0;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(tag) => {
                open.push(tag.clone());
                events.push(Event::Start(tag));
            }
            Event::End(tag) => {
                open.pop();
                events.push(Event::End(tag));
            }
            Event::Text(text) => {
                let count = text.split_whitespace().count();
                if words + count <= limit {
                    words += count;
                    events.push(Event::Text(text));
                    continue;
                }

                let kept = first_words(&text, limit - words);
                events.push(Event::Text(format!("{kept}{ELLIPSIS}").into()));
                while let Some(tag) = open.pop() {
                    events.push(Event::End(tag));
                }
                break;
            }
            other => events.push(other),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

fn first_words(text: &str, n: usize) -> String {
    text.split_whitespace().take(n).collect::<Vec<_>>().join(" ")
}

/// Plain-text truncation to `limit` words.
pub fn truncate_words(text: &str, limit: usize) -> String {
    if text.split_whitespace().count() <= limit {
        return text.to_string();
    }
    format!("{}{ELLIPSIS}", first_words(text, limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_markdown() {
        assert_eq!(markdown_to_html("**hi**"), "<p><strong>hi</strong></p>\n");
    }

    #[test]
    fn excerpt_closes_open_elements() {
        let html = markdown_excerpt("one **two three** four", 2);
        assert_eq!(html, "<p>one <strong>two…</strong></p>\n");
    }

    #[test]
    fn short_bodies_are_untouched() {
        let body = "A short *post*.";
        assert_eq!(markdown_excerpt(body, 30), markdown_to_html(body));
    }

    #[test]
    fn truncate_words_counts_whitespace_separated_words() {
        assert_eq!(truncate_words("a b c d", 2), "a b…");
        assert_eq!(truncate_words("a b", 2), "a b");
    }
}
