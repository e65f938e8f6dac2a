//! Tera engine with the blog templates compiled into the binary.

use std::collections::HashMap;

use tera::{Context, Tera, Value};

use crate::content::{markdown_excerpt, markdown_to_html, truncate_words};

const TEMPLATES: [(&str, &str); 7] = [
    ("blog/base.html", include_str!("../templates/blog/base.html")),
    ("blog/pagination.html", include_str!("../templates/blog/pagination.html")),
    ("blog/post/list.html", include_str!("../templates/blog/post/list.html")),
    ("blog/post/detail.html", include_str!("../templates/blog/post/detail.html")),
    ("blog/post/share.html", include_str!("../templates/blog/post/share.html")),
    ("blog/post/comment.html", include_str!("../templates/blog/post/comment.html")),
    ("blog/post/search.html", include_str!("../templates/blog/post/search.html")),
];

/// Compiled page templates.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        tera.autoescape_on(vec![".html"]);
        tera.register_filter("markdown", markdown_filter);
        tera.register_filter("truncatewords", truncatewords_filter);

        tracing::debug!(count = TEMPLATES.len(), "Templates compiled");
        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }
}

fn word_limit(args: &HashMap<String, Value>, key: &str) -> Option<usize> {
    args.get(key).and_then(Value::as_u64).map(|n| n as usize)
}

/// `{{ body | markdown }}` or `{{ body | markdown(words=30) }}`.
fn markdown_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("markdown filter expects a string"))?;
    let html = match word_limit(args, "words") {
        Some(limit) => markdown_excerpt(text, limit),
        None => markdown_to_html(text),
    };
    Ok(Value::String(html))
}

/// `{{ text | truncatewords(count=20) }}`.
fn truncatewords_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("truncatewords filter expects a string"))?;
    let limit = word_limit(args, "count")
        .ok_or_else(|| tera::Error::msg("truncatewords filter requires `count`"))?;
    Ok(Value::String(truncate_words(text, limit)))
}
