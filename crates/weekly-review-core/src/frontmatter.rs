//! Front matter helpers
//!
//! A front matter block is a leading `---` line, an arbitrary body, and a
//! closing `---` line. Only the `title` key is ever read; the rest is opaque.

use regex::Regex;
use std::sync::OnceLock;

static BLOCK_RE: OnceLock<Regex> = OnceLock::new();
static TITLE_RE: OnceLock<Regex> = OnceLock::new();

fn block_re() -> &'static Regex {
    BLOCK_RE.get_or_init(|| {
        Regex::new(r"(?s)\A---\n(.*?)\n---\n?").expect("Invalid front matter regex pattern")
    })
}

fn title_re() -> &'static Regex {
    TITLE_RE.get_or_init(|| {
        Regex::new(r"(?m)^title:[ \t]*(.+)$").expect("Invalid title regex pattern")
    })
}

/// Body of the leading front matter block, without its delimiters
pub fn frontmatter_body(content: &str) -> Option<&str> {
    block_re()
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Content with a leading front matter block removed and the rest trimmed.
/// Content without front matter is returned untouched.
pub fn strip_frontmatter(content: &str) -> &str {
    match block_re().find(content) {
        Some(m) => content[m.end()..].trim(),
        None => content,
    }
}

/// Remove one matching pair of surrounding quotes
fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].trim();
        }
    }
    value
}

/// `title:` value from the front matter, if present and non-empty
pub fn frontmatter_title(content: &str) -> Option<String> {
    let body = frontmatter_body(content)?;
    let caps = title_re().captures(body)?;
    let title = unquote(caps.get(1)?.as_str());
    (!title.is_empty()).then(|| title.to_string())
}

/// Final path segment with a trailing `.md` removed
pub fn title_from_path(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.strip_suffix(".md").unwrap_or(name).to_string()
}

/// Title from front matter, falling back to the file name
pub fn extract_title(content: &str, path: &str) -> String {
    frontmatter_title(content).unwrap_or_else(|| title_from_path(path))
}
