//! Conversion of AI-service responses into publishable catalog text.
//!
//! The response body is decoded once into [`GeneratedContent`] at the
//! service boundary; [`normalize`] then shapes it for the target field:
//! SEO descriptions become single-line plain text, descriptions become
//! paragraph blocks followed by one bullet list.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::types::ContentKind;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// Any markup tag, opening or closing.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// A comma followed by one or more further commas (optionally spaced).
static COMMA_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(?:\s*,)+").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Line prefixes treated as bullet markers in generated descriptions.
const BULLET_MARKERS: &[&str] = &["•", "◦", "▪", "– ", "- ", "* "];

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

/// An AI-service response, decoded once at the service boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedContent {
    /// The service answered with a bare string.
    RawText(String),
    /// The service answered with an object carrying a `message` string.
    Structured { message: String },
    /// Any other JSON shape; serialized verbatim when converted to text.
    Unknown(Value),
}

impl GeneratedContent {
    /// Decode an already-parsed JSON value.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => Self::RawText(text),
            other => {
                let message = other
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                match message {
                    Some(message) => Self::Structured { message },
                    None => Self::Unknown(other),
                }
            }
        }
    }

    /// Decode a raw response body. Bodies that are not JSON are taken as
    /// plain text.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_json(value),
            Err(_) => Self::RawText(body.to_string()),
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::RawText(text) => text,
            Self::Structured { message } => message,
            Self::Unknown(value) => value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Shape generated content for the field tracked under `kind`.
pub fn normalize(content: GeneratedContent, kind: ContentKind) -> String {
    let text = content.into_text();
    match kind {
        ContentKind::SeoDescription => normalize_seo_description(&text),
        ContentKind::Description => normalize_description(&text),
    }
}

/// Remove every markup tag from `text`.
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

/// Reduce generated text to a single markup-free line.
///
/// Idempotent: running the output through again yields the same string.
pub fn normalize_seo_description(text: &str) -> String {
    let text = strip_tags(text);
    let text = text
        .replace("\\r\\n", " ")
        .replace("\\n", " ")
        .replace("\\r", " ")
        .replace('\\', "")
        .replace('"', "");
    let text = COMMA_RUN_RE.replace_all(&text, ",");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Turn generated text into `<p>` blocks followed by a single `<ul>` of
/// every bullet line.
pub fn normalize_description(text: &str) -> String {
    let text = text.replace("\\r\\n", "\n").replace("\\n", "\n");

    let mut html = String::new();
    let mut items = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match strip_bullet(line) {
            Some("") => {}
            Some(item) => items.push(item),
            None => {
                html.push_str("<p>");
                html.push_str(line);
                html.push_str("</p>");
            }
        }
    }

    if !items.is_empty() {
        html.push_str("<ul>");
        for item in items {
            html.push_str("<li>");
            html.push_str(item);
            html.push_str("</li>");
        }
        html.push_str("</ul>");
    }

    html
}

/// If `line` starts with a bullet marker, return the remaining text.
fn strip_bullet(line: &str) -> Option<&str> {
    BULLET_MARKERS
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
