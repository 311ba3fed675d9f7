//! Best-effort HTML preview for the dashboard comparison view.
//!
//! Freeform original/current text is rendered as paragraphs, line breaks,
//! emphasis and lists. Text that already contains markup passes through
//! untouched. The conversion is lossy and is not meant to round-trip.

use std::sync::LazyLock;

use regex::Regex;

static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^>]*>").expect("valid regex"));

static BLANK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").expect("valid regex"));

static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s][^*]*?)\*|\b_([^_\s][^_]*?)_\b").expect("valid regex"));

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*•]\s+(.+)$").expect("valid regex"));

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+(.+)$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// Render freeform text as preview HTML.
pub fn to_preview_html(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if MARKUP_RE.is_match(trimmed) {
        return text.to_string();
    }

    let normalized = trimmed.replace("\r\n", "\n");
    let mut html = String::new();
    for block in BLANK_LINE_RE.split(&normalized) {
        render_block(block, &mut html);
    }
    html
}

fn render_block(block: &str, out: &mut String) {
    let mut paragraph: Vec<String> = Vec::new();
    let mut list: Option<(ListKind, Vec<String>)> = None;

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let list_item = BULLET_RE
            .captures(line)
            .map(|c| (ListKind::Unordered, c[1].to_string()))
            .or_else(|| {
                NUMBERED_RE
                    .captures(line)
                    .map(|c| (ListKind::Ordered, c[1].to_string()))
            });

        match list_item {
            Some((kind, item)) => {
                flush_paragraph(&mut paragraph, out);
                match list.as_mut() {
                    Some((current, items)) if *current == kind => items.push(inline(&item)),
                    _ => {
                        flush_list(&mut list, out);
                        list = Some((kind, vec![inline(&item)]));
                    }
                }
            }
            None => {
                flush_list(&mut list, out);
                paragraph.push(inline(line));
            }
        }
    }

    flush_paragraph(&mut paragraph, out);
    flush_list(&mut list, out);
}

fn flush_paragraph(lines: &mut Vec<String>, out: &mut String) {
    if lines.is_empty() {
        return;
    }
    out.push_str("<p>");
    out.push_str(&lines.join("<br>"));
    out.push_str("</p>");
    lines.clear();
}

fn flush_list(list: &mut Option<(ListKind, Vec<String>)>, out: &mut String) {
    if let Some((kind, items)) = list.take() {
        out.push('<');
        out.push_str(kind.tag());
        out.push('>');
        for item in items {
            out.push_str("<li>");
            out.push_str(&item);
            out.push_str("</li>");
        }
        out.push_str("</");
        out.push_str(kind.tag());
        out.push('>');
    }
}

/// Apply bold then italic emphasis markers.
fn inline(text: &str) -> String {
    let bold = BOLD_RE.replace_all(text, |caps: &regex::Captures<'_>| {
        let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        format!("<strong>{inner}</strong>")
    });
    ITALIC_RE
        .replace_all(&bold, |caps: &regex::Captures<'_>| {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            format!("<em>{inner}</em>")
        })
        .into_owned()
}
