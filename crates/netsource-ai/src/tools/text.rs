//! HTML-to-text helpers shared by the research tools.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").unwrap());
static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+\s+").unwrap());

/// Drop tags, decode entities and collapse whitespace.
pub fn strip_tags(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, " ");
    let decoded = html_escape::decode_html_entities(&without_tags);
    SPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Text of every `<p>` element, space separated.
pub fn paragraph_text(html: &str) -> String {
    let html = SCRIPT_RE.replace_all(html, "");
    PARAGRAPH_RE
        .captures_iter(&html)
        .map(|cap| strip_tags(&cap[1]))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The first `n` sentences of `text`.
pub fn first_sentences(text: &str, n: usize) -> String {
    let text = text.trim();
    if n == 0 || text.is_empty() {
        return String::new();
    }

    let mut start = 0;
    let mut sentences = Vec::new();
    for m in SENTENCE_END_RE.find_iter(text) {
        sentences.push(text[start..m.end()].trim());
        start = m.end();
        if sentences.len() == n {
            return sentences.join(" ");
        }
    }
    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences.join(" ")
}
