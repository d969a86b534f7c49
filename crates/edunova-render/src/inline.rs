//! Inline code span extraction for paragraphs

use serde::Serialize;

/// Inline run within a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Inline {
    /// Plain text
    Text(String),
    /// Inline code span
    Code(String),
}

impl Inline {
    /// Plain text run
    #[inline]
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Code span
    #[inline]
    #[must_use]
    pub fn code(code: impl Into<String>) -> Self {
        Self::Code(code.into())
    }

    /// Text content without markup
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) | Self::Code(text) => text,
        }
    }
}

/// Split text on backticks into alternating text/code runs
///
/// Odd segments are code spans. A trailing segment opened by an unmatched
/// backtick stays plain text, backtick included. Empty code spans are kept,
/// empty text runs dropped and adjacent text runs merged.
pub(crate) fn parse_inline(text: &str) -> Vec<Inline> {
    let segments: Vec<&str> = text.split('`').collect();
    let last = segments.len() - 1;
    let unterminated = segments.len() % 2 == 0;

    let mut runs: Vec<Inline> = Vec::with_capacity(segments.len());
    for (index, segment) in segments.into_iter().enumerate() {
        if unterminated && index == last {
            push_text(&mut runs, &format!("`{segment}"));
        } else if index % 2 == 1 {
            runs.push(Inline::code(segment));
        } else {
            push_text(&mut runs, segment);
        }
    }
    runs
}

fn push_text(runs: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(Inline::Text(previous)) => previous.push_str(text),
        _ => runs.push(Inline::text(text)),
    }
}
