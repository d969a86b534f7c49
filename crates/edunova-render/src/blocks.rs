//! Block splitting and classification

use crate::inline::{parse_inline, Inline};
use serde::Serialize;

/// Structurally distinct unit of rendered text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// `#`, `##` or `###` heading
    Heading {
        /// Heading level (1-3)
        level: u8,
        /// Heading text
        text: String,
    },
    /// Fenced code block
    CodeBlock {
        /// Code with fences removed
        code: String,
    },
    /// `> ` block quote
    Quote {
        /// Quoted text
        text: String,
    },
    /// `- ` list
    BulletList {
        /// Item texts
        items: Vec<String>,
    },
    /// `1. ` list
    NumberedList {
        /// Item texts
        items: Vec<String>,
    },
    /// Anything else, with inline code extracted
    Paragraph {
        /// Text and code runs in source order
        inlines: Vec<Inline>,
    },
}

impl ContentBlock {
    /// Block text without markup
    ///
    /// List items are joined with newlines.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Heading { text, .. } | Self::Quote { text } => text.clone(),
            Self::CodeBlock { code } => code.clone(),
            Self::BulletList { items } | Self::NumberedList { items } => items.join("\n"),
            Self::Paragraph { inlines } => inlines.iter().map(Inline::as_str).collect(),
        }
    }
}

/// Render markup into blocks
///
/// Total and deterministic: malformed markup degrades to paragraphs, and
/// output order follows input order.
#[must_use]
pub fn render(text: &str) -> Vec<ContentBlock> {
    split_blocks(text).into_iter().filter_map(classify).collect()
}

/// Byte ranges of blank-line separators
///
/// A separator is a maximal run of `\r`/`\n` holding at least two `\n`.
pub(crate) fn separators(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !is_line_break(bytes[i]) {
            i += 1;
            continue;
        }

        let start = i;
        let mut newlines = 0;
        while i < bytes.len() && is_line_break(bytes[i]) {
            if bytes[i] == b'\n' {
                newlines += 1;
            }
            i += 1;
        }
        if newlines >= 2 {
            found.push((start, i));
        }
    }

    found
}

fn split_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0;
    for (sep_start, sep_end) in separators(text) {
        blocks.push(&text[start..sep_start]);
        start = sep_end;
    }
    blocks.push(&text[start..]);
    blocks
}

#[inline]
fn is_line_break(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

/// Classify one raw block; whitespace-only blocks yield `None`
pub(crate) fn classify(raw: &str) -> Option<ContentBlock> {
    let block = raw.trim_matches(|c| c == '\r' || c == '\n');
    if block.trim().is_empty() {
        return None;
    }

    if let Some(text) = block.strip_prefix("# ") {
        return Some(heading(1, text));
    }
    if let Some(text) = block.strip_prefix("## ") {
        return Some(heading(2, text));
    }
    if let Some(text) = block.strip_prefix("### ") {
        return Some(heading(3, text));
    }

    if block.starts_with("```") {
        return Some(ContentBlock::CodeBlock {
            code: fence_body(block),
        });
    }

    if let Some(text) = block.strip_prefix("> ") {
        return Some(ContentBlock::Quote {
            text: text.to_string(),
        });
    }

    let lines: Vec<&str> = block
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).trim())
        .collect();

    if let Some(items) = list_items(&lines, |line| line.strip_prefix("- ")) {
        return Some(ContentBlock::BulletList { items });
    }
    if let Some(items) = list_items(&lines, strip_number_marker) {
        return Some(ContentBlock::NumberedList { items });
    }

    Some(ContentBlock::Paragraph {
        inlines: parse_inline(block),
    })
}

fn heading(level: u8, text: &str) -> ContentBlock {
    ContentBlock::Heading {
        level,
        text: text.to_string(),
    }
}

/// Strip the opening fence and, when present, the closing one
fn fence_body(block: &str) -> String {
    if block.chars().count() < 6 {
        return String::new();
    }
    let body = block.strip_prefix("```").unwrap_or(block);
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}

/// Items if every line carries the marker
fn list_items<'a>(
    lines: &[&'a str],
    strip_marker: impl Fn(&'a str) -> Option<&'a str>,
) -> Option<Vec<String>> {
    lines
        .iter()
        .map(|line| strip_marker(*line).map(str::to_string))
        .collect()
}

/// `<digits>.` followed by one whitespace character
fn strip_number_marker(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let rest = line[digits..].strip_prefix('.')?;
    let mut chars = rest.chars();
    if !chars.next()?.is_whitespace() {
        return None;
    }
    Some(chars.as_str())
}
