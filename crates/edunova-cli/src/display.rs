//! Plain-text terminal output

use edunova_core::{QuizPayload, Roadmap};
use edunova_quiz::{PrefetchReport, QuizAttempt};
use edunova_render::{ContentBlock, Inline};
use std::fmt::Write;

pub(crate) fn blocks(blocks: &[ContentBlock]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match block {
            ContentBlock::Heading { level, text } => {
                let _ = writeln!(out, "{} {text}", "#".repeat(usize::from(*level)));
            }
            ContentBlock::CodeBlock { code } => {
                for line in code.lines() {
                    let _ = writeln!(out, "    {line}");
                }
            }
            ContentBlock::Quote { text } => {
                for line in text.lines() {
                    let _ = writeln!(out, "| {line}");
                }
            }
            ContentBlock::BulletList { items } => {
                for item in items {
                    let _ = writeln!(out, "  * {item}");
                }
            }
            ContentBlock::NumberedList { items } => {
                for (n, item) in items.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {item}", n + 1);
                }
            }
            ContentBlock::Paragraph { inlines } => {
                for inline in inlines {
                    match inline {
                        Inline::Text(text) => out.push_str(text),
                        Inline::Code(code) => {
                            let _ = write!(out, "`{code}`");
                        }
                    }
                }
                out.push('\n');
            }
        }
    }
    out
}

pub(crate) fn roadmap(roadmap: &Roadmap) -> String {
    let mut out = String::new();
    for node in roadmap {
        let _ = writeln!(
            out,
            "[{}] {} ({}, {})",
            node.node_id, node.topic, node.difficulty, node.estimated_time
        );
        let _ = writeln!(out, "    {}", node.summary);
    }
    out
}

pub(crate) fn quiz(payload: &QuizPayload) -> String {
    let mut out = String::new();
    for (i, question) in payload.questions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, question.question);
        for (j, option) in question.options.iter().enumerate() {
            let _ = writeln!(out, "   [{j}] {option}");
        }
    }
    out
}

pub(crate) fn results(attempt: &QuizAttempt) -> String {
    let mut out = String::new();
    for (i, question) in attempt.payload().questions.iter().enumerate() {
        let mark = if attempt.is_correct(i) { "correct" } else { "wrong" };
        let _ = writeln!(out, "{}. {mark}: {}", i + 1, question.correct_answer);
        let _ = writeln!(out, "   {}", question.explanation);
    }
    let _ = writeln!(out, "Score: {}", attempt.score());
    out
}

pub(crate) fn report(report: &PrefetchReport) -> String {
    let mut cached = report.cached.clone();
    cached.sort();
    let mut out = String::new();
    for node_id in cached {
        let _ = writeln!(out, "cached  {node_id}");
    }
    for (node_id, error) in &report.failed {
        let _ = writeln!(out, "failed  {node_id}: {error}");
    }
    let _ = writeln!(out, "{}/{} quizzes cached", report.cached.len(), report.total());
    out
}
