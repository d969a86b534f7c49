//! Edunova Render
//!
//! Turns AI chat responses into structured content blocks for display.
//! Only a small markup subset is recognised; anything else degrades to a
//! paragraph, so rendering never fails.
//!
//! # Recognised blocks
//!
//! Blocks are separated by blank lines and classified by their first
//! characters, first match wins:
//!
//! - `# `, `## `, `### ` headings
//! - three backticks: code block
//! - `> ` quote
//! - `- ` on every line: bullet list
//! - `1. ` on every line: numbered list
//! - otherwise a paragraph, with backtick-delimited inline code
//!
//! # Example
//!
//! ```rust
//! use edunova_render::{render, ContentBlock};
//!
//! let blocks = render("# Title\n\nSome text");
//! assert_eq!(blocks.len(), 2);
//! assert!(matches!(blocks[0], ContentBlock::Heading { level: 1, .. }));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod blocks;
mod incremental;
mod inline;

pub use blocks::{render, ContentBlock};
pub use incremental::IncrementalRenderer;
pub use inline::Inline;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
