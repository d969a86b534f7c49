//! Incremental rendering of streamed text
//!
//! Chat responses arrive in chunks. Everything before the last complete
//! blank-line separator can no longer change, so those blocks are rendered
//! once and kept; only the trailing block is re-rendered per push.

use crate::blocks::{classify, render, separators, ContentBlock};

/// Renderer fed with text chunks
///
/// For any chunking of a text `T`, [`IncrementalRenderer::blocks`] after
/// pushing every chunk equals [`render`]`(T)`.
#[derive(Debug, Clone, Default)]
pub struct IncrementalRenderer {
    /// Full text received so far
    source: String,
    /// Blocks that precede `boundary`
    committed: Vec<ContentBlock>,
    /// Byte offset just past the last separator seen
    boundary: usize,
}

impl IncrementalRenderer {
    /// Create empty renderer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of text
    pub fn push_str(&mut self, chunk: &str) {
        self.source.push_str(chunk);

        let tail = &self.source[self.boundary..];
        let found = separators(tail);
        let Some(&(_, last_end)) = found.last() else {
            return;
        };

        let mut start = 0;
        for (sep_start, sep_end) in found {
            if let Some(block) = classify(&tail[start..sep_start]) {
                self.committed.push(block);
            }
            start = sep_end;
        }
        self.boundary += last_end;
    }

    /// Current block sequence
    #[must_use]
    pub fn blocks(&self) -> Vec<ContentBlock> {
        let mut blocks = self.committed.clone();
        blocks.extend(render(&self.source[self.boundary..]));
        blocks
    }

    /// Blocks that will not change with further input
    #[inline]
    #[must_use]
    pub fn settled(&self) -> &[ContentBlock] {
        &self.committed
    }

    /// Text received so far
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Consume the renderer, returning the final blocks
    #[must_use]
    pub fn finish(mut self) -> Vec<ContentBlock> {
        let tail = render(&self.source[self.boundary..]);
        self.committed.extend(tail);
        self.committed
    }
}
