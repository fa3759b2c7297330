//! Code block shielding.
//!
//! Fenced code blocks are swapped for placeholders before alert detection
//! and swapped back afterwards, so `> [!NOTE]` written inside a code example
//! is never rewritten.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::fence::{FenceLine, FenceTracker};

/// Regex matching a fence-wrapped placeholder, capturing the block index.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\n@@ALERTMARK_CODE_BLOCK_(\d+)@@\n```").unwrap());

/// Source text with fenced code blocks replaced by placeholders.
///
/// Each placeholder is itself wrapped in a triple-backtick fence:
///
/// ````text
/// ```
/// @@ALERTMARK_CODE_BLOCK_0@@
/// ```
/// ````
#[derive(Debug)]
pub struct ShieldedSource {
    text: String,
    blocks: Vec<String>,
}

impl ShieldedSource {
    /// Replace every fenced code block in `source` with a placeholder.
    ///
    /// A block spans from its opening fence through its closing fence (or
    /// the end of input when unclosed). The line terminator after the closing
    /// fence stays outside the block.
    #[must_use]
    pub fn shield(source: &str) -> Self {
        let mut text = String::with_capacity(source.len());
        let mut blocks = Vec::new();
        let mut tracker = FenceTracker::new();
        let mut block = String::new();

        for line in source.split_inclusive('\n') {
            let (content, terminator) = split_terminator(line);
            match tracker.update(content) {
                FenceLine::Text => text.push_str(line),
                FenceLine::Open | FenceLine::Body => block.push_str(line),
                FenceLine::Close => {
                    block.push_str(content);
                    push_placeholder(&mut text, blocks.len());
                    blocks.push(std::mem::take(&mut block));
                    text.push_str(terminator);
                }
            }
        }

        if tracker.in_fence() {
            let (content, terminator) = split_terminator(&block);
            let (content_len, terminator) = (content.len(), terminator.to_owned());
            block.truncate(content_len);
            push_placeholder(&mut text, blocks.len());
            blocks.push(block);
            text.push_str(&terminator);
        }

        Self { text, blocks }
    }

    /// Shielded text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Captured code blocks, indexed by placeholder number.
    #[must_use]
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Put the captured code blocks back into `text`.
    ///
    /// Placeholders are replaced in a single left-to-right pass, so block
    /// contents that happen to look like placeholders are never expanded.
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        if self.blocks.is_empty() {
            return text.to_owned();
        }

        PLACEHOLDER_RE
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.blocks.get(idx))
                    .map_or_else(|| caps[0].to_owned(), Clone::clone)
            })
            .into_owned()
    }
}

fn push_placeholder(text: &mut String, index: usize) {
    write!(text, "```\n@@ALERTMARK_CODE_BLOCK_{index}@@\n```").unwrap();
}

/// Split a line into its content and trailing `\n` / `\r\n`.
fn split_terminator(line: &str) -> (&str, &str) {
    let content_len = if line.ends_with("\r\n") {
        line.len() - 2
    } else if line.ends_with('\n') {
        line.len() - 1
    } else {
        line.len()
    };
    line.split_at(content_len)
}
