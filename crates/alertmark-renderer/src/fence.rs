//! Code fence tracking for line-by-line scanning.
//!
//! Tracks whether we're inside a fenced code block so that alert syntax
//! appearing within code examples is left alone.

/// Role of a line relative to fenced code blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FenceLine {
    /// Regular line outside any code block.
    Text,
    /// Opening fence marker.
    Open,
    /// Line inside a code block.
    Body,
    /// Closing fence marker.
    Close,
}

/// Tracks code fence state during line-by-line processing.
///
/// Code fences in `CommonMark` can use backticks or tildes (three or more),
/// indented by at most three spaces. The closing fence must use the same
/// character and be at least as long as the opening fence.
///
/// Lines starting with `>` are never fences: a fence inside a block quote
/// belongs to the quote.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    /// Character used for the current fence (backtick or tilde).
    fence_char: Option<char>,
    /// Length of the opening fence (minimum length for closing).
    fence_len: usize,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if currently inside a fenced code block.
    pub(crate) fn in_fence(&self) -> bool {
        self.fence_char.is_some()
    }

    /// Classify a line and advance fence state.
    pub(crate) fn update(&mut self, line: &str) -> FenceLine {
        let Some(trimmed) = strip_indent(line) else {
            return if self.in_fence() {
                FenceLine::Body
            } else {
                FenceLine::Text
            };
        };

        if let Some(fence_char) = self.fence_char {
            if is_closing_fence(trimmed, fence_char, self.fence_len) {
                self.fence_char = None;
                self.fence_len = 0;
                return FenceLine::Close;
            }
            FenceLine::Body
        } else if let Some((ch, len)) = detect_fence(trimmed) {
            self.fence_char = Some(ch);
            self.fence_len = len;
            FenceLine::Open
        } else {
            FenceLine::Text
        }
    }
}

/// Strip up to three leading spaces.
///
/// Returns `None` for lines indented four or more spaces (indented code,
/// never a fence marker).
fn strip_indent(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    Some(&line[indent..])
}

/// Detect if a line starts a code fence.
///
/// Returns the fence character and length if found.
fn detect_fence(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let count = trimmed.chars().take_while(|&c| c == first).count();
    if count < 3 {
        return None;
    }

    // Backtick info strings cannot contain backticks
    if first == '`' && trimmed[count..].contains('`') {
        return None;
    }

    Some((first, count))
}

/// Check if a line is a valid closing fence.
///
/// After the fence characters only whitespace is allowed.
fn is_closing_fence(trimmed: &str, expected_char: char, min_len: usize) -> bool {
    if !trimmed.starts_with(expected_char) {
        return false;
    }

    let count = trimmed.chars().take_while(|&c| c == expected_char).count();
    if count < min_len {
        return false;
    }

    trimmed[count..].chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fence_initially() {
        let tracker = FenceTracker::new();
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_backtick_fence() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("```rust"), FenceLine::Open);
        assert!(tracker.in_fence());

        assert_eq!(tracker.update("fn main() {}"), FenceLine::Body);
        assert!(tracker.in_fence());

        assert_eq!(tracker.update("```"), FenceLine::Close);
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_tilde_fence() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("~~~python"), FenceLine::Open);
        assert_eq!(tracker.update("print('hello')"), FenceLine::Body);
        assert_eq!(tracker.update("~~~"), FenceLine::Close);
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_shorter_fence_not_closing() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("````"), FenceLine::Open);
        assert_eq!(tracker.update("```"), FenceLine::Body);
        assert!(tracker.in_fence());
        assert_eq!(tracker.update("`````"), FenceLine::Close);
    }

    #[test]
    fn test_mixed_fence_chars() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("```"), FenceLine::Open);
        assert_eq!(tracker.update("~~~"), FenceLine::Body);
        assert_eq!(tracker.update("```"), FenceLine::Close);
    }

    #[test]
    fn test_closing_fence_with_info_is_body() {
        let mut tracker = FenceTracker::new();

        tracker.update("```");
        assert_eq!(tracker.update("```rust"), FenceLine::Body);
        assert!(tracker.in_fence());
    }

    #[test]
    fn test_indented_fence() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("   ```rust"), FenceLine::Open);
        assert_eq!(tracker.update("  ```"), FenceLine::Close);
    }

    #[test]
    fn test_four_space_indent_is_not_fence() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("    ```"), FenceLine::Text);
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_quoted_fence_is_text() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("> ```"), FenceLine::Text);
        assert_eq!(tracker.update(">```"), FenceLine::Text);
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_two_backticks_not_fence() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("``inline code``"), FenceLine::Text);
        assert_eq!(tracker.update("```inline``` code"), FenceLine::Text);
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_fence_with_trailing_whitespace() {
        let mut tracker = FenceTracker::new();

        assert_eq!(tracker.update("```  "), FenceLine::Open);
        assert_eq!(tracker.update("```  "), FenceLine::Close);
    }
}
