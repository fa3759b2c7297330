//! Markdown conversion used for alert bodies and page bodies.

use pulldown_cmark::{Options, Parser, html};

/// Converts alert body text to HTML that can be inlined in a paragraph.
///
/// Implemented for any `Fn(&str) -> String`, so tests and hosts can pass a
/// closure instead of a full converter.
pub trait InlineRenderer: Send + Sync {
    /// Render `text` to inline-safe HTML.
    fn render_inline(&self, text: &str) -> String;
}

impl<F> InlineRenderer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render_inline(&self, text: &str) -> String {
        self(text)
    }
}

/// Markdown to HTML converter backed by pulldown-cmark.
#[derive(Clone, Debug)]
pub struct MarkdownConverter {
    gfm: bool,
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter {
    /// Create a converter with GFM extensions enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    ///
    /// Blockquote tags (`Options::ENABLE_GFM`) stay disabled: alert markup
    /// comes from the rewriting pass only.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }

    /// Render a markdown document to HTML.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

impl InlineRenderer for MarkdownConverter {
    /// Render markdown and unwrap a lone `<p>` so the result nests inside
    /// the alert body paragraph.
    fn render_inline(&self, text: &str) -> String {
        let rendered = self.render(text);
        let trimmed = rendered.trim_end();
        if let Some(inner) = trimmed
            .strip_prefix("<p>")
            .and_then(|rest| rest.strip_suffix("</p>"))
            && !inner.contains("<p>")
        {
            return inner.to_owned();
        }
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_paragraph() {
        let converter = MarkdownConverter::new();
        assert_eq!(converter.render("Hello **world**"), "<p>Hello <strong>world</strong></p>\n");
    }

    #[test]
    fn test_render_inline_unwraps_single_paragraph() {
        let converter = MarkdownConverter::new();
        assert_eq!(converter.render_inline("Use `cache`."), "Use <code>cache</code>.");
    }

    #[test]
    fn test_render_inline_keeps_soft_breaks() {
        let converter = MarkdownConverter::new();
        assert_eq!(converter.render_inline("Line one.\nLine two."), "Line one.\nLine two.");
    }

    #[test]
    fn test_render_inline_multiple_blocks_kept() {
        let converter = MarkdownConverter::new();
        let html = converter.render_inline("One.\n\nTwo.");
        assert_eq!(html, "<p>One.</p>\n<p>Two.</p>");
    }

    #[test]
    fn test_render_inline_empty() {
        let converter = MarkdownConverter::new();
        assert_eq!(converter.render_inline(""), "");
    }

    #[test]
    fn test_gfm_tables() {
        let converter = MarkdownConverter::new();
        let html = converter.render("| a |\n|---|\n| b |\n");
        assert!(html.contains("<table>"));

        let html = MarkdownConverter::new().with_gfm(false).render("| a |\n|---|\n| b |\n");
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_blockquote_tags_not_parsed() {
        let converter = MarkdownConverter::new();
        let html = converter.render("> [!NOTE]\n> text\n");
        assert!(html.contains("<blockquote>"));
        assert!(!html.contains("markdown-alert"));
    }

    #[test]
    fn test_inline_html_passes_through() {
        let converter = MarkdownConverter::new();
        let html = converter.render("<div class=\"markdown-alert\"><p>x</p></div>\n\nafter\n");
        assert!(html.starts_with("<div class=\"markdown-alert\"><p>x</p></div>"));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn test_closure_is_inline_renderer() {
        let upper = |text: &str| text.to_uppercase();
        assert_eq!(upper.render_inline("abc"), "ABC");
    }
}
