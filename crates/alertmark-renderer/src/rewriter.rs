//! Alert rewriting pass.
//!
//! Converts GitHub alert block quotes into HTML fragments that pass through
//! the markdown renderer unchanged:
//!
//! ```markdown
//! > [!TIP]
//! > Use caching.
//! ```
//!
//! becomes
//!
//! ```html
//! <div class="markdown-alert markdown-alert-tip"><p class="markdown-alert-title"><svg …></svg>Tip</p><p>Use caching.</p></div>
//! ```

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::kind::AlertKind;
use crate::shield::ShieldedSource;

/// Regex matching an alert tag line plus the contiguous quoted lines after it.
///
/// The body group is greedy: a second tag line inside the same quote is
/// body text, not a new alert.
static ALERT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^>[ \t]*\[!(IMPORTANT|NOTE|WARNING|TIP|CAUTION)\][ \t]*(?:\r?\n|\z)((?:>[^\n]*(?:\n|\z))*)",
    )
    .unwrap()
});

/// Result of rewriting one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rewritten {
    /// Rewritten source text.
    pub content: String,
    /// Number of alerts replaced.
    pub alerts: usize,
}

impl Rewritten {
    /// Whether any alert was replaced.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.alerts > 0
    }
}

/// Rewrite every alert block in `source` into an HTML fragment.
///
/// `render_inline` receives each alert's body with quote markers stripped
/// and must return HTML that is safe to inline. It is called once per alert,
/// in source order, also for empty bodies.
///
/// ```
/// let html = alertmark_renderer::rewrite("> [!TIP]\n> Use caching.\n", str::to_owned);
///
/// assert!(html.starts_with(r#"<div class="markdown-alert markdown-alert-tip">"#));
/// assert!(html.contains("<p>Use caching.</p>"));
/// ```
pub fn rewrite<F>(source: &str, render_inline: F) -> String
where
    F: FnMut(&str) -> String,
{
    rewrite_document(source, render_inline).content
}

/// Rewrite alerts and report how many were replaced.
///
/// Fenced code blocks are shielded first so alert syntax inside them is
/// left untouched. Text outside alert blocks is preserved byte for byte.
pub fn rewrite_document<F>(source: &str, mut render_inline: F) -> Rewritten
where
    F: FnMut(&str) -> String,
{
    let shielded = ShieldedSource::shield(source);
    let text = shielded.text();
    let mut content = String::with_capacity(text.len());
    let mut last = 0;
    let mut alerts = 0;

    for caps in ALERT_RE.captures_iter(text) {
        // The tag alternation only admits known kinds.
        let Some(kind) = AlertKind::from_tag(&caps[1]) else {
            continue;
        };
        let whole = caps.get_match();
        alerts += 1;

        // Only text between alerts can hold placeholders; rendered bodies
        // are never restored.
        content.push_str(&shielded.restore(&text[last..whole.start()]));
        last = whole.end();

        let body = strip_quote_markers(&caps[2]);
        let body_html = render_inline(&body);
        tracing::trace!(kind = kind.class(), body_len = body.len(), "Rewrote alert");
        render_alert(kind, &body_html, &mut content);
    }

    if alerts == 0 {
        return Rewritten {
            content: source.to_owned(),
            alerts,
        };
    }

    content.push_str(&shielded.restore(&text[last..]));
    Rewritten { content, alerts }
}

/// Strip the leading `>` and following whitespace from each quoted line.
///
/// The joined result is trimmed of surrounding whitespace.
fn strip_quote_markers(quoted: &str) -> String {
    quoted
        .lines()
        .map(|line| line.strip_prefix('>').unwrap_or(line).trim_start())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

/// Write the HTML fragment for one alert, followed by a blank line.
fn render_alert(kind: AlertKind, body_html: &str, out: &mut String) {
    write!(
        out,
        r#"<div class="markdown-alert markdown-alert-{class}"><p class="markdown-alert-title">{icon}{title}</p><p>{body_html}</p></div>"#,
        class = kind.class(),
        icon = kind.icon(),
        title = kind.title(),
    )
    .unwrap();
    out.push_str("\n\n");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn identity(text: &str) -> String {
        text.to_owned()
    }

    #[test]
    fn test_no_alerts_unchanged() {
        let sources = [
            "",
            "# Title\n\nParagraph.\n",
            "> plain quote\n> more\n",
            "Text with [!NOTE] inline\n",
            "> [!NOTE] with trailing text\n> body\n",
        ];
        for source in sources {
            let result = rewrite_document(source, identity);
            assert_eq!(result.content, source);
            assert!(!result.changed());
        }
    }

    #[test]
    fn test_tip_fragment_shape() {
        let result = rewrite("> [!TIP]\n> Use caching.\n", identity);

        let expected = format!(
            "<div class=\"markdown-alert markdown-alert-tip\"><p class=\"markdown-alert-title\">{}Tip</p><p>Use caching.</p></div>\n\n",
            AlertKind::Tip.icon()
        );
        assert_eq!(result, expected);
    }

    #[test]
    fn test_multiline_body_stripped() {
        let mut bodies = Vec::new();
        rewrite("> [!WARNING]\n> Line one.\n> Line two.\n", |body: &str| {
            bodies.push(body.to_owned());
            body.to_owned()
        });
        assert_eq!(bodies, ["Line one.\nLine two."]);
    }

    #[test]
    fn test_marker_without_space_and_extra_indent() {
        let mut bodies = Vec::new();
        rewrite(">[!NOTE]\n>first\n>     second\n", |body: &str| {
            bodies.push(body.to_owned());
            String::new()
        });
        assert_eq!(bodies, ["first\nsecond"]);
    }

    #[test]
    fn test_empty_body_still_rendered() {
        let mut calls = Vec::new();
        let result = rewrite("> [!CAUTION]\n", |body: &str| {
            calls.push(body.to_owned());
            "<em>empty</em>".to_owned()
        });
        assert_eq!(calls, [""]);
        assert!(result.contains("<p><em>empty</em></p>"));
        assert!(result.contains("markdown-alert-caution"));
    }

    #[test]
    fn test_blank_quoted_lines_trimmed() {
        let mut bodies = Vec::new();
        rewrite("> [!NOTE]\n>\n> Text\n>\n", |body: &str| {
            bodies.push(body.to_owned());
            String::new()
        });
        assert_eq!(bodies, ["Text"]);
    }

    #[test]
    fn test_unknown_tag_passthrough() {
        let source = "> [!DANGER]\n> text\n";
        assert_eq!(rewrite(source, identity), source);
    }

    #[test]
    fn test_lowercase_tag_passthrough() {
        let source = "> [!note]\n> text\n";
        assert_eq!(rewrite(source, identity), source);
    }

    #[test]
    fn test_surrounding_text_preserved() {
        let source = "# Intro\n\nBefore.\n\n> [!NOTE]\n> Body\n\nAfter.\n";
        let result = rewrite(source, identity);

        assert!(result.starts_with("# Intro\n\nBefore.\n\n<div "));
        assert!(result.ends_with("</div>\n\n\nAfter.\n"));
    }

    #[test]
    fn test_body_stops_at_non_quoted_line() {
        let mut bodies = Vec::new();
        let result = rewrite("> [!IMPORTANT]\n> Quoted\nNot quoted\n", |body: &str| {
            bodies.push(body.to_owned());
            body.to_owned()
        });
        assert_eq!(bodies, ["Quoted"]);
        assert!(result.ends_with("</div>\n\nNot quoted\n"));
    }

    #[test]
    fn test_multiple_alerts_in_order() {
        let mut bodies = Vec::new();
        let result = rewrite_document(
            "> [!NOTE]\n> one\n\ntext\n\n> [!WARNING]\n> two\n",
            |body: &str| {
                bodies.push(body.to_owned());
                body.to_owned()
            },
        );
        assert_eq!(result.alerts, 2);
        assert_eq!(bodies, ["one", "two"]);
        assert!(result.content.contains("markdown-alert-note"));
        assert!(result.content.contains("markdown-alert-warning"));
        assert!(result.content.contains("\ntext\n"));
    }

    #[test]
    fn test_consecutive_tags_are_one_greedy_alert() {
        let mut bodies = Vec::new();
        let result = rewrite_document("> [!NOTE]\n> one\n> [!TIP]\n> two\n", |body: &str| {
            bodies.push(body.to_owned());
            body.to_owned()
        });
        assert_eq!(result.alerts, 1);
        assert_eq!(bodies, ["one\n[!TIP]\ntwo"]);
        assert!(!result.content.contains("markdown-alert-tip"));
    }

    #[test]
    fn test_nested_quote_keeps_inner_marker() {
        let mut bodies = Vec::new();
        rewrite("> [!NOTE]\n> > nested\n", |body: &str| {
            bodies.push(body.to_owned());
            String::new()
        });
        assert_eq!(bodies, ["> nested"]);
    }

    #[test]
    fn test_code_block_immunity() {
        let source = "```markdown\n> [!NOTE]\n> Example\n```\n\n> [!TIP]\n> Real\n";
        let result = rewrite(source, identity);

        assert!(result.starts_with("```markdown\n> [!NOTE]\n> Example\n```\n"));
        assert!(result.contains("markdown-alert-tip"));
        assert!(!result.contains("markdown-alert-note"));
    }

    #[test]
    fn test_no_leftover_placeholder() {
        let source = "```\na\n```\n> [!NOTE]\n> b\n~~~\nc\n~~~\n";
        let result = rewrite(source, identity);

        assert!(!result.contains("@@ALERTMARK_CODE_BLOCK_"));
        assert!(result.contains("```\na\n```"));
        assert!(result.contains("~~~\nc\n~~~"));
    }

    #[test]
    fn test_placeholder_text_in_alert_body_kept_verbatim() {
        let source = "```\nSECRET\n```\n\n> [!NOTE]\n> ```\n> @@ALERTMARK_CODE_BLOCK_0@@\n> ```\n";
        let result = rewrite(source, identity);

        assert!(result.starts_with("```\nSECRET\n```\n\n<div "));
        assert!(result.contains("<p>```\n@@ALERTMARK_CODE_BLOCK_0@@\n```</p></div>"));
        assert_eq!(result.matches("SECRET").count(), 1);
    }

    #[test]
    fn test_code_blocks_restored_around_alerts() {
        let source = "```\na\n```\n> [!TIP]\n> b\n\n~~~\nc\n~~~\n";
        let result = rewrite(source, identity);

        assert!(result.starts_with("```\na\n```\n<div "));
        assert!(result.ends_with("</div>\n\n\n~~~\nc\n~~~\n"));
    }

    #[test]
    fn test_tag_line_at_end_of_input() {
        let result = rewrite_document("> [!NOTE]", identity);
        assert_eq!(result.alerts, 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut bodies = Vec::new();
        rewrite("> [!NOTE]\r\n> one\r\n> two\r\n", |body: &str| {
            bodies.push(body.to_owned());
            String::new()
        });
        assert_eq!(bodies, ["one\ntwo"]);
    }

    #[test]
    fn test_strip_quote_markers() {
        assert_eq!(strip_quote_markers("> a\n>  b\n>\tc\n"), "a\nb\nc");
        assert_eq!(strip_quote_markers(""), "");
    }
}
