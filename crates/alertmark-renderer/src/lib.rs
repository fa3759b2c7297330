//! GitHub-style alert rewriting for markdown sources.
//!
//! Alert blocks written as block quotes are rewritten into HTML fragments
//! before the document reaches the markdown renderer:
//!
//! ```markdown
//! > [!WARNING]
//! > Back up your data first.
//! ```
//!
//! # Architecture
//!
//! Rewriting is a pure text pass in three steps:
//!
//! 1. **Shielding** ([`ShieldedSource`]): fenced code blocks are swapped for
//!    placeholders so alert syntax inside code examples is left alone.
//! 2. **Rewriting** ([`rewrite`]): each `> [!KIND]` block quote is replaced
//!    with a `markdown-alert` `<div>` whose body is rendered through an
//!    [`InlineRenderer`].
//! 3. **Restoring**: placeholders are swapped back for the original blocks.
//!
//! # Example
//!
//! ```
//! use alertmark_renderer::{InlineRenderer, MarkdownConverter, rewrite};
//!
//! let converter = MarkdownConverter::new();
//! let source = "> [!NOTE]\n> Read the **docs**.\n";
//! let rewritten = rewrite(source, |body| converter.render_inline(body));
//!
//! assert!(rewritten.contains("markdown-alert-note"));
//! assert!(rewritten.contains("<strong>docs</strong>"));
//! ```

mod fence;
mod icons;
mod kind;
mod markdown;
mod rewriter;
mod shield;
mod util;

pub use icons::icon_svg;
pub use kind::AlertKind;
pub use markdown::{InlineRenderer, MarkdownConverter};
pub use rewriter::{Rewritten, rewrite, rewrite_document};
pub use shield::ShieldedSource;
pub use util::escape_html;
