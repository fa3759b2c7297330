//! Alert rewriting and stylesheet injection for static sites.
//!
//! Hosts integrate at two points of a build:
//!
//! 1. **Rewrite phase**: before markdown is rendered, every document's
//!    content goes through the alert rewriter. Documents that changed are
//!    recorded in the build's [`AlertRegistry`].
//! 2. **Injection phase**: after every document has its final HTML, the
//!    minified alert stylesheet is spliced into the `<head>` of each recorded
//!    document.
//!
//! Both phases share a [`BuildContext`] created once per build.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use alertmark_renderer::MarkdownConverter;
//! use alertmark_site::{AlertPlugin, BuildContext, Document, DocumentKind};
//!
//! let plugin = AlertPlugin::builder()
//!     .renderer(Arc::new(MarkdownConverter::new()))
//!     .build()
//!     .unwrap();
//!
//! let ctx = BuildContext::new();
//! let mut docs = vec![Document::new(DocumentKind::Page, "guide", "> [!TIP]\n> Use caching.\n")];
//!
//! plugin.rewrite_phase(&ctx, &mut docs);
//! docs[0].set_output("<html><head></head><body></body></html>".to_owned());
//! plugin.inject_phase(&ctx, &mut docs).unwrap();
//!
//! assert!(docs[0].output().contains("<style id=\"markdown-alert-styles\">"));
//! ```

mod builder;
mod context;
mod document;
mod plugin;
mod site;
mod style;
mod template;

pub use builder::{BuildError, BuildReport, SiteBuilder};
pub use context::{AlertRegistry, BuildContext};
pub use document::{Document, DocumentId, DocumentKind};
pub use plugin::{AlertPlugin, AlertPluginBuilder, PluginError};
pub use site::Site;
pub use style::{STYLE_ELEMENT_ID, StyleError, Stylesheet, inject_all, inject_style, minify_css};
pub use template::{PageData, render_page};
