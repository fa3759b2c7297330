//! Static site builder.
//!
//! Runs one build invocation end to end:
//!
//! 1. Rewrite alerts in every document ([`AlertPlugin::rewrite_phase`])
//! 2. Render markdown into full HTML pages
//! 3. Inject the alert stylesheet ([`AlertPlugin::inject_phase`])
//! 4. Write pages to the output directory

use std::fs;
use std::path::{Path, PathBuf};

use alertmark_renderer::MarkdownConverter;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use crate::context::BuildContext;
use crate::document::Document;
use crate::plugin::{AlertPlugin, PluginError};
use crate::site::Site;
use crate::template::{PageData, render_page};

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Plugin(#[from] PluginError),
}

/// Summary of one build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Documents rendered.
    pub documents: usize,
    /// Documents whose content contained alerts.
    pub rewritten: usize,
    /// Alerts rewritten across all documents.
    pub alerts: usize,
    /// Pages that received the alert stylesheet.
    pub injected: usize,
}

/// Builds a static site from markdown documents.
pub struct SiteBuilder {
    plugin: AlertPlugin,
    converter: MarkdownConverter,
    site_title: String,
}

impl SiteBuilder {
    #[must_use]
    pub fn new(plugin: AlertPlugin, converter: MarkdownConverter) -> Self {
        Self {
            plugin,
            converter,
            site_title: "Documentation".to_owned(),
        }
    }

    #[must_use]
    pub fn with_site_title(mut self, title: impl Into<String>) -> Self {
        self.site_title = title.into();
        self
    }

    /// Build `site` into `output_dir`.
    ///
    /// Each build uses a fresh [`BuildContext`], so rebuilding the same site
    /// never carries documents over from a previous run.
    pub fn build(&self, site: &mut Site, output_dir: &Path) -> Result<BuildReport, BuildError> {
        let ctx = BuildContext::new();
        let docs = site.documents_mut();

        let rewritten = self.plugin.rewrite_phase(&ctx, docs);
        for doc in docs.iter_mut() {
            self.render(doc);
        }
        let injected = self.plugin.inject_phase(&ctx, docs)?;

        for doc in docs.iter() {
            write_page(output_dir, doc)?;
        }

        let report = BuildReport {
            documents: docs.len(),
            rewritten,
            alerts: ctx.registry().alert_count(),
            injected,
        };
        tracing::info!(
            documents = report.documents,
            rewritten = report.rewritten,
            alerts = report.alerts,
            injected = report.injected,
            output_dir = %output_dir.display(),
            "Site build completed"
        );
        Ok(report)
    }

    /// Render a document's markdown into its output page.
    fn render(&self, doc: &mut Document) {
        let html_content = self.converter.render(doc.content());
        let title = extract_title(doc.content())
            .or_else(|| (!doc.path().is_empty()).then(|| doc.path().to_owned()))
            .unwrap_or_else(|| self.site_title.clone());
        let page = render_page(&PageData {
            title: &title,
            site_title: &self.site_title,
            html_content: &html_content,
        });
        doc.set_output(page);
    }
}

/// Extract the text of the first non-empty H1 heading.
fn extract_title(markdown: &str) -> Option<String> {
    let mut in_h1 = false;
    let mut title = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let text = title.trim();
                if !text.is_empty() {
                    return Some(text.to_owned());
                }
                in_h1 = false;
                title.clear();
            }
            Event::Text(text) | Event::Code(text) if in_h1 => title.push_str(&text),
            _ => {}
        }
    }
    None
}

/// Output file for a URL path (`guide` → `guide/index.html`).
fn output_path(output_dir: &Path, url_path: &str) -> PathBuf {
    if url_path.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(url_path).join("index.html")
    }
}

fn write_page(output_dir: &Path, doc: &Document) -> Result<(), BuildError> {
    let path = output_path(output_dir, doc.path());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| BuildError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, doc.output()).map_err(|source| BuildError::Io { path, source })
}
