//! Alert stylesheet loading, minification and injection.

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, OnceLock};

use grass::{Options, OutputStyle};
use regex::Regex;

use crate::context::AlertRegistry;
use crate::document::Document;

/// Default alert stylesheet bundled with the crate.
const DEFAULT_CSS: &str = include_str!("../assets/alerts.css");

/// `id` attribute of the injected `<style>` element.
pub const STYLE_ELEMENT_ID: &str = "markdown-alert-styles";

/// Regex matching the first `<head>...</head>` region (non-greedy, multi-line).
static HEAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head(?:\s[^>]*)?>.*?</head>").unwrap());

/// Error loading or minifying the alert stylesheet.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("Failed to read stylesheet {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to minify stylesheet: {0}")]
    Minify(String),
}

/// CSS asset injected into pages that contain alerts.
///
/// The minified form is computed once and reused for every page.
#[derive(Debug)]
pub struct Stylesheet {
    source: String,
    minify: bool,
    minified: OnceLock<String>,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::embedded()
    }
}

impl Stylesheet {
    /// Stylesheet bundled with the crate.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_css(DEFAULT_CSS)
    }

    /// Stylesheet from CSS text.
    #[must_use]
    pub fn from_css(css: impl Into<String>) -> Self {
        Self {
            source: css.into(),
            minify: true,
            minified: OnceLock::new(),
        }
    }

    /// Read a stylesheet from disk.
    pub fn from_file(path: &Path) -> Result<Self, StyleError> {
        let css = std::fs::read_to_string(path).map_err(|source| StyleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_css(css))
    }

    /// Enable or disable minification (enabled by default).
    #[must_use]
    pub fn with_minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    /// Original CSS text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// CSS ready for embedding, minified when enabled.
    pub fn css(&self) -> Result<&str, StyleError> {
        if !self.minify {
            return Ok(&self.source);
        }
        if let Some(css) = self.minified.get() {
            return Ok(css);
        }
        let css = minify_css(&self.source)?;
        Ok(self.minified.get_or_init(|| css))
    }
}

/// Strip comments and whitespace from CSS.
pub fn minify_css(css: &str) -> Result<String, StyleError> {
    let options = Options::default().style(OutputStyle::Compressed);
    grass::from_string(css.to_owned(), &options)
        .map(|out| out.trim().to_owned())
        .map_err(|e| StyleError::Minify(e.to_string()))
}

/// Insert a `<style>` element immediately before the first `</head>`.
///
/// Returns `false` and leaves `output` unchanged when there is no
/// `<head>...</head>` region or the alert styles are already present.
pub fn inject_style(output: &mut String, css: &str) -> bool {
    let marker = format!(r#"<style id="{STYLE_ELEMENT_ID}">"#);
    if output.contains(&marker) {
        return false;
    }

    let Some(head) = HEAD_RE.find(output) else {
        return false;
    };
    let insert_at = head.end() - "</head>".len();
    output.insert_str(insert_at, &format!("{marker}{css}</style>"));
    true
}

/// Inject the stylesheet into every document recorded in `registry`.
///
/// Drains the registry so a document is injected at most once per build.
/// Returns the number of documents that received the styles.
pub fn inject_all(
    registry: &AlertRegistry,
    docs: &mut [Document],
    stylesheet: &Stylesheet,
) -> Result<usize, StyleError> {
    let ids = registry.take();
    if ids.is_empty() {
        return Ok(0);
    }

    let css = stylesheet.css()?;
    let mut injected = 0;
    for id in ids {
        let Some(doc) = docs.get_mut(id.index()) else {
            tracing::warn!(id = %id, "Recorded document not found, skipping styles");
            continue;
        };
        if inject_style(doc.output_mut(), css) {
            injected += 1;
        } else {
            tracing::debug!(path = %doc.path(), "No <head> region or styles present, skipped");
        }
    }
    Ok(injected)
}
