//! Documents owned by the host site.

use std::fmt;

/// Kind of document, mirroring how static-site hosts split content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    /// Dated entry under `posts/`.
    Post,
    /// Standalone page.
    Page,
}

/// Position of a document in the host's document list.
///
/// The registry stores ids rather than references so documents stay owned
/// by the host between the rewrite and injection phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(usize);

impl DocumentId {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A markdown document and its rendered output.
#[derive(Clone, Debug)]
pub struct Document {
    kind: DocumentKind,
    /// URL path (e.g., "", "guide", "posts/release-notes").
    path: String,
    /// Markdown source, rewritten in place by the rewrite phase.
    content: String,
    /// Rendered HTML page; empty until the host renders it.
    output: String,
}

impl Document {
    /// Create a document that has not been rendered yet.
    #[must_use]
    pub fn new(kind: DocumentKind, path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            content: content.into(),
            output: String::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn set_output(&mut self, output: String) {
        self.output = output;
    }

    /// Mutable access to the rendered output for in-place edits.
    pub fn output_mut(&mut self) -> &mut String {
        &mut self.output
    }
}
