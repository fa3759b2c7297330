//! Document discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

use crate::builder::BuildError;
use crate::document::{Document, DocumentKind};

/// Top-level directory whose documents are posts.
const POSTS_DIR: &str = "posts";

/// Collection of documents loaded from a source directory.
#[derive(Debug, Default)]
pub struct Site {
    documents: Vec<Document>,
}

impl Site {
    /// Create a site from already loaded documents.
    #[must_use]
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Load every `.md` file under `source_dir`.
    ///
    /// Hidden files and directories are skipped. Returns an empty site if
    /// the directory doesn't exist. Documents are sorted by URL path.
    pub fn load(source_dir: &Path) -> Result<Self, BuildError> {
        let mut files = Vec::new();
        if source_dir.exists() {
            scan_directory(source_dir, &mut files)?;
        }

        let mut documents = Vec::with_capacity(files.len());
        for file in files {
            let relative = file.strip_prefix(source_dir).unwrap_or(&file);
            let content = fs::read_to_string(&file).map_err(|source| BuildError::Io {
                path: file.clone(),
                source,
            })?;
            documents.push(Document::new(
                document_kind(relative),
                file_path_to_url(relative),
                content,
            ));
        }
        documents.sort_by(|a, b| a.path().cmp(b.path()));

        tracing::debug!(document_count = documents.len(), "Site scan completed");
        Ok(Self { documents })
    }

    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn documents_mut(&mut self) -> &mut [Document] {
        &mut self.documents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Collect markdown files under `dir` recursively.
fn scan_directory(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), BuildError> {
    let entries = fs::read_dir(dir).map_err(|source| BuildError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.filter_map(Result::ok) {
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, files)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            files.push(path);
        }
    }
    Ok(())
}

fn document_kind(relative: &Path) -> DocumentKind {
    let in_posts = relative
        .components()
        .next()
        .is_some_and(|c| c.as_os_str() == POSTS_DIR);
    // A lone `posts.md` is a page, not a post.
    if in_posts && relative.components().count() > 1 {
        DocumentKind::Post
    } else {
        DocumentKind::Page
    }
}

/// Convert a relative file path to a URL path.
///
/// - `guide.md` → `guide`
/// - `domain/setup.md` → `domain/setup`
/// - `domain/index.md` → `domain`
/// - `index.md` → ``
fn file_path_to_url(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    let segments: Vec<String> = without_ext
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let segments = match segments.split_last() {
        Some((last, rest)) if last == "index" => rest,
        _ => &segments[..],
    };
    segments.join("/")
}
