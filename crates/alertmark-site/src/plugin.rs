//! Host integration points: the rewrite phase and the injection phase.

use std::sync::Arc;

use alertmark_renderer::{InlineRenderer, rewrite_document};
use rayon::prelude::*;

use crate::context::BuildContext;
use crate::document::{Document, DocumentId};
use crate::style::{self, StyleError, Stylesheet};

/// Error returned by the alert plugin.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// No markdown converter was configured. The host cannot start.
    #[error("Alert plugin requires a markdown renderer")]
    MissingRenderer,
    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Builder for [`AlertPlugin`].
#[derive(Default)]
pub struct AlertPluginBuilder {
    renderer: Option<Arc<dyn InlineRenderer>>,
    stylesheet: Option<Stylesheet>,
    parallel: bool,
}

impl AlertPluginBuilder {
    /// Markdown converter used for alert bodies (required).
    #[must_use]
    pub fn renderer(mut self, renderer: Arc<dyn InlineRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Stylesheet to inject (defaults to the embedded one).
    #[must_use]
    pub fn stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = Some(stylesheet);
        self
    }

    /// Rewrite documents on the rayon thread pool.
    #[must_use]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Build the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::MissingRenderer`] if no renderer was set.
    pub fn build(self) -> Result<AlertPlugin, PluginError> {
        let renderer = self.renderer.ok_or(PluginError::MissingRenderer)?;
        Ok(AlertPlugin {
            renderer,
            stylesheet: self.stylesheet.unwrap_or_default(),
            parallel: self.parallel,
        })
    }
}

/// Rewrites alert blocks in documents and injects their stylesheet.
///
/// Hosts call [`rewrite_phase`](Self::rewrite_phase) before rendering
/// markdown and [`inject_phase`](Self::inject_phase) once every document has
/// its final HTML output.
pub struct AlertPlugin {
    renderer: Arc<dyn InlineRenderer>,
    stylesheet: Stylesheet,
    parallel: bool,
}

impl AlertPlugin {
    #[must_use]
    pub fn builder() -> AlertPluginBuilder {
        AlertPluginBuilder::default()
    }

    #[must_use]
    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Rewrite one document in place and return the number of alerts found.
    pub fn rewrite(&self, doc: &mut Document) -> usize {
        let result = rewrite_document(doc.content(), |body| self.renderer.render_inline(body));
        if result.changed() {
            doc.set_content(result.content);
        }
        result.alerts
    }

    /// Rewrite every document and record the changed ones in `ctx`.
    ///
    /// Returns the number of documents whose content changed.
    pub fn rewrite_phase(&self, ctx: &BuildContext, docs: &mut [Document]) -> usize {
        let registry = ctx.registry();
        let rewrite_one = |(index, doc): (usize, &mut Document)| {
            let alerts = self.rewrite(doc);
            if alerts > 0 {
                registry.record(DocumentId::new(index));
                registry.add_alerts(alerts);
                tracing::debug!(path = %doc.path(), alerts, "Rewrote alerts");
            }
        };

        if self.parallel {
            docs.par_iter_mut().enumerate().for_each(rewrite_one);
        } else {
            docs.iter_mut().enumerate().for_each(rewrite_one);
        }

        let rewritten = registry.len();
        tracing::info!(
            documents = docs.len(),
            rewritten,
            alerts = registry.alert_count(),
            "Alert rewrite phase completed"
        );
        rewritten
    }

    /// Inject the stylesheet into every document recorded in `ctx`.
    ///
    /// Returns the number of documents that received the styles.
    pub fn inject_phase(
        &self,
        ctx: &BuildContext,
        docs: &mut [Document],
    ) -> Result<usize, PluginError> {
        let injected = style::inject_all(ctx.registry(), docs, &self.stylesheet)?;
        tracing::info!(injected, "Alert style injection completed");
        Ok(injected)
    }
}
