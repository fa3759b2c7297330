//! CLI error types.

use alertmark_config::ConfigError;
use alertmark_site::{BuildError, PluginError, StyleError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Style(#[from] StyleError),

    #[error("{0}")]
    Plugin(#[from] PluginError),

    #[error("{0}")]
    Build(#[from] BuildError),
}
