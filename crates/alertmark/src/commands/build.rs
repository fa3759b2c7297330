//! `alertmark build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use alertmark_config::{CliSettings, Config};
use alertmark_renderer::MarkdownConverter;
use alertmark_site::{AlertPlugin, BuildReport, Site, SiteBuilder, Stylesheet};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover alertmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Alert stylesheet to inject instead of the bundled one.
    #[arg(long)]
    stylesheet: Option<PathBuf>,

    /// Rewrite documents in parallel.
    #[arg(long)]
    parallel: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            stylesheet: self.stylesheet.clone(),
            parallel: self.parallel.then_some(true),
        }
    }

    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        config.validate()?;
        let site_config = &config.site_resolved;
        let alerts_config = &config.alerts_resolved;

        if let Some(path) = &config.config_path {
            output.field("Config", &path.display().to_string());
        }
        output.field("Source", &site_config.source_dir.display().to_string());
        output.field("Output", &site_config.output_dir.display().to_string());
        tracing::info!(
            source_dir = %site_config.source_dir.display(),
            output_dir = %site_config.output_dir.display(),
            stylesheet = ?alerts_config.stylesheet,
            minify = alerts_config.minify,
            parallel = alerts_config.parallel,
            "Resolved build configuration"
        );

        let stylesheet = match &alerts_config.stylesheet {
            Some(path) => Stylesheet::from_file(path)?,
            None => Stylesheet::embedded(),
        }
        .with_minify(alerts_config.minify);

        let converter = MarkdownConverter::new();
        let plugin = AlertPlugin::builder()
            .renderer(Arc::new(converter.clone()))
            .stylesheet(stylesheet)
            .parallel(alerts_config.parallel)
            .build()?;

        let mut site = Site::load(&site_config.source_dir)?;
        let report = SiteBuilder::new(plugin, converter)
            .with_site_title(site_config.title.clone())
            .build(&mut site, &site_config.output_dir)?;

        output.info(&summary(&report));
        output.success(&format!(
            "Site built successfully to {}",
            site_config.output_dir.display()
        ));
        Ok(())
    }
}

/// One-line summary of a build.
fn summary(report: &BuildReport) -> String {
    format!(
        "{} documents, {} alerts in {} documents, styles injected into {}",
        report.documents, report.alerts, report.rewritten, report.injected
    )
}
