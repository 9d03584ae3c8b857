//! stylecfg-cli library crate.
//!
//! Implements the `stylecfg` subcommands against any [`Write`] sink so the
//! binary in `main.rs` and the integration tests in `tests/` share the same
//! code paths.
//!
//! ```text
//! stylecfg check          load + validate, print a summary and any warnings
//! stylecfg show           re-serialize the loaded configuration
//! stylecfg files          list files matched by the content globs
//! ```

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use tracing::debug;

use stylecfg_core::{ConfigFormat, LoadReport, StyleConfig};

/// Output format accepted by `stylecfg show --format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
}

impl From<OutputFormat> for ConfigFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Toml => ConfigFormat::Toml,
            OutputFormat::Json => ConfigFormat::Json,
        }
    }
}

/// Prints a one-line summary, the theme tokens and any lenient-mode warnings.
pub fn check(report: &LoadReport, out: &mut impl Write) -> anyhow::Result<()> {
    let config = &report.config;
    let source = report
        .source
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string());

    writeln!(
        out,
        "ok: {source}: {} content patterns, {} font aliases, {} semantic colors, {} plugins",
        config.content_globs().len(),
        config.font_aliases().len(),
        config.semantic_colors().len(),
        config.plugins().len()
    )?;
    for (alias, stack) in config.font_aliases() {
        writeln!(out, "  font-{alias}: {stack}")?;
    }
    for (role, token) in config.semantic_colors() {
        writeln!(out, "  color-{role}: {token}")?;
    }
    for warning in &report.warnings {
        writeln!(out, "warning: {warning}")?;
    }
    Ok(())
}

/// Writes the configuration back out in `format`.
pub fn show(config: &StyleConfig, format: OutputFormat, out: &mut impl Write) -> anyhow::Result<()> {
    let text = config
        .render(format.into())
        .context("failed to render configuration")?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// Lists files under `root` matched by the content globs, one per line.
///
/// Returns the number of files listed.
pub fn files(report: &LoadReport, root: &Path, out: &mut impl Write) -> anyhow::Result<usize> {
    debug!("enumerating content files under {}", root.display());
    let matched = report
        .globs
        .enumerate(root)
        .with_context(|| format!("failed to scan {}", root.display()))?;
    for path in &matched {
        writeln!(out, "{}", path.display())?;
    }
    Ok(matched.len())
}
