//! `stylecfg`: check and inspect style configurations.
//!
//! # Usage
//!
//! ```text
//! stylecfg [OPTIONS] <COMMAND>
//!
//! Commands:
//!   check   Load and validate the configuration, print a summary
//!   show    Print the configuration re-serialized as TOML or JSON
//!   files   List the files matched by the content globs
//!
//! Options:
//!   -c, --config <PATH>     Configuration file [default: stylecfg.toml]
//!       --lenient           Accept literal colors and incomplete font stacks with warnings
//!       --check-paths       Fail when a literal content path does not exist
//!       --base-dir <DIR>    Directory content globs are relative to [default: config file's directory]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable           | Default          | Description                  |
//! |--------------------|------------------|------------------------------|
//! | `STYLECFG_CONFIG`  | `stylecfg.toml`  | Configuration file           |
//! | `STYLECFG_LENIENT` | `false`          | Lenient validation           |
//! | `RUST_LOG`         | `info`           | Log filter (logs go to stderr) |
//!
//! Any load error aborts with a non-zero exit status and names the offending
//! key or path.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stylecfg_cli::OutputFormat;
use stylecfg_core::{ConfigLoader, ValidationMode};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Check and inspect style-token and content-scan configurations.
#[derive(Debug, Parser)]
#[command(name = "stylecfg", version)]
struct Cli {
    /// Configuration file to load (.toml or .json).
    #[arg(
        short,
        long,
        global = true,
        default_value = "stylecfg.toml",
        env = "STYLECFG_CONFIG"
    )]
    config: PathBuf,

    /// Downgrade literal colors, font stacks without a generic fallback, an
    /// empty content list and duplicate plugins to warnings.
    #[arg(long, global = true, env = "STYLECFG_LENIENT")]
    lenient: bool,

    /// Require every literal content path (no glob characters) to exist.
    #[arg(long, global = true)]
    check_paths: bool,

    /// Directory the content globs are relative to.
    ///
    /// Defaults to the directory containing the configuration file.
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load and validate the configuration, print a summary and any warnings.
    Check,
    /// Print the configuration re-serialized in the chosen format.
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,
    },
    /// List the files matched by the content globs.
    Files {
        /// Directory to scan.  Defaults to the base directory.
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

impl Cli {
    /// Builds the loader described by the global options.
    fn loader(&self) -> ConfigLoader {
        let mode = if self.lenient {
            ValidationMode::Lenient
        } else {
            ValidationMode::Strict
        };
        let loader = ConfigLoader::new()
            .with_mode(mode)
            .check_content_paths(self.check_paths);
        match &self.base_dir {
            Some(dir) => loader.with_base_dir(dir),
            None => loader,
        }
    }

    /// Directory `files` scans when `--root` is not given.
    fn scan_root(&self, root: Option<&Path>) -> PathBuf {
        if let Some(root) = root {
            return root.to_path_buf();
        }
        if let Some(dir) = &self.base_dir {
            return dir.clone();
        }
        match self.config.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `show` output can be piped.  `RUST_LOG` overrides
    // the default `info` level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let report = cli
        .loader()
        .load_report(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::Check => stylecfg_cli::check(&report, &mut out)?,
        Command::Show { format } => stylecfg_cli::show(&report.config, *format, &mut out)?,
        Command::Files { root } => {
            let root = cli.scan_root(root.as_deref());
            let count = stylecfg_cli::files(&report, &root, &mut out)?;
            info!("{count} content files matched under {}", root.display());
        }
    }
    out.flush()?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
