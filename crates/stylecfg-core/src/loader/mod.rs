//! Loads a [`StyleConfig`] from disk or from memory.
//!
//! Loading is a single synchronous pass:
//!
//! 1. read the file (a missing file is [`ConfigError::MissingFile`]),
//! 2. parse it in the format given by its extension,
//! 3. validate the document into a [`StyleConfig`],
//! 4. optionally check that literal content paths exist.
//!
//! ```no_run
//! use stylecfg_core::{ConfigLoader, ValidationMode};
//!
//! let config = ConfigLoader::new()
//!     .with_mode(ValidationMode::Strict)
//!     .load("stylecfg.toml")?;
//! assert!(config.font_stack("poppins").is_some());
//! # Ok::<(), stylecfg_core::ConfigError>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::content::ContentGlobs;
use crate::domain::style_config::{StyleConfig, ValidationMode};
use crate::error::ConfigError;

pub mod document;
pub mod format;
mod validate;

use format::ConfigFormat;

/// A lenient-mode rule violation that was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Key path of the offending value, e.g. `theme.extend.colors.bg`.
    pub key: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// A loaded configuration together with everything learned while loading it.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub config: StyleConfig,
    /// Compiled content patterns, ready for matching.
    pub globs: ContentGlobs,
    /// Accepted violations; always empty in strict mode.
    pub warnings: Vec<Diagnostic>,
    /// Source file, when loaded from disk.
    pub source: Option<PathBuf>,
}

/// Loader settings.  Cheap to clone; build one and reuse it.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    mode: ValidationMode,
    base_dir: Option<PathBuf>,
    check_content_paths: bool,
}

impl ConfigLoader {
    /// Strict validation, no content path checks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Directory the content patterns are relative to.  Defaults to the
    /// config file's directory (or the working directory for in-memory loads).
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// When enabled, every literal content path must exist at load time.
    pub fn check_content_paths(mut self, enabled: bool) -> Self {
        self.check_content_paths = enabled;
        self
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Loads and validates the file at `path`.
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::load_report`].
    pub fn load(&self, path: impl AsRef<Path>) -> Result<StyleConfig, ConfigError> {
        self.load_report(path).map(|report| report.config)
    }

    /// Loads and validates the file at `path`, keeping the compiled globs and
    /// any lenient-mode warnings.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingFile`] if `path` or, with path checks enabled, a
    ///   literal content path does not exist.
    /// - [`ConfigError::Io`] for other read failures.
    /// - [`ConfigError::UnsupportedFormat`] for an unknown extension on a file
    ///   that exists. A missing file is reported as `MissingFile` whatever its
    ///   extension.
    /// - [`ConfigError::Syntax`], [`ConfigError::MalformedConfig`] and
    ///   [`ConfigError::InvalidGlob`] for bad content.
    pub fn load_report(&self, path: impl AsRef<Path>) -> Result<LoadReport, ConfigError> {
        let path = path.as_ref();
        debug!("loading style config from {}", path.display());

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::MissingFile {
                    path: path.to_path_buf(),
                })
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let format = ConfigFormat::from_path(path)?;

        let base_dir = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        let mut report = self.finish(&text, format, &base_dir)?;
        report.source = Some(path.to_path_buf());
        Ok(report)
    }

    /// Loads and validates `text` in the given format.
    pub fn load_str(&self, text: &str, format: ConfigFormat) -> Result<StyleConfig, ConfigError> {
        self.load_str_report(text, format).map(|report| report.config)
    }

    /// In-memory counterpart of [`ConfigLoader::load_report`].
    pub fn load_str_report(
        &self,
        text: &str,
        format: ConfigFormat,
    ) -> Result<LoadReport, ConfigError> {
        let base_dir = self.base_dir.clone().unwrap_or_default();
        self.finish(text, format, &base_dir)
    }

    fn finish(
        &self,
        text: &str,
        format: ConfigFormat,
        base_dir: &Path,
    ) -> Result<LoadReport, ConfigError> {
        let raw = format.parse(text)?;
        let validated = validate::validate(raw, self.mode)?;

        if self.check_content_paths {
            // An empty base dir means "relative to the working directory".
            let base = if base_dir.as_os_str().is_empty() {
                Path::new(".")
            } else {
                base_dir
            };
            validated.globs.ensure_literal_paths_exist(base)?;
        }

        let config = &validated.config;
        info!(
            "loaded style config: {} content patterns, {} font aliases, {} semantic colors, {} plugins",
            config.content_globs().len(),
            config.font_aliases().len(),
            config.semantic_colors().len(),
            config.plugins().len()
        );

        Ok(LoadReport {
            config: validated.config,
            globs: validated.globs,
            warnings: validated.warnings,
            source: None,
        })
    }
}

impl StyleConfig {
    /// Renders the configuration in `format`.
    ///
    /// Loading the result yields a configuration equal to `self`.
    pub fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        format.render(&self.to_document())
    }
}
