//! # stylecfg-core
//!
//! Configuration model and loader for a CSS utility-framework build step.
//!
//! A style configuration declares three things:
//!
//! - **content globs**: which template and source files the build tool scans
//!   for utility class names,
//! - **theme tokens**: font-family aliases with fallback stacks, and semantic
//!   color roles bound to runtime custom properties (`var(--color-primary)`),
//! - **plugins**: identifiers of build-tool plugins, often none.
//!
//! The crate reads that declaration from TOML or JSON, validates it, and hands
//! back an immutable [`StyleConfig`].  It does not scan file contents, run
//! plugins or generate CSS; those belong to the build tool.
//!
//! # Layout
//!
//! - **`domain`**: the validated [`StyleConfig`] value and its token types.
//! - **`loader`**: document formats, validation and [`ConfigLoader`].
//! - **`content`**: compiled content patterns ([`ContentGlobs`]).

pub mod content;
pub mod domain;
pub mod error;
pub mod loader;

pub use content::ContentGlobs;
pub use domain::color::ColorToken;
pub use domain::font::FontStack;
pub use domain::style_config::{StyleConfig, ValidationMode};
pub use error::ConfigError;
pub use loader::format::ConfigFormat;
pub use loader::{ConfigLoader, Diagnostic, LoadReport};
