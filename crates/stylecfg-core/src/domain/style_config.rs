//! The validated style configuration value.
//!
//! [`StyleConfig`] is built once by the loader, then only read.  Its fields are
//! private so a value can only come out of validation, which guarantees the
//! invariants documented on each accessor.

use std::collections::{BTreeMap, BTreeSet};

use super::color::ColorToken;
use super::font::FontStack;

/// How strictly the loader enforces the token invariants.
///
/// Structural problems (missing required keys, empty font stacks, invalid
/// globs) are errors in both modes.  Lenient mode downgrades the rest to
/// warnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ValidationMode {
    /// Every invariant violation is an error.
    #[default]
    Strict,
    /// Literal colors, stacks without a generic fallback, an empty `content`
    /// list and duplicate plugins are accepted with a warning.
    Lenient,
}

impl ValidationMode {
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

/// Content globs, theme tokens and plugins for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    content_globs: Vec<String>,
    font_aliases: BTreeMap<String, FontStack>,
    semantic_colors: BTreeMap<String, ColorToken>,
    plugins: BTreeSet<String>,
}

impl StyleConfig {
    pub(crate) fn from_parts(
        content_globs: Vec<String>,
        font_aliases: BTreeMap<String, FontStack>,
        semantic_colors: BTreeMap<String, ColorToken>,
        plugins: BTreeSet<String>,
    ) -> Self {
        Self {
            content_globs,
            font_aliases,
            semantic_colors,
            plugins,
        }
    }

    /// Content patterns in source order, exactly as written (including any
    /// leading `./` or `!`).
    pub fn content_globs(&self) -> &[String] {
        &self.content_globs
    }

    /// Alias name → fallback stack.  Alias names are unique.
    pub fn font_aliases(&self) -> &BTreeMap<String, FontStack> {
        &self.font_aliases
    }

    /// Semantic role → color token.  Role names are unique; under strict
    /// validation every token is a custom-property reference.
    pub fn semantic_colors(&self) -> &BTreeMap<String, ColorToken> {
        &self.semantic_colors
    }

    /// Plugin identifiers.  Empty when the source omits `plugins`.
    pub fn plugins(&self) -> &BTreeSet<String> {
        &self.plugins
    }

    /// Looks up the stack for a font alias.
    pub fn font_stack(&self, alias: &str) -> Option<&FontStack> {
        self.font_aliases.get(alias)
    }

    /// Looks up the token for a semantic color role.
    pub fn color(&self, role: &str) -> Option<&ColorToken> {
        self.semantic_colors.get(role)
    }

    /// Custom properties the runtime theme provider must define, sorted and
    /// deduplicated.
    pub fn required_custom_properties(&self) -> BTreeSet<String> {
        self.semantic_colors
            .values()
            .filter_map(ColorToken::custom_property)
            .collect()
    }
}
