//! Structural validation: [`RawStyleConfig`] → [`StyleConfig`].
//!
//! Error messages name the offending key path (`theme.extend.colors.bg`) so
//! the build can report exactly what to fix.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::content::ContentGlobs;
use crate::domain::color::ColorToken;
use crate::domain::font::FontStack;
use crate::domain::style_config::{StyleConfig, ValidationMode};
use crate::error::ConfigError;

use super::document::{Entries, RawExtend, RawStyleConfig};
use super::Diagnostic;

const FONT_FAMILY_KEY: &str = "theme.extend.fontFamily";
const COLORS_KEY: &str = "theme.extend.colors";

/// Output of a successful validation pass.
pub(crate) struct Validated {
    pub config: StyleConfig,
    pub globs: ContentGlobs,
    pub warnings: Vec<Diagnostic>,
}

pub(crate) fn validate(
    raw: RawStyleConfig,
    mode: ValidationMode,
) -> Result<Validated, ConfigError> {
    let mut checker = Checker {
        mode,
        warnings: Vec::new(),
    };

    let content = raw
        .content
        .ok_or_else(|| ConfigError::malformed("content", "required key is missing"))?;
    let theme = raw
        .theme
        .ok_or_else(|| ConfigError::malformed("theme", "required key is missing"))?;
    let extend = theme
        .extend
        .ok_or_else(|| ConfigError::malformed("theme.extend", "required key is missing"))?;

    if content.is_empty() {
        checker.violation("content", "no content patterns; nothing would be scanned")?;
    }
    let globs = ContentGlobs::compile(&content)?;

    let RawExtend {
        font_family,
        colors,
    } = extend;
    let font_aliases = checker.font_aliases(font_family)?;
    let semantic_colors = checker.semantic_colors(colors)?;
    let plugins = checker.plugins(raw.plugins.unwrap_or_default())?;

    Ok(Validated {
        config: StyleConfig::from_parts(content, font_aliases, semantic_colors, plugins),
        globs,
        warnings: checker.warnings,
    })
}

struct Checker {
    mode: ValidationMode,
    warnings: Vec<Diagnostic>,
}

impl Checker {
    /// Records a rule violation: an error in strict mode, a warning otherwise.
    fn violation(&mut self, key: &str, message: &str) -> Result<(), ConfigError> {
        if self.mode.is_strict() {
            return Err(ConfigError::malformed(key, message));
        }
        self.warn(key, message);
        Ok(())
    }

    fn warn(&mut self, key: &str, message: &str) {
        warn!("{key}: {message}");
        self.warnings.push(Diagnostic {
            key: key.to_string(),
            message: message.to_string(),
        });
    }

    fn font_aliases(
        &mut self,
        entries: Entries<Vec<String>>,
    ) -> Result<BTreeMap<String, FontStack>, ConfigError> {
        let mut aliases = BTreeMap::new();
        for (alias, families) in entries.0 {
            let alias = alias.trim().to_string();
            let key = format!("{FONT_FAMILY_KEY}.{alias}");
            if alias.is_empty() {
                return Err(ConfigError::malformed(key, "alias name must not be empty"));
            }
            if aliases.contains_key(&alias) {
                return Err(ConfigError::malformed(key, "duplicate font alias"));
            }
            let families: Vec<String> = families.iter().map(|f| f.trim().to_string()).collect();
            if let Some(index) = families.iter().position(String::is_empty) {
                return Err(ConfigError::malformed(
                    format!("{key}[{index}]"),
                    "font family name must not be empty",
                ));
            }
            let stack = FontStack::new(families).ok_or_else(|| {
                ConfigError::malformed(
                    key.as_str(),
                    "fallback list is empty; it must end in a generic family such as sans-serif",
                )
            })?;
            if !stack.ends_with_generic_family() {
                self.violation(
                    &key,
                    "fallback list does not end in a generic family such as sans-serif",
                )?;
            }
            aliases.insert(alias, stack);
        }
        Ok(aliases)
    }

    fn semantic_colors(
        &mut self,
        entries: Entries<String>,
    ) -> Result<BTreeMap<String, ColorToken>, ConfigError> {
        let mut colors = BTreeMap::new();
        for (role, text) in entries.0 {
            let role = role.trim().to_string();
            let key = format!("{COLORS_KEY}.{role}");
            if role.is_empty() {
                return Err(ConfigError::malformed(key, "role name must not be empty"));
            }
            if colors.contains_key(&role) {
                return Err(ConfigError::malformed(key, "duplicate color role"));
            }
            if text.trim().is_empty() {
                return Err(ConfigError::malformed(key, "color token must not be empty"));
            }
            let token: ColorToken = match text.parse() {
                Ok(token) => token,
                Err(never) => match never {},
            };
            if !token.is_indirection() {
                self.violation(
                    &key,
                    &format!("expected a custom-property reference like var(--name), found literal `{token}`"),
                )?;
            }
            colors.insert(role, token);
        }
        Ok(colors)
    }

    fn plugins(&mut self, plugins: Vec<String>) -> Result<BTreeSet<String>, ConfigError> {
        let mut set = BTreeSet::new();
        for (index, plugin) in plugins.into_iter().enumerate() {
            let key = format!("plugins[{index}]");
            let plugin = plugin.trim().to_string();
            if plugin.is_empty() {
                return Err(ConfigError::malformed(key, "plugin identifier must not be empty"));
            }
            if set.contains(&plugin) {
                self.violation(&key, &format!("duplicate plugin `{plugin}`"))?;
                continue;
            }
            set.insert(plugin);
        }
        Ok(set)
    }
}
