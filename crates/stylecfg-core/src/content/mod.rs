//! Content-scan patterns.
//!
//! The build tool scans every file matched by the `content` patterns for
//! utility class names.  This module compiles those patterns into one
//! matcher so they can be validated at load time and used to list the
//! matched paths.  File contents are never read here.
//!
//! Pattern rules:
//!
//! - A leading `./` is ignored; patterns are relative to the base directory.
//! - `*` and `?` stay within one path segment, `**` crosses segments.
//! - A leading `!` turns the pattern into an exclusion.
//! - A pattern without `*`, `?`, `[` or `{` is a literal path.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::error::ConfigError;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// One content pattern after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPattern {
    /// Pattern as written in the config file.
    pub original: String,
    /// Pattern with the `!` and `./` prefixes removed.
    pub normalized: String,
    /// `true` when written with a leading `!`.
    pub negated: bool,
}

impl ContentPattern {
    pub fn parse(original: &str) -> Self {
        let trimmed = original.trim();
        let (negated, rest) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };
        let mut normalized = rest;
        while let Some(stripped) = normalized.strip_prefix("./") {
            normalized = stripped;
        }
        Self {
            original: original.to_string(),
            normalized: normalized.to_string(),
            negated,
        }
    }

    /// Returns `true` when the pattern names a single file.
    pub fn is_literal(&self) -> bool {
        !self.normalized.contains(GLOB_META)
    }
}

/// Compiled inclusion and exclusion sets for the content patterns.
#[derive(Debug, Clone)]
pub struct ContentGlobs {
    patterns: Vec<ContentPattern>,
    include: GlobSet,
    exclude: GlobSet,
}

impl ContentGlobs {
    /// Compiles `patterns`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGlob`] for the first pattern that fails
    /// to compile, and [`ConfigError::MalformedConfig`] for a blank pattern.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ConfigError> {
        let mut include = GlobSetBuilder::new();
        let mut exclude = GlobSetBuilder::new();
        let mut parsed = Vec::with_capacity(patterns.len());

        for (index, raw) in patterns.iter().enumerate() {
            let pattern = ContentPattern::parse(raw.as_ref());
            if pattern.normalized.is_empty() {
                return Err(ConfigError::malformed(
                    format!("content[{index}]"),
                    "content pattern must not be empty",
                ));
            }
            let glob = compile_one(&pattern)?;
            if pattern.negated {
                exclude.add(glob);
            } else {
                include.add(glob);
            }
            parsed.push(pattern);
        }

        let build = |builder: GlobSetBuilder| {
            builder.build().map_err(|source| ConfigError::InvalidGlob {
                pattern: patterns
                    .iter()
                    .map(|p| p.as_ref())
                    .collect::<Vec<_>>()
                    .join(", "),
                source,
            })
        };

        Ok(Self {
            patterns: parsed,
            include: build(include)?,
            exclude: build(exclude)?,
        })
    }

    pub fn patterns(&self) -> &[ContentPattern] {
        &self.patterns
    }

    /// Tests a path relative to the base directory.
    pub fn is_match(&self, relative: impl AsRef<Path>) -> bool {
        let relative = relative.as_ref();
        let relative = relative.strip_prefix(".").unwrap_or(relative);
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }

    /// Inclusion patterns that name a single file, as paths relative to the
    /// base directory.
    pub fn literal_paths(&self) -> impl Iterator<Item = &Path> {
        self.patterns
            .iter()
            .filter(|p| !p.negated && p.is_literal())
            .map(|p| Path::new(p.normalized.as_str()))
    }

    /// Checks that every literal inclusion path exists under `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] for the first path that does not
    /// exist.
    pub fn ensure_literal_paths_exist(&self, base_dir: &Path) -> Result<(), ConfigError> {
        for relative in self.literal_paths() {
            let path = base_dir.join(relative);
            if !path.exists() {
                return Err(ConfigError::MissingFile { path });
            }
        }
        Ok(())
    }

    /// Walks `root` recursively and returns the matched files as sorted paths
    /// relative to `root`.  Symbolic links are not followed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if a directory cannot be read.
    pub fn enumerate(&self, root: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        let mut matched = Vec::new();
        let mut pending = vec![PathBuf::new()];

        while let Some(relative_dir) = pending.pop() {
            let dir = root.join(&relative_dir);
            let entries = fs::read_dir(&dir).map_err(|source| ConfigError::Io {
                path: dir.clone(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| ConfigError::Io {
                    path: dir.clone(),
                    source,
                })?;
                let file_type = entry.file_type().map_err(|source| ConfigError::Io {
                    path: entry.path(),
                    source,
                })?;
                let relative = relative_dir.join(entry.file_name());
                if file_type.is_dir() {
                    pending.push(relative);
                } else if file_type.is_file() && self.is_match(&relative) {
                    matched.push(relative);
                }
            }
        }

        matched.sort();
        debug!("matched {} content files under {}", matched.len(), root.display());
        Ok(matched)
    }
}

fn compile_one(pattern: &ContentPattern) -> Result<Glob, ConfigError> {
    GlobBuilder::new(&pattern.normalized)
        .literal_separator(true)
        .build()
        .map_err(|source| ConfigError::InvalidGlob {
            pattern: pattern.original.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globs(patterns: &[&str]) -> ContentGlobs {
        ContentGlobs::compile(patterns).expect("compile")
    }

    #[test]
    fn test_pattern_strips_dot_slash_and_negation() {
        let p = ContentPattern::parse("!./app/migrations/**");
        assert!(p.negated);
        assert_eq!(p.normalized, "app/migrations/**");
        assert_eq!(p.original, "!./app/migrations/**");
        assert!(!p.is_literal());
    }

    #[test]
    fn test_literal_pattern_detection() {
        assert!(ContentPattern::parse("./static/css/input.css").is_literal());
        assert!(!ContentPattern::parse("./app/**/*.py").is_literal());
        assert!(!ContentPattern::parse("./src/*.{html,js}").is_literal());
    }

    #[test]
    fn test_double_star_crosses_directories() {
        let g = globs(&["./template/**/*.html"]);
        assert!(g.is_match("template/index.html"));
        assert!(g.is_match("template/pos/orders/list.html"));
        assert!(!g.is_match("static/index.html"));
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        let g = globs(&["./app/*.py"]);
        assert!(g.is_match("app/views.py"));
        assert!(!g.is_match("app/management/commands/seed.py"));
    }

    #[test]
    fn test_dot_prefixed_path_matches() {
        let g = globs(&["./static/css/input.css"]);
        assert!(g.is_match("./static/css/input.css"));
        assert!(g.is_match("static/css/input.css"));
    }

    #[test]
    fn test_negated_pattern_excludes() {
        let g = globs(&["./app/**/*.py", "!./app/migrations/**"]);
        assert!(g.is_match("app/models.py"));
        assert!(!g.is_match("app/migrations/0001_initial.py"));
    }

    #[test]
    fn test_invalid_glob_reports_pattern() {
        let err = ContentGlobs::compile(&["./template/[*.html"]).unwrap_err();
        match err {
            ConfigError::InvalidGlob { pattern, .. } => assert_eq!(pattern, "./template/[*.html"),
            other => panic!("expected InvalidGlob, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_pattern_is_malformed() {
        let err = ContentGlobs::compile(&["./a/*.html", "  "]).unwrap_err();
        assert_eq!(err.key(), Some("content[1]"));
    }

    #[test]
    fn test_literal_paths_skip_globs_and_exclusions() {
        let g = globs(&["./app/**/*.py", "./static/css/input.css", "!./static/old.css"]);
        let literals: Vec<&Path> = g.literal_paths().collect();
        assert_eq!(literals, vec![Path::new("static/css/input.css")]);
    }
}
