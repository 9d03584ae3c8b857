//! Host formats for the configuration document.
//!
//! TOML is the default.  JSON is accepted for projects that already keep
//! their build configuration in JSON.  Both decode into the same
//! [`RawStyleConfig`] schema.

use std::fmt;
use std::path::Path;

use crate::error::{ConfigError, DOCUMENT_KEY};

use super::document::RawStyleConfig;

/// A supported configuration file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Json,
}

impl ConfigFormat {
    /// Picks the format from the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    /// Decodes `text` into the document schema.
    ///
    /// Text that is not valid in the host format yields
    /// [`ConfigError::Syntax`]; valid text of the wrong shape (for example a
    /// number where a list is expected) yields [`ConfigError::MalformedConfig`].
    pub fn parse(self, text: &str) -> Result<RawStyleConfig, ConfigError> {
        match self {
            Self::Toml => {
                // Parse to a table first so syntax errors and schema errors
                // are told apart.  TOML itself rejects duplicate keys here.
                let table: toml::Table = text.parse().map_err(|e: toml::de::Error| {
                    ConfigError::Syntax {
                        format: self,
                        message: e.to_string(),
                    }
                })?;
                toml::Value::Table(table)
                    .try_into()
                    .map_err(|e: toml::de::Error| {
                        ConfigError::malformed(DOCUMENT_KEY, e.message().to_string())
                    })
            }
            Self::Json => {
                // Decode directly so duplicate keys reach `Entries`; a JSON
                // value tree would keep only the last one.
                serde_json::from_str(text).map_err(|e| match e.classify() {
                    serde_json::error::Category::Data => {
                        ConfigError::malformed(DOCUMENT_KEY, e.to_string())
                    }
                    _ => ConfigError::Syntax {
                        format: self,
                        message: e.to_string(),
                    },
                })
            }
        }
    }

    /// Renders a document in this format.
    pub fn render(self, document: &RawStyleConfig) -> Result<String, ConfigError> {
        match self {
            Self::Toml => toml::to_string_pretty(document).map_err(|e| ConfigError::Serialize {
                format: self,
                message: e.to_string(),
            }),
            Self::Json => serde_json::to_string_pretty(document)
                .map(|mut text| {
                    text.push('\n');
                    text
                })
                .map_err(|e| ConfigError::Serialize {
                    format: self,
                    message: e.to_string(),
                }),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("stylecfg.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("conf/Style.JSON")).unwrap(),
            ConfigFormat::Json
        );
        assert_eq!(ConfigFormat::Json.extension(), "json");
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let err = ConfigFormat::from_path(Path::new("tailwind.config.js")).unwrap_err();
        match err {
            ConfigError::UnsupportedFormat { path } => {
                assert_eq!(path, PathBuf::from("tailwind.config.js"))
            }
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
        assert!(ConfigFormat::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_invalid_toml_is_syntax_error() {
        let err = ConfigFormat::Toml.parse("[[[ not valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { format: ConfigFormat::Toml, .. }));
    }

    #[test]
    fn test_duplicate_toml_key_is_syntax_error() {
        let text = "[theme.extend.colors]\nprimary = \"var(--a)\"\nprimary = \"var(--b)\"\n";
        let err = ConfigFormat::Toml.parse(text).unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { .. }));
    }

    #[test]
    fn test_wrong_toml_type_is_malformed() {
        let err = ConfigFormat::Toml.parse("content = 5").unwrap_err();
        assert_eq!(err.key(), Some(DOCUMENT_KEY));
    }

    #[test]
    fn test_invalid_json_is_syntax_error() {
        let err = ConfigFormat::Json.parse("{ \"content\": [").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { format: ConfigFormat::Json, .. }));
    }

    #[test]
    fn test_wrong_json_type_is_malformed() {
        let err = ConfigFormat::Json.parse(r#"{ "content": "./a.html" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedConfig { .. }));
    }

    #[test]
    fn test_json_render_ends_with_newline() {
        let text = ConfigFormat::Json
            .render(&RawStyleConfig::default())
            .expect("render");
        assert_eq!(text, "{}\n");
    }
}
