//! Error type shared by the loader, the document formats and the content globs.

use std::path::PathBuf;

use thiserror::Error;

use crate::loader::format::ConfigFormat;

/// Key path used when a value tree cannot be decoded into the document schema
/// and the decoder did not name a more specific key.
pub const DOCUMENT_KEY: &str = "<document>";

/// Everything that can go wrong while materializing a [`StyleConfig`].
///
/// None of these are retried: a bad configuration file is a deterministic
/// defect, and every later build step depends on the configuration.
///
/// [`StyleConfig`]: crate::StyleConfig
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file, or an eagerly checked literal content path, does not exist.
    #[error("file not found: {}", .path.display())]
    MissingFile { path: PathBuf },

    /// A file system error other than "not found".
    #[error("I/O error accessing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported host format.
    #[error("unsupported config format for {}: expected a .toml or .json file", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The text is not valid in its host format.
    #[error("failed to parse {format} config: {message}")]
    Syntax { format: ConfigFormat, message: String },

    /// A structural or schema violation, reported against the offending key.
    #[error("malformed config at `{key}`: {reason}")]
    MalformedConfig { key: String, reason: String },

    /// A content pattern could not be compiled into a path matcher.
    #[error("invalid content glob `{pattern}`: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The configuration could not be rendered back into its host format.
    #[error("failed to serialize {format} config: {message}")]
    Serialize { format: ConfigFormat, message: String },
}

impl ConfigError {
    /// Shorthand for a [`ConfigError::MalformedConfig`] at `key`.
    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedConfig {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns the offending key path for schema violations.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MalformedConfig { key, .. } => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_the_key() {
        let err = ConfigError::malformed("theme.extend", "required key is missing");
        assert_eq!(
            err.to_string(),
            "malformed config at `theme.extend`: required key is missing"
        );
        assert_eq!(err.key(), Some("theme.extend"));
    }

    #[test]
    fn test_missing_file_message_names_the_path() {
        let err = ConfigError::MissingFile {
            path: PathBuf::from("/etc/stylecfg.toml"),
        };
        assert_eq!(err.to_string(), "file not found: /etc/stylecfg.toml");
        assert_eq!(err.key(), None);
    }
}
