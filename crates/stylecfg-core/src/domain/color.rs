//! Semantic color tokens.
//!
//! A semantic color role (`primary`, `bg`, ...) is bound to a custom-property
//! reference such as `var(--color-primary)` rather than a concrete color, so
//! the runtime theme provider decides the actual value (light/dark switch).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The value bound to a semantic color role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorToken {
    /// A `var(--name)` or `var(--name, fallback)` custom-property reference.
    Var {
        /// Property name without the leading `--`.
        name: String,
        /// Optional fallback text after the first comma, trimmed.
        fallback: Option<String>,
    },
    /// Anything else: a hex code, a named color, `rgb(...)`, etc.
    ///
    /// Only produced under lenient validation.
    Literal(String),
}

impl ColorToken {
    /// Convenience constructor for `var(--name)`.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var {
            name: name.into(),
            fallback: None,
        }
    }

    /// Returns `true` for custom-property references.
    pub fn is_indirection(&self) -> bool {
        matches!(self, Self::Var { .. })
    }

    /// The referenced custom property, e.g. `--color-primary`.
    pub fn custom_property(&self) -> Option<String> {
        match self {
            Self::Var { name, .. } => Some(format!("--{name}")),
            Self::Literal(_) => None,
        }
    }
}

impl FromStr for ColorToken {
    type Err = Infallible;

    /// Classifies `s` as a reference or a literal. Never fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_var(s.trim()).unwrap_or_else(|| Self::Literal(s.trim().to_string())))
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var {
                name,
                fallback: None,
            } => write!(f, "var(--{name})"),
            Self::Var {
                name,
                fallback: Some(fallback),
            } => write!(f, "var(--{name}, {fallback})"),
            Self::Literal(text) => f.write_str(text),
        }
    }
}

fn parse_var(s: &str) -> Option<ColorToken> {
    // CSS function names are ASCII case-insensitive.
    let head = s.get(..4)?;
    if !head.eq_ignore_ascii_case("var(") {
        return None;
    }
    let inner = s[4..].strip_suffix(')')?;
    let (name, fallback) = match inner.split_once(',') {
        Some((name, fallback)) => (name.trim(), Some(fallback.trim())),
        None => (inner.trim(), None),
    };
    let name = name.strip_prefix("--")?;
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return None;
    }
    let fallback = match fallback {
        Some("") => return None,
        Some(text) => Some(text.to_string()),
        None => None,
    };
    Some(ColorToken::Var {
        name: name.to_string(),
        fallback,
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}
