//! Font-family fallback stacks.
//!
//! A font alias maps a short utility name (`poppins`) to an ordered list of
//! family names.  The browser tries each family in turn, so the list is only
//! safe when its last entry is a generic family keyword that always resolves.

use std::fmt;

/// CSS generic family keywords accepted as the final fallback of a stack.
pub const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "math",
    "emoji",
    "fangsong",
];

/// Returns `true` if `family` is a CSS generic family keyword (ASCII case-insensitive).
pub fn is_generic_family(family: &str) -> bool {
    let family = family.trim();
    GENERIC_FAMILIES
        .iter()
        .any(|generic| generic.eq_ignore_ascii_case(family))
}

/// An ordered, non-empty list of font-family names, first preference first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontStack {
    families: Vec<String>,
}

impl FontStack {
    /// Builds a stack from `families`, returning `None` when the list is empty.
    ///
    /// Whether the stack ends in a generic family is checked by the loader,
    /// since that rule depends on the validation mode.
    pub fn new(families: Vec<String>) -> Option<Self> {
        if families.is_empty() {
            None
        } else {
            Some(Self { families })
        }
    }

    /// All families in preference order.
    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// The first-preference family.
    pub fn primary(&self) -> &str {
        // Non-empty by construction.
        &self.families[0]
    }

    /// The last family when it is a generic keyword.
    pub fn generic_fallback(&self) -> Option<&str> {
        self.families
            .last()
            .map(String::as_str)
            .filter(|family| is_generic_family(family))
    }

    /// Returns `true` when the final entry is a generic family keyword.
    pub fn ends_with_generic_family(&self) -> bool {
        self.generic_fallback().is_some()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn into_families(self) -> Vec<String> {
        self.families
    }
}

/// Renders the stack as a CSS `font-family` value, quoting names with spaces.
impl fmt::Display for FontStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, family) in self.families.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if family.contains(char::is_whitespace) {
                write!(f, "\"{family}\"")?;
            } else {
                f.write_str(family)?;
            }
        }
        Ok(())
    }
}
