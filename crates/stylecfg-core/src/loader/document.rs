//! On-disk document schema.
//!
//! [`RawStyleConfig`] mirrors the file exactly as written: every key is
//! optional so that a missing key is reported by validation with its full path
//! instead of a generic decoder message.  Named tables are decoded into
//! [`Entries`], which keeps source order and duplicate keys so validation can
//! reject duplicates that a JSON parser would otherwise drop silently.
//!
//! ```toml
//! content = ["./template/**/*.html", "./app/**/*.py"]
//! plugins = []
//!
//! [theme.extend.fontFamily]
//! poppins = ["Poppins", "sans-serif"]
//!
//! [theme.extend.colors]
//! primary = "var(--color-primary)"
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::style_config::StyleConfig;

/// Top-level document.
///
/// Field order matters for TOML output: arrays must precede the `theme` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStyleConfig {
    /// Content patterns.  Required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<String>>,
    /// Plugin identifiers.  Treated as empty when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,
    /// Theme section.  Required, and must contain `extend`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<RawTheme>,
}

/// The `theme` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extend: Option<RawExtend>,
}

/// The `theme.extend` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExtend {
    /// Alias → family list.
    #[serde(rename = "fontFamily", alias = "font_family", default)]
    pub font_family: Entries<Vec<String>>,
    /// Role → token text.
    #[serde(default)]
    pub colors: Entries<String>,
}

/// A string-keyed table decoded in source order, duplicates included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entries<V>(pub Vec<(String, V)>);

impl<V> Entries<V> {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for Entries<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> FromIterator<(String, V)> for Entries<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V: Serialize> Serialize for Entries<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

struct EntriesVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
    type Value = Entries<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of named entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            entries.push((key, value));
        }
        Ok(Entries(entries))
    }
}

impl StyleConfig {
    /// Converts the validated value back into its document form.
    ///
    /// Every key is written out, including an empty `plugins` list, so the
    /// result loads back into an equal configuration.
    pub fn to_document(&self) -> RawStyleConfig {
        RawStyleConfig {
            content: Some(self.content_globs().to_vec()),
            plugins: Some(self.plugins().iter().cloned().collect()),
            theme: Some(RawTheme {
                extend: Some(RawExtend {
                    font_family: self
                        .font_aliases()
                        .iter()
                        .map(|(alias, stack)| (alias.clone(), stack.families().to_vec()))
                        .collect(),
                    colors: self
                        .semantic_colors()
                        .iter()
                        .map(|(role, token)| (role.clone(), token.to_string()))
                        .collect(),
                }),
            }),
        }
    }
}
