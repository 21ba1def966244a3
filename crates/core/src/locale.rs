//! Locale bundle: user-facing and report-label strings for one deployment.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Localized strings keyed by message id.
///
/// Lookups never fail: a missing key resolves to the key itself, so an
/// incomplete bundle degrades to readable identifiers instead of blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleBundle {
    /// BCP 47 style tag of the bundle, e.g. `zh-Hans`.
    #[serde(default)]
    pub tag: String,

    /// Key to localized string.
    #[serde(default)]
    pub strings: HashMap<String, String>,
}

impl LocaleBundle {
    /// Create a bundle from a tag and key/value pairs.
    pub fn new<I, K, V>(tag: impl Into<String>, strings: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            tag: tag.into(),
            strings: strings
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up `key`, falling back to the key itself.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Whether the bundle defines `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }

    /// Parse a bundle from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Parse(format!("Failed to parse locale bundle: {}", e)))
    }

    /// Load a bundle from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::FileSystem(format!(
                "Failed to read locale bundle {}: {}",
                path.display(),
                e
            ))
        })?;
        let bundle = Self::from_toml_str(&content)?;
        tracing::info!(
            "Loaded locale bundle {} ({} strings)",
            bundle.tag,
            bundle.strings.len()
        );
        Ok(bundle)
    }

    /// Overlay `other` on top of this bundle; keys in `other` win.
    pub fn merge(&mut self, other: LocaleBundle) {
        if !other.tag.is_empty() {
            self.tag = other.tag;
        }
        self.strings.extend(other.strings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        let bundle = LocaleBundle::new("en", [("level", "Level")]);
        assert_eq!(bundle.get("level"), "Level");
        assert_eq!(bundle.get("user_score"), "user_score");
    }

    #[test]
    fn bundle_parses_from_toml() {
        let bundle = LocaleBundle::from_toml_str(
            r#"
tag = "zh-Hans"

[strings]
colon = "："
status = "状态"
"#,
        )
        .expect("bundle should parse");
        assert_eq!(bundle.tag, "zh-Hans");
        assert_eq!(bundle.get("colon"), "：");
        assert!(bundle.contains("status"));
    }

    #[test]
    fn merge_overrides_existing_keys() {
        let mut base = LocaleBundle::new("en", [("colon", ": "), ("more", "More")]);
        base.merge(LocaleBundle::new("", [("more", "Extra")]));
        assert_eq!(base.tag, "en");
        assert_eq!(base.get("more"), "Extra");
        assert_eq!(base.get("colon"), ": ");
    }
}
