use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_LOCALE};
use crate::locale::LocaleBundle;
use crate::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Main configuration for Watchline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WatchlineConfig {
    /// Text normalization switches.
    pub normalization: NormalizationSettings,

    /// Protected and expected language sets.
    pub languages: LanguageConfig,

    /// Locale bundle source.
    pub locale: LocaleConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Deployment-wide normalization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationSettings {
    /// Global switch for character substitution, NFKC and script conversion.
    pub enabled: bool,

    /// Deployment locale tag, e.g. `en` or `zh-Hans`.
    pub locale: String,
}

/// Language code sets used by the detector consensus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Codes that must never be reported as detected.
    pub protect: Vec<String>,

    /// Expected languages in user bios.
    pub bio: Vec<String>,

    /// Expected languages in user names.
    pub name: Vec<String>,

    /// Expected languages in sticker titles.
    pub sticker: Vec<String>,

    /// Expected languages in message text.
    pub text: Vec<String>,
}

/// Where the locale bundle comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Optional TOML bundle file.
    pub path: Option<PathBuf>,

    /// Inline strings, applied on top of the file bundle.
    pub labels: std::collections::HashMap<String, String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level.
    pub level: LogLevel,

    /// Log format.
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level.
    Error,

    /// Warning level.
    Warn,

    /// Info level.
    Info,

    /// Debug level.
    Debug,

    /// Trace level.
    Trace,
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format.
    Json,

    /// Text format.
    Text,

    /// Pretty format.
    Pretty,
}

impl WatchlineConfig {
    /// Default config file location under the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::NotFound("Cannot find config directory".to_string()))?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::FileSystem(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&content)
    }

    /// Save configuration to file, creating missing parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Parse(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| Error::FileSystem(format!("Failed to write config file: {}", e)))
    }

    /// Reject language codes that are empty or not lowercase ASCII tags.
    pub fn validate(&self) -> Result<()> {
        let sets = [
            ("protect", &self.languages.protect),
            ("bio", &self.languages.bio),
            ("name", &self.languages.name),
            ("sticker", &self.languages.sticker),
            ("text", &self.languages.text),
        ];
        for (set_name, codes) in sets {
            if let Some(bad) = codes.iter().find(|code| !is_language_code(code)) {
                return Err(Error::validation(format!(
                    "languages.{} contains invalid code {:?}",
                    set_name, bad
                )));
            }
        }

        if self.normalization.locale.trim().is_empty() {
            return Err(Error::config("normalization.locale must not be empty"));
        }

        Ok(())
    }

    /// Protected language codes.
    pub fn protected_languages(&self) -> HashSet<String> {
        self.languages.protect.iter().cloned().collect()
    }

    /// Union of every per-surface expected language set.
    pub fn default_languages(&self) -> HashSet<String> {
        let l = &self.languages;
        l.bio
            .iter()
            .chain(&l.name)
            .chain(&l.sticker)
            .chain(&l.text)
            .cloned()
            .collect()
    }

    /// Resolve the locale bundle: file first, inline labels on top.
    pub fn locale_bundle(&self) -> Result<LocaleBundle> {
        let mut bundle = match &self.locale.path {
            Some(path) => LocaleBundle::load(path)?,
            None => LocaleBundle::default(),
        };
        if bundle.tag.is_empty() {
            bundle.tag = self.normalization.locale.clone();
        }
        bundle.merge(LocaleBundle {
            tag: String::new(),
            strings: self.locale.labels.clone(),
        });
        Ok(bundle)
    }
}

fn is_language_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= 8
        && code
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '-')
}

impl Default for NormalizationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[normalization]
enabled = true
locale = "zh-Hans"

[languages]
protect = ["zh"]
bio = ["en"]
name = ["en", "ja"]
text = ["ru"]

[locale.labels]
colon = ": "
level = "Level"

[logging]
level = "debug"
format = "json"
"#;

    #[test]
    fn parses_sections_and_unions_default_languages() {
        let config = WatchlineConfig::from_toml_str(SAMPLE).expect("config should parse");
        assert_eq!(config.normalization.locale, "zh-Hans");
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.protected_languages().contains("zh"));

        let defaults = config.default_languages();
        assert_eq!(defaults.len(), 3);
        for code in ["en", "ja", "ru"] {
            assert!(defaults.contains(code), "missing default language {}", code);
        }
    }

    #[test]
    fn rejects_invalid_language_codes() {
        let err = WatchlineConfig::from_toml_str("[languages]\nprotect = [\"EN\"]\n")
            .expect_err("uppercase code should be rejected");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = WatchlineConfig::from_toml_str("").expect("empty config is valid");
        assert!(config.normalization.enabled);
        assert_eq!(config.normalization.locale, "en");
        assert!(config.default_languages().is_empty());
    }

    #[test]
    fn save_and_load_round_trip_through_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let config = WatchlineConfig::from_toml_str(SAMPLE).expect("config should parse");
        config.save(&path).expect("save");

        let loaded = WatchlineConfig::load(&path).expect("load");
        assert_eq!(loaded.normalization.locale, "zh-Hans");
        assert_eq!(loaded.languages.name, vec!["en".to_string(), "ja".to_string()]);
    }

    #[test]
    fn locale_bundle_takes_tag_from_normalization_locale() {
        let config = WatchlineConfig::from_toml_str(SAMPLE).expect("config should parse");
        let bundle = config.locale_bundle().expect("bundle");
        assert_eq!(bundle.tag, "zh-Hans");
        assert_eq!(bundle.get("level"), "Level");
    }
}
