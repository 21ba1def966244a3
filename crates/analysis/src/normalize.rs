//! Text normalization: substitution, NFKC, script conversion and filtering.
//!
//! Normalization is a pure string transformation. Every step is switched by a
//! [`NormalizationConfig`] value passed per call, so there is no hidden global
//! state. The steps always run in the same order:
//!
//! 1. character substitution through the [`SubstitutionTable`]s
//! 2. NFKC composition (paired with substitution)
//! 3. Traditional to Simplified Chinese conversion
//! 4. printable filter
//! 5. pure whitelist filter

use crate::tables::{to_simplified, SubstitutionTable};
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;
use watchline_core::config::NormalizationSettings;

/// Per-call normalization switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationConfig {
    /// Run the substitution tables and NFKC.
    pub substitute: bool,
    /// Convert Traditional Chinese to the target script.
    pub canonicalize_script: bool,
    /// Drop non-printable characters (newline, carriage return and tab survive).
    pub filter_printable: bool,
    /// Keep only the pure whitelist.
    pub filter_pure: bool,
}

impl NormalizationConfig {
    /// Printable filter only; how message text is usually read.
    pub const fn printable() -> Self {
        Self {
            substitute: false,
            canonicalize_script: false,
            filter_printable: true,
            filter_pure: false,
        }
    }

    /// Substitution, script conversion and printable filter.
    pub const fn normal() -> Self {
        Self {
            substitute: true,
            canonicalize_script: true,
            filter_printable: true,
            filter_pure: false,
        }
    }

    /// Every step enabled.
    pub const fn strict() -> Self {
        Self {
            substitute: true,
            canonicalize_script: true,
            filter_printable: true,
            filter_pure: true,
        }
    }

    /// Builder-style toggle for the pure filter.
    pub const fn with_pure(mut self, pure: bool) -> Self {
        self.filter_pure = pure;
        self
    }
}

/// Script the converter writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetScript {
    /// Simplified Chinese.
    Simplified,
}

/// Script family of a deployment locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFamily {
    /// Chinese deployments (`zh`, `zh-Hans`, `zh-Hant`, `*-Hans`, ...).
    Han,
    /// Everything else.
    Other,
}

impl ScriptFamily {
    /// Classify a locale tag such as `zh-Hans`, `zh_TW` or `en`.
    pub fn from_locale(tag: &str) -> Self {
        let mut subtags = tag.split(['-', '_']).map(str::trim);
        let primary = subtags.next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("zh")
            || subtags.any(|s| s.eq_ignore_ascii_case("hans") || s.eq_ignore_ascii_case("hant"))
        {
            Self::Han
        } else {
            Self::Other
        }
    }

    /// Conversion target for this family; `None` means no conversion.
    pub fn target_script(self) -> Option<TargetScript> {
        match self {
            Self::Han => Some(TargetScript::Simplified),
            Self::Other => None,
        }
    }
}

/// Normalize `text`.
///
/// Returns `""` when the input is empty or whitespace-only after
/// substitution. Script conversion happens only when
/// `cfg.canonicalize_script` is set and a `target` is given.
pub fn normalize(text: &str, cfg: NormalizationConfig, target: Option<TargetScript>) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut result = if cfg.substitute {
        substitute(text)
    } else {
        text.to_string()
    };

    if result.trim().is_empty() {
        return String::new();
    }

    if cfg.substitute {
        result = result.nfkc().collect();
    }

    if cfg.canonicalize_script {
        if let Some(TargetScript::Simplified) = target {
            result = to_simplified(&result);
        }
    }

    if cfg.filter_printable {
        result = printable_filter(&result);
    }

    if cfg.filter_pure {
        result = pure_filter(&result);
    }

    result
}

/// Apply every substitution table in order.
pub fn substitute(text: &str) -> String {
    text.chars()
        .map(|c| {
            SubstitutionTable::ALL
                .iter()
                .fold(c, |acc, table| table.substitute(acc))
        })
        .collect()
}

/// Keep printable characters plus `\n`, `\r` and `\t`.
pub fn printable_filter(text: &str) -> String {
    text.chars()
        .filter(|&c| is_printable(c) || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

/// Keep only ASCII alphanumerics, CJK unified ideographs U+4E00..=U+9FA5 and
/// the whitelisted punctuation.
pub fn pure_filter(text: &str) -> String {
    text.chars().filter(|&c| is_pure(c)).collect()
}

/// Whether `c` survives the pure filter.
pub fn is_pure(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || ('\u{4E00}'..='\u{9FA5}').contains(&c)
        || matches!(
            c,
            '.' | ','
                | ':'
                | '\''
                | '"'
                | '?'
                | '!'
                | '~'
                | ';'
                | '('
                | ')'
                | '。'
                | '，'
                | '？'
                | '！'
                | '～'
                | '@'
                | '“'
                | '”'
        )
}

/// Whether `c` is printable: the ASCII space, or any character outside the
/// "Other" (controls, format, surrogates, private use, unassigned) and
/// "Separator" general categories.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::SpaceSeparator
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// Normalizer bound to the deployment settings.
///
/// The global switch clears substitution and script conversion when it is
/// off; the locale decides the conversion target.
#[derive(Debug, Clone, Copy)]
pub struct TextNormalizer {
    enabled: bool,
    target: Option<TargetScript>,
}

impl TextNormalizer {
    /// Create a normalizer from deployment settings.
    pub fn new(settings: &NormalizationSettings) -> Self {
        Self {
            enabled: settings.enabled,
            target: ScriptFamily::from_locale(&settings.locale).target_script(),
        }
    }

    /// Conversion target derived from the locale.
    pub fn target(&self) -> Option<TargetScript> {
        self.target
    }

    /// Normalize `text` with `cfg`, gated by the deployment switch.
    pub fn normalize(&self, text: &str, cfg: NormalizationConfig) -> String {
        let mut cfg = cfg;
        if !self.enabled {
            cfg.substitute = false;
            cfg.canonicalize_script = false;
        }
        normalize(text, cfg, self.target)
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(&NormalizationSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(enabled: bool, locale: &str) -> NormalizationSettings {
        NormalizationSettings {
            enabled,
            locale: locale.to_string(),
        }
    }

    #[test]
    fn empty_and_whitespace_input_yield_empty_under_every_config() {
        let configs = [
            NormalizationConfig::default(),
            NormalizationConfig::printable(),
            NormalizationConfig::normal(),
            NormalizationConfig::strict(),
        ];
        for cfg in configs {
            for input in ["", " ", "\n\t  \r\n"] {
                assert_eq!(
                    normalize(input, cfg, Some(TargetScript::Simplified)),
                    "",
                    "input {:?} with {:?}",
                    input,
                    cfg
                );
            }
        }
    }

    #[test]
    fn substitution_and_nfkc_fold_lookalikes() {
        let cfg = NormalizationConfig {
            substitute: true,
            ..NormalizationConfig::default()
        };
        // fullwidth letters come out of NFKC, small capitals out of the table
        assert_eq!(normalize("\u{FF48}\u{FF49}", cfg, None), "hi");
        assert_eq!(normalize("\u{1D04}\u{029F}\u{1D07}\u{1D00}\u{0274}", cfg, None), "clean");
        assert_eq!(normalize("it\u{2019}s \u{2013} ok", cfg, None), "it's - ok");
    }

    #[test]
    fn substitution_is_skipped_when_not_requested() {
        let out = normalize("\u{FF48}\u{1D00}", NormalizationConfig::default(), None);
        assert_eq!(out, "\u{FF48}\u{1D00}");
    }

    #[test]
    fn script_conversion_is_locale_gated() {
        let han = TextNormalizer::new(&settings(true, "zh-Hans"));
        let other = TextNormalizer::new(&settings(true, "en"));
        let cfg = NormalizationConfig::normal();

        assert_eq!(han.normalize("說話 hello", cfg), "说话 hello");
        assert_eq!(other.normalize("說話 hello", cfg), "說話 hello");
    }

    #[test]
    fn global_switch_disables_substitution_and_conversion() {
        let off = TextNormalizer::new(&settings(false, "zh-Hant"));
        assert_eq!(
            off.normalize("說\u{FF48}", NormalizationConfig::normal()),
            "說\u{FF48}"
        );
    }

    #[test]
    fn locale_tags_map_to_script_families() {
        assert_eq!(ScriptFamily::from_locale("zh-Hans"), ScriptFamily::Han);
        assert_eq!(ScriptFamily::from_locale("zh_TW"), ScriptFamily::Han);
        assert_eq!(ScriptFamily::from_locale("yue-Hant"), ScriptFamily::Han);
        assert_eq!(ScriptFamily::from_locale("en"), ScriptFamily::Other);
        assert_eq!(ScriptFamily::from_locale(""), ScriptFamily::Other);
    }

    #[test]
    fn printable_filter_keeps_line_breaks_and_tabs() {
        let out = printable_filter("a\u{200B}b\u{0007}c\n\td\r\u{E000}e\u{00A0}f");
        assert_eq!(out, "abc\n\td\ref");
    }

    #[test]
    fn printable_filter_drops_unassigned_and_separators() {
        let cfg = NormalizationConfig::printable();
        assert_eq!(normalize("a\u{0378}\u{05FF}b", cfg, None), "ab");
        assert_eq!(normalize("x\u{2028}y\u{2029}z\u{3000}!", cfg, None), "xyz!");
        assert_eq!(normalize("\u{FFFF}\u{10FFFF}q\u{F0000}", cfg, None), "q");
        assert!(is_printable('中'));
        assert!(is_printable('😀'));
        assert!(!is_printable('\u{00AD}'));
    }

    #[test]
    fn pure_filter_keeps_whitelist_only() {
        let out = pure_filter("Hello, 世界！ #spam$ @me “ok” 😀 ü");
        assert_eq!(out, "Hello,世界！spam@me“ok”");
    }

    #[test]
    fn pure_filter_is_idempotent() {
        let samples = [
            "Buy now!!! 加我微信 vx123 💰💰",
            "plain ascii (with) punctuation; ok?",
            "\u{0000}\u{FFFF}混合 text ～ 。",
            "",
        ];
        for s in samples {
            let once = pure_filter(s);
            assert_eq!(pure_filter(&once), once);
        }
    }

    #[test]
    fn strict_config_runs_every_step_in_order() {
        let normalizer = TextNormalizer::new(&settings(true, "zh-Hans"));
        let out = normalizer.normalize("加\u{200B}入 國際 ｇｒｏｕｐ！ 😀", NormalizationConfig::strict());
        assert_eq!(out, "加入国际group!");
    }
}
