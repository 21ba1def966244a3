//! Concrete language detectors.
//!
//! - [`WhatlangDetector`]: trigram model, used as the primary detector.
//! - [`LinguaDetector`]: n-gram model with its own training data, used to
//!   cross-check the primary verdict.
//! - [`ScriptGuesser`]: rule-based guess from the dominant writing system,
//!   used when the primary detector has nothing usable.

use super::LanguageDetector;
use crate::error::AnalysisResult;
use lingua::{LanguageDetector as LinguaModel, LanguageDetectorBuilder};
use once_cell::sync::Lazy;
use whatlang::Script;

/// Primary detector backed by `whatlang`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    /// Create the detector.
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn name(&self) -> &str {
        "whatlang"
    }

    fn detect(&self, text: &str) -> AnalysisResult<Option<String>> {
        Ok(whatlang::detect(text).map(|info| {
            let code = info.lang().code();
            iso_639_1(code).unwrap_or(code).to_string()
        }))
    }
}

/// Map the ISO 639-3 codes `whatlang` reports to the two-letter codes the
/// rest of the bot uses.
fn iso_639_1(code: &str) -> Option<&'static str> {
    let short = match code {
        "afr" => "af",
        "aka" => "ak",
        "amh" => "am",
        "ara" => "ar",
        "aze" => "az",
        "bel" => "be",
        "ben" => "bn",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cmn" => "zh",
        "dan" => "da",
        "deu" => "de",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "guj" => "gu",
        "heb" => "he",
        "hin" => "hi",
        "hrv" => "hr",
        "hun" => "hu",
        "hye" => "hy",
        "ind" => "id",
        "ita" => "it",
        "jav" => "jv",
        "jpn" => "ja",
        "kan" => "kn",
        "kat" => "ka",
        "khm" => "km",
        "kor" => "ko",
        "lat" => "la",
        "lav" => "lv",
        "lit" => "lt",
        "mal" => "ml",
        "mar" => "mr",
        "mkd" => "mk",
        "mya" => "my",
        "nep" => "ne",
        "nld" => "nl",
        "nob" => "nb",
        "ori" => "or",
        "pan" => "pa",
        "pes" => "fa",
        "pol" => "pl",
        "por" => "pt",
        "ron" => "ro",
        "rus" => "ru",
        "sin" => "si",
        "slk" => "sk",
        "slv" => "sl",
        "sna" => "sn",
        "spa" => "es",
        "srp" => "sr",
        "swe" => "sv",
        "tam" => "ta",
        "tel" => "te",
        "tgl" => "tl",
        "tha" => "th",
        "tuk" => "tk",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "uzb" => "uz",
        "vie" => "vi",
        "yid" => "yi",
        "zul" => "zu",
        _ => return None,
    };
    Some(short)
}

// Models load lazily per language on first use.
static LINGUA: Lazy<LinguaModel> =
    Lazy::new(|| LanguageDetectorBuilder::from_all_languages().build());

/// Cross-check detector backed by `lingua`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinguaDetector;

impl LinguaDetector {
    /// Create the detector. The shared model is built on first detection.
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for LinguaDetector {
    fn name(&self) -> &str {
        "lingua"
    }

    fn detect(&self, text: &str) -> AnalysisResult<Option<String>> {
        Ok(LINGUA
            .detect_language_of(text)
            .map(|language| language.iso_code_639_1().to_string()))
    }
}

/// Outcome of the rule-based guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guess {
    /// A language identified by its script alone.
    Language(&'static str),
    /// The script is shared by many languages or no letters were found.
    Unknown,
}

/// Language a script implies on its own, `None` for shared scripts.
fn script_language(script: Script) -> Option<&'static str> {
    let code = match script {
        Script::Greek => "el",
        Script::Armenian => "hy",
        Script::Hebrew => "he",
        Script::Arabic => "ar",
        Script::Devanagari => "hi",
        Script::Bengali => "bn",
        Script::Gurmukhi => "pa",
        Script::Gujarati => "gu",
        Script::Oriya => "or",
        Script::Tamil => "ta",
        Script::Telugu => "te",
        Script::Kannada => "kn",
        Script::Malayalam => "ml",
        Script::Sinhala => "si",
        Script::Thai => "th",
        Script::Myanmar => "my",
        Script::Georgian => "ka",
        Script::Hangul => "ko",
        Script::Ethiopic => "am",
        Script::Khmer => "km",
        Script::Hiragana | Script::Katakana => "ja",
        Script::Mandarin => "zh",
        _ => return None,
    };
    Some(code)
}

fn script_of(c: char) -> Option<Script> {
    let mut buf = [0u8; 4];
    whatlang::detect_script(c.encode_utf8(&mut buf))
}

/// Share of script-bearing characters the dominant script needs.
const DOMINANT_SHARE: f64 = 0.4;

/// Fallback detector that guesses from the writing system.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptGuesser;

impl ScriptGuesser {
    /// Create the guesser.
    pub fn new() -> Self {
        Self
    }

    /// Guess the language of `text` from its dominant script.
    pub fn guess(&self, text: &str) -> Guess {
        let mut counts: Vec<(Script, usize)> = Vec::new();
        let mut total = 0usize;
        for script in text.chars().filter_map(script_of) {
            total += 1;
            match counts.iter_mut().find(|(s, _)| *s == script) {
                Some((_, n)) => *n += 1,
                None => counts.push((script, 1)),
            }
        }
        if total == 0 {
            return Guess::Unknown;
        }

        let count_of = |wanted: Script| {
            counts
                .iter()
                .find(|(s, _)| *s == wanted)
                .map(|(_, n)| *n)
                .unwrap_or(0)
        };

        // Japanese mixes kana with kanji; any kana among CJK text decides it.
        let kana = count_of(Script::Hiragana) + count_of(Script::Katakana);
        if kana > 0 && share(kana + count_of(Script::Mandarin), total) >= DOMINANT_SHARE {
            return Guess::Language("ja");
        }

        let Some(&(dominant, n)) = counts.iter().max_by_key(|(_, n)| *n) else {
            return Guess::Unknown;
        };
        if share(n, total) < DOMINANT_SHARE {
            return Guess::Unknown;
        }

        script_language(dominant)
            .map(Guess::Language)
            .unwrap_or(Guess::Unknown)
    }
}

fn share(part: usize, total: usize) -> f64 {
    part as f64 / total as f64
}

impl LanguageDetector for ScriptGuesser {
    fn name(&self) -> &str {
        "script-guess"
    }

    fn detect(&self, text: &str) -> AnalysisResult<Option<String>> {
        Ok(match self.guess(text) {
            Guess::Language(code) => Some(code.to_string()),
            Guess::Unknown => None,
        })
    }
}
