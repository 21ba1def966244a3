//! Language identification by consensus of several heuristic detectors.
//!
//! The sample is first cleaned (symbols and emoji removed, short samples
//! tiled) and then run through a fixed cascade:
//!
//! 1. the primary detector proposes a language;
//! 2. the cross-check detector either confirms it or, when it disagrees with
//!    a language outside the expected set, overrides it;
//! 3. only when the primary detector has nothing usable does the rule-based
//!    guesser get a say.
//!
//! Protected languages are never reported. Each detector call is isolated:
//! an error or panic inside one detector counts as "no result" for that
//! detector only.

pub mod detectors;

use crate::error::AnalysisResult;
use crate::normalize::is_printable;
use crate::tables::{is_emoji, is_symbol};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};
use watchline_core::constants::MIN_DETECTION_CHARS;
use watchline_core::WatchlineConfig;

pub use detectors::{Guess, LinguaDetector, ScriptGuesser, WhatlangDetector};

/// A pluggable language detector.
pub trait LanguageDetector: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Detect the language of `text`; `Ok(None)` when undetermined.
    fn detect(&self, text: &str) -> AnalysisResult<Option<String>>;
}

/// Protected and expected language sets for one deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSets {
    /// Codes never reported.
    pub protected: HashSet<String>,
    /// Expected baseline languages, a tie-break signal only.
    pub defaults: HashSet<String>,
}

impl LanguageSets {
    /// Build the sets from deployment configuration.
    pub fn from_config(config: &WatchlineConfig) -> Self {
        Self {
            protected: config.protected_languages(),
            defaults: config.default_languages(),
        }
    }
}

/// How the cross-check verdict is weighed against the primary one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsensusPolicy {
    /// Accept the cross-check when it agrees with the primary verdict or
    /// names a language outside the expected set.
    #[default]
    TrustUnexpected,
    /// Accept only exact agreement.
    RequireAgreement,
}

impl ConsensusPolicy {
    /// Reconcile two non-protected verdicts; `""` when undecided.
    pub fn reconcile(
        self,
        primary: &str,
        cross_check: &str,
        defaults: &HashSet<String>,
    ) -> String {
        if primary.is_empty() || cross_check.is_empty() {
            return String::new();
        }
        let accepted = match self {
            Self::TrustUnexpected => cross_check == primary || !defaults.contains(cross_check),
            Self::RequireAgreement => cross_check == primary,
        };
        if accepted {
            cross_check.to_string()
        } else {
            String::new()
        }
    }
}

/// Reconcile with the default policy.
///
/// The cross-check verdict wins when it agrees with the primary one, or when
/// it names a language outside `defaults`. Any other combination is
/// ambiguous and yields `""`.
pub fn reconcile(primary: &str, cross_check: &str, defaults: &HashSet<String>) -> String {
    ConsensusPolicy::default().reconcile(primary, cross_check, defaults)
}

/// Clean `text` for detection.
///
/// Symbols and emoji are removed. A sample shorter than the minimum length
/// also loses its non-printable characters and is then repeated end to end
/// until it reaches the minimum. Returns `""` when nothing usable is left.
pub fn prepare_sample(text: &str) -> String {
    let mut sample: String = text
        .chars()
        .filter(|&c| !is_symbol(c) && !is_emoji(c))
        .collect();

    if sample.chars().count() < MIN_DETECTION_CHARS {
        sample = sample.chars().filter(|&c| is_printable(c)).collect();
        if sample.trim().is_empty() {
            return String::new();
        }
        let len = sample.chars().count();
        sample = sample.repeat(MIN_DETECTION_CHARS.div_ceil(len));
    }

    if sample.trim().is_empty() {
        return String::new();
    }

    sample
}

/// Detector cascade reconciled by a [`ConsensusPolicy`].
pub struct LanguageEngine {
    primary: Box<dyn LanguageDetector>,
    cross_check: Box<dyn LanguageDetector>,
    fallback: Box<dyn LanguageDetector>,
    policy: ConsensusPolicy,
}

impl LanguageEngine {
    /// Assemble an engine from three detectors.
    pub fn new(
        primary: Box<dyn LanguageDetector>,
        cross_check: Box<dyn LanguageDetector>,
        fallback: Box<dyn LanguageDetector>,
    ) -> Self {
        Self {
            primary,
            cross_check,
            fallback,
            policy: ConsensusPolicy::default(),
        }
    }

    /// Replace the consensus policy.
    pub fn with_policy(mut self, policy: ConsensusPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Detect the language of `text`, or `""` when undetermined.
    pub fn detect(
        &self,
        text: &str,
        protected: &HashSet<String>,
        defaults: &HashSet<String>,
    ) -> String {
        let sample = prepare_sample(text);
        if sample.is_empty() {
            return String::new();
        }

        let primary = run_isolated(self.primary.as_ref(), &sample, protected);
        if !primary.is_empty() {
            let cross_check = run_isolated(self.cross_check.as_ref(), &sample, protected);
            let verdict = self.policy.reconcile(&primary, &cross_check, defaults);
            debug!(
                "Language consensus: primary={:?} cross_check={:?} verdict={:?}",
                primary, cross_check, verdict
            );
            return verdict;
        }

        run_isolated(self.fallback.as_ref(), &sample, protected)
    }

    /// Detect with the sets from [`LanguageSets`].
    pub fn detect_with(&self, text: &str, sets: &LanguageSets) -> String {
        self.detect(text, &sets.protected, &sets.defaults)
    }
}

impl Default for LanguageEngine {
    fn default() -> Self {
        Self::new(
            Box::new(WhatlangDetector::new()),
            Box::new(LinguaDetector::new()),
            Box::new(ScriptGuesser::new()),
        )
    }
}

static DEFAULT_ENGINE: Lazy<LanguageEngine> = Lazy::new(LanguageEngine::default);

/// Detect the language of `text` with the default detector cascade.
pub fn detect_language(
    text: &str,
    protected: &HashSet<String>,
    defaults: &HashSet<String>,
) -> String {
    DEFAULT_ENGINE.detect(text, protected, defaults)
}

/// Sentinels some detectors use for "could not tell".
fn is_indeterminate(code: &str) -> bool {
    code.is_empty() || code.eq_ignore_ascii_case("unknown") || code.eq_ignore_ascii_case("und")
}

/// Run one detector, turning errors, panics, sentinels and protected codes
/// into `""`.
fn run_isolated(
    detector: &dyn LanguageDetector,
    text: &str,
    protected: &HashSet<String>,
) -> String {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| detector.detect(text)));
    let code = match outcome {
        Ok(Ok(Some(code))) => code.trim().to_ascii_lowercase(),
        Ok(Ok(None)) => return String::new(),
        Ok(Err(e)) => {
            debug!("Language detector {} failed: {}", detector.name(), e);
            return String::new();
        }
        Err(_) => {
            warn!("Language detector {} panicked", detector.name());
            return String::new();
        }
    };

    if is_indeterminate(&code) || protected.contains(&code) {
        return String::new();
    }
    code
}
