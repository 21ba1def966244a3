use thiserror::Error;

/// Errors that can occur inside the analysis pipeline.
///
/// Public entry points never return these; they log and fall back to the
/// empty sentinel. The variants exist so the fallible internals can use `?`.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A detector could not produce a verdict.
    #[error("Language detection error: {0}")]
    LanguageDetection(String),
    /// UTF-16 slicing or decoding failure.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
