//! CLI command definitions for Watchline.
//!
//! Every subcommand takes its input text as an optional positional argument
//! and reads standard input when it is omitted.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use watchline_analysis::NormalizationConfig;

/// Main CLI application.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Logging verbosity
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "WATCHLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize text for matching
    Normalize(NormalizeArgs),

    /// Detect the language of text
    Lang(LangArgs),

    /// Extract entity text by UTF-16 offset and length
    Entity(EntityArgs),

    /// Parse a report message into its fields
    Record(RecordArgs),

    /// Write a default configuration file
    Init(InitArgs),
}

/// Normalization arguments.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Text to normalize (stdin when omitted)
    pub text: Option<String>,

    /// Normalization mode
    #[arg(short, long, default_value_t = NormalizeMode::Normal)]
    pub mode: NormalizeMode,

    /// Also keep only the pure whitelist
    #[arg(long)]
    pub pure: bool,

    /// Override the configured deployment locale
    #[arg(long)]
    pub locale: Option<String>,
}

/// Language detection arguments.
#[derive(Args, Debug)]
pub struct LangArgs {
    /// Text to inspect (stdin when omitted)
    pub text: Option<String>,

    /// Extra protected language codes
    #[arg(long, value_delimiter = ',')]
    pub protect: Vec<String>,

    /// Extra expected language codes
    #[arg(long = "default", value_delimiter = ',')]
    pub defaults: Vec<String>,
}

/// Entity extraction arguments.
#[derive(Args, Debug)]
pub struct EntityArgs {
    /// Entity offset in UTF-16 code units
    #[arg(long)]
    pub offset: u32,

    /// Entity length in UTF-16 code units
    #[arg(long)]
    pub length: u32,

    /// Full message text (stdin when omitted)
    pub text: Option<String>,
}

/// Report parsing arguments.
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Report text (stdin when omitted)
    pub text: Option<String>,

    /// Output format
    #[arg(short, long, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Configuration initialization arguments.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Normalization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NormalizeMode {
    /// Printable filter only
    Printable,
    /// Substitution, script conversion and printable filter
    Normal,
    /// Every step, including the pure filter
    Strict,
}

impl NormalizeMode {
    /// Step switches for this mode.
    pub fn config(self) -> NormalizationConfig {
        match self {
            Self::Printable => NormalizationConfig::printable(),
            Self::Normal => NormalizationConfig::normal(),
            Self::Strict => NormalizationConfig::strict(),
        }
    }
}

impl std::fmt::Display for NormalizeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Printable => write!(f, "printable"),
            Self::Normal => write!(f, "normal"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `field: value` line per non-empty field
    Text,
    /// JSON object with every field
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
