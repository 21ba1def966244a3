//! CLI application entry point and configuration.
//!
//! This module loads the deployment configuration, sets up logging and
//! dispatches subcommands to the analysis layer.

use crate::commands::{
    Cli, Commands, EntityArgs, InitArgs, LangArgs, NormalizeArgs, OutputFormat, RecordArgs,
};
use crate::error::{CliError, Result};
use clap::Parser;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use watchline_analysis::{
    detect_language, extract_entity_text, parse_record, LabelTable, LanguageSets, TextNormalizer,
};
use watchline_core::config::{LogFormat, LogLevel, NormalizationSettings};
use watchline_core::WatchlineConfig;

/// Configuration for the CLI application.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Deployment configuration.
    pub watchline: WatchlineConfig,
    /// Logging verbosity from `-v` flags; zero defers to the config file.
    pub verbosity: u8,
}

/// Main CLI application.
#[derive(Debug)]
pub struct App {
    /// Application configuration.
    pub config: AppConfig,
    /// Parsed CLI arguments.
    pub cli: Cli,
}

impl App {
    /// Create a new application instance from command line arguments.
    pub fn new() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    /// Create an application instance from already parsed arguments.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let config = Self::load_config(&cli)?;
        Ok(Self { config, cli })
    }

    /// Load configuration: the `--config` file when given, otherwise the
    /// default location when it exists, otherwise built-in defaults.
    fn load_config(cli: &Cli) -> Result<AppConfig> {
        // init writes the file instead of reading it
        if matches!(cli.command, Commands::Init(_)) {
            return Ok(AppConfig {
                watchline: WatchlineConfig::default(),
                verbosity: cli.verbose,
            });
        }

        let watchline = match &cli.config {
            Some(path) if path.exists() => WatchlineConfig::load(path)?,
            Some(path) => {
                return Err(CliError::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            None => match WatchlineConfig::default_path() {
                Ok(path) if path.exists() => WatchlineConfig::load(&path)?,
                _ => WatchlineConfig::default(),
            },
        };

        Ok(AppConfig {
            watchline,
            verbosity: cli.verbose,
        })
    }

    /// Run the application.
    pub fn run(self) -> Result<()> {
        self.setup_logging();

        let output = self.execute()?;
        if !output.is_empty() {
            println!("{}", output);
        }
        Ok(())
    }

    /// Execute the subcommand and return what it prints.
    pub fn execute(&self) -> Result<String> {
        match &self.cli.command {
            Commands::Normalize(args) => {
                let text = read_input(args.text.as_deref())?;
                Ok(self.handle_normalize(args, &text))
            }
            Commands::Lang(args) => {
                let text = read_input(args.text.as_deref())?;
                Ok(self.handle_lang(args, &text))
            }
            Commands::Entity(args) => {
                let text = read_input(args.text.as_deref())?;
                Ok(self.handle_entity(args, &text))
            }
            Commands::Record(args) => {
                let text = read_input(args.text.as_deref())?;
                self.handle_record(args, &text)
            }
            Commands::Init(args) => self.handle_init(args),
        }
    }

    /// Set up logging from `-v` flags, falling back to the config file.
    fn setup_logging(&self) {
        let logging = &self.config.watchline.logging;
        let level = match self.config.verbosity {
            0 => level_filter(logging.level),
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };

        let builder = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr);

        // Ignore errors if a subscriber is already installed
        let _ = match logging.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Text => builder.compact().try_init(),
        };
    }

    fn handle_normalize(&self, args: &NormalizeArgs, text: &str) -> String {
        let settings = match &args.locale {
            Some(locale) => NormalizationSettings {
                locale: locale.clone(),
                ..self.config.watchline.normalization.clone()
            },
            None => self.config.watchline.normalization.clone(),
        };
        let normalizer = TextNormalizer::new(&settings);
        let mut cfg = args.mode.config();
        if args.pure {
            cfg = cfg.with_pure(true);
        }
        debug!("Normalizing with {:?}, target {:?}", cfg, normalizer.target());
        normalizer.normalize(text, cfg)
    }

    fn handle_lang(&self, args: &LangArgs, text: &str) -> String {
        let mut sets = LanguageSets::from_config(&self.config.watchline);
        sets.protected
            .extend(args.protect.iter().map(|c| c.trim().to_ascii_lowercase()));
        sets.defaults
            .extend(args.defaults.iter().map(|c| c.trim().to_ascii_lowercase()));
        info!(
            "Detecting language with {} protected and {} expected codes",
            sets.protected.len(),
            sets.defaults.len()
        );
        detect_language(text, &sets.protected, &sets.defaults)
    }

    fn handle_entity(&self, args: &EntityArgs, text: &str) -> String {
        extract_entity_text(text, args.offset, args.length)
    }

    fn handle_record(&self, args: &RecordArgs, text: &str) -> Result<String> {
        let bundle = self.config.watchline.locale_bundle()?;
        let labels = LabelTable::from_locale(&bundle);
        let record = parse_record(text, &labels);

        match args.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&record)?),
            OutputFormat::Text => Ok(record
                .iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(field, value)| format!("{}: {}", field.as_str(), value))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn handle_init(&self, args: &InitArgs) -> Result<String> {
        let path = match &self.cli.config {
            Some(path) => path.clone(),
            None => WatchlineConfig::default_path()?,
        };
        if path.exists() && !args.force {
            return Err(CliError::Argument(format!(
                "{} already exists, pass --force to overwrite",
                path.display()
            )));
        }
        write_default_config(&path)?;
        Ok(path.display().to_string())
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

/// Use `text` when given, otherwise read standard input minus one trailing
/// line break.
fn read_input(text: Option<&str>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(strip_trailing_newline(buffer))
}

fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

/// Write a default configuration file, for first-time setup.
pub fn write_default_config(path: &Path) -> Result<()> {
    WatchlineConfig::default().save(path)?;
    info!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let app = App::new()?;
    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[normalization]
locale = "zh-Hant"

[languages]
protect = ["zh"]

[locale.labels]
colon = ": "
level = "Level"
status = "Status"
"#;

    fn app_with(args: &[&str]) -> App {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, CONFIG).expect("write config");

        let mut argv = vec!["watchline", "--config"];
        let path_str = path.to_str().expect("utf-8 temp path");
        argv.push(path_str);
        argv.extend_from_slice(args);
        App::from_cli(Cli::try_parse_from(argv).expect("arguments should parse"))
            .expect("app should load")
    }

    #[test]
    fn normalize_uses_configured_locale() {
        let app = app_with(&["normalize", "國語 ｏｋ"]);
        assert_eq!(app.execute().expect("execute"), "国语 ok");

        let app = app_with(&["normalize", "--locale", "en", "國語 ｏｋ"]);
        assert_eq!(app.execute().expect("execute"), "國語 ok");
    }

    #[test]
    fn normalize_pure_flag_strips_symbols() {
        let app = app_with(&["normalize", "--pure", "hi #there$"]);
        assert_eq!(app.execute().expect("execute"), "hithere");
    }

    #[test]
    fn entity_slices_by_utf16_units() {
        let app = app_with(&["entity", "--offset", "2", "--length", "4", "😀t.me"]);
        assert_eq!(app.execute().expect("execute"), "t.me");
    }

    #[test]
    fn record_prints_non_empty_fields() {
        let app = app_with(&["record", "Level: 3\nStatus: Banned"]);
        assert_eq!(app.execute().expect("execute"), "status: Banned\nlevel: 3");

        let app = app_with(&["record", "--format", "json", "???"]);
        let out = app.execute().expect("execute");
        let json: serde_json::Value = serde_json::from_str(&out).expect("json output");
        assert_eq!(json["unknown"], "???");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from([
            "watchline",
            "--config",
            "/nonexistent/watchline.toml",
            "lang",
            "x",
        ])
        .expect("arguments should parse");
        assert!(matches!(App::from_cli(cli), Err(CliError::Config(_))));
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let path_str = path.to_str().expect("utf-8 temp path");

        let init = |force: bool| {
            let mut argv = vec!["watchline", "--config", path_str, "init"];
            if force {
                argv.push("--force");
            }
            App::from_cli(Cli::try_parse_from(argv).expect("arguments should parse"))
                .expect("app should load")
                .execute()
        };

        assert_eq!(init(false).expect("first init"), path.display().to_string());
        assert!(matches!(init(false), Err(CliError::Argument(_))));
        assert!(init(true).is_ok());
    }

    #[test]
    fn default_config_can_be_written_and_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        write_default_config(&path).expect("write default config");
        let loaded = WatchlineConfig::load(&path).expect("load");
        assert!(loaded.normalization.enabled);
    }

    #[test]
    fn stdin_style_input_loses_one_line_break() {
        assert_eq!(strip_trailing_newline("text\r\n".to_string()), "text");
        assert_eq!(strip_trailing_newline("text\n\n".to_string()), "text\n");
        assert_eq!(strip_trailing_newline("text".to_string()), "text");
    }
}
