// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use log::{debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use bisub::app_config::{self, Config, MissingTranslation};
use bisub::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for MissingTranslation to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliMissingTranslation {
    /// Leave the translated line empty
    Empty,
    /// Repeat the original text
    Original,
}

impl From<CliMissingTranslation> for MissingTranslation {
    fn from(cli_policy: CliMissingTranslation) -> Self {
        match cli_policy {
            CliMissingTranslation::Empty => MissingTranslation::Empty,
            CliMissingTranslation::Original => MissingTranslation::Original,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for bisub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// bisub - bilingual subtitles
///
/// Translates every line of an SRT file and writes a copy that pairs each
/// original line with its translation.
#[derive(Parser, Debug)]
#[command(name = "bisub")]
#[command(version)]
#[command(about = "Translate SRT subtitles into bilingual subtitles")]
#[command(long_about = "bisub translates every subtitle line with the Anthropic Messages API and writes
<name>_translate.srt next to the input, with the translation under each original line.

EXAMPLES:
    bisub movie.srt                              # Translate to Chinese (default)
    bisub -t fr movie.srt                        # Translate to French
    bisub --context \"a cooking show\" movie.srt   # Tell the model where the lines come from
    bisub --on-failure original movie.srt        # Repeat the original when a line fails
    bisub completions bash > bisub.bash          # Generate bash completions

CONFIGURATION:
    ANTHROPIC_API_KEY and BASE_URL are required. They are read from the environment
    or from a .env file in the working directory. Other settings can be given on the
    command line or in a JSON file passed with --config.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file to translate
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the translation service
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// Model name to use for translation
    #[arg(short, long, env = "TRANSLATION_MODEL")]
    model: Option<String>,

    /// Maximum output tokens per translation
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Target language code (e.g., 'zh', 'fr', 'deu')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Where the subtitles come from, added to the prompt
    #[arg(long)]
    context: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// What to write when a line cannot be translated
    #[arg(long, value_enum)]
    on_failure: Option<CliMissingTranslation>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

impl CommandLineOptions {
    /// Build the effective configuration: file (or defaults), then CLI/env overrides
    fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(api_key) = &self.api_key {
            config.api_key = api_key.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(target_language) = &self.target_language {
            config.target_language = target_language.clone();
        }
        if let Some(context) = &self.context {
            config.context = Some(context.clone());
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(on_failure) = &self.on_failure {
            config.on_failure = on_failure.clone().into();
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone().into();
        }

        Ok(config)
    }
}

// @struct: Custom logger implementation
// The level is read from `log::max_level()` so it can be raised after the config is loaded
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for a level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (emoji, colour) = Self::decoration(record.level());
        let _ = writeln!(
            std::io::stderr(),
            "\x1B[{}m{} {} {}\x1B[0m",
            colour, now, emoji, record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up ANTHROPIC_API_KEY / BASE_URL from .env before clap reads the environment
    dotenv::dotenv().ok();

    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "bisub", &mut std::io::stdout());
        return Ok(());
    }

    let Some(input_path) = cli.input_path.clone() else {
        eprintln!("{}", CommandLineOptions::command().render_usage());
        std::process::exit(1);
    };

    let config = cli.to_config()?;
    log::set_max_level(config.log_level.to_level_filter());

    config.validate()?;
    debug!("Effective configuration: {:?}", config);

    let controller = Controller::with_config(config)?;
    controller.run(&input_path).await?;

    Ok(())
}
