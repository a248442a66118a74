use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

use crate::errors::AppError;

/// Application configuration.
/// Built from defaults or a JSON file, then overridden by the command line,
/// and validated before any request is sent.
#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    /// Anthropic API key. Never serialized or logged.
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Base URL of the Messages API, without the `/v1/messages` path
    #[serde(default)]
    pub base_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum number of output tokens per translation
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Optional description of the source material, e.g. "a cooking show"
    #[serde(default)]
    pub context: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// What to write when a translation is unavailable
    #[serde(default)]
    pub on_failure: MissingTranslation,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Text written in place of a translation that could not be obtained
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingTranslation {
    /// Leave the translated line empty
    #[default]
    Empty,
    /// Repeat the original text
    Original,
}

impl fmt::Display for MissingTranslation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Original => write!(f, "original"),
        }
    }
}

impl std::str::FromStr for MissingTranslation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "original" => Ok(Self::Original),
            _ => Err(anyhow!("Invalid missing-translation policy: {}", s)),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_target_language() -> String {
    "zh".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Config {
    /// Load a configuration file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config(
                "an API key is required (set ANTHROPIC_API_KEY or --api-key)".to_string(),
            ).into());
        }

        if self.base_url.trim().is_empty() {
            return Err(AppError::Config(
                "a base URL is required (set BASE_URL or --base-url)".to_string(),
            ).into());
        }

        let url = Url::parse(self.base_url.trim())
            .map_err(|e| AppError::Config(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::Config(format!(
                "base URL must use http or https, got '{}'", url.scheme()
            )).into());
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("model cannot be empty".to_string()).into());
        }

        if self.max_tokens == 0 {
            return Err(AppError::Config("max_tokens must be greater than zero".to_string()).into());
        }

        self.target_language_name()
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(())
    }

    /// English name of the target language, as used in the prompt
    pub fn target_language_name(&self) -> Result<String> {
        crate::language_utils::get_language_name(&self.target_language)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            base_url: String::new(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            target_language: default_target_language(),
            context: None,
            timeout_secs: default_timeout_secs(),
            on_failure: MissingTranslation::default(),
            log_level: LogLevel::default(),
        }
    }
}

// The API key is a secret; keep it out of debug output
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "<unset>" } else { "<redacted>" };
        f.debug_struct("Config")
            .field("api_key", &api_key)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("target_language", &self.target_language)
            .field("context", &self.context)
            .field("timeout_secs", &self.timeout_secs)
            .field("on_failure", &self.on_failure)
            .field("log_level", &self.log_level)
            .finish()
    }
}
