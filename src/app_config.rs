use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};
use url::Url;

use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
///
/// The configuration is deliberately small: everything the pipeline does
/// beyond "read file, call completion service, write file" is a knob here,
/// not logic elsewhere.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639)
    pub source_language: String,

    /// Target language code (ISO 639)
    pub target_language: String,

    /// Translation service settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Prompt template settings
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Input/output path settings
    #[serde(default)]
    pub files: FilesConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Environment variable consulted for the API credential.
///
/// Conventionally loaded from an untracked `.env` file at startup; the
/// `api_key` field in the configuration file is only a fallback.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Completion service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Service endpoint URL (any OpenAI-compatible server)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key fallback when the environment variable is not set
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Temperature parameter for text generation (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Optional cap on generated tokens; the service default applies when unset
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for transient request failures
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff base for retries (in milliseconds, doubled on each retry)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl TranslationConfig {
    /// Get the API key, preferring the process environment over the config file
    pub fn resolve_api_key(&self) -> String {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => key,
            _ => self.api_key.clone(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key: String::new(),
            temperature: default_temperature(),
            max_tokens: None,
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Prompt template configuration
///
/// The system instruction is configuration, not code: pick a named built-in
/// template, or point `template_file` at a replacement, and optionally add a
/// work-specific framing and glossary rendered into the prompt.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PromptConfig {
    /// Name of the built-in template to use
    #[serde(default = "default_template_name")]
    pub template: String,

    /// Optional path to a template file replacing the built-in text
    #[serde(default)]
    pub template_file: Option<PathBuf>,

    /// Optional name of the source work (series, film) for domain framing
    #[serde(default)]
    pub work: Option<String>,

    /// Fixed proper-noun translations appended to the prompt
    #[serde(default)]
    pub glossary: Vec<GlossaryTerm>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            template: default_template_name(),
            template_file: None,
            work: None,
            glossary: Vec::new(),
        }
    }
}

/// A fixed term translation for the prompt glossary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GlossaryTerm {
    /// Term as it appears in the source text
    pub term: String,

    /// Required translation of the term
    pub translation: String,
}

/// Input/output path configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FilesConfig {
    /// Input path used when no argument is given
    #[serde(default = "default_input_file")]
    pub default_input: String,

    /// Output path used when no argument is given
    #[serde(default = "default_output_file")]
    pub default_output: String,

    /// Suffix appended to an input argument to derive its output path
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            default_input: default_input_file(),
            default_output: default_output_file(),
            output_suffix: default_output_suffix(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_model() -> String {
    "gpt-4o-2024-08-06".to_string()
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    // A whole subtitle file goes out in one request, so the response can
    // take several minutes on longer files
    300
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_template_name() -> String {
    crate::prompt::SUBTITLE_TRANSLATOR_NAME.to_string()
}

fn default_input_file() -> String {
    "input.srt".to_string()
}

fn default_output_file() -> String {
    "output.srt".to_string()
}

fn default_output_suffix() -> String {
    ".out".to_string()
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Write the configuration to a file as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &json)
    }

    /// Load the configuration, writing a default one when the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if FileManager::file_exists(path) {
            Self::from_file(path)
        } else {
            warn!("Config file not found at {:?}, creating default config.", path);
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        crate::language_utils::validate_language_code(&self.source_language)?;
        crate::language_utils::validate_language_code(&self.target_language)?;

        // Validate the endpoint URL
        Url::parse(&self.translation.endpoint)
            .map_err(|e| anyhow!("Invalid endpoint URL '{}': {}", self.translation.endpoint, e))?;

        // Validate the credential before any request goes out
        if self.translation.resolve_api_key().is_empty() {
            return Err(anyhow!(
                "Authentication not configured: set the {} environment variable or translation.api_key",
                API_KEY_ENV
            ));
        }

        // Validate sampling parameters
        if !(0.0..=2.0).contains(&self.translation.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.translation.temperature
            ));
        }

        // The built-in template name must exist unless a file replaces it
        if self.prompt.template_file.is_none()
            && !crate::prompt::is_builtin_template(&self.prompt.template)
        {
            return Err(anyhow!(
                "Unknown prompt template '{}' (available: {})",
                self.prompt.template,
                crate::prompt::builtin_template_names().join(", ")
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "sv".to_string(),
            translation: TranslationConfig::default(),
            prompt: PromptConfig::default(),
            files: FilesConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
