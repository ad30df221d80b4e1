// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::language_utils::get_language_name;
use crate::pipeline::TranslationPipeline;
use crate::providers::openai::OpenAI;

mod app_config;
mod errors;
mod file_utils;
mod language_utils;
mod pipeline;
mod prompt;
mod providers;

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

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a subtitle file using an AI completion service (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Generate shell completions for srt-translate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Subtitle file to translate (defaults to the configured input path)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output path (defaults to INPUT plus the configured suffix)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// srt-translate - whole-file subtitle translation with AI
///
/// Sends a complete subtitle file to an AI completion service as a single
/// request and writes the translated file it answers with.
#[derive(Parser, Debug)]
#[command(name = "srt-translate")]
#[command(version = "1.0.0")]
#[command(about = "AI-powered whole-file subtitle translation")]
#[command(long_about = "srt-translate sends a complete subtitle file to an AI completion service
as one request and writes the translated file it answers with. The model sees
the whole file at once, so idioms, split sentences and cross-cue context are
translated together.

EXAMPLES:
    srt-translate                              # Translate input.srt to output.srt
    srt-translate episode.srt                  # Translate episode.srt to episode.srt.out
    srt-translate -o swedish.srt episode.srt   # Explicit output path
    srt-translate -m gpt-4o episode.srt        # Use a specific model
    srt-translate -s en -t sv episode.srt      # Translate from English to Swedish
    srt-translate --log-level debug episode.srt
    srt-translate completions bash > srt-translate.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

AUTHENTICATION:
    The API key is read from the OPENAI_API_KEY environment variable (an
    untracked .env file in the working directory is honored), falling back to
    translation.api_key in the config file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file to translate (defaults to the configured input path)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output path (defaults to INPUT plus the configured suffix)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");

            let mut stderr = std::io::stderr();
            let emoji = Self::get_emoji_for_level(record.level());
            let _ = match record.level() {
                Level::Error => writeln!(
                    stderr,
                    "\x1B[1;31m{} {} {}\x1B[0m",
                    now,
                    emoji,
                    record.args()
                ),
                Level::Warn => writeln!(
                    stderr,
                    "\x1B[1;33m{} {} {}\x1B[0m",
                    now,
                    emoji,
                    record.args()
                ),
                Level::Info => writeln!(
                    stderr,
                    "\x1B[1;32m{} {} {}\x1B[0m",
                    now,
                    emoji,
                    record.args()
                ),
                Level::Debug => writeln!(
                    stderr,
                    "\x1B[1;36m{} {} {}\x1B[0m",
                    now,
                    emoji,
                    record.args()
                ),
                Level::Trace => writeln!(
                    stderr,
                    "\x1B[1;35m{} {} {}\x1B[0m",
                    now,
                    emoji,
                    record.args()
                ),
            };
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Pick up OPENAI_API_KEY and friends from an untracked .env file
    let _ = dotenvy::dotenv();

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srt-translate", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args so plain
            // `srt-translate [INPUT]` works without a subcommand
            let args = TranslateArgs {
                input: cli.input,
                output: cli.output,
                model: cli.model,
                source_language: cli.source_language,
                target_language: cli.target_language,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_translate(args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    // Resolve the input/output pair for this run
    let (input, output) = FileManager::resolve_io_paths(
        options.input.as_deref(),
        options.output.as_deref(),
        &config.files,
    );

    // Expand the configured language codes to names for the prompt
    let source_language = get_language_name(&config.source_language)?;
    let target_language = get_language_name(&config.target_language)?;

    let system_prompt =
        prompt::system_prompt_from_config(&config.prompt, &source_language, &target_language)?;

    let provider = OpenAI::new_with_config(
        config.translation.resolve_api_key(),
        &config.translation.endpoint,
        config.translation.timeout_secs,
        config.translation.retry_count,
        config.translation.retry_backoff_ms,
    );

    let mut pipeline = TranslationPipeline::new(provider, &config.translation.model, system_prompt)
        .with_temperature(config.translation.temperature);
    if let Some(max_tokens) = config.translation.max_tokens {
        pipeline = pipeline.with_max_tokens(max_tokens);
    }

    info!(
        "Translating {:?} from {} to {} with model {}",
        input, source_language, target_language, config.translation.model
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Waiting for {}...", config.translation.model));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = pipeline.translate_file(&input, &output).await;
    spinner.finish_and_clear();

    let outcome = result?;
    match outcome.usage {
        Some(usage) => info!(
            "Finished: {} bytes written to {:?} ({} tokens used)",
            outcome.bytes_written, outcome.output_path, usage.total_tokens
        ),
        None => info!(
            "Finished: {} bytes written to {:?}",
            outcome.bytes_written, outcome.output_path
        ),
    }

    Ok(())
}
