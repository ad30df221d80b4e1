/*!
 * # srt-translate
 *
 * A Rust library for translating whole subtitle files with an AI chat
 * completion service.
 *
 * ## Features
 *
 * - Whole-file translation: the subtitle file goes out as one request and
 *   the answer is written back verbatim, so the model owns formatting,
 *   idiom handling and cross-cue context
 * - OpenAI-compatible chat completion client with bounded retry
 * - Configurable prompt templates with optional per-work glossaries
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `pipeline`: The read / translate / write pipeline
 * - `prompt`: System prompt templates and rendering
 * - `providers`: Completion service clients:
 *   - `providers::openai`: OpenAI-compatible API client
 *   - `providers::mock`: Test double with request capture
 * - `file_utils`: File system operations and path derivation
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod pipeline;
pub mod prompt;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, PipelineError, ProviderError};
pub use language_utils::get_language_name;
pub use pipeline::{TranslationOutcome, TranslationPipeline};
pub use prompt::PromptTemplate;
pub use providers::{CompletionProvider, openai::OpenAI};
