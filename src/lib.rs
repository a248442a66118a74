/*!
 * # bisub - bilingual subtitles
 *
 * A Rust library that turns an SRT subtitle file into a bilingual one by
 * translating every subtitle line through the Anthropic Messages API.
 *
 * ## Features
 *
 * - Lenient SRT parsing (malformed blocks are skipped, time ranges are kept verbatim)
 * - One translation request per subtitle line, strictly in file order
 * - Failed translations never abort a run; they are reported per entry
 * - Output written next to the input as `<name>_translate.srt`
 * - ISO 639-1 and ISO 639-2 target language codes
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Subtitle parsing and bilingual serialization
 * - `translation`: Per-line translation service and prompt template
 * - `file_utils`: File system operations and output path derivation
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Anthropic API client and a mock provider for tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod translation;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, MissingTranslation};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
pub use translation::{TranslationOutcome, TranslationService};
pub use language_utils::{get_language_name, resolve_language};
pub use errors::{AppError, ProviderError, SubtitleError, TranslationError};
