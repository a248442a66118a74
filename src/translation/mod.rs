/*!
 * Translation of subtitle lines through an AI provider.
 *
 * - `core`: the translation service and its per-line outcome type
 * - `prompts`: the instruction template wrapped around each line
 */

// Re-export main types for easier usage
pub use self::core::{TranslationOutcome, TranslationService, clean_translation};
pub use self::prompts::PromptTemplate;

// Submodules
pub mod core;
pub mod prompts;
