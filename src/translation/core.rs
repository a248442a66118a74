/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService struct, which turns one
 * subtitle line into one provider request and reports the outcome without
 * ever failing the caller.
 */

use std::time::Duration;
use log::{debug, error};

use crate::app_config::Config;
use crate::errors::{ProviderError, TranslationError};
use crate::providers::anthropic::{Anthropic, AnthropicRequest, AnthropicResponse};
use crate::providers::Provider;
use super::prompts::PromptTemplate;

/// Result of translating a single subtitle line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The provider returned a translation
    Translated(String),
    /// No translation could be obtained; `reason` holds the underlying error
    Unavailable { reason: String },
}

impl TranslationOutcome {
    pub fn is_translated(&self) -> bool {
        matches!(self, Self::Translated(_))
    }

    /// The translated text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Translated(text) => Some(text),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Remove every double quote the model wrapped around or inside its answer
pub fn clean_translation(raw: &str) -> String {
    raw.replace('"', "")
}

/// Translation service for subtitle lines
#[derive(Debug)]
pub struct TranslationService<P = Anthropic> {
    /// Provider implementation
    provider: P,

    /// Model identifier sent with every request
    model: String,

    /// Output token limit per request
    max_tokens: u32,

    /// Instruction template
    prompt: PromptTemplate,
}

impl TranslationService<Anthropic> {
    /// Create a translation service backed by the Anthropic Messages API
    pub fn new(config: &Config) -> Result<Self, TranslationError> {
        let client = Anthropic::new(
            config.api_key.clone(),
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        Self::with_provider(client, config)
    }
}

impl<P> TranslationService<P>
where
    P: Provider<Request = AnthropicRequest, Response = AnthropicResponse>,
{
    /// Create a translation service around any compatible provider
    pub fn with_provider(provider: P, config: &Config) -> Result<Self, TranslationError> {
        let target_language = config.target_language_name()
            .map_err(|e| TranslationError::Configuration(e.to_string()))?;

        Ok(Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            prompt: PromptTemplate::new(target_language, config.context.clone()),
        })
    }

    /// Access the underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Build the single-message request for one subtitle line
    pub fn build_request(&self, text: &str) -> AnthropicRequest {
        AnthropicRequest::new(self.model.clone(), self.max_tokens)
            .add_message("user", self.prompt.render(text))
    }

    /// Translate one line, propagating provider errors
    pub async fn try_translate(&self, text: &str) -> Result<String, ProviderError> {
        let request = self.build_request(text);
        let response = self.provider.complete(request).await?;

        let raw = P::extract_text(&response)
            .ok_or_else(|| ProviderError::ParseError("response contained no content".to_string()))?;

        Ok(clean_translation(&raw))
    }

    /// Translate one line. Failures are logged and reported as `Unavailable`.
    pub async fn translate_text(&self, text: &str) -> TranslationOutcome {
        match self.try_translate(text).await {
            Ok(translated) => {
                debug!("Translated '{}' -> '{}'", text, translated);
                TranslationOutcome::Translated(translated)
            }
            Err(e) => {
                error!("Translation error: {}", e);
                TranslationOutcome::Unavailable { reason: e.to_string() }
            }
        }
    }
}
