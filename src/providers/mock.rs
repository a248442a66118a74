/*!
 * Mock provider implementation for testing.
 *
 * The mock speaks the same request/response types as the Anthropic client so
 * the translation service and controller can run without network access:
 * - `MockProvider::working()` - Always succeeds, echoing the quoted subtitle text
 * - `MockProvider::intermittent(n)` - Fails every Nth request
 * - `MockProvider::failing()` - Always fails with a connection error
 * - `MockProvider::empty()` - Returns a response with no content blocks
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use parking_lot::Mutex;

use crate::errors::ProviderError;
use crate::providers::anthropic::{AnthropicRequest, AnthropicResponse};
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a translation
    Working,
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns a response without content blocks
    Empty,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Prompts received, in arrival order
    prompts: Arc<Mutex<Vec<String>>>,
    /// Custom response generator, receives the quoted subtitle text
    custom_response: Option<fn(&str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// The text between the outermost single quotes of a prompt
    pub fn quoted_text(prompt: &str) -> &str {
        match (prompt.find('\''), prompt.rfind('\'')) {
            (Some(start), Some(end)) if end > start => &prompt[start + 1..end],
            _ => prompt,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = AnthropicRequest;
    type Response = AnthropicResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        let prompt = request.messages.last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().push(prompt.clone());

        let quoted = Self::quoted_text(&prompt);
        let translate = |text: &str| match self.custom_response {
            Some(generator) => generator(text),
            None => format!("\"[TRANSLATED] {}\"", text),
        };

        match self.behavior {
            MockBehavior::Working => Ok(AnthropicResponse::from_text(translate(quoted))),

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 500,
                        message: format!("Simulated intermittent failure on request {}", count + 1),
                    })
                } else {
                    Ok(AnthropicResponse::from_text(translate(quoted)))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated network failure".to_string(),
            )),

            MockBehavior::Empty => Ok(AnthropicResponse {
                content: Vec::new(),
                usage: Default::default(),
            }),
        }
    }

    fn extract_text(response: &Self::Response) -> Option<String> {
        response.content.first().map(|c| c.text.clone())
    }
}
