/*!
 * Provider implementations for the translation service.
 *
 * This module contains the client for the remote translation endpoint:
 * - Anthropic: Anthropic Messages API integration
 * - Mock: deterministic in-process provider used by tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that provider implementations must follow,
/// allowing the translation service to run against the real API or a mock.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Extract the answer text from the provider response
    ///
    /// Returns `None` when the response carries no usable content.
    fn extract_text(response: &Self::Response) -> Option<String>;
}

pub mod anthropic;
pub mod mock;
