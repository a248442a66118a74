/*!
 * Tests for per-line translation through a mock provider
 */

use bisub::app_config::Config;
use bisub::errors::TranslationError;
use bisub::providers::mock::MockProvider;
use bisub::translation::{TranslationOutcome, TranslationService};
use crate::common;

fn service_with(provider: MockProvider, config: &Config) -> TranslationService<MockProvider> {
    TranslationService::with_provider(provider, config).expect("service should build")
}

/// Test that a successful reply has its double quotes removed
#[tokio::test]
async fn test_translate_text_withWorkingProvider_shouldReturnCleanedText() {
    let config = common::test_config("http://localhost");
    let service = service_with(MockProvider::working(), &config);

    let outcome = service.translate_text("Hello").await;

    assert_eq!(outcome, TranslationOutcome::Translated("[TRANSLATED] Hello".to_string()));
    assert_eq!(service.provider().request_count(), 1);
}

/// Test that the reply text is otherwise kept as-is
#[tokio::test]
async fn test_translate_text_withCustomResponse_shouldKeepSingleQuotesAndSpacing() {
    let config = common::test_config("http://localhost");
    let provider = MockProvider::working().with_custom_response(|_| " \"C'est\" la vie ".to_string());
    let service = service_with(provider, &config);

    let outcome = service.translate_text("That's life").await;

    assert_eq!(outcome.text(), Some(" C'est la vie "));
}

/// Test that provider failures never escape as errors
#[tokio::test]
async fn test_translate_text_withFailingProvider_shouldReportUnavailable() {
    let config = common::test_config("http://localhost");
    let service = service_with(MockProvider::failing(), &config);

    let outcome = service.translate_text("Hello").await;

    match outcome {
        TranslationOutcome::Unavailable { reason } => assert!(reason.contains("Simulated network failure")),
        other => panic!("expected Unavailable, got {:?}", other),
    }
}

/// Test that a reply without content counts as a failure
#[tokio::test]
async fn test_translate_text_withEmptyContent_shouldReportUnavailable() {
    let config = common::test_config("http://localhost");
    let service = service_with(MockProvider::empty(), &config);

    assert!(!service.translate_text("Hello").await.is_translated());
    assert!(service.try_translate("Hello").await.is_err());
}

/// Test the prompt names the target language and quotes the line
#[tokio::test]
async fn test_translate_text_shouldSendExpectedPrompt() {
    let config = Config {
        target_language: "fr".to_string(),
        ..common::test_config("http://localhost")
    };
    let service = service_with(MockProvider::working(), &config);

    service.translate_text("Good morning").await;

    assert_eq!(
        service.provider().prompts(),
        vec!["Translate the following sentence into French.\nNo other redundant information.\n'Good morning'".to_string()]
    );
}

/// Test the optional context is prepended to the prompt
#[tokio::test]
async fn test_translate_text_withContext_shouldPrefixPrompt() {
    let config = Config {
        context: Some("a cooking show".to_string()),
        ..common::test_config("http://localhost")
    };
    let service = service_with(MockProvider::working(), &config);

    service.translate_text("Add salt").await;

    let prompts = service.provider().prompts();
    assert!(prompts[0].starts_with("This sentence is from a cooking show.\n"));
    assert!(prompts[0].contains("into Chinese."));
}

/// Test the request carries the configured model and token limit
#[test]
fn test_build_request_shouldUseConfiguredModelAndTokens() {
    let config = Config {
        model: "claude-3-haiku-20240307".to_string(),
        max_tokens: 256,
        ..common::test_config("http://localhost")
    };
    let service = service_with(MockProvider::working(), &config);

    let request = service.build_request("Hello");

    assert_eq!(request.model, "claude-3-haiku-20240307");
    assert_eq!(request.max_tokens, 256);
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, "user");
}

/// Test an unknown target language is rejected when the service is built
#[test]
fn test_with_provider_withUnknownLanguage_shouldFail() {
    let config = Config {
        target_language: "xx".to_string(),
        ..common::test_config("http://localhost")
    };

    let result = TranslationService::with_provider(MockProvider::working(), &config);

    assert!(matches!(result, Err(TranslationError::Configuration(_))));
}
