/*!
 * Runs the real controller against a fake Anthropic Messages endpoint
 */

use std::fs;
use httpmock::Method::POST;
use httpmock::MockServer;
use bisub::app_controller::Controller;
use crate::common;

/// Test the two-entry example end to end over HTTP
#[tokio::test]
async fn test_run_againstMessagesEndpoint_shouldWriteTranslatedFile() {
    let server = MockServer::start();
    let hello = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/messages")
            .header("x-api-key", "test-key")
            .body_includes("'Hello'");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"content":[{"type":"text","text":"\"你好\""}]}"#);
    });
    let world = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/messages")
            .body_includes("'World'");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"content":[{"type":"text","text":"世界"}]}"#);
    });

    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.srt", common::TWO_ENTRY_SRT).unwrap();
    let controller = Controller::with_config(common::test_config(&server.base_url()))
        .unwrap()
        .without_progress();

    let output = controller.run(&input).await.unwrap();

    hello.assert_hits(1);
    world.assert_hits(1);
    assert_eq!(output, temp_dir.path().join("a_translate.srt"));
    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "1\n00:00:00,000 --> 00:00:01,000\nHello\n你好\n\n\
         2\n00:00:01,000 --> 00:00:02,000\nWorld\n世界\n\n"
    );
}

/// Test a server error for one entry leaves only that translation empty
#[tokio::test]
async fn test_run_withServerErrorOnOneEntry_shouldKeepGoing() {
    let server = MockServer::start();
    let hello = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/messages")
            .body_includes("'Hello'");
        then.status(500)
            .body(r#"{"type":"error","error":{"type":"api_error","message":"Internal server error"}}"#);
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/messages")
            .body_includes("'World'");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"content":[{"type":"text","text":"世界"}]}"#);
    });

    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.srt", common::TWO_ENTRY_SRT).unwrap();
    let controller = Controller::with_config(common::test_config(&server.base_url()))
        .unwrap()
        .without_progress();

    let output = controller.run(&input).await.unwrap();

    hello.assert_hits(1);
    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "1\n00:00:00,000 --> 00:00:01,000\nHello\n\n\n\
         2\n00:00:01,000 --> 00:00:02,000\nWorld\n世界\n\n"
    );
}

/// Test an unreachable service still produces the file with empty translations
#[tokio::test]
async fn test_run_withUnreachableService_shouldWriteEmptyTranslations() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.srt", common::TWO_ENTRY_SRT).unwrap();
    let controller = Controller::with_config(common::test_config("http://127.0.0.1:9"))
        .unwrap()
        .without_progress();

    let output = controller.run(&input).await.unwrap();

    assert_eq!(
        fs::read_to_string(output).unwrap(),
        "1\n00:00:00,000 --> 00:00:01,000\nHello\n\n\n\
         2\n00:00:01,000 --> 00:00:02,000\nWorld\n\n\n"
    );
}
