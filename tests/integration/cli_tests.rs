/*!
 * Tests for the bisub binary: exit codes, stdout and configuration wiring
 */

use std::fs;
use std::path::Path;
use std::process::Command;
use httpmock::Method::POST;
use httpmock::MockServer;
use crate::common;

fn bisub() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_bisub"));
    command.env_remove("ANTHROPIC_API_KEY")
        .env_remove("BASE_URL")
        .env_remove("TRANSLATION_MODEL");
    command
}

/// Test that running without an input prints usage and exits with 1
#[test]
fn test_cli_withoutInput_shouldPrintUsageAndExitOne() {
    let temp_dir = common::create_temp_dir().unwrap();
    let output = bisub().current_dir(temp_dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    assert!(output.stdout.is_empty());
}

/// Test that a missing API key is reported before any work is done
#[test]
fn test_cli_withoutApiKey_shouldFailWithConfigurationError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.srt", common::TWO_ENTRY_SRT).unwrap();

    let output = bisub()
        .current_dir(temp_dir.path())
        .env("BASE_URL", "http://127.0.0.1:9")
        .arg(&input)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("API key is required"));
    assert!(!temp_dir.path().join("a_translate.srt").exists());
}

fn mock_messages_endpoint(server: &MockServer) {
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/messages")
            .header("x-api-key", "k")
            .body_includes("'Hello'");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"content":[{"type":"text","text":"\"你好\""}]}"#);
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/messages")
            .header("x-api-key", "k")
            .body_includes("'World'");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"content":[{"type":"text","text":"世界"}]}"#);
    });
}

const TRANSLATED_TWO_ENTRY_SRT: &str =
    "1\n00:00:00,000 --> 00:00:01,000\nHello\n你好\n\n2\n00:00:01,000 --> 00:00:02,000\nWorld\n世界\n\n";

/// Check stdout holds the JSON dump followed by the confirmation line
fn assert_success_output(stdout: &str, output_path: &Path) {
    let confirmation = format!("Generated translated SRT file: {}", output_path.display());
    let (json, rest) = stdout
        .split_once("Generated translated SRT file: ")
        .expect("stdout should contain the confirmation line");
    assert!(stdout.contains(&confirmation));
    assert_eq!(rest.trim_end(), output_path.display().to_string());

    let entries: serde_json::Value = serde_json::from_str(json.trim()).expect("stdout should start with a JSON array");
    let entries = entries.as_array().expect("JSON dump should be an array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["translated_text"], "你好");
    assert_eq!(entries[1]["translated_text"], "世界");
}

/// Test a successful run configured through environment variables
#[test]
fn test_cli_withEnvironmentConfig_shouldTranslateAndExitZero() {
    let server = MockServer::start();
    mock_messages_endpoint(&server);
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.srt", common::TWO_ENTRY_SRT).unwrap();

    let output = bisub()
        .current_dir(temp_dir.path())
        .env("BASE_URL", server.base_url())
        .env("ANTHROPIC_API_KEY", "k")
        .arg(&input)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let output_path = temp_dir.path().join("a_translate.srt");
    assert_success_output(&String::from_utf8_lossy(&output.stdout), &output_path);
    assert_eq!(fs::read_to_string(&output_path).unwrap(), TRANSLATED_TWO_ENTRY_SRT);
}

/// Test a successful run configured through a .env file in the working directory
#[test]
fn test_cli_withDotEnvFile_shouldTranslateAndExitZero() {
    let server = MockServer::start();
    mock_messages_endpoint(&server);
    let temp_dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(temp_dir.path(), "a.srt", common::TWO_ENTRY_SRT).unwrap();
    common::create_test_file(
        temp_dir.path(),
        ".env",
        &format!("BASE_URL={}\nANTHROPIC_API_KEY=k\n", server.base_url()),
    ).unwrap();

    let output = bisub()
        .current_dir(temp_dir.path())
        .arg("a.srt")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_success_output(&String::from_utf8_lossy(&output.stdout), Path::new("a_translate.srt"));
    assert_eq!(fs::read_to_string(temp_dir.path().join("a_translate.srt")).unwrap(), TRANSLATED_TWO_ENTRY_SRT);
    assert!(input.exists());
}
