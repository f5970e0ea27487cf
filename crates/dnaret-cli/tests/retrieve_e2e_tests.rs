//! End-to-end tests for the interactive retrieval flow
//!
//! A wiremock server stands in for the Firestore REST API. The file name is
//! piped on stdin, which switches the prompt to plain line reading.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const LIST_PATH: &str = "/v1/projects/test-project/databases/(default)/documents/DNA";
const QUERY_PATH: &str = "/v1/projects/test-project/databases/(default)/documents:runQuery";

/// Firestore document for the `a.jsonl` scenario
fn scenario_document() -> serde_json::Value {
    json!({
        "name": "projects/test-project/databases/(default)/documents/DNA/doc-a",
        "fields": {
            "file_name": {"stringValue": "a.jsonl"},
            "sequences_count": {"integerValue": "2"},
            "contains_target_sequence": {"booleanValue": true},
            "sequences": {"arrayValue": {"values": [
                {"mapValue": {"fields": {"sequence": {"stringValue": "ACGT"}}}},
                {"mapValue": {"fields": {"sequence": {"stringValue": "TTAA"}}}}
            ]}}
        },
        "createTime": "2024-03-01T10:00:00Z",
        "updateTime": "2024-03-01T10:00:00Z"
    })
}

async fn mount_listing(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_query(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// `dnaret` pointed at the mock server, running inside `dir`
fn dnaret(server: &MockServer, dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dnaret").unwrap();
    cmd.current_dir(dir.path())
        .env("DNARET_FIRESTORE_URL", server.uri())
        .env("DNARET_PROJECT_ID", "test-project")
        .env_remove("FIRESTORE_EMULATOR_HOST")
        .env_remove("DNARET_ACCESS_TOKEN")
        .env_remove("DNARET_OUTPUT_DIR")
        .env_remove("DNARET_COLLECTION")
        .env_remove("LOG_LEVEL");
    cmd
}

#[tokio::test]
async fn test_retrieve_scenario() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(&server, json!({"documents": [scenario_document()]})).await;

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_partial_json(json!({
            "structuredQuery": {
                "from": [{"collectionId": "DNA"}],
                "where": {"fieldFilter": {
                    "field": {"fieldPath": "file_name"},
                    "op": "EQUAL",
                    "value": {"stringValue": "a.jsonl"}
                }}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"document": scenario_document(), "readTime": "2024-03-02T00:00:00Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    dnaret(&server, &dir)
        .write_stdin("a.jsonl\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available files in database:"))
        .stdout(predicate::str::contains("File: a.jsonl"))
        .stdout(predicate::str::contains("Sequences: 2"))
        .stdout(predicate::str::contains("Has target: true"))
        .stdout(predicate::str::contains("Found 1 files in database"))
        .stdout(predicate::str::contains(
            "Successfully created extracted_sequences/a_sequences.txt with 2 DNA sequences",
        ))
        .stdout(predicate::str::contains("Process completed successfully!"));

    let exported = dir.path().join("extracted_sequences").join("a_sequences.txt");
    assert_eq!(fs::read_to_string(exported).unwrap(), "ACGTTTAA");
}

#[tokio::test]
async fn test_retrieve_trims_input() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(&server, json!({"documents": [scenario_document()]})).await;
    mount_query(&server, json!([{"document": scenario_document()}])).await;

    dnaret(&server, &dir)
        .arg("retrieve")
        .write_stdin("   a.jsonl \t\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Retrieving a.jsonl from database..."));

    assert!(dir.path().join("extracted_sequences/a_sequences.txt").exists());
}

#[tokio::test]
async fn test_retrieve_empty_collection_does_not_prompt() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(&server, json!({})).await;

    dnaret(&server, &dir)
        .write_stdin("a.jsonl\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found in database"))
        .stdout(predicate::str::contains("Enter the exact file name").not());
}

#[tokio::test]
async fn test_retrieve_unknown_file_skips_export() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(&server, json!({"documents": [scenario_document()]})).await;
    mount_query(&server, json!([{"readTime": "2024-03-02T00:00:00Z"}])).await;

    dnaret(&server, &dir)
        .write_stdin("zzz.jsonl\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("File 'zzz.jsonl' not found in database"))
        .stdout(predicate::str::contains("Failed to retrieve file from database"))
        .stdout(predicate::str::contains("Creating txt file").not());

    assert!(!dir.path().join("extracted_sequences").exists());
}

#[tokio::test]
async fn test_retrieve_blank_input() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_listing(&server, json!({"documents": [scenario_document()]})).await;

    dnaret(&server, &dir)
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No file name provided"));
}

#[tokio::test]
async fn test_retrieve_listing_error_aborts() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "Missing or insufficient permissions.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    dnaret(&server, &dir)
        .write_stdin("a.jsonl\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error listing files"))
        .stdout(predicate::str::contains("PERMISSION_DENIED"))
        .stdout(predicate::str::contains("No files found in database"));
}

#[tokio::test]
async fn test_retrieve_missing_credentials() {
    let dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("dnaret").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("DNARET_PROJECT_ID")
        .env_remove("GOOGLE_CLOUD_PROJECT")
        .env_remove("DNARET_CREDENTIALS")
        .write_stdin("a.jsonl\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error initializing Firestore client"))
        .stdout(predicate::str::contains(
            "Make sure to update service_account_key.json",
        ));
}

#[tokio::test]
async fn test_retrieve_project_from_key_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    fs::write(
        dir.path().join("service_account_key.json"),
        r#"{"type": "service_account", "project_id": "keyed-project", "client_email": "r@keyed-project.iam.gserviceaccount.com"}"#,
    )
    .unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/projects/keyed-project/databases/(default)/documents/DNA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    dnaret(&server, &dir)
        .env_remove("DNARET_PROJECT_ID")
        .env_remove("GOOGLE_CLOUD_PROJECT")
        .env_remove("DNARET_CREDENTIALS")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found in database"));
}

#[tokio::test]
async fn test_retrieve_invalid_settings_exit_normally() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    dnaret(&server, &dir)
        .env("DNARET_API_TIMEOUT_SECS", "0")
        .write_stdin("a.jsonl\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("DNA Sequence Retriever"))
        .stdout(predicate::str::contains("Error initializing Firestore client"))
        .stdout(predicate::str::contains("DNARET_API_TIMEOUT_SECS"))
        .stdout(predicate::str::contains("Enter the exact file name").not());
}

#[tokio::test]
async fn test_retrieve_authenticates_with_key_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let key = json!({
        "type": "service_account",
        "project_id": "test-project",
        "private_key_id": "k1",
        "private_key": include_str!("fixtures/test_key.pem"),
        "client_email": "reader@test-project.iam.gserviceaccount.com",
        "client_id": "1",
        "token_uri": format!("{}/token", server.uri())
    });
    fs::write(dir.path().join("service_account_key.json"), key.to_string()).unwrap();

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "minted-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(header("authorization", "Bearer minted-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [scenario_document()]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(header("authorization", "Bearer minted-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"document": scenario_document()}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    dnaret(&server, &dir)
        .env_remove("DNARET_PROJECT_ID")
        .env_remove("GOOGLE_CLOUD_PROJECT")
        .env_remove("DNARET_CREDENTIALS")
        .write_stdin("a.jsonl\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Process completed successfully!"));

    assert_eq!(
        fs::read_to_string(dir.path().join("extracted_sequences/a_sequences.txt")).unwrap(),
        "ACGTTTAA"
    );
}
