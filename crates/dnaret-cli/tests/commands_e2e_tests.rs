//! End-to-end tests for the scripted subcommands: list, fetch, config

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::{
    matchers::{header, method, path, query_param, query_param_is_missing},
    Mock, MockServer, ResponseTemplate,
};

const LIST_PATH: &str = "/v1/projects/test-project/databases/(default)/documents/Samples";
const QUERY_PATH: &str = "/v1/projects/test-project/databases/(default)/documents:runQuery";

fn document(id: &str, file_name: &str, sequences: &[&str], has_target: bool) -> serde_json::Value {
    let values: Vec<_> = sequences
        .iter()
        .map(|s| json!({"mapValue": {"fields": {"sequence": {"stringValue": s}}}}))
        .collect();

    json!({
        "name": format!("projects/test-project/databases/(default)/documents/Samples/{}", id),
        "fields": {
            "file_name": {"stringValue": file_name},
            "sequences_count": {"integerValue": sequences.len().to_string()},
            "contains_target_sequence": {"booleanValue": has_target},
            "sequences": {"arrayValue": {"values": values}}
        }
    })
}

fn dnaret(server: &MockServer, dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dnaret").unwrap();
    cmd.current_dir(dir.path())
        .env("DNARET_FIRESTORE_URL", server.uri())
        .env("DNARET_PROJECT_ID", "test-project")
        .env("DNARET_COLLECTION", "Samples")
        .env_remove("FIRESTORE_EMULATOR_HOST")
        .env_remove("DNARET_ACCESS_TOKEN")
        .env_remove("DNARET_OUTPUT_DIR");
    cmd
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_across_pages() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(query_param("pageToken", "next-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [document("d2", "dna_sequences_2.jsonl", &["GG"], false)]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(query_param_is_missing("pageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [document("d1", "dna_sequences_1.jsonl", &["A", "C"], true)],
            "nextPageToken": "next-1"
        })))
        .mount(&server)
        .await;

    dnaret(&server, &dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("File: dna_sequences_1.jsonl"))
        .stdout(predicate::str::contains("File: dna_sequences_2.jsonl"))
        .stdout(predicate::str::contains("Found 2 files in database"));
}

#[tokio::test]
async fn test_list_sends_access_token() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .and(header("authorization", "Bearer ya29.test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    dnaret(&server, &dir)
        .env("DNARET_ACCESS_TOKEN", "ya29.test-token")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found in database"));
}

#[tokio::test]
async fn test_list_server_error_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    dnaret(&server, &dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Firestore returned 500"));
}

// ============================================================================
// Fetch
// ============================================================================

#[tokio::test]
async fn test_fetch_exports_with_custom_name() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"document": document("d1", "dna_sequences_1.jsonl", &["AAA", "CCC", "GGG"], true)}
        ])))
        .mount(&server)
        .await;

    dnaret(&server, &dir)
        .args(["fetch", "dna_sequences_1.jsonl", "--output", "custom.txt", "--output-dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found file: dna_sequences_1.jsonl"))
        .stdout(predicate::str::contains("with 3 DNA sequences"));

    let exported = dir.path().join("out").join("custom.txt");
    assert_eq!(fs::read_to_string(exported).unwrap(), "AAACCCGGG");
}

#[tokio::test]
async fn test_fetch_overwrites_previous_export() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let out_dir = dir.path().join("extracted_sequences");
    fs::create_dir_all(&out_dir).unwrap();
    fs::write(out_dir.join("dna_sequences_1_sequences.txt"), "STALE-CONTENT-FROM-EARLIER").unwrap();

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"document": document("d1", "dna_sequences_1.jsonl", &["TT"], false)}
        ])))
        .mount(&server)
        .await;

    dnaret(&server, &dir)
        .args(["fetch", "dna_sequences_1.jsonl"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "extracted_sequences/dna_sequences_1_sequences.txt",
        ));

    assert_eq!(
        fs::read_to_string(out_dir.join("dna_sequences_1_sequences.txt")).unwrap(),
        "TT"
    );
}

#[tokio::test]
async fn test_fetch_not_found_fails() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"readTime": "2024-03-02T00:00:00Z"}
        ])))
        .mount(&server)
        .await;

    dnaret(&server, &dir)
        .args(["fetch", "nope.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File 'nope.jsonl' not found in database"));

    assert!(!dir.path().join("extracted_sequences").exists());
}

// ============================================================================
// Config
// ============================================================================

#[tokio::test]
async fn test_config_masks_token() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    dnaret(&server, &dir)
        .env("DNARET_ACCESS_TOKEN", "ya29.supersecretvalue")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Samples"))
        .stdout(predicate::str::contains("test-project"))
        .stdout(predicate::str::contains("****alue"))
        .stdout(predicate::str::contains("supersecret").not());
}
