use std::io::Cursor;
use std::sync::Arc;

use secretree_core::StoreOptions;
use secretree_exec::bridge::serve;
use secretree_exec::SecretsClient;
use secretree_store::{MemoryStore, StoreError, StoreOperation};
use serde_json::{json, Value};

async fn run(store: &Arc<MemoryStore>, request: &str) -> Value {
    let mut output = Vec::new();
    let connect = |options: StoreOptions| {
        let store = Arc::clone(store);
        async move { SecretsClient::new(store, options) }
    };
    serve(Cursor::new(format!("{request}\n")), &mut output, connect).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 1);
    serde_json::from_str(&text).unwrap()
}

fn seeded() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert("ns/dev/a/b", "1");
    store.insert("ns/dev/a/c", "pumpkins");
    store.insert("ns/prod/a/b", "2");
    store
}

#[tokio::test]
async fn serves_config() {
    let response = run(
        &seeded(),
        r#"{"method":"config","options":{"env":"dev","namespace":"ns"}}"#,
    )
    .await;
    assert_eq!(response, json!({ "config": { "a": { "b": 1, "c": "pumpkins" } } }));
}

#[tokio::test]
async fn bare_options_line_serves_config() {
    let response = run(&seeded(), r#"{"env":"prod","namespace":"ns"}"#).await;
    assert_eq!(response, json!({ "config": { "a": { "b": 2 } } }));
}

#[tokio::test]
async fn serves_get_secret() {
    let response = run(
        &seeded(),
        r#"{"method":"getSecret","options":{"env":"dev","namespace":"ns"},"arguments":{"id":"ns/dev/a/b"}}"#,
    )
    .await;
    assert_eq!(response, json!({ "config": 1 }));

    let raw = run(
        &seeded(),
        r#"{"method":"getSecret","options":{"all":true},"arguments":{"id":"ns/dev/a/c","raw":true}}"#,
    )
    .await;
    assert_eq!(raw["config"]["Name"], json!("ns/dev/a/c"));
    assert_eq!(raw["config"]["SecretString"], json!("pumpkins"));
}

#[tokio::test]
async fn store_errors_are_reported_with_codes() {
    let response = run(
        &seeded(),
        r#"{"method":"getSecret","options":{"all":true},"arguments":{"id":"missing"}}"#,
    )
    .await;
    assert_eq!(response["error"]["code"], json!("ResourceNotFoundException"));
    assert_eq!(response["error"]["kind"], json!("store"));
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_report_attempts() {
    let store = seeded();
    store.fail_next(StoreOperation::List, StoreError::RateLimited("Rate exceeded".into()), 3);
    let response = run(&store, r#"{"options":{"env":"dev","namespace":"ns"}}"#).await;
    assert_eq!(response["error"]["code"], json!("RateLimitExceeded"));
    assert_eq!(response["error"]["attempts"], json!(3));
    assert_eq!(response["error"]["message"], json!("Rate exceeded"));
}

#[tokio::test]
async fn bad_arguments_are_malformed_requests() {
    let response = run(
        &seeded(),
        r#"{"method":"getSecret","options":{"all":true},"arguments":{"raw":true}}"#,
    )
    .await;
    assert_eq!(response["error"]["code"], json!("MalformedBridgeRequest"));
}

#[cfg(feature = "aws")]
#[test]
fn worker_binary_answers_malformed_input_on_stdout() {
    let assert = assert_cmd::Command::cargo_bin("secretree-worker")
        .unwrap()
        .write_stdin("not json\n")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let response: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(response["error"]["code"], json!("MalformedBridgeRequest"));
}
