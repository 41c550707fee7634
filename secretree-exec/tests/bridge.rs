#![cfg(unix)]

use secretree_core::StoreOptions;
use secretree_exec::bridge::{BridgeRequest, SyncBridge, WorkerCommand};
use secretree_exec::{BridgeError, GetSecretOptions, SecretsError};
use secretree_store::StoreError;
use serde_json::json;

fn sh(script: &str) -> SyncBridge {
    SyncBridge::with_worker(WorkerCommand::new("sh").arg("-c").arg(script))
}

fn options() -> StoreOptions {
    StoreOptions::builder()
        .environment("dev")
        .namespace("ns")
        .region("eu-west-1")
        .build_with(|_| None)
        .unwrap()
}

const ECHO: &str = r#"read line; printf '{"config":%s}\n' "$line""#;

#[test]
fn config_request_carries_method_and_options() {
    let tree = sh(ECHO).config(&options()).unwrap();
    assert_eq!(tree["method"], json!("config"));
    assert_eq!(tree["options"]["env"], json!("dev"));
    assert_eq!(tree["options"]["namespace"], json!("ns"));
    assert_eq!(tree["options"]["region"], json!("eu-west-1"));
    assert_eq!(tree["options"]["all"], json!(false));
}

#[test]
fn get_secret_request_carries_arguments() {
    let get = GetSecretOptions::new("ns/dev/a").stage("AWSPREVIOUS");
    let value = sh(ECHO).get_secret(&options(), &get).unwrap();
    assert_eq!(value["method"], json!("getSecret"));
    assert_eq!(value["arguments"], json!({ "id": "ns/dev/a", "stage": "AWSPREVIOUS", "raw": false }));
}

#[test]
fn config_result_is_returned() {
    let bridge = sh(r#"cat >/dev/null; echo '{"config":{"a":{"b":1}}}'"#);
    let tree = bridge.config(&options()).unwrap();
    assert_eq!(serde_json::Value::Object(tree), json!({ "a": { "b": 1 } }));
}

#[test]
fn output_over_the_ceiling_is_its_own_error() {
    let options = StoreOptions::builder()
        .environment("dev")
        .max_output_bytes(1024)
        .build_with(|_| None)
        .unwrap();
    let bridge = sh("cat >/dev/null; yes aaaaaaaa | head -c 5000");

    let err = bridge.config(&options).unwrap_err();
    assert!(matches!(err, SecretsError::Bridge(BridgeError::OutputTooLarge { limit: 1024 })));
    assert_eq!(err.code(), "BridgeOutputTooLarge");
}

#[test]
fn secret_ceiling_comes_from_get_options() {
    let mut get = GetSecretOptions::new("x");
    get.max_output_bytes = Some(16);
    let err = sh(ECHO).get_secret(&options(), &get).unwrap_err();
    assert!(matches!(err, SecretsError::Bridge(BridgeError::OutputTooLarge { limit: 16 })));
}

#[test]
fn garbage_output_is_malformed() {
    let err = sh("cat >/dev/null; echo not json").config(&options()).unwrap_err();
    assert_eq!(err.code(), "MalformedBridgeResponse");
}

#[test]
fn silent_failing_worker_is_malformed() {
    let err = sh("cat >/dev/null; exit 3").config(&options()).unwrap_err();
    assert_eq!(err.code(), "MalformedBridgeResponse");
}

#[test]
fn store_error_is_rebuilt() {
    let bridge = sh(
        r#"cat >/dev/null; echo '{"error":{"message":"gone","code":"ResourceNotFoundException","kind":"store"}}'"#,
    );
    let err = bridge.config(&options()).unwrap_err();
    assert!(matches!(err, SecretsError::Store(StoreError::NotFound(ref m)) if m == "gone"));
}

#[test]
fn rate_limit_error_is_rebuilt() {
    let bridge = sh(
        r#"cat >/dev/null; echo '{"error":{"message":"Rate exceeded","code":"RateLimitExceeded","attempts":3}}'"#,
    );
    let err = bridge.config(&options()).unwrap_err();
    assert!(matches!(err, SecretsError::RateLimitExceeded { attempts: 3, .. }));
}

#[test]
fn missing_worker_fails_to_spawn() {
    let bridge = SyncBridge::with_worker(WorkerCommand::new("/nonexistent/secretree-worker"));
    let err = bridge.config(&options()).unwrap_err();
    assert!(matches!(err, SecretsError::Bridge(BridgeError::Spawn { .. })));
}

#[test]
fn unbounded_ceiling_still_reads_output() {
    let options = StoreOptions::builder()
        .environment("dev")
        .max_output_bytes(usize::MAX)
        .build_with(|_| None)
        .unwrap();
    let tree = sh(r#"cat >/dev/null; echo '{"config":{}}'"#).config(&options).unwrap();
    assert!(tree.is_empty());
}

#[cfg(feature = "aws")]
#[test]
fn worker_binary_rejects_unknown_methods() {
    let worker = WorkerCommand::new(assert_cmd::cargo::cargo_bin("secretree-worker"));
    let request = BridgeRequest {
        method: Some("rotate".into()),
        ..Default::default()
    };
    let err = SyncBridge::with_worker(worker).call(&request, 4096).unwrap_err();
    assert_eq!(err.code(), "UnknownBridgeMethod");
    assert_eq!(err.message(), "unknown worker method: rotate");
}
