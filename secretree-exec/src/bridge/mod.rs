//! Blocking access to the async client through a short-lived worker process.
//!
//! Each call serialises one request line, runs the worker to completion and
//! reads a single response line from its standard output, bounded by a byte
//! ceiling.

mod command;
mod protocol;
mod worker;

use std::io::{self, Read, Write};
use std::process::Stdio;

use secretree_core::{ConfigTree, ConfigValue, StoreOptions, DEFAULT_SECRET_MAX_OUTPUT_BYTES};
use serde_json::Value;
use tracing::debug;
use zeroize::Zeroizing;

use crate::client::GetSecretOptions;
use crate::error::{BridgeError, SecretsError};

pub use command::{WorkerCommand, DEFAULT_WORKER, WORKER_ENV_VAR};
pub use protocol::{BridgeMethod, BridgeRequest, BridgeResponse, ErrorKind, WireError};
pub use worker::{handle_request, serve};

#[derive(Debug, Clone, Default)]
pub struct SyncBridge {
    worker: WorkerCommand,
}

impl SyncBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_worker(worker: WorkerCommand) -> Self {
        Self { worker }
    }

    pub fn worker(&self) -> &WorkerCommand {
        &self.worker
    }

    /// Blocking [`SecretsClient::config`](crate::SecretsClient::config).
    ///
    /// Output is bounded by the options' `max_output_bytes`.
    pub fn config(&self, options: &StoreOptions) -> Result<ConfigTree, SecretsError> {
        let request = BridgeRequest::new(BridgeMethod::Config, options, None);
        match self.call(&request, options.max_output_bytes())? {
            Value::Object(tree) => Ok(tree),
            other => Err(BridgeError::MalformedResponse(format!("expected a config object, got {other}")).into()),
        }
    }

    /// Blocking [`SecretsClient::get_secret`](crate::SecretsClient::get_secret).
    ///
    /// Output is bounded by `get.max_output_bytes`, defaulting to a small
    /// single-secret ceiling. With `raw` the record comes back in its
    /// serialised form.
    pub fn get_secret(&self, options: &StoreOptions, get: &GetSecretOptions) -> Result<ConfigValue, SecretsError> {
        let arguments = serde_json::to_value(get).map_err(|e| BridgeError::MalformedRequest(e.to_string()))?;
        let request = BridgeRequest::new(BridgeMethod::GetSecret, options, Some(arguments));
        let limit = get.max_output_bytes.unwrap_or(DEFAULT_SECRET_MAX_OUTPUT_BYTES);
        self.call(&request, limit)
    }

    /// Send one request and return the response's `config` value.
    pub fn call(&self, request: &BridgeRequest, limit: usize) -> Result<Value, SecretsError> {
        let line = serde_json::to_string(request).map_err(|e| BridgeError::MalformedRequest(e.to_string()))?;
        let output = run_worker(&self.worker, &line, limit)?;
        BridgeResponse::parse(&output)?.into_result()
    }
}

/// [`SyncBridge::config`] with the default worker.
pub fn config_sync(options: &StoreOptions) -> Result<ConfigTree, SecretsError> {
    SyncBridge::new().config(options)
}

/// [`SyncBridge::get_secret`] with the default worker.
pub fn secret_sync(options: &StoreOptions, get: &GetSecretOptions) -> Result<ConfigValue, SecretsError> {
    SyncBridge::new().get_secret(options, get)
}

fn run_worker(worker: &WorkerCommand, line: &str, limit: usize) -> Result<Zeroizing<Vec<u8>>, BridgeError> {
    let mut child = worker
        .command()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| BridgeError::Spawn {
            program: worker.program(),
            source,
        })?;
    debug!(program = %worker.program(), pid = child.id(), "started bridge worker");

    if let Some(mut stdin) = child.stdin.take() {
        let written = stdin.write_all(line.as_bytes()).and_then(|()| stdin.write_all(b"\n"));
        match written {
            // the worker may exit without reading its input
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e.into());
            }
            Ok(()) => {}
        }
    }

    let Some(stdout) = child.stdout.take() else {
        let _ = child.kill();
        let _ = child.wait();
        return Err(BridgeError::Io(io::Error::other("worker stdout was not captured")));
    };

    let mut output = Zeroizing::new(Vec::new());
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let read = stdout.take(cap).read_to_end(&mut output);
    if let Err(e) = read {
        let _ = child.kill();
        let _ = child.wait();
        return Err(e.into());
    }
    if output.len() > limit {
        let _ = child.kill();
        let _ = child.wait();
        return Err(BridgeError::OutputTooLarge { limit });
    }

    let status = child.wait()?;
    debug!(%status, bytes = output.len(), "bridge worker exited");
    if output.iter().all(u8::is_ascii_whitespace) && !status.success() {
        return Err(BridgeError::MalformedResponse(format!("worker exited with {status} and no output")));
    }
    Ok(output)
}
