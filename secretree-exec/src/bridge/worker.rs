use std::future::Future;
use std::io::{self, BufRead, Write};

use secretree_core::StoreOptions;
use secretree_store::SecretStore;
use serde_json::Value;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::bridge::protocol::{BridgeMethod, BridgeRequest, BridgeResponse};
use crate::client::{GetSecretOptions, SecretsClient};
use crate::error::{BridgeError, SecretsError};

/// Answer one request line. `connect` builds the client from the request's
/// store options.
pub async fn handle_request<S, F, Fut>(line: &str, connect: F) -> BridgeResponse
where
    S: SecretStore,
    F: FnOnce(StoreOptions) -> Fut,
    Fut: Future<Output = SecretsClient<S>>,
{
    match dispatch(line, connect).await {
        Ok(value) => BridgeResponse::ok(value),
        Err(err) => {
            warn!(code = err.code(), "bridge request failed");
            BridgeResponse::err(&err)
        }
    }
}

async fn dispatch<S, F, Fut>(line: &str, connect: F) -> Result<Value, SecretsError>
where
    S: SecretStore,
    F: FnOnce(StoreOptions) -> Fut,
    Fut: Future<Output = SecretsClient<S>>,
{
    let request = BridgeRequest::parse(line)?;
    let method = request.method()?;
    let options = request.options.unwrap_or_default().into_options()?;
    let arguments = match method {
        BridgeMethod::Config => None,
        BridgeMethod::GetSecret => {
            let raw = request.arguments.unwrap_or(Value::Null);
            let get: GetSecretOptions =
                serde_json::from_value(raw).map_err(|e| BridgeError::MalformedRequest(e.to_string()))?;
            Some(get)
        }
    };
    debug!(method = method.as_str(), "handling bridge request");

    let client = connect(options).await;
    match arguments {
        None => Ok(Value::Object(client.config().await?)),
        Some(get) => {
            let output = client.get_secret(&get).await?;
            Ok(serde_json::to_value(output).map_err(|e| BridgeError::MalformedResponse(e.to_string()))?)
        }
    }
}

/// Read one request line from `input` and write one response line to
/// `output`.
pub async fn serve<R, W, S, F, Fut>(mut input: R, mut output: W, connect: F) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    S: SecretStore,
    F: FnOnce(StoreOptions) -> Fut,
    Fut: Future<Output = SecretsClient<S>>,
{
    let mut line = String::new();
    input.read_line(&mut line)?;

    let response = handle_request(line.trim(), connect).await;
    let text = Zeroizing::new(serde_json::to_string(&response)?);
    writeln!(output, "{}", text.as_str())?;
    output.flush()
}
