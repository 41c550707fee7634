//! One-line JSON messages exchanged with the bridge worker.
//!
//! Request: `{"method": "config" | "getSecret", "options": {..}, "arguments": ..}`.
//! Response: `{"config": ..}` or `{"error": {"message", "code", ..}}`.

use secretree_core::{RawStoreOptions, StoreOptions};
use secretree_store::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BridgeError, SecretsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeMethod {
    Config,
    GetSecret,
}

impl BridgeMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            BridgeMethod::Config => "config",
            BridgeMethod::GetSecret => "getSecret",
        }
    }

    pub fn parse(name: &str) -> Result<Self, BridgeError> {
        match name {
            "config" | "configSync" => Ok(BridgeMethod::Config),
            "getSecret" | "getSecretSync" => Ok(BridgeMethod::GetSecret),
            other => Err(BridgeError::UnknownMethod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BridgeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RawStoreOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}

impl BridgeRequest {
    pub fn new(method: BridgeMethod, options: &StoreOptions, arguments: Option<Value>) -> Self {
        Self {
            method: Some(method.as_str().to_string()),
            options: Some(RawStoreOptions::from(options)),
            arguments,
        }
    }

    /// Parse one request line. An object without any of the request keys is
    /// taken to be the store options of a `config` call.
    pub fn parse(line: &str) -> Result<Self, BridgeError> {
        let value: Value =
            serde_json::from_str(line).map_err(|e| BridgeError::MalformedRequest(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(BridgeError::MalformedRequest("request is not a JSON object".into()));
        };

        let is_envelope = ["method", "options", "arguments"].iter().any(|k| map.contains_key(*k));
        if is_envelope {
            serde_json::from_value(Value::Object(map)).map_err(|e| BridgeError::MalformedRequest(e.to_string()))
        } else {
            let options: RawStoreOptions = serde_json::from_value(Value::Object(map))
                .map_err(|e| BridgeError::MalformedRequest(e.to_string()))?;
            Ok(Self {
                method: None,
                options: Some(options),
                arguments: None,
            })
        }
    }

    /// Requested method; absent means `config`.
    pub fn method(&self) -> Result<BridgeMethod, BridgeError> {
        match self.method.as_deref() {
            None | Some("") => Ok(BridgeMethod::Config),
            Some(name) => BridgeMethod::parse(name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BridgeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<WireError>,
}

impl BridgeResponse {
    pub fn ok(value: Value) -> Self {
        Self {
            config: Some(value),
            error: None,
        }
    }

    pub fn err(error: &SecretsError) -> Self {
        Self {
            config: None,
            error: Some(WireError::from(error)),
        }
    }

    /// Parse the worker's output: the first non-blank line must be a
    /// response object.
    pub fn parse(output: &[u8]) -> Result<Self, BridgeError> {
        let text = std::str::from_utf8(output).map_err(|e| BridgeError::MalformedResponse(e.to_string()))?;
        let line = text
            .lines()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| BridgeError::MalformedResponse("worker produced no output".into()))?;
        let value: Value = serde_json::from_str(line).map_err(|e| BridgeError::MalformedResponse(e.to_string()))?;
        let Value::Object(mut map) = value else {
            return Err(BridgeError::MalformedResponse("response is not a JSON object".into()));
        };

        match map.remove("error") {
            Some(Value::Null) | None => {}
            Some(error) => {
                let error: WireError =
                    serde_json::from_value(error).map_err(|e| BridgeError::MalformedResponse(e.to_string()))?;
                return Ok(Self {
                    config: None,
                    error: Some(error),
                });
            }
        }
        // `config` may legitimately be null (a secret whose value is `null`)
        match map.remove("config") {
            Some(config) => Ok(Self::ok(config)),
            None => Err(BridgeError::MalformedResponse("response has neither config nor error".into())),
        }
    }

    pub fn into_result(self) -> Result<Value, SecretsError> {
        match (self.error, self.config) {
            (Some(error), _) => Err(error.into_error()),
            (None, Some(config)) => Ok(config),
            (None, None) => Err(BridgeError::MalformedResponse("response has neither config nor error".into()).into()),
        }
    }
}

/// Which local error family a wire error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Store,
    RateLimit,
    NonText,
    Options,
    Bridge,
}

/// Serialised error. Unknown fields from other worker implementations are
/// kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    pub message: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&SecretsError> for WireError {
    fn from(error: &SecretsError) -> Self {
        let mut extra = Map::new();
        let (kind, attempts) = match error {
            SecretsError::Store(_) => (ErrorKind::Store, None),
            SecretsError::RateLimitExceeded { attempts, .. } => (ErrorKind::RateLimit, Some(*attempts)),
            SecretsError::NonTextValue { name } => {
                extra.insert("name".into(), Value::String(name.clone()));
                (ErrorKind::NonText, None)
            }
            SecretsError::Options(_) => (ErrorKind::Options, None),
            SecretsError::Bridge(_) => (ErrorKind::Bridge, None),
        };
        Self {
            message: error.message(),
            code: error.code().to_string(),
            kind: Some(kind),
            attempts,
            extra,
        }
    }
}

impl WireError {
    /// Rebuild the local error this wire error was made from.
    pub fn into_error(self) -> SecretsError {
        let kind = self.kind.or_else(|| match self.code.as_str() {
            "RateLimitExceeded" => Some(ErrorKind::RateLimit),
            _ => None,
        });
        match kind {
            Some(ErrorKind::Store) => SecretsError::Store(StoreError::from_code(&self.code, self.message)),
            Some(ErrorKind::RateLimit) => SecretsError::RateLimitExceeded {
                attempts: self.attempts.unwrap_or_default(),
                message: self.message,
            },
            Some(ErrorKind::NonText) => SecretsError::NonTextValue {
                name: self
                    .extra
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or(self.message),
            },
            Some(ErrorKind::Options) | Some(ErrorKind::Bridge) | None => SecretsError::Bridge(BridgeError::Remote {
                code: self.code,
                message: self.message,
            }),
        }
    }
}
