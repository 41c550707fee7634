use secretree_core::OptionsError;
use secretree_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("rate limit exceeded after {attempts} attempts: {message}")]
    RateLimitExceeded { attempts: usize, message: String },
    #[error("secret {name} has no text value")]
    NonTextValue { name: String },
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl SecretsError {
    pub fn code(&self) -> &str {
        match self {
            SecretsError::Store(e) => e.code(),
            SecretsError::RateLimitExceeded { .. } => "RateLimitExceeded",
            SecretsError::NonTextValue { .. } => "NonTextSecretValue",
            SecretsError::Options(e) => e.code(),
            SecretsError::Bridge(e) => e.code(),
        }
    }

    /// Message without the classification prefix added by `Display`.
    pub fn message(&self) -> String {
        match self {
            SecretsError::Store(e) => e.message().to_string(),
            SecretsError::RateLimitExceeded { message, .. } => message.clone(),
            SecretsError::Bridge(BridgeError::Remote { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("worker output exceeded the {limit} byte ceiling")]
    OutputTooLarge { limit: usize },
    #[error("failed to start worker {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("worker i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed worker response: {0}")]
    MalformedResponse(String),
    #[error("malformed worker request: {0}")]
    MalformedRequest(String),
    #[error("unknown worker method: {0}")]
    UnknownMethod(String),
    /// An error raised inside the worker that has no local counterpart.
    #[error("{message}")]
    Remote { code: String, message: String },
}

impl BridgeError {
    pub fn code(&self) -> &str {
        match self {
            BridgeError::OutputTooLarge { .. } => "BridgeOutputTooLarge",
            BridgeError::Spawn { .. } => "BridgeSpawnFailed",
            BridgeError::Io(_) => "BridgeIoError",
            BridgeError::MalformedResponse(_) => "MalformedBridgeResponse",
            BridgeError::MalformedRequest(_) => "MalformedBridgeRequest",
            BridgeError::UnknownMethod(_) => "UnknownBridgeMethod",
            BridgeError::Remote { code, .. } => code,
        }
    }
}
