use std::sync::Arc;

use async_trait::async_trait;

use crate::store::types::*;

/// The four operations secretree needs from a secret storage service.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch one page of the secret list, continuing from `next_token`.
    async fn list_secrets_page(&self, next_token: Option<&str>) -> Result<SecretListPage, StoreError>;

    async fn get_secret_value(&self, request: &GetSecretRequest) -> Result<SecretRecord, StoreError>;

    async fn create_secret(&self, request: CreateSecretRequest) -> Result<CreateSecretResponse, StoreError>;

    /// Delete a secret. Without `force` the store keeps it in a recovery window.
    async fn delete_secret(&self, id: &str, force: bool) -> Result<DeleteSecretResponse, StoreError>;
}

#[async_trait]
impl<S> SecretStore for Arc<S>
where
    S: SecretStore + ?Sized,
{
    async fn list_secrets_page(&self, next_token: Option<&str>) -> Result<SecretListPage, StoreError> {
        (**self).list_secrets_page(next_token).await
    }

    async fn get_secret_value(&self, request: &GetSecretRequest) -> Result<SecretRecord, StoreError> {
        (**self).get_secret_value(request).await
    }

    async fn create_secret(&self, request: CreateSecretRequest) -> Result<CreateSecretResponse, StoreError> {
        (**self).create_secret(request).await
    }

    async fn delete_secret(&self, id: &str, force: bool) -> Result<DeleteSecretResponse, StoreError> {
        (**self).delete_secret(id, force).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AccessDenied(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    RateLimited(String),
    #[error("{code}: {message}")]
    Service { code: String, message: String },
    #[error("store error: {0}")]
    Other(String),
}

impl StoreError {
    /// Error code in the store's own vocabulary.
    pub fn code(&self) -> &str {
        match self {
            StoreError::NotFound(_) => "ResourceNotFoundException",
            StoreError::AccessDenied(_) => "AccessDeniedException",
            StoreError::Validation(_) => "ValidationException",
            StoreError::AlreadyExists(_) => "ResourceExistsException",
            StoreError::RateLimited(_) => "ThrottlingException",
            StoreError::Service { code, .. } => code,
            StoreError::Other(_) => "StoreError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            StoreError::NotFound(m)
            | StoreError::AccessDenied(m)
            | StoreError::Validation(m)
            | StoreError::AlreadyExists(m)
            | StoreError::RateLimited(m)
            | StoreError::Other(m) => m,
            StoreError::Service { message, .. } => message,
        }
    }

    /// Classify a service error code. Unknown codes are kept verbatim.
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            "ResourceNotFoundException" => StoreError::NotFound(message),
            "AccessDeniedException" => StoreError::AccessDenied(message),
            "ValidationException" | "InvalidParameterException" | "InvalidRequestException" => {
                StoreError::Validation(message)
            }
            "ResourceExistsException" => StoreError::AlreadyExists(message),
            "ThrottlingException" | "Throttling" | "TooManyRequestsException" | "RequestLimitExceeded" => {
                StoreError::RateLimited(message)
            }
            "StoreError" => StoreError::Other(message),
            other => StoreError::Service {
                code: other.to_string(),
                message,
            },
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, StoreError::RateLimited(_))
    }
}
