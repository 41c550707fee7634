#![forbid(unsafe_code)]

pub mod memory;
pub mod store;

#[cfg(feature = "aws")]
pub mod aws;

pub use crate::memory::{FailureSpec, MemoryStore, StoreOperation};
pub use crate::store::{
    CreateSecretRequest, CreateSecretResponse, DeleteSecretResponse, GetSecretRequest,
    SecretListItem, SecretListPage, SecretPayload, SecretRecord, SecretStore, StoreError, Tag,
};

#[cfg(feature = "aws")]
pub use crate::aws::AwsSecretsStore;
