#![forbid(unsafe_code)]

//! Runtime side of secretree: talks to a [`SecretStore`] to list, fetch,
//! create and delete scoped secrets, folds them into a config tree, and
//! offers blocking variants through a worker process.

pub mod bridge;
pub mod client;
pub mod error;
pub mod retry;

pub use crate::bridge::{config_sync, secret_sync, SyncBridge, WorkerCommand};
pub use crate::client::{
    assemble, plan_secrets, BulkOutcome, CreateSecretOptions, GetSecretOptions, PlannedSecret, SecretOutput,
    SecretValueInput, SecretsClient,
};
pub use crate::error::{BridgeError, SecretsError};
pub use crate::retry::RetryConfig;

pub use secretree_core::{ConfigTree, ConfigValue, StoreOptions};
pub use secretree_store::SecretStore;
