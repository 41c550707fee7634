mod assembler;
mod bulk;
mod lister;
mod secret;

use secretree_core::StoreOptions;
use secretree_store::SecretStore;

use crate::retry::RetryConfig;

pub use assembler::assemble;
pub use bulk::{plan_secrets, BulkOutcome, PlannedSecret};
pub use secret::{CreateSecretOptions, GetSecretOptions, SecretOutput, SecretValueInput};

/// Scoped access to a secret store.
///
/// Every call re-reads the store; nothing is cached between calls.
pub struct SecretsClient<S> {
    store: S,
    options: StoreOptions,
    retry: RetryConfig,
}

impl<S> SecretsClient<S>
where
    S: SecretStore,
{
    pub fn new(store: S, options: StoreOptions) -> Self {
        Self {
            store,
            options,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(feature = "aws")]
impl SecretsClient<secretree_store::AwsSecretsStore> {
    /// Client backed by AWS Secrets Manager in the options' region.
    pub async fn connect(options: StoreOptions) -> Self {
        let store =
            secretree_store::AwsSecretsStore::connect(options.region(), options.endpoint_url()).await;
        Self::new(store, options)
    }
}
