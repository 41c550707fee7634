use futures_util::future::join_all;
use secretree_core::{flatten, split_key, ConfigTree, ConfigValue, StoreOptions};
use secretree_store::{CreateSecretResponse, DeleteSecretResponse, SecretListItem, SecretStore};
use serde::Serialize;
use tracing::{info, warn};

use crate::client::{CreateSecretOptions, SecretsClient};
use crate::error::SecretsError;

/// A secret that [`SecretsClient::create_from_tree`] would create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSecret {
    /// Delimited path relative to the scope.
    pub key: String,
    /// Full external name.
    pub name: String,
    #[serde(skip)]
    pub value: ConfigValue,
}

/// Per-secret result of a bulk call.
#[derive(Debug)]
pub struct BulkOutcome<T> {
    pub name: String,
    pub result: Result<T, SecretsError>,
}

impl<T> BulkOutcome<T> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl<S> SecretsClient<S>
where
    S: SecretStore,
{
    /// Names and values that `create_from_tree` would create, in tree order.
    pub fn plan_from_tree(&self, tree: &ConfigTree) -> Vec<PlannedSecret> {
        plan_secrets(&self.options, tree)
    }

    /// Create one secret per leaf of `tree`, concurrently.
    ///
    /// Every secret is attempted; a failure is reported in its own outcome
    /// and does not stop the others.
    pub async fn create_from_tree(
        &self,
        tree: &ConfigTree,
        kms: Option<&str>,
    ) -> Vec<BulkOutcome<CreateSecretResponse>> {
        let delimiter = self.options.delimiter();
        let creates = self.plan_from_tree(tree).into_iter().map(|planned| {
            let mut options = CreateSecretOptions::from_path(&planned.key, delimiter, planned.value);
            if let Some(kms) = kms {
                options = options.with_kms(kms);
            }
            async move {
                BulkOutcome {
                    result: self.create_secret(options).await,
                    name: planned.name,
                }
            }
        });
        let outcomes = join_all(creates).await;
        report("create", &outcomes);
        outcomes
    }

    /// Delete every secret in this client's scope, concurrently, by ARN.
    ///
    /// Listing failures fail the call; individual delete failures are
    /// reported per secret.
    pub async fn delete_scoped(&self, force: bool) -> Result<Vec<BulkOutcome<DeleteSecretResponse>>, SecretsError> {
        let secrets = self.list_secrets().await?;
        Ok(self.delete_all(secrets, force).await)
    }

    /// Delete the given secrets concurrently, by ARN.
    pub async fn delete_all(&self, secrets: Vec<SecretListItem>, force: bool) -> Vec<BulkOutcome<DeleteSecretResponse>> {
        let deletes = secrets.into_iter().map(|item| async move {
            BulkOutcome {
                result: self.delete_secret(&item.arn, force).await,
                name: item.name,
            }
        });
        let outcomes = join_all(deletes).await;
        report("delete", &outcomes);
        outcomes
    }
}

/// One planned secret per leaf of `tree`, named within the scope of
/// `options`. Needs no store.
pub fn plan_secrets(options: &StoreOptions, tree: &ConfigTree) -> Vec<PlannedSecret> {
    let delimiter = options.delimiter();
    flatten(tree, delimiter)
        .into_iter()
        .map(|entry| PlannedSecret {
            name: options.encode_name(&split_key(&entry.key, delimiter)),
            key: entry.key,
            value: entry.value,
        })
        .collect()
}

fn report<T>(what: &str, outcomes: &[BulkOutcome<T>]) {
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        warn!(what, failed, total = outcomes.len(), "bulk operation had failures");
    } else {
        info!(what, total = outcomes.len(), "bulk operation finished");
    }
}
