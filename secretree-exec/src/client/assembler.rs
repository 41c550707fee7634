use futures_util::future::try_join_all;
use secretree_core::{unflatten, ConfigTree, StoreOptions};
use secretree_store::{GetSecretRequest, SecretRecord, SecretStore};
use tracing::debug;

use crate::client::secret::decode_value;
use crate::client::SecretsClient;
use crate::error::SecretsError;

impl<S> SecretsClient<S>
where
    S: SecretStore,
{
    /// Fetch every scoped secret and fold them into one config tree.
    ///
    /// Values are fetched concurrently; the first failed fetch fails the
    /// whole call.
    pub async fn config(&self) -> Result<ConfigTree, SecretsError> {
        let list = self.list_secrets().await?;
        if list.is_empty() {
            return Ok(ConfigTree::new());
        }

        let fetches = list.iter().map(|item| {
            let request = GetSecretRequest::new(item.name.clone());
            async move { self.fetch_record(&request).await }
        });
        let records = try_join_all(fetches).await?;
        debug!(secrets = records.len(), "fetched secret values");

        assemble(&records, &self.options)
    }
}

/// Fold fetched records into a tree: strip each name's scope prefix, decode
/// the value and place it at the remaining path.
pub fn assemble(records: &[SecretRecord], options: &StoreOptions) -> Result<ConfigTree, SecretsError> {
    let mut pairs = Vec::with_capacity(records.len());
    for record in records {
        let key = options.strip_scope(&record.name);
        pairs.push((key, decode_value(record)?));
    }
    Ok(unflatten(pairs, options.delimiter()))
}
