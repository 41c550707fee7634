use secretree_store::{SecretListItem, SecretStore};
use tracing::debug;

use crate::client::SecretsClient;
use crate::error::SecretsError;
use crate::retry::with_rate_limit_retry;

impl<S> SecretsClient<S>
where
    S: SecretStore,
{
    /// Every secret in this client's namespace/environment scope, in store
    /// order.
    ///
    /// Pages are fetched one at a time until the store stops returning a
    /// continuation token; filtering happens after the last page.
    pub async fn list_secrets(&self) -> Result<Vec<SecretListItem>, SecretsError> {
        let filter = self.options.scope_filter()?;

        let mut secrets = Vec::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0usize;
        loop {
            let token = next_token.as_deref();
            let page = with_rate_limit_retry(&self.retry, "list secrets", || {
                self.store.list_secrets_page(token)
            })
            .await?;
            pages += 1;
            secrets.extend(page.secrets);
            match page.next_token {
                Some(t) if !t.is_empty() => next_token = Some(t),
                _ => break,
            }
        }

        let total = secrets.len();
        secrets.retain(|s| filter.matches(&s.name));
        debug!(
            pages,
            total,
            matched = secrets.len(),
            pattern = filter.pattern().unwrap_or("<none>"),
            "listed secrets"
        );
        Ok(secrets)
    }
}
