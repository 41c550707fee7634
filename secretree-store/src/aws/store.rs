use async_trait::async_trait;
use aws_sdk_secretsmanager::primitives::Blob;
use aws_sdk_secretsmanager::Client;
use tracing::debug;

use crate::store::{
    CreateSecretRequest, CreateSecretResponse, DeleteSecretResponse, GetSecretRequest,
    SecretListPage, SecretPayload, SecretRecord, SecretStore, StoreError,
};

use super::convert;

pub struct AwsSecretsStore {
    client: Client,
}

impl AwsSecretsStore {
    /// Create from an existing SDK client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create with the default credential chain for `region`, optionally
    /// pointed at a compatible endpoint instead of AWS.
    pub async fn connect(region: &str, endpoint_url: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()));
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let config = loader.load().await;
        Self::new(Client::new(&config))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl SecretStore for AwsSecretsStore {
    async fn list_secrets_page(&self, next_token: Option<&str>) -> Result<SecretListPage, StoreError> {
        let resp = self
            .client
            .list_secrets()
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(convert::sdk_error)?;

        let secrets: Vec<_> = resp.secret_list().iter().map(convert::list_item).collect();
        debug!(count = secrets.len(), more = resp.next_token().is_some(), "listed secrets page");
        Ok(SecretListPage {
            secrets,
            next_token: resp.next_token().map(str::to_string),
        })
    }

    async fn get_secret_value(&self, request: &GetSecretRequest) -> Result<SecretRecord, StoreError> {
        let resp = self
            .client
            .get_secret_value()
            .secret_id(&request.id)
            .set_version_id(request.version_id.clone())
            .set_version_stage(request.version_stage.clone())
            .send()
            .await
            .map_err(convert::sdk_error)?;

        Ok(SecretRecord {
            name: resp.name().unwrap_or_default().to_string(),
            arn: resp.arn().unwrap_or_default().to_string(),
            version_id: resp.version_id().unwrap_or_default().to_string(),
            secret_string: resp.secret_string().map(str::to_string),
            secret_binary: resp.secret_binary().map(|b| b.as_ref().to_vec()),
            version_stages: resp.version_stages().to_vec(),
            created_date: resp.created_date().and_then(convert::timestamp),
        })
    }

    async fn create_secret(&self, request: CreateSecretRequest) -> Result<CreateSecretResponse, StoreError> {
        debug!(name = %request.name, "creating secret");
        let mut req = self
            .client
            .create_secret()
            .name(&request.name)
            .set_description(request.description)
            .set_client_request_token(request.client_request_token)
            .set_kms_key_id(request.kms_key_id);

        if !request.tags.is_empty() {
            req = req.set_tags(Some(request.tags.into_iter().map(convert::tag).collect()));
        }

        req = match request.payload {
            SecretPayload::String(s) => req.secret_string(s),
            SecretPayload::Binary(b) => req.secret_binary(Blob::new(b)),
        };

        let resp = req.send().await.map_err(convert::sdk_error)?;
        Ok(CreateSecretResponse {
            name: resp.name().unwrap_or(request.name.as_str()).to_string(),
            arn: resp.arn().unwrap_or_default().to_string(),
            version_id: resp.version_id().map(str::to_string),
        })
    }

    async fn delete_secret(&self, id: &str, force: bool) -> Result<DeleteSecretResponse, StoreError> {
        debug!(id, force, "deleting secret");
        let mut req = self.client.delete_secret().secret_id(id);
        if force {
            req = req.force_delete_without_recovery(true);
        }
        let resp = req.send().await.map_err(convert::sdk_error)?;
        Ok(DeleteSecretResponse {
            name: resp.name().unwrap_or_default().to_string(),
            arn: resp.arn().unwrap_or_default().to_string(),
            deletion_date: resp.deletion_date().and_then(convert::timestamp),
        })
    }
}
