use std::fmt;

use secretree_core::{parse_value, split_key, ConfigValue};
use secretree_store::{
    CreateSecretRequest, CreateSecretResponse, DeleteSecretResponse, GetSecretRequest, SecretPayload,
    SecretRecord, SecretStore, Tag,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::SecretsClient;
use crate::error::SecretsError;
use crate::retry::with_rate_limit_retry;

/// Selects one secret version to read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSecretOptions {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Return the whole record instead of the decoded value.
    #[serde(default)]
    pub raw: bool,
    /// Output ceiling when read through the sync bridge.
    #[serde(default, rename = "maxBuffer", skip_serializing_if = "Option::is_none")]
    pub max_output_bytes: Option<usize>,
}

impl GetSecretOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// The store request; an explicit version wins over a stage.
    pub fn request(&self) -> GetSecretRequest {
        let (version_id, version_stage) = match (&self.version, &self.stage) {
            (Some(v), _) => (Some(v.clone()), None),
            (None, stage) => (None, stage.clone()),
        };
        GetSecretRequest {
            id: self.id.clone(),
            version_id,
            version_stage,
        }
    }
}

/// Result of [`SecretsClient::get_secret`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SecretOutput {
    Record(SecretRecord),
    Value(ConfigValue),
}

/// Value to store in a new secret.
#[derive(Clone, PartialEq)]
pub enum SecretValueInput {
    Value(ConfigValue),
    Binary(Vec<u8>),
}

impl fmt::Debug for SecretValueInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretValueInput::Value(_) => f.write_str("SecretValueInput::Value(<redacted>)"),
            SecretValueInput::Binary(b) => write!(f, "SecretValueInput::Binary(<{} bytes>)", b.len()),
        }
    }
}

impl SecretValueInput {
    fn into_payload(self) -> SecretPayload {
        match self {
            // plain text stays verbatim; text that would read back as other
            // JSON is stored quoted
            SecretValueInput::Value(ConfigValue::String(s)) => match parse_value(&s) {
                ConfigValue::String(back) if back == s => SecretPayload::String(s),
                _ => SecretPayload::String(ConfigValue::String(s).to_string()),
            },
            SecretValueInput::Value(other) => SecretPayload::String(other.to_string()),
            SecretValueInput::Binary(bytes) => SecretPayload::Binary(bytes),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSecretOptions {
    /// Path segments below the namespace/environment scope.
    pub name: Vec<String>,
    pub value: SecretValueInput,
    pub description: Option<String>,
    pub token: Option<String>,
    pub kms: Option<String>,
    pub tags: Vec<Tag>,
}

impl CreateSecretOptions {
    pub fn new<I, S>(name: I, value: ConfigValue) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into_iter().map(Into::into).collect(),
            value: SecretValueInput::Value(value),
            description: None,
            token: None,
            kms: None,
            tags: Vec::new(),
        }
    }

    /// Name given as one delimited string, e.g. `db/auth`.
    pub fn from_path(path: &str, delimiter: &str, value: ConfigValue) -> Self {
        Self::new(split_key(path, delimiter), value)
    }

    pub fn binary<I, S>(name: I, bytes: Vec<u8>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = Self::new(name, ConfigValue::Null);
        options.value = SecretValueInput::Binary(bytes);
        options
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_kms(mut self, kms: impl Into<String>) -> Self {
        self.kms = Some(kms.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag {
            key: key.into(),
            value: value.into(),
        });
        self
    }
}

impl<S> SecretsClient<S>
where
    S: SecretStore,
{
    /// Read one secret by name or ARN.
    pub async fn get_secret(&self, options: &GetSecretOptions) -> Result<SecretOutput, SecretsError> {
        let record = self.fetch_record(&options.request()).await?;
        if options.raw {
            return Ok(SecretOutput::Record(record));
        }
        decode_value(&record).map(SecretOutput::Value)
    }

    pub(crate) async fn fetch_record(&self, request: &GetSecretRequest) -> Result<SecretRecord, SecretsError> {
        debug!(id = %request.id, "fetching secret");
        with_rate_limit_retry(&self.retry, "get secret", || self.store.get_secret_value(request)).await
    }

    /// Create one secret inside this client's scope.
    pub async fn create_secret(&self, options: CreateSecretOptions) -> Result<CreateSecretResponse, SecretsError> {
        let identity = self.options.identity(options.name)?;
        let name = identity.name(self.options.delimiter());
        let request = CreateSecretRequest {
            name,
            payload: options.value.into_payload(),
            description: options.description,
            client_request_token: options.token,
            kms_key_id: options.kms,
            tags: options.tags,
        };
        info!(name = %request.name, "creating secret");
        Ok(self.store.create_secret(request).await?)
    }

    /// Delete one secret by name or ARN.
    pub async fn delete_secret(&self, id: &str, force: bool) -> Result<DeleteSecretResponse, SecretsError> {
        info!(id, force, "deleting secret");
        Ok(self.store.delete_secret(id, force).await?)
    }
}

/// Decoded value of a fetched record; non-JSON text is kept as a string.
pub(crate) fn decode_value(record: &SecretRecord) -> Result<ConfigValue, SecretsError> {
    let text = record.text().ok_or_else(|| SecretsError::NonTextValue {
        name: record.name.clone(),
    })?;
    Ok(parse_value(&text))
}
