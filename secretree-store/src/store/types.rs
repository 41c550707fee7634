use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecretListItem {
    pub name: String,
    #[serde(rename = "ARN")]
    pub arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_changed_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretListPage {
    pub secrets: Vec<SecretListItem>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetSecretRequest {
    pub id: String,
    pub version_id: Option<String>,
    pub version_stage: Option<String>,
}

impl GetSecretRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// A fetched secret version. Value fields are redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecretRecord {
    pub name: String,
    #[serde(rename = "ARN")]
    pub arn: String,
    pub version_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_binary: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub version_stages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}

impl SecretRecord {
    /// The secret as text: the string value, or the binary value when it is
    /// valid UTF-8.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        if let Some(s) = &self.secret_string {
            return Some(Cow::Borrowed(s));
        }
        let bytes = self.secret_binary.as_deref()?;
        std::str::from_utf8(bytes).ok().map(Cow::Borrowed)
    }
}

impl fmt::Debug for SecretRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretRecord")
            .field("name", &self.name)
            .field("arn", &self.arn)
            .field("version_id", &self.version_id)
            .field("secret_string", &self.secret_string.as_ref().map(|_| "<redacted>"))
            .field("secret_binary", &self.secret_binary.as_ref().map(|_| "<redacted>"))
            .field("version_stages", &self.version_stages)
            .field("created_date", &self.created_date)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum SecretPayload {
    String(String),
    Binary(Vec<u8>),
}

impl fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretPayload::String(_) => f.write_str("SecretPayload::String(<redacted>)"),
            SecretPayload::Binary(b) => write!(f, "SecretPayload::Binary(<{} bytes>)", b.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSecretRequest {
    pub name: String,
    pub payload: SecretPayload,
    pub description: Option<String>,
    pub client_request_token: Option<String>,
    pub kms_key_id: Option<String>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateSecretResponse {
    pub name: String,
    #[serde(rename = "ARN")]
    pub arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteSecretResponse {
    pub name: String,
    #[serde(rename = "ARN")]
    pub arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SecretRecord {
        SecretRecord {
            name: "ns/dev/db".into(),
            arn: "arn:aws:secretsmanager:us-west-2:1:secret:ns/dev/db".into(),
            version_id: "v1".into(),
            secret_string: Some("hunter2".into()),
            secret_binary: None,
            version_stages: vec!["AWSCURRENT".into()],
            created_date: None,
        }
    }

    #[test]
    fn debug_redacts_value() {
        let out = format!("{:?}", record());
        assert!(!out.contains("hunter2"));
        assert!(out.contains("<redacted>"));
    }

    #[test]
    fn serializes_in_store_casing() {
        let v = serde_json::to_value(record()).unwrap();
        assert_eq!(v["Name"], "ns/dev/db");
        assert!(v.get("ARN").is_some());
        assert_eq!(v["VersionId"], "v1");
        assert_eq!(v["SecretString"], "hunter2");
        assert!(v.get("SecretBinary").is_none());
    }

    #[test]
    fn text_falls_back_to_utf8_binary() {
        let mut r = record();
        r.secret_string = None;
        r.secret_binary = Some(b"{\"a\":1}".to_vec());
        assert_eq!(r.text().as_deref(), Some("{\"a\":1}"));
        r.secret_binary = Some(vec![0xff, 0xfe]);
        assert!(r.text().is_none());
    }
}
