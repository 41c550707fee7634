use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::OptionsError;
use crate::filter::ScopeFilter;
use crate::identity::SecretIdentity;

pub const DEFAULT_DELIMITER: &str = "/";
pub const DEFAULT_REGION: &str = "us-west-2";
/// Output ceiling for a whole config fetched over the sync bridge (3 MiB).
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 3 * 1024 * 1024;
/// Output ceiling for a single secret fetched over the sync bridge.
pub const DEFAULT_SECRET_MAX_OUTPUT_BYTES: usize = 64 * 1024;
pub const REGION_ENV_VAR: &str = "AWS_REGION";
pub const ENVIRONMENT_ENV_VAR: &str = "SECRETREE_ENV";

/// Scope and transport settings for one logical client.
///
/// Immutable once built; changing scope means building new options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    region: String,
    delimiter: String,
    environment: Option<String>,
    namespace: Option<String>,
    max_output_bytes: usize,
    endpoint_url: Option<String>,
}

impl StoreOptions {
    pub fn builder() -> StoreOptionsBuilder {
        StoreOptionsBuilder::default()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn max_output_bytes(&self) -> usize {
        self.max_output_bytes
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    pub fn scope_filter(&self) -> Result<ScopeFilter, OptionsError> {
        ScopeFilter::new(&self.delimiter, self.namespace(), self.environment())
    }

    pub fn identity(&self, path: Vec<String>) -> Result<SecretIdentity, OptionsError> {
        SecretIdentity::new(self.namespace.clone(), self.environment.clone(), path)
    }

    /// Full secret name for a relative path in this scope.
    pub fn encode_name<S: AsRef<str>>(&self, segments: &[S]) -> String {
        codec::encode(self.environment(), self.namespace(), &self.delimiter, segments)
    }

    /// Relative key for a full secret name in this scope.
    pub fn strip_scope(&self, full_name: &str) -> String {
        codec::strip_scope(full_name, self.environment(), self.namespace(), &self.delimiter)
    }

    pub fn decode_name(&self, full_name: &str) -> Vec<String> {
        codec::decode(full_name, self.environment(), self.namespace(), &self.delimiter)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoreOptionsBuilder {
    region: Option<String>,
    delimiter: Option<String>,
    environment: Option<String>,
    namespace: Vec<String>,
    all: bool,
    max_output_bytes: Option<usize>,
    endpoint_url: Option<String>,
}

impl StoreOptionsBuilder {
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = vec![namespace.into()];
        self
    }

    /// Namespace given as parts; they are joined with the final delimiter.
    pub fn namespace_parts<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespace = parts.into_iter().map(Into::into).collect();
        self
    }

    /// Ignore the environment entirely and cover every environment.
    pub fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub fn max_output_bytes(mut self, bytes: usize) -> Self {
        self.max_output_bytes = Some(bytes);
        self
    }

    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Builds options, filling unset region/environment from the process
    /// environment (`AWS_REGION`, `SECRETREE_ENV`).
    pub fn build(self) -> Result<StoreOptions, OptionsError> {
        self.build_with(|key| std::env::var(key).ok())
    }

    /// Like [`build`](Self::build) but with an explicit variable lookup.
    pub fn build_with(self, lookup: impl Fn(&str) -> Option<String>) -> Result<StoreOptions, OptionsError> {
        let delimiter = self.delimiter.unwrap_or_else(|| DEFAULT_DELIMITER.to_string());
        if delimiter.is_empty() {
            return Err(OptionsError::EmptyDelimiter);
        }
        let max_output_bytes = self.max_output_bytes.unwrap_or(DEFAULT_MAX_OUTPUT_BYTES);
        if max_output_bytes == 0 {
            return Err(OptionsError::ZeroMaxOutput);
        }

        let region = non_empty(self.region)
            .or_else(|| non_empty(lookup(REGION_ENV_VAR)))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let environment = if self.all {
            None
        } else {
            non_empty(self.environment).or_else(|| non_empty(lookup(ENVIRONMENT_ENV_VAR)))
        };

        let parts: Vec<String> = self.namespace.into_iter().filter(|p| !p.is_empty()).collect();
        let namespace = if parts.is_empty() {
            None
        } else {
            Some(parts.join(&delimiter))
        };

        Ok(StoreOptions {
            region,
            delimiter,
            environment,
            namespace,
            max_output_bytes,
            endpoint_url: non_empty(self.endpoint_url),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NamespaceSpec {
    One(String),
    Parts(Vec<String>),
}

/// Serialisable form of [`StoreOptions`], as exchanged with the bridge worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStoreOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, alias = "environment", skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<NamespaceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    #[serde(default)]
    pub all: bool,
    #[serde(default, rename = "maxBuffer", skip_serializing_if = "Option::is_none")]
    pub max_buffer: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

impl RawStoreOptions {
    pub fn into_options(self) -> Result<StoreOptions, OptionsError> {
        self.into_builder().build()
    }

    pub fn into_builder(self) -> StoreOptionsBuilder {
        let mut builder = StoreOptions::builder().all(self.all);
        if let Some(region) = self.region {
            builder = builder.region(region);
        }
        if let Some(env) = self.env {
            builder = builder.environment(env);
        }
        if let Some(delimiter) = self.delimiter {
            builder = builder.delimiter(delimiter);
        }
        builder = match self.namespace {
            Some(NamespaceSpec::One(ns)) => builder.namespace(ns),
            Some(NamespaceSpec::Parts(parts)) => builder.namespace_parts(parts),
            None => builder,
        };
        if let Some(bytes) = self.max_buffer {
            builder = builder.max_output_bytes(bytes);
        }
        if let Some(url) = self.endpoint_url {
            builder = builder.endpoint_url(url);
        }
        builder
    }
}

impl From<&StoreOptions> for RawStoreOptions {
    fn from(options: &StoreOptions) -> Self {
        Self {
            region: Some(options.region.clone()),
            env: options.environment.clone(),
            namespace: options.namespace.clone().map(NamespaceSpec::One),
            delimiter: Some(options.delimiter.clone()),
            // an absent environment must stay absent on the other side
            all: options.environment.is_none(),
            max_buffer: Some(options.max_output_bytes),
            endpoint_url: options.endpoint_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_process_environment() {
        let opts = StoreOptions::builder().build_with(no_env).unwrap();
        assert_eq!(opts.region(), DEFAULT_REGION);
        assert_eq!(opts.delimiter(), "/");
        assert_eq!(opts.environment(), None);
        assert_eq!(opts.namespace(), None);
        assert_eq!(opts.max_output_bytes(), DEFAULT_MAX_OUTPUT_BYTES);
    }

    #[test]
    fn process_environment_fills_region_and_env() {
        let lookup = |key: &str| match key {
            REGION_ENV_VAR => Some("eu-west-1".to_string()),
            ENVIRONMENT_ENV_VAR => Some("staging".to_string()),
            _ => None,
        };
        let opts = StoreOptions::builder().build_with(lookup).unwrap();
        assert_eq!(opts.region(), "eu-west-1");
        assert_eq!(opts.environment(), Some("staging"));

        let explicit = StoreOptions::builder()
            .environment("production")
            .build_with(lookup)
            .unwrap();
        assert_eq!(explicit.environment(), Some("production"));
    }

    #[test]
    fn all_clears_environment() {
        let opts = StoreOptions::builder()
            .environment("dev")
            .all(true)
            .build_with(|_| Some("staging".to_string()))
            .unwrap();
        assert_eq!(opts.environment(), None);
    }

    #[test]
    fn namespace_parts_join_with_final_delimiter() {
        let opts = StoreOptions::builder()
            .namespace_parts(["org", "team"])
            .delimiter(".")
            .build_with(no_env)
            .unwrap();
        assert_eq!(opts.namespace(), Some("org.team"));
    }

    #[test]
    fn empty_delimiter_is_rejected() {
        let err = StoreOptions::builder().delimiter("").build_with(no_env).unwrap_err();
        assert_eq!(err, OptionsError::EmptyDelimiter);
    }

    #[test]
    fn zero_output_ceiling_is_rejected() {
        let err = StoreOptions::builder().max_output_bytes(0).build_with(no_env).unwrap_err();
        assert_eq!(err, OptionsError::ZeroMaxOutput);
    }

    #[test]
    fn raw_options_round_trip_keeps_scope() {
        let opts = StoreOptions::builder()
            .region("us-east-1")
            .environment("dev")
            .namespace("ns")
            .max_output_bytes(1024)
            .build_with(no_env)
            .unwrap();
        let raw = RawStoreOptions::from(&opts);
        let json = serde_json::to_value(&raw).unwrap();
        assert_eq!(json["maxBuffer"], 1024);
        assert_eq!(json["env"], "dev");
        let back: RawStoreOptions = serde_json::from_value(json).unwrap();
        assert_eq!(back.into_builder().build_with(no_env).unwrap(), opts);
    }

    #[test]
    fn raw_options_without_env_stay_unscoped() {
        let opts = StoreOptions::builder().build_with(no_env).unwrap();
        let raw = RawStoreOptions::from(&opts);
        assert!(raw.all);
        let rebuilt = raw
            .into_builder()
            .build_with(|_| Some("leaked".to_string()))
            .unwrap();
        assert_eq!(rebuilt.environment(), None);
    }

    #[test]
    fn raw_options_accept_namespace_list() {
        let raw: RawStoreOptions =
            serde_json::from_str(r#"{"namespace":["a","b"],"environment":"dev"}"#).unwrap();
        let opts = raw.into_builder().build_with(no_env).unwrap();
        assert_eq!(opts.namespace(), Some("a/b"));
        assert_eq!(opts.environment(), Some("dev"));
    }
}
