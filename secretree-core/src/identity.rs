use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::OptionsError;

/// Where a secret lives: an optional scope plus a non-empty relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretIdentity {
    pub namespace: Option<String>,
    pub environment: Option<String>,
    path: Vec<String>,
}

impl SecretIdentity {
    pub fn new(
        namespace: Option<String>,
        environment: Option<String>,
        path: Vec<String>,
    ) -> Result<Self, OptionsError> {
        if path.is_empty() {
            return Err(OptionsError::EmptyPath);
        }
        Ok(Self {
            namespace,
            environment,
            path,
        })
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Full external name, joined with `delimiter`.
    pub fn name(&self, delimiter: &str) -> String {
        codec::encode(
            self.environment.as_deref(),
            self.namespace.as_deref(),
            delimiter,
            &self.path,
        )
    }
}
