use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    #[error("delimiter must not be empty")]
    EmptyDelimiter,
    #[error("max output bytes must be greater than zero")]
    ZeroMaxOutput,
    #[error("secret path must contain at least one segment")]
    EmptyPath,
    #[error("invalid scope pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl OptionsError {
    /// Stable error code, shared with the sync bridge wire format.
    pub fn code(&self) -> &'static str {
        match self {
            OptionsError::EmptyDelimiter | OptionsError::ZeroMaxOutput => "InvalidOptions",
            OptionsError::EmptyPath => "InvalidSecretName",
            OptionsError::Pattern(_) => "InvalidScopePattern",
        }
    }
}
