use clap::Args;
use secretree_core::{OptionsError, StoreOptions};

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
    /// Debug logging on stderr (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Where secrets live: region plus namespace/environment scope.
#[derive(Debug, Args, Clone)]
pub struct ScopeArgs {
    /// AWS region (defaults to $AWS_REGION, then us-west-2).
    #[arg(long, global = true)]
    pub region: Option<String>,
    /// Environment segment (defaults to $SECRETREE_ENV).
    #[arg(long, short, global = true)]
    pub env: Option<String>,
    /// Namespace segment; repeat to build a multi-part namespace.
    #[arg(long, short, global = true)]
    pub namespace: Vec<String>,
    #[arg(long, global = true)]
    pub delimiter: Option<String>,
    /// Use a compatible endpoint instead of the regional AWS one.
    #[arg(long, global = true, hide = true)]
    pub endpoint_url: Option<String>,
}

impl ScopeArgs {
    pub fn store_options(&self, all: bool, max_output_bytes: Option<usize>) -> Result<StoreOptions, OptionsError> {
        let mut builder = StoreOptions::builder()
            .all(all)
            .namespace_parts(self.namespace.iter().cloned());
        if let Some(region) = &self.region {
            builder = builder.region(region.clone());
        }
        if let Some(env) = &self.env {
            builder = builder.environment(env.clone());
        }
        if let Some(delimiter) = &self.delimiter {
            builder = builder.delimiter(delimiter.clone());
        }
        if let Some(bytes) = max_output_bytes {
            builder = builder.max_output_bytes(bytes);
        }
        if let Some(url) = &self.endpoint_url {
            builder = builder.endpoint_url(url.clone());
        }
        builder.build()
    }
}
