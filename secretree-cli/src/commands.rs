use std::path::PathBuf;

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the config tree assembled from the scoped secrets.
    GetConfig {
        /// Ignore the environment and read every environment in the namespace.
        #[arg(long)]
        all: bool,
        /// Output ceiling in bytes for --sync.
        #[arg(long)]
        max_buffer: Option<usize>,
        /// Go through the blocking worker bridge.
        #[arg(long)]
        sync: bool,
        /// Report how long the call took on stderr.
        #[arg(long)]
        time: bool,
    },
    /// Print one secret by name or ARN.
    GetSecret {
        id: String,
        #[arg(long, conflicts_with = "stage")]
        version: Option<String>,
        #[arg(long)]
        stage: Option<String>,
        /// Print the whole record instead of the decoded value.
        #[arg(long)]
        raw: bool,
        /// Output ceiling in bytes for --sync.
        #[arg(long)]
        max_buffer: Option<usize>,
        /// Go through the blocking worker bridge.
        #[arg(long)]
        sync: bool,
    },
    /// Create one secret per leaf of a JSON or YAML file.
    CreateSecrets {
        file: PathBuf,
        /// KMS key used to encrypt the new secrets.
        #[arg(long)]
        kms: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete every secret in the current scope.
    DeleteSecrets {
        /// Delete without a recovery window.
        #[arg(long)]
        force: bool,
        #[arg(long)]
        dry_run: bool,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}
