pub mod create_secrets;
pub mod delete_secrets;
pub mod get_config;
pub mod get_secret;

use secretree_core::StoreOptions;
use secretree_exec::{BridgeError, SecretsClient, SecretsError};
use secretree_store::AwsSecretsStore;

use crate::exit_codes;
use crate::output::{print_error, print_failure};
use crate::{OutputArgs, ScopeArgs};

pub(crate) fn store_options(
    scope: &ScopeArgs,
    output: &OutputArgs,
    all: bool,
    max_output_bytes: Option<usize>,
) -> Result<StoreOptions, i32> {
    scope.store_options(all, max_output_bytes).map_err(|e| {
        print_error(output.format, output.quiet, &format!("invalid options: {e}"));
        exit_codes::INVALID_INPUT
    })
}

pub(crate) async fn connect(options: StoreOptions) -> SecretsClient<AwsSecretsStore> {
    SecretsClient::<AwsSecretsStore>::connect(options).await
}

/// Print `error` and pick the exit code for it.
pub(crate) fn fail(output: &OutputArgs, error: &SecretsError) -> i32 {
    print_failure(output.format, output.quiet, error);
    match error {
        SecretsError::Options(_) => exit_codes::INVALID_INPUT,
        SecretsError::Bridge(BridgeError::Spawn { .. } | BridgeError::Io(_)) => exit_codes::RUNTIME_ERROR,
        _ => exit_codes::OPERATION_FAILED,
    }
}
