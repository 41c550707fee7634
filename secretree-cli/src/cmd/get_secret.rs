use secretree_exec::{secret_sync, GetSecretOptions, SecretOutput, SecretsError};
use serde_json::Value;
use tracing::debug;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::{OutputArgs, ScopeArgs};

pub async fn get_secret_cmd(scope: &ScopeArgs, output: &OutputArgs, get: GetSecretOptions, sync: bool) -> i32 {
    let options = match super::store_options(scope, output, true, None) {
        Ok(o) => o,
        Err(code) => return code,
    };

    let result: Result<SecretOutput, SecretsError> = if sync {
        debug!(id = %get.id, "reading secret through the worker bridge");
        match tokio::task::spawn_blocking(move || secret_sync(&options, &get)).await {
            Ok(r) => r.map(SecretOutput::Value),
            Err(e) => {
                crate::output::print_error(output.format, output.quiet, &format!("bridge task failed: {e}"));
                return exit_codes::RUNTIME_ERROR;
            }
        }
    } else {
        super::connect(options).await.get_secret(&get).await
    };

    match result {
        // plain strings print bare so they can be piped
        Ok(SecretOutput::Value(Value::String(s))) if output.format == OutputFormat::Text => {
            if !output.quiet {
                println!("{s}");
            }
            exit_codes::SUCCESS
        }
        Ok(secret) => {
            print_result(output.format, output.quiet, &secret);
            exit_codes::SUCCESS
        }
        Err(e) => super::fail(output, &e),
    }
}
