use std::time::Instant;

use secretree_exec::{config_sync, ConfigTree, SecretsError};
use serde_json::Value;
use tracing::debug;

use crate::exit_codes;
use crate::output::print_result;
use crate::{OutputArgs, ScopeArgs};

pub async fn get_config_cmd(
    scope: &ScopeArgs,
    output: &OutputArgs,
    all: bool,
    max_buffer: Option<usize>,
    sync: bool,
    time: bool,
) -> i32 {
    let options = match super::store_options(scope, output, all, max_buffer) {
        Ok(o) => o,
        Err(code) => return code,
    };

    let started = Instant::now();
    let result: Result<ConfigTree, SecretsError> = if sync {
        debug!("reading config through the worker bridge");
        match tokio::task::spawn_blocking(move || config_sync(&options)).await {
            Ok(r) => r,
            Err(e) => {
                crate::output::print_error(output.format, output.quiet, &format!("bridge task failed: {e}"));
                return exit_codes::RUNTIME_ERROR;
            }
        }
    } else {
        super::connect(options).await.config().await
    };
    let elapsed = started.elapsed();

    match result {
        Ok(tree) => {
            print_result(output.format, output.quiet, &Value::Object(tree));
            if time && !output.quiet {
                eprintln!("took {} ms", elapsed.as_millis());
            }
            exit_codes::SUCCESS
        }
        Err(e) => super::fail(output, &e),
    }
}
