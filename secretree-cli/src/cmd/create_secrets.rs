use std::path::Path;

use secretree_exec::{plan_secrets, SecretsError};
use serde::Serialize;
use tracing::debug;

use crate::exit_codes;
use crate::output::{print_error, print_notice, print_result, OutputFormat};
use crate::utils::{load_tree, LoadError};
use crate::{OutputArgs, ScopeArgs};

#[derive(Serialize)]
struct CreateResult {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorResult>,
}

#[derive(Serialize)]
pub(crate) struct ErrorResult {
    pub code: String,
    pub message: String,
}

impl From<&SecretsError> for ErrorResult {
    fn from(e: &SecretsError) -> Self {
        Self {
            code: e.code().to_string(),
            message: e.message(),
        }
    }
}

pub async fn create_secrets_cmd(
    scope: &ScopeArgs,
    output: &OutputArgs,
    file: &Path,
    kms: Option<&str>,
    dry_run: bool,
) -> i32 {
    let tree = match load_tree(file) {
        Ok(t) => t,
        Err(LoadError::Read(e)) => {
            print_error(output.format, output.quiet, &format!("failed to read {}: {e}", file.display()));
            return exit_codes::RUNTIME_ERROR;
        }
        Err(LoadError::Parse) => {
            print_error(output.format, output.quiet, "input is neither valid JSON nor valid YAML");
            return exit_codes::INVALID_INPUT;
        }
        Err(LoadError::NotAMapping) => {
            print_error(output.format, output.quiet, "input must be a mapping of secret names to values");
            return exit_codes::INVALID_INPUT;
        }
    };
    let options = match super::store_options(scope, output, false, None) {
        Ok(o) => o,
        Err(code) => return code,
    };

    let plan = plan_secrets(&options, &tree);
    debug!(secrets = plan.len(), file = %file.display(), "planned secrets");
    if plan.is_empty() {
        print_notice(output.format, output.quiet, "Nothing to create");
        return exit_codes::SUCCESS;
    }
    if dry_run {
        if output.format == OutputFormat::Text {
            for p in &plan {
                print_notice(output.format, output.quiet, &format!("would create {}", p.name));
            }
        } else {
            print_result(output.format, output.quiet, &plan);
        }
        return exit_codes::SUCCESS;
    }

    let outcomes = super::connect(options).await.create_from_tree(&tree, kms).await;
    let mut failed = false;
    let mut results = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        let result = match &outcome.result {
            Ok(created) => CreateResult {
                name: outcome.name.clone(),
                arn: Some(created.arn.clone()),
                version_id: created.version_id.clone(),
                error: None,
            },
            Err(e) => {
                failed = true;
                if output.format == OutputFormat::Text {
                    print_error(
                        output.format,
                        output.quiet,
                        &format!("{}: {} ({})", outcome.name, e.message(), e.code()),
                    );
                }
                CreateResult {
                    name: outcome.name.clone(),
                    arn: None,
                    version_id: None,
                    error: Some(e.into()),
                }
            }
        };
        if result.error.is_none() {
            print_notice(output.format, output.quiet, &format!("created {}", result.name));
        }
        results.push(result);
    }
    if output.format == OutputFormat::Json {
        print_result(output.format, output.quiet, &results);
    }

    if failed {
        exit_codes::OPERATION_FAILED
    } else {
        exit_codes::SUCCESS
    }
}
