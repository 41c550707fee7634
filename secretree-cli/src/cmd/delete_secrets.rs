use serde::Serialize;

use crate::cmd::create_secrets::ErrorResult;
use crate::exit_codes;
use crate::output::{print_error, print_notice, print_result, OutputFormat};
use crate::utils::confirm;
use crate::{OutputArgs, ScopeArgs};

#[derive(Serialize)]
struct DeleteResult {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    deletion_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorResult>,
}

pub async fn delete_secrets_cmd(scope: &ScopeArgs, output: &OutputArgs, force: bool, dry_run: bool, yes: bool) -> i32 {
    let options = match super::store_options(scope, output, false, None) {
        Ok(o) => o,
        Err(code) => return code,
    };
    let client = super::connect(options).await;

    let secrets = match client.list_secrets().await {
        Ok(s) => s,
        Err(e) => return super::fail(output, &e),
    };
    if secrets.is_empty() {
        print_notice(output.format, output.quiet, "Nothing to delete");
        if output.format == OutputFormat::Json {
            print_result(output.format, output.quiet, &Vec::<DeleteResult>::new());
        }
        return exit_codes::SUCCESS;
    }

    if dry_run {
        let names: Vec<&str> = secrets.iter().map(|s| s.name.as_str()).collect();
        if output.format == OutputFormat::Text {
            for name in &names {
                print_notice(output.format, output.quiet, &format!("would delete {name}"));
            }
        } else {
            print_result(output.format, output.quiet, &names);
        }
        return exit_codes::SUCCESS;
    }

    if !yes {
        if output.format == OutputFormat::Text && !output.quiet {
            for s in &secrets {
                println!("  {}", s.name);
            }
        }
        let prompt = format!("Delete {} secrets{}?", secrets.len(), if force { " permanently" } else { "" });
        match confirm(&prompt) {
            Ok(true) => {}
            Ok(false) => {
                print_notice(output.format, output.quiet, "Aborted");
                return exit_codes::SUCCESS;
            }
            Err(e) => {
                print_error(output.format, output.quiet, &format!("failed to read confirmation: {e}"));
                return exit_codes::RUNTIME_ERROR;
            }
        }
    }

    let outcomes = client.delete_all(secrets, force).await;
    let mut failed = false;
    let mut results = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        let result = match &outcome.result {
            Ok(deleted) => {
                let when = deleted.deletion_date.map(|d| d.to_rfc3339());
                let notice = match &when {
                    Some(when) if !force => format!("deleted {} (recoverable until {when})", outcome.name),
                    _ => format!("deleted {}", outcome.name),
                };
                print_notice(output.format, output.quiet, &notice);
                DeleteResult {
                    name: outcome.name.clone(),
                    deletion_date: when,
                    error: None,
                }
            }
            Err(e) => {
                failed = true;
                if output.format == OutputFormat::Text {
                    print_error(
                        output.format,
                        output.quiet,
                        &format!("{}: {} ({})", outcome.name, e.message(), e.code()),
                    );
                }
                DeleteResult {
                    name: outcome.name.clone(),
                    deletion_date: None,
                    error: Some(e.into()),
                }
            }
        };
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
