#![forbid(unsafe_code)]

use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;
mod utils;

pub use args::*;
use commands::Command;
use secretree_exec::GetSecretOptions;

#[derive(Debug, Parser)]
#[command(name = "secretree", version, about = "Scoped secrets as a config tree")]
struct Cli {
    #[command(subcommand)]
    command: Command,
    #[command(flatten)]
    scope: ScopeArgs,
    #[command(flatten)]
    output: OutputArgs,
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(cli.output.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command, cli.scope, cli.output));
    std::process::exit(exit_code);
}

async fn run_command(command: Command, scope: ScopeArgs, output: OutputArgs) -> i32 {
    match command {
        Command::GetConfig {
            all,
            max_buffer,
            sync,
            time,
        } => cmd::get_config::get_config_cmd(&scope, &output, all, max_buffer, sync, time).await,
        Command::GetSecret {
            id,
            version,
            stage,
            raw,
            max_buffer,
            sync,
        } => {
            let get = GetSecretOptions {
                id,
                version,
                stage,
                raw,
                max_output_bytes: max_buffer,
            };
            cmd::get_secret::get_secret_cmd(&scope, &output, get, sync).await
        }
        Command::CreateSecrets { file, kms, dry_run } => {
            cmd::create_secrets::create_secrets_cmd(&scope, &output, &file, kms.as_deref(), dry_run).await
        }
        Command::DeleteSecrets { force, dry_run, yes } => {
            cmd::delete_secrets::delete_secrets_cmd(&scope, &output, force, dry_run, yes).await
        }
    }
}
