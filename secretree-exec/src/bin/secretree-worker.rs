//! Bridge worker: reads one request line on stdin, answers on stdout.

use std::io;

use secretree_exec::bridge::serve;
use secretree_exec::SecretsClient;
use secretree_store::AwsSecretsStore;
use tracing_subscriber::EnvFilter;

fn main() {
    // stdout carries the response; logs go to stderr only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("secretree-worker: failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let served = runtime.block_on(serve(stdin.lock(), stdout.lock(), SecretsClient::<AwsSecretsStore>::connect));
    if let Err(e) = served {
        eprintln!("secretree-worker: {e}");
        std::process::exit(1);
    }
}
