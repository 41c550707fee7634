use secretree_exec::SecretsError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{json}");
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(result) {
                println!("{json}");
            }
        }
    }
}

/// A human-readable line; only printed in text mode.
pub fn print_notice(format: OutputFormat, quiet: bool, message: &str) {
    if quiet || format != OutputFormat::Text {
        return;
    }
    println!("{message}");
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}

pub fn print_failure(format: OutputFormat, quiet: bool, error: &SecretsError) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {} ({})", error.message(), error.code()),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": error.message(), "code": error.code()});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}
