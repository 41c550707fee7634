use std::io::{self, BufRead, Write};
use std::path::Path;

use secretree_core::ConfigTree;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout is reserved for command output.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // a subscriber may already be installed (e.g. in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
pub enum LoadError {
    Read(io::Error),
    Parse,
    NotAMapping,
}

/// Read a declarative secrets file: JSON first, then YAML.
pub fn load_tree(path: &Path) -> Result<ConfigTree, LoadError> {
    let content = std::fs::read_to_string(path).map_err(LoadError::Read)?;
    let value: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(&content).map_err(|_| LoadError::Parse)?,
    };
    match value {
        Value::Object(tree) => Ok(tree),
        _ => Err(LoadError::NotAMapping),
    }
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` is a no.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
