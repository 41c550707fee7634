use std::ffi::OsString;
use std::process::Command;

/// Environment variable naming the worker program.
pub const WORKER_ENV_VAR: &str = "SECRETREE_WORKER";
pub const DEFAULT_WORKER: &str = "secretree-worker";

/// The program the bridge launches for each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl WorkerCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// `$SECRETREE_WORKER`, else `secretree-worker` from `PATH`.
    pub fn from_env() -> Self {
        match std::env::var_os(WORKER_ENV_VAR) {
            Some(program) if !program.is_empty() => Self::new(program),
            _ => Self::new(DEFAULT_WORKER),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    pub(crate) fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl Default for WorkerCommand {
    fn default() -> Self {
        Self::from_env()
    }
}
