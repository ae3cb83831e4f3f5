//! External command execution.
//!
//! Steps never touch `std::process` directly: they describe a command as a
//! [`CommandSpec`] and hand it to the context's [`CommandRunner`], so tests
//! can swap in a scripted runner.

use std::fmt::{self, Display};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::harness::{StepError, StepResult};

/// Program, arguments and working directory of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    /// Exit status as displayed by the platform, e.g. `exit status: 1`
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external commands on behalf of the pipeline steps
pub trait CommandRunner {
    /// Run to completion and capture the output; `Err` only if spawning failed
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput>;

    /// Whether `program` can be found on `PATH`
    fn is_available(&self, program: &str) -> bool;

    /// Start a command without waiting for it to finish (e.g. a browser)
    fn launch(&self, spec: &CommandSpec) -> io::Result<()> {
        let output = self.run(spec)?;
        if output.success {
            Ok(())
        } else {
            Err(io::Error::other(format!("exited with {}", output.status)))
        }
    }
}

/// Runner backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        debug!("Running `{}`", spec);
        let mut command = Command::new(resolve_program(&spec.program));
        command.args(&spec.args);
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }

        let output = command.output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn is_available(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    fn launch(&self, spec: &CommandSpec) -> io::Result<()> {
        debug!("Launching `{}`", spec);
        let mut command = Command::new(resolve_program(&spec.program));
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }
        command.spawn().map(|_| ())
    }
}

/// Full path of `program` as found on `PATH` (honouring `PATHEXT` on
/// Windows, so `npm.cmd` resolves), or the bare name when lookup fails
fn resolve_program(program: &str) -> PathBuf {
    which::which(program).unwrap_or_else(|_| PathBuf::from(program))
}

/// Run a command and turn a spawn failure or non-zero exit into a step error
pub fn run_checked(runner: &dyn CommandRunner, spec: &CommandSpec) -> StepResult<CommandOutput> {
    let output = runner.run(spec).map_err(|source| StepError::Spawn {
        program: spec.program.clone(),
        source,
    })?;
    if !output.success {
        return Err(StepError::CommandFailed {
            command: spec.to_string(),
            status: output.status.clone(),
            stderr: output.stderr.clone(),
        });
    }
    Ok(output)
}
