//! External process execution behind the [`Executor`] trait.
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::{PcmError, ProcessError};

/// Result of a command execution.
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Runs external programs on behalf of provisioning steps.
///
/// Production code uses [`SystemExecutor`]; tests substitute a recording
/// implementation so step logic never spawns `git` or `edm`.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run `program` with `args`, optionally inside `dir`, capturing its
    /// output.
    ///
    /// # Errors
    ///
    /// Returns [`PcmError::Process`] wrapping [`ProcessError::Spawn`] if the
    /// program cannot be started and [`ProcessError::Failure`] if it exits
    /// non-zero.
    fn run_in(
        &self,
        dir: Option<&Path>,
        program: &str,
        args: &[&str],
    ) -> Result<ExecResult, PcmError>;

    /// Run `program` with `args` attached to the terminal, so long-running
    /// tools show their progress as they go.
    ///
    /// # Errors
    ///
    /// Same as [`Executor::run_in`]; the failure carries no captured stderr.
    fn run_streaming(&self, program: &str, args: &[&str]) -> Result<(), PcmError>;

    /// Check if a program is available on PATH (or is an existing path).
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_in(
        &self,
        dir: Option<&Path>,
        program: &str,
        args: &[&str],
    ) -> Result<ExecResult, PcmError> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        tracing::debug!("exec: {program} {}", args.join(" "));
        let output = cmd.output().map_err(|source| spawn_error(program, source))?;
        let result = ExecResult::from(output);
        if !result.success {
            return Err(ProcessError::Failure {
                program: program.to_string(),
                code: result.code,
                stderr: result.stderr.trim().to_string(),
            }
            .into());
        }
        Ok(result)
    }

    fn run_streaming(&self, program: &str, args: &[&str]) -> Result<(), PcmError> {
        tracing::debug!("exec (streaming): {program} {}", args.join(" "));
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| spawn_error(program, source))?;
        if !status.success() {
            return Err(ProcessError::Failure {
                program: program.to_string(),
                code: status.code(),
                stderr: "see output above".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

fn spawn_error(program: &str, source: std::io::Error) -> PcmError {
    ProcessError::Spawn {
        program: program.to_string(),
        source,
    }
    .into()
}
