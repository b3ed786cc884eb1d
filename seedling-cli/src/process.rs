//! External process execution
//!
//! Everything that shells out goes through [`ProcessRunner`] so the callers can be
//! exercised against a recording fake instead of real executables.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Environment snapshot handed to child processes
pub type EnvMap = BTreeMap<OsString, OsString>;

/// Snapshot the current process environment
///
/// Values that are not valid UTF-8 are kept as-is.
pub fn current_env() -> EnvMap {
    std::env::vars_os().collect()
}

/// Per-invocation options
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Full environment for the child. `None` inherits the parent environment.
    pub env: Option<EnvMap>,
    /// Working directory for the child. `None` uses the parent's.
    pub dir: Option<PathBuf>,
}

impl CommandOptions {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            env: None,
            dir: Some(dir.into()),
        }
    }

    pub fn with_env(mut self, env: EnvMap) -> Self {
        self.env = Some(env);
        self
    }
}

/// Captured output of a successful invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Errors raised while running an external command
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The executable could not be started at all
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The command ran and exited unsuccessfully
    #[error("`{program} {}` exited with {}: {}", .args.join(" "), exit_label(.code), .stderr.trim())]
    Failed {
        program: String,
        args: Vec<String>,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Runs a named external command to completion
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        options: CommandOptions,
    ) -> Result<ProcessOutput, ProcessError>;
}

/// Production runner backed by `duct`
///
/// The child runs on tokio's blocking pool; the returned future resolves once it exits.
/// No timeout is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuctRunner;

#[async_trait]
impl ProcessRunner for DuctRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        options: CommandOptions,
    ) -> Result<ProcessOutput, ProcessError> {
        let program = program.to_string();
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();

        tracing::debug!(program = %program, args = ?args, dir = ?options.dir, "running command");

        let spawn_program = program.clone();
        let spawn_args = args.clone();
        let joined = tokio::task::spawn_blocking(move || {
            let mut expr = duct::cmd(spawn_program.as_str(), &spawn_args)
                .stdout_capture()
                .stderr_capture()
                .unchecked();
            if let Some(dir) = options.dir {
                expr = expr.dir(dir);
            }
            if let Some(env) = options.env {
                expr = expr.full_env(env);
            }
            expr.run()
        })
        .await;

        let output = match joined {
            Ok(result) => result,
            Err(join_error) => Err(io::Error::other(join_error)),
        }
        .map_err(|source| ProcessError::Spawn {
            program: program.clone(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(ProcessError::Failed {
                program,
                args,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(ProcessOutput { stdout, stderr })
    }
}
