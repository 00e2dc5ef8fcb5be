//! Execution of the git command-line tool.
//!
//! The provider never talks to git directly: it goes through a [`ProcessRunner`],
//! which runs one command in a working directory and returns its exit code and
//! output lines. [`GitCli`] is the implementation that spawns the real binary;
//! tests substitute scripted runners.
//!
//! # Public API
//! - [`ProcessRunner`]: Narrow interface used by workers
//! - [`RunOutput`]: Exit code plus stdout/stderr lines
//! - [`GitCli`]: Runner spawning the configured git executable

use crate::core::error::{ProviderError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Result of one process invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    pub exit_code: i32,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl RunOutput {
    pub fn success(stdout: Vec<String>) -> Self {
        Self {
            exit_code: 0,
            stdout,
            stderr: Vec::new(),
        }
    }

    pub fn failure(exit_code: i32, stderr: Vec<String>) -> Self {
        Self {
            exit_code,
            stdout: Vec::new(),
            stderr,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Turn a non-zero exit into [`ProviderError::CommandFailed`]
    pub fn into_checked(self, command: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ProviderError::command_failed(
                command,
                self.exit_code,
                &self.stderr,
            ))
        }
    }
}

/// Runs a VCS command. Must be callable from worker threads.
pub trait ProcessRunner: Send + Sync {
    /// Run `command` with `args` inside `working_dir`.
    ///
    /// A non-zero exit is reported through [`RunOutput::exit_code`]; `Err` is
    /// reserved for failing to start the process at all.
    fn run(&self, working_dir: &Path, command: &str, args: &[String]) -> Result<RunOutput>;
}

/// Spawns the git executable
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: PathBuf,
}

impl GitCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl ProcessRunner for GitCli {
    fn run(&self, working_dir: &Path, command: &str, args: &[String]) -> Result<RunOutput> {
        log::debug!(
            "Running {} {} {} in {}",
            self.binary.display(),
            command,
            args.join(" "),
            working_dir.display()
        );

        let mut cmd = Command::new(&self.binary);
        // Keep output stable regardless of the user's configuration
        cmd.arg("-c")
            .arg("core.quotepath=false")
            .arg(command)
            .args(args)
            .current_dir(working_dir);

        let output = cmd.output().map_err(|e| {
            log::error!("Failed to spawn {}: {e}", self.binary.display());
            ProviderError::Io(e)
        })?;

        let result = RunOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: split_lines(&output.stdout),
            stderr: split_lines(&output.stderr),
        };

        if !result.is_success() {
            log::debug!(
                "git {command} exited with {}: {}",
                result.exit_code,
                result.stderr.join(" ").trim()
            );
        }

        Ok(result)
    }
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}
