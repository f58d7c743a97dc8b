//! External tool invocation.
//!
//! Each step that shells out builds a [`ToolInvocation`] first. The same
//! value is printed by `--dry-run` and executed by the pipeline, so the plan
//! shown to the user is exactly what runs.

use crate::bundler::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A fully resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub timeout: Duration,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, cwd: &Path, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
            timeout,
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

    /// Shell-like rendering for logs and dry runs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the command with inherited stdio and waits for it.
    ///
    /// # Errors
    ///
    /// - [`Error::CommandFailed`] if the process cannot be spawned
    /// - [`Error::ToolTimedOut`] if it outlives the timeout (the child is killed)
    /// - [`Error::ToolFailed`] on a non-zero exit status
    pub async fn run(&self) -> Result<()> {
        let command = self.command_line();
        log::info!("Running {}", command);
        log::debug!("Working directory: {}", self.cwd.display());

        let mut child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: command.clone(),
                error,
            })?;

        let status = match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(status) => status.map_err(|error| Error::CommandFailed {
                command: command.clone(),
                error,
            })?,
            Err(_) => {
                log::warn!("{} exceeded {:?}, killing it", self.program, self.timeout);
                if let Err(e) = child.kill().await {
                    log::warn!("Failed to kill {}: {}", self.program, e);
                }
                return Err(Error::ToolTimedOut {
                    command,
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if !status.success() {
            return Err(Error::ToolFailed {
                command,
                code: status.code(),
            });
        }

        log::debug!("{} finished successfully", self.program);
        Ok(())
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn quote(part: &str) -> String {
    if part.is_empty() || part.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
        format!("\"{}\"", part.replace('"', "\\\""))
    } else {
        part.to_string()
    }
}
