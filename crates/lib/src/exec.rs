//! Shell command execution.
//!
//! Commands are handed to the platform shell as a single string, so the shell
//! does the splitting into program and arguments. Execution is synchronous and
//! has no timeout.

use std::path::Path;
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum ExecError {
  /// The shell could not be spawned.
  #[error("failed to spawn `{cmd}`: {source}")]
  Spawn {
    cmd: String,
    #[source]
    source: std::io::Error,
  },

  /// Command exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  Failed { cmd: String, code: Option<i32> },

  /// Command wrote something other than UTF-8 to stdout.
  #[error("command produced non UTF-8 output: {cmd}")]
  NonUtf8 { cmd: String },
}

/// Run `cmd` in `cwd` and return its standard output untouched.
///
/// Stderr is passed through to the caller's terminal.
pub fn run_command(cmd: &str, cwd: &Path) -> Result<String, ExecError> {
  info!(cmd = %cmd, "executing command");

  let (shell_cmd, shell_args) = get_shell();

  debug!(shell = %shell_cmd, working_dir = ?cwd, "spawning process");

  let output = Command::new(shell_cmd)
    .args(shell_args)
    .arg(cmd)
    .current_dir(cwd)
    .stderr(std::process::Stdio::inherit())
    .output()
    .map_err(|source| ExecError::Spawn {
      cmd: cmd.to_string(),
      source,
    })?;

  if !output.status.success() {
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.is_empty() {
      debug!(stdout = %stdout, "command stdout");
    }

    return Err(ExecError::Failed {
      cmd: cmd.to_string(),
      code: output.status.code(),
    });
  }

  let stdout = String::from_utf8(output.stdout).map_err(|_| ExecError::NonUtf8 { cmd: cmd.to_string() })?;

  debug!(bytes = stdout.len(), "command output captured");

  Ok(stdout)
}

/// Get the shell command and arguments for the current platform.
#[cfg(unix)]
fn get_shell() -> (&'static str, &'static [&'static str]) {
  ("/bin/sh", &["-c"])
}

#[cfg(windows)]
fn get_shell() -> (&'static str, &'static [&'static str]) {
  ("cmd.exe", &["/C"])
}
