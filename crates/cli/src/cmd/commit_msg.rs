//! Implementation of the `relkit commit-msg` command, meant to be called
//! from a git `prepare-commit-msg` hook.

use std::path::Path;

use anyhow::{Context, Result};

use relkit_lib::commit_msg::prepend_version;

use crate::output::print_info;

/// Prefix the commit message in `message_file` with the current version.
///
/// A missing version is reported but is not an error, so the commit proceeds.
pub fn cmd_commit_msg(message_file: &Path, version_file: &Path) -> Result<()> {
  match prepend_version(version_file, message_file).context("Failed to tag commit message")? {
    Some(tag) => print_info(&format!("Version: {}", tag)),
    None => print_info("Version not found"),
  }

  Ok(())
}
