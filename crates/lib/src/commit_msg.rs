//! Commit message tagging for the `prepare-commit-msg` git hook.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::version::{ASSEMBLY_VERSION_PATTERN, VersionError, extract};

#[derive(Debug, Error)]
pub enum CommitMsgError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error(transparent)]
  Version(#[from] VersionError),
}

/// Prepend `<version>;` to the commit message in `message_file`.
///
/// Returns the tag that was written, or `None` when `version_file` holds no
/// assembly version, in which case the message is left untouched.
pub fn prepend_version(version_file: &Path, message_file: &Path) -> Result<Option<String>, CommitMsgError> {
  let info = read(version_file)?;
  let version = match extract(&info, ASSEMBLY_VERSION_PATTERN) {
    Ok(found) => found.version,
    Err(VersionError::NotFound { .. }) => return Ok(None),
    Err(e) => return Err(e.into()),
  };

  let tag = format!("{version};");
  let message = read(message_file)?;
  fs::write(message_file, format!("{tag}\n{message}")).map_err(|source| CommitMsgError::Write {
    path: message_file.to_path_buf(),
    source,
  })?;

  info!(tag = %tag, path = %message_file.display(), "tagged commit message");
  Ok(Some(tag))
}

fn read(path: &Path) -> Result<String, CommitMsgError> {
  fs::read_to_string(path).map_err(|source| CommitMsgError::Read {
    path: path.to_path_buf(),
    source,
  })
}
