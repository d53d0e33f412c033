//! Types for deploy manifest interpretation.
//!
//! This module defines the interpreter's environment, the progress events it
//! reports, the outcome of a run and the errors that can end one.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::consts::{CURRENT_DIR, DEFAULT_ARCHIVE_NAME, MANIFEST_FILENAME};
use crate::exec::ExecError;
use crate::version::VersionError;

/// Options for a deploy run.
#[derive(Debug, Clone)]
pub struct DeployOptions {
  /// Manifest to interpret, relative to `work_dir` unless absolute.
  pub manifest: PathBuf,
  /// Directory that every path in the manifest is relative to, and where
  /// capture commands run.
  pub work_dir: PathBuf,
}

impl Default for DeployOptions {
  fn default() -> Self {
    Self {
      manifest: PathBuf::from(MANIFEST_FILENAME),
      work_dir: PathBuf::from(CURRENT_DIR),
    }
  }
}

/// Mutable state built up while a manifest is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployEnv {
  /// File name of the archive, relative to the working directory.
  pub archive_name: String,
  /// Where the finished archive is copied; `.` means nowhere.
  pub copy_to: String,
  /// Full text matched by the last `version=` directive.
  pub version_info: String,
  /// Regex used by the last `version=` directive.
  pub version_info_regex: String,
  /// First capture group of the last `version=` directive.
  pub version: String,
}

impl Default for DeployEnv {
  fn default() -> Self {
    Self {
      archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
      copy_to: CURRENT_DIR.to_string(),
      version_info: String::new(),
      version_info_regex: String::new(),
      version: String::new(),
    }
  }
}

/// Progress reported as each directive is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent<'a> {
  Version { version: &'a str },
  CopyTo { path: &'a str },
  Filename { name: &'a str },
  Including { name: &'a str },
  Copied { from: &'a Path, to: &'a Path },
}

impl std::fmt::Display for DeployEvent<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      DeployEvent::Version { version } => write!(f, "version={}", version),
      DeployEvent::CopyTo { path } => write!(f, "copy-to={}", path),
      DeployEvent::Filename { name } => write!(f, "filename={}", name),
      DeployEvent::Including { name } => write!(f, "Zipping file {}", name),
      DeployEvent::Copied { from, to } => write!(f, "Copied {} to {}", from.display(), to.display()),
    }
  }
}

/// Result of a completed deploy run.
#[derive(Debug, Serialize)]
pub struct DeployOutcome {
  /// Path of the archive, or `None` if the manifest included no files.
  pub archive: Option<PathBuf>,
  /// Entry names in the order they were added.
  pub entries: Vec<String>,
  /// Where the archive was copied, if anywhere.
  pub copied_to: Option<PathBuf>,
  /// Final interpreter state.
  pub env: DeployEnv,
}

/// Errors that can end a deploy run.
#[derive(Debug, Error)]
pub enum DeployError {
  #[error("failed to read manifest {path}: {source}")]
  ManifestRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// `version=` whose value is not `<file>=<regex>`.
  #[error("malformed version directive '{value}', expected version=<file>=<regex>")]
  MalformedVersion { value: String },

  #[error("failed to read version file {path}: {source}")]
  VersionFileRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Version not found in file {path} using {pattern}")]
  VersionNotFound { path: PathBuf, pattern: String },

  #[error(transparent)]
  Version(#[from] VersionError),

  #[error("filename needs to be specified before any files (archive '{archive}' already started)")]
  FilenameAfterFiles { archive: String },

  #[error(transparent)]
  Exec(#[from] ExecError),

  #[error("failed to write captured output to {path}: {source}")]
  CaptureWrite {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to add {path} to archive: {source}")]
  Include {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("'{name}' does not name a file")]
  InvalidEntry { name: String },

  #[error("archive error: {0}")]
  Archive(#[from] zip::result::ZipError),

  #[error("failed to copy {from} to {to}: {source}")]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl DeployError {
  /// The two failures a manifest author is expected to hit: a version that
  /// can't be found, and `filename=` after the archive was started.
  pub fn is_documented(&self) -> bool {
    matches!(
      self,
      DeployError::VersionNotFound { .. } | DeployError::FilenameAfterFiles { .. }
    )
  }
}
