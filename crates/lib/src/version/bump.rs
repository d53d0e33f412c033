//! Assembly version bumping.
//!
//! Increments the patch component of the `AssemblyVersion` found in a set of
//! version-metadata files, rewrites both `AssemblyVersion` and
//! `AssemblyFileVersion` attributes in every file, then runs rebuild commands.

use std::fs;
use std::path::PathBuf;

use regex::{Captures, Regex};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use super::{ASSEMBLY_FILE_VERSION_PATTERN, ASSEMBLY_VERSION_PATTERN, AssemblyVersion, VersionError};
use crate::exec::{ExecError, run_command};

/// Options for the bump operation.
#[derive(Debug, Default)]
pub struct BumpOptions {
  /// Version-metadata files, relative to `work_dir`. The first one is authoritative.
  pub files: Vec<PathBuf>,
  /// Commands to run after the files are rewritten.
  pub build_commands: Vec<String>,
  /// If true, compute the new version but write nothing and run nothing.
  pub dry_run: bool,
  /// Directory that relative paths and build commands run in.
  pub work_dir: PathBuf,
}

/// Result of a successful bump.
#[derive(Debug, Serialize)]
pub struct BumpOutcome {
  pub previous: AssemblyVersion,
  pub next: AssemblyVersion,
  pub files: Vec<PathBuf>,
  /// True when the files did not all carry the same version.
  pub mismatched: bool,
  pub commands_run: Vec<String>,
}

/// Errors that can occur while bumping.
#[derive(Debug, Error)]
pub enum BumpError {
  #[error("no version files given")]
  NoFiles,

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

  #[error("could not find version in {path}")]
  VersionNotFound { path: PathBuf },

  #[error(transparent)]
  Version(#[from] VersionError),

  #[error("build command failed: {0}")]
  Build(#[from] ExecError),
}

/// Bump the patch version across `options.files`.
///
/// Every file is read and checked before any is written, so a file without a
/// version leaves all of them untouched.
pub fn bump(options: &BumpOptions) -> Result<BumpOutcome, BumpError> {
  if options.files.is_empty() {
    return Err(BumpError::NoFiles);
  }

  let version_re = Regex::new(ASSEMBLY_VERSION_PATTERN).map_err(|source| VersionError::InvalidPattern {
    pattern: ASSEMBLY_VERSION_PATTERN.to_string(),
    source,
  })?;
  let file_version_re = Regex::new(ASSEMBLY_FILE_VERSION_PATTERN).map_err(|source| VersionError::InvalidPattern {
    pattern: ASSEMBLY_FILE_VERSION_PATTERN.to_string(),
    source,
  })?;

  let mut contents = Vec::with_capacity(options.files.len());
  let mut versions = Vec::with_capacity(options.files.len());
  for file in &options.files {
    let path = options.work_dir.join(file);
    let text = fs::read_to_string(&path).map_err(|source| BumpError::Read {
      path: path.clone(),
      source,
    })?;
    let caps = version_re
      .captures(&text)
      .ok_or_else(|| BumpError::VersionNotFound { path: path.clone() })?;
    versions.push(caps[1].parse::<AssemblyVersion>()?);
    contents.push((path, text));
  }

  let previous = versions[0];
  let mismatched = versions.iter().any(|v| *v != previous);
  if mismatched {
    let listed: Vec<String> = versions.iter().map(ToString::to_string).collect();
    warn!(versions = %listed.join(", "), "versions don't match");
  }

  let next = previous.bump_patch()?;
  info!(%previous, %next, "bumping version");

  let mut commands_run = Vec::new();
  if !options.dry_run {
    for (path, text) in &contents {
      let text = rewrite(&version_re, "AssemblyVersion", text, next.patch);
      let text = rewrite(&file_version_re, "AssemblyFileVersion", &text, next.patch);
      fs::write(path, text).map_err(|source| BumpError::Write {
        path: path.clone(),
        source,
      })?;
      info!(path = %path.display(), "rewrote version");
    }

    for cmd in &options.build_commands {
      run_command(cmd, &options.work_dir)?;
      commands_run.push(cmd.clone());
    }
  }

  Ok(BumpOutcome {
    previous,
    next,
    files: contents.into_iter().map(|(path, _)| path).collect(),
    mismatched,
    commands_run,
  })
}

/// Rewrite every `attribute` occurrence to `major.minor.patch.0`.
///
/// Major and minor come from each occurrence itself; only the patch is shared.
fn rewrite(regex: &Regex, attribute: &str, text: &str, patch: u32) -> String {
  regex
    .replace_all(text, |caps: &Captures<'_>| {
      format!("[assembly: {attribute}(\"{}.{}.{patch}.0\")]", &caps[2], &caps[3])
    })
    .into_owned()
}
