//! Deploy manifest interpretation.
//!
//! A deploy manifest (`deploy-files.txt`) is read line by line. Each line
//! either updates the interpreter's environment (`version=`, `copy-to=`,
//! `filename=`), captures a command's output into a file, or names a file.
//! Every captured or named file is added to a zip archive that is created on
//! first use, finished once the manifest is exhausted, and optionally copied.

pub mod archive;
pub mod directive;
pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::consts::CURRENT_DIR;
use crate::exec::run_command;
use crate::version::{self, VersionError};

pub use archive::LazyArchive;
pub use directive::{Directive, parse_line};
pub use types::{DeployEnv, DeployError, DeployEvent, DeployOptions, DeployOutcome};

/// Interpret the manifest named by `options`.
///
/// `observer` sees a [`DeployEvent`] for each step as it happens.
pub fn run<F>(options: &DeployOptions, observer: F) -> Result<DeployOutcome, DeployError>
where
  F: FnMut(&DeployEvent<'_>),
{
  let path = options.work_dir.join(&options.manifest);
  let manifest = fs::read_to_string(&path).map_err(|source| DeployError::ManifestRead {
    path: path.clone(),
    source,
  })?;

  info!(manifest = %path.display(), "interpreting manifest");
  run_manifest(&manifest, &options.work_dir, observer)
}

/// Interpret manifest text with paths relative to `work_dir`.
pub fn run_manifest<F>(manifest: &str, work_dir: &Path, observer: F) -> Result<DeployOutcome, DeployError>
where
  F: FnMut(&DeployEvent<'_>),
{
  let mut interpreter = Interpreter::new(work_dir, observer);

  for (idx, line) in manifest.lines().enumerate() {
    let directive = parse_line(line)?;
    debug!(line = idx + 1, ?directive, "directive");
    interpreter.apply(directive)?;
  }

  interpreter.finish()
}

/// Executes directives against a [`DeployEnv`] and a [`LazyArchive`].
pub struct Interpreter<F> {
  work_dir: PathBuf,
  env: DeployEnv,
  archive: LazyArchive,
  observer: F,
}

impl<F> Interpreter<F>
where
  F: FnMut(&DeployEvent<'_>),
{
  pub fn new(work_dir: &Path, observer: F) -> Self {
    Self {
      work_dir: work_dir.to_path_buf(),
      env: DeployEnv::default(),
      archive: LazyArchive::new(),
      observer,
    }
  }

  pub fn env(&self) -> &DeployEnv {
    &self.env
  }

  /// Whether a file has been added yet.
  pub fn archive_started(&self) -> bool {
    self.archive.is_open()
  }

  /// Execute one directive.
  pub fn apply(&mut self, directive: Directive<'_>) -> Result<(), DeployError> {
    match directive {
      Directive::Blank => {}
      Directive::Version { file, pattern } => {
        let path = self.work_dir.join(file);
        let text = fs::read_to_string(&path).map_err(|source| DeployError::VersionFileRead {
          path: path.clone(),
          source,
        })?;

        let found = version::extract(&text, pattern).map_err(|e| match e {
          VersionError::NotFound { pattern } => DeployError::VersionNotFound { path, pattern },
          other => DeployError::Version(other),
        })?;

        self.env.version_info = found.info;
        self.env.version_info_regex = found.pattern;
        self.env.version = found.version;
        info!(version = %self.env.version, "version resolved");
        (self.observer)(&DeployEvent::Version {
          version: &self.env.version,
        });
      }
      Directive::CopyTo(path) => {
        self.env.copy_to = path.to_string();
        (self.observer)(&DeployEvent::CopyTo { path: &self.env.copy_to });
      }
      Directive::Filename(template) => {
        if self.archive.is_open() {
          return Err(DeployError::FilenameAfterFiles {
            archive: self.env.archive_name.clone(),
          });
        }

        self.env.archive_name = version::substitute(&self.env.version_info_regex, template, &self.env.version_info)?;
        info!(archive = %self.env.archive_name, "archive name set");
        (self.observer)(&DeployEvent::Filename {
          name: &self.env.archive_name,
        });
      }
      Directive::Capture { name, command } => {
        let output = run_command(command, &self.work_dir)?;
        let path = self.work_dir.join(name);
        fs::write(&path, output).map_err(|source| DeployError::CaptureWrite { path, source })?;
        self.include(name)?;
      }
      Directive::Include(name) => self.include(name)?,
    }

    Ok(())
  }

  fn include(&mut self, name: &str) -> Result<(), DeployError> {
    (self.observer)(&DeployEvent::Including { name });

    let archive_path = self.work_dir.join(&self.env.archive_name);
    self.archive.add(&archive_path, &self.work_dir.join(name), name)
  }

  /// Finish the archive and copy it to `copy_to` if one was set.
  pub fn finish(mut self) -> Result<DeployOutcome, DeployError> {
    let Some((archive, entries)) = self.archive.finish()? else {
      info!("no files included, archive not created");
      return Ok(DeployOutcome {
        archive: None,
        entries: Vec::new(),
        copied_to: None,
        env: self.env,
      });
    };

    let mut copied_to = None;
    if self.env.copy_to != CURRENT_DIR {
      let dest = copy_destination(&self.work_dir.join(&self.env.copy_to), &archive);
      if is_same_file(&archive, &dest) {
        warn!(dest = %dest.display(), "copy destination is the archive itself, not copying");
      } else {
        fs::copy(&archive, &dest).map_err(|source| DeployError::Copy {
          from: archive.clone(),
          to: dest.clone(),
          source,
        })?;
        info!(from = %archive.display(), to = %dest.display(), "archive copied");
        (self.observer)(&DeployEvent::Copied {
          from: &archive,
          to: &dest,
        });
        copied_to = Some(dest);
      }
    }

    Ok(DeployOutcome {
      archive: Some(archive),
      entries,
      copied_to,
      env: self.env,
    })
  }
}

/// A directory destination receives the archive under its own file name.
fn copy_destination(copy_to: &Path, archive: &Path) -> PathBuf {
  match archive.file_name() {
    Some(name) if copy_to.is_dir() => copy_to.join(name),
    _ => copy_to.to_path_buf(),
  }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
  match (fs::canonicalize(a), fs::canonicalize(b)) {
    (Ok(a), Ok(b)) => a == b,
    _ => false,
  }
}
