//! Lazily created output archive.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::types::DeployError;

/// The archive being assembled.
///
/// Nothing touches the filesystem until the first entry is added, so a
/// manifest that includes no files leaves no archive behind.
#[derive(Default)]
pub struct LazyArchive {
  writer: Option<(PathBuf, ZipWriter<File>)>,
  entries: Vec<String>,
}

impl LazyArchive {
  pub fn new() -> Self {
    Self::default()
  }

  /// Whether the archive file has been created.
  pub fn is_open(&self) -> bool {
    self.writer.is_some()
  }

  /// Create the archive at `path` unless it already exists.
  ///
  /// Once open, later calls return the existing writer and ignore `path`.
  pub fn ensure_open(&mut self, path: &Path) -> Result<&mut ZipWriter<File>, DeployError> {
    let open = match self.writer.take() {
      Some(open) => open,
      None => {
        let file = File::create(path).map_err(|source| DeployError::Include {
          path: path.to_path_buf(),
          source,
        })?;
        info!(path = %path.display(), "creating archive");
        (path.to_path_buf(), ZipWriter::new(file))
      }
    };

    let (_, writer) = self.writer.insert(open);
    Ok(writer)
  }

  /// Add `source` under `name`, creating the archive at `archive_path` first if needed.
  ///
  /// Directories become directory entries; their contents are not added.
  pub fn add(&mut self, archive_path: &Path, source: &Path, name: &str) -> Result<(), DeployError> {
    let include_err = |source_err: io::Error| DeployError::Include {
      path: source.to_path_buf(),
      source: source_err,
    };

    let entry = entry_name(name).ok_or_else(|| DeployError::InvalidEntry { name: name.to_string() })?;
    let metadata = fs::metadata(source).map_err(include_err)?;
    let options = entry_options(&metadata);

    if metadata.is_dir() {
      let writer = self.ensure_open(archive_path)?;
      writer.add_directory(entry.as_str(), options)?;
      self.entries.push(format!("{entry}/"));
    } else {
      let mut file = File::open(source).map_err(include_err)?;
      let writer = self.ensure_open(archive_path)?;
      writer.start_file(entry.as_str(), options)?;
      let bytes = io::copy(&mut file, writer).map_err(include_err)?;
      debug!(entry = %entry, bytes, "added file to archive");
      self.entries.push(entry);
    }

    Ok(())
  }

  /// Write the central directory and close the archive.
  ///
  /// Returns the archive path and its entries, or `None` if it was never created.
  pub fn finish(self) -> Result<Option<(PathBuf, Vec<String>)>, DeployError> {
    let Some((path, writer)) = self.writer else {
      return Ok(None);
    };

    let file = writer.finish()?;
    file.sync_all().map_err(|source| DeployError::Include {
      path: path.clone(),
      source,
    })?;

    info!(path = %path.display(), entries = self.entries.len(), "archive written");
    Ok(Some((path, self.entries)))
  }
}

/// Name an archive entry after the path it was given as.
///
/// Drive prefixes, leading separators and `.` components are dropped, `..`
/// cancels the preceding component, and separators become `/`.
pub fn entry_name(name: &str) -> Option<String> {
  let mut parts: Vec<String> = Vec::new();
  for component in Path::new(name).components() {
    match component {
      Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
      Component::ParentDir => {
        if parts.last().is_some_and(|p| p != "..") {
          parts.pop();
        } else {
          parts.push("..".to_string());
        }
      }
      Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
    }
  }

  if parts.is_empty() { None } else { Some(parts.join("/")) }
}

#[cfg(unix)]
fn entry_options(metadata: &fs::Metadata) -> SimpleFileOptions {
  use std::os::unix::fs::PermissionsExt;

  SimpleFileOptions::default()
    .compression_method(CompressionMethod::Stored)
    .unix_permissions(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn entry_options(_metadata: &fs::Metadata) -> SimpleFileOptions {
  SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
}
